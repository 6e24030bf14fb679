//! Auxiliary user-data collections.
//!
//! Each collection persists independently and immediately on every
//! mutation under its own store key; there is no transactional grouping
//! across collections. Records carry `#[serde(default)]` so partially
//! persisted rows from older versions are default-filled on load.

use serde::{Deserialize, Serialize};

/// One saved note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Stable note id.
    pub id: u64,
    /// Note title.
    pub title: String,
    /// Note body text.
    pub body: String,
    /// Last-modified wall-clock time in ms since the epoch.
    pub updated_at_ms: u64,
}

/// One entry in the simulated user filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualFile {
    /// Virtual absolute path.
    pub path: String,
    /// Text contents.
    pub contents: String,
    /// Last-modified wall-clock time in ms since the epoch.
    pub updated_at_ms: u64,
}

/// A user-installed application record. Data, not code: installation
/// state is separate from the static catalog of descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstalledApp {
    /// Catalog id of the installed application.
    pub app_id: String,
    /// Whether the taskbar pins this entry.
    pub pinned: bool,
}

/// A user-defined catalog entry pointing at external content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomAppEntry {
    /// Stable entry id.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// External content reference opened in a hosted-view window.
    pub url: String,
    /// Icon reference.
    pub icon_id: String,
}

/// One desktop shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopShortcut {
    /// Catalog id the shortcut launches.
    pub app_id: String,
    /// Label shown under the icon.
    pub label: String,
}

/// One desktop widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Widget {
    /// Stable widget id.
    pub id: u64,
    /// Widget kind discriminator (clock, weather, ...).
    pub kind: String,
}

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationRecord {
    /// Stable notification id.
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Whether the user has seen it.
    pub read: bool,
}

/// A saved theme profile the user can re-apply as a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeProfile {
    /// Profile name.
    pub name: String,
    /// Theme preset.
    pub theme: String,
    /// Wallpaper preset id.
    pub wallpaper_id: String,
    /// Accent color in CSS hex form.
    pub accent_color: String,
}
