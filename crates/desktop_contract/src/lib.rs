//! Shared contract types between the desktop session core and hosted app panels.
//!
//! A hosted panel receives no handshake beyond being mounted into a
//! fixed-size window body and unmounted on close; it has no visibility into
//! its own geometry or stacking position. Everything a panel may legally
//! know at mount time travels through [`AppMountContext`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a runtime-managed window, opaque to hosted panels.
pub type WindowRuntimeId = u64;

/// Stable, namespaced identifier for an application catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the
    /// `segment.segment...` policy (lowercase dotted segments, two or more).
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    let mut count = 0usize;
    for part in raw.split('.') {
        count += 1;
        if part.is_empty() || part.len() > 32 {
            return false;
        }
        let bytes = part.as_bytes();
        if !bytes[0].is_ascii_lowercase() {
            return false;
        }
        if !bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        {
            return false;
        }
        if part.ends_with('-') {
            return false;
        }
    }

    count >= 2
}

/// Requested default extent of a freshly created window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultWindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

/// Static catalog entry describing one installable application.
///
/// Descriptors are immutable at runtime and are data about code, never
/// user-editable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    /// Canonical application identifier.
    pub app_id: &'static str,
    /// Human-readable window/launcher title.
    pub display_name: &'static str,
    /// Icon reference resolved by the shell.
    pub icon_id: &'static str,
    /// Default window extent used when the launch dispatcher creates a window.
    pub default_size: DefaultWindowSize,
    /// Whether the start menu lists this entry.
    pub show_in_launcher: bool,
}

impl AppDescriptor {
    /// Returns the descriptor's identifier as a validated [`ApplicationId`].
    pub fn application_id(&self) -> ApplicationId {
        ApplicationId::trusted(self.app_id)
    }
}

/// Lifecycle events delivered to a mounted panel by the window runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppLifecycleEvent {
    /// Panel view has been mounted into a managed window.
    Mounted,
    /// Hosting window became the top of the stack.
    Focused,
    /// Hosting window lost top-of-stack status.
    Blurred,
    /// Hosting window was minimized (panel stays mounted, hidden).
    Minimized,
    /// Hosting window returned from the minimized state.
    Restored,
    /// Hosting window is about to be destroyed.
    BeforeUnmount,
}

/// Everything a hosted panel receives when mounted into a window body.
#[derive(Debug, Clone)]
pub struct AppMountContext {
    /// Runtime id of the hosting window.
    pub window_id: WindowRuntimeId,
    /// External content reference for hosted-view windows, if any.
    pub hosted_content_ref: Option<String>,
    /// Opaque launch payload forwarded from the dispatcher.
    pub launch_params: Value,
}

/// A mountable application panel module.
///
/// Implementations render their entire surface from the mount context; the
/// runtime unmounts the returned view when the window closes.
pub trait AppModule {
    /// Builds the panel view for a newly created window body.
    fn mount(&self, ctx: AppMountContext) -> View;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_id_accepts_namespaced_segments() {
        assert!(ApplicationId::new("system.calculator").is_ok());
        assert!(ApplicationId::new("vendor.suite.notes-2").is_ok());
    }

    #[test]
    fn application_id_rejects_malformed_input() {
        for raw in ["", "single", "Upper.case", "a..b", "trail-.x", "9bad.seg"] {
            assert!(ApplicationId::new(raw).is_err(), "accepted `{raw}`");
        }
    }

    #[test]
    fn descriptor_round_trips_to_application_id() {
        let descriptor = AppDescriptor {
            app_id: "system.calculator",
            display_name: "Calculator",
            icon_id: "calculator",
            default_size: DefaultWindowSize { w: 420, h: 520 },
            show_in_launcher: true,
        };
        assert_eq!(descriptor.application_id().as_str(), "system.calculator");
    }
}
