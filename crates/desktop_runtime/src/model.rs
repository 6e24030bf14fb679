//! Core data model for the desktop session runtime.

use desktop_contract::ApplicationId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 400;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 300;
/// Base position for cascade placement of new windows.
pub const CASCADE_BASE: i32 = 60;
/// Per-window cascade offset step in pixels.
pub const CASCADE_STEP: i32 = 30;
/// Cascade cycle length before placement wraps back to the base.
pub const CASCADE_CYCLE: i32 = 5;

/// Startup transition duration for a user-initiated power-on, in milliseconds.
pub const STARTUP_DELAY_MS: u32 = 2000;
/// Shorter startup transition used when resuming after a reload.
pub const RESUME_DELAY_MS: u32 = 1500;
/// Shutdown transition duration, in milliseconds.
pub const SHUTDOWN_DELAY_MS: u32 = 1500;

/// Opaque identifier for one open window, unique per creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Window geometry in screen coordinates (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl WindowRect {
    /// Returns the rect translated by `(dx, dy)` with both coordinates
    /// clamped at zero so a drag can never push the window fully past the
    /// top/left edge. No bound applies on the right/bottom.
    pub fn dragged(self, dx: i32, dy: i32) -> Self {
        Self {
            x: (self.x + dx).max(0),
            y: (self.y + dy).max(0),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: CASCADE_BASE,
            y: CASCADE_BASE,
            w: MIN_WINDOW_WIDTH,
            h: MIN_WINDOW_HEIGHT,
        }
    }
}

/// One open application surface tracked by the window registry.
///
/// Registry state is ephemeral per tab-load; nothing here is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    /// Registry identity, never reused within a session.
    pub id: WindowId,
    /// Catalog identifier of the hosted application.
    pub app_id: ApplicationId,
    /// Titlebar text.
    pub title: String,
    /// Icon reference resolved by the shell.
    pub icon_id: String,
    /// Stored geometry. While maximized the displayed rect is computed by
    /// the shell from the viewport and this field is left untouched.
    pub rect: WindowRect,
    /// Stacking key drawn from the session-wide monotonic counter.
    pub z_index: u64,
    /// Hidden but still registered.
    pub minimized: bool,
    /// Displayed as a full-viewport rect; orthogonal to `minimized`.
    pub maximized: bool,
    /// External content reference for hosted-view windows.
    pub hosted_content_ref: Option<String>,
    /// Opaque payload forwarded to the mounted panel.
    pub launch_params: Value,
}

/// Pointer position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

/// Compass direction of an active resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    /// Top edge.
    North,
    /// Bottom edge.
    South,
    /// Right edge.
    East,
    /// Left edge.
    West,
    /// Top-right corner.
    NorthEast,
    /// Top-left corner.
    NorthWest,
    /// Bottom-right corner.
    SouthEast,
    /// Bottom-left corner.
    SouthWest,
}

impl ResizeEdge {
    /// Whether this edge moves the right side of the window.
    pub fn grows_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    /// Whether this edge moves the left side of the window.
    pub fn grows_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// Whether this edge moves the top side of the window.
    pub fn grows_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    /// Whether this edge moves the bottom side of the window.
    pub fn grows_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    /// All eight handles, in the order the shell renders them.
    pub fn all() -> [ResizeEdge; 8] {
        [
            Self::North,
            Self::South,
            Self::East,
            Self::West,
            Self::NorthEast,
            Self::NorthWest,
            Self::SouthEast,
            Self::SouthWest,
        ]
    }
}

/// Immutable snapshot of an in-progress window drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Window being dragged.
    pub window_id: WindowId,
    /// Pointer position at drag start.
    pub pointer_start: PointerPosition,
    /// Window rect at drag start.
    pub rect_start: WindowRect,
}

/// Immutable snapshot of an in-progress window resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    /// Window being resized.
    pub window_id: WindowId,
    /// Edge or corner being dragged.
    pub edge: ResizeEdge,
    /// Pointer position at resize start.
    pub pointer_start: PointerPosition,
    /// Window rect at resize start.
    pub rect_start: WindowRect,
}

/// Pointer interaction state machine: idle, dragging, or resizing.
///
/// At most one interaction is active system-wide; the sessions hold an
/// immutable snapshot of their starting conditions so each pointer-move
/// tick derives geometry from deltas rather than accumulated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// Active drag, if any.
    pub dragging: Option<DragSession>,
    /// Active resize, if any.
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    /// Whether a drag or resize is currently open.
    pub fn is_active(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }
}

/// Session power lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    /// Nothing is reachable; the shell shows the power control.
    PoweredOff,
    /// Fixed-duration boot transition; registry/dispatcher unreachable.
    StartingUp,
    /// Desktop is live (possibly behind the lock screen).
    Running,
    /// Fixed-duration shutdown transition; registry already cleared.
    ShuttingDown,
}

/// Power phase plus the orthogonal lock flag, valid only while `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Current power phase.
    pub power: PowerState,
    /// Whether the lock screen gates the desktop.
    pub locked: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            power: PowerState::PoweredOff,
            locked: false,
        }
    }
}

impl SessionState {
    /// Whether the window registry and launch dispatcher are reachable.
    pub fn is_interactive(&self) -> bool {
        self.power == PowerState::Running && !self.locked
    }
}

/// User preferences. A partially persisted record is default-filled on
/// load, so the struct always carries a complete set of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme preset name.
    pub theme: String,
    /// Active wallpaper preset id.
    pub wallpaper_id: String,
    /// Accent color in CSS hex form.
    pub accent_color: String,
    /// Font scale percentage.
    pub font_scale: u32,
    /// Output volume, 0–100.
    pub volume: u8,
    /// Display brightness, 0–100.
    pub brightness: u8,
    /// Simulated wifi toggle.
    pub wifi_enabled: bool,
    /// Simulated bluetooth toggle.
    pub bluetooth_enabled: bool,
    /// Simulated airplane-mode toggle.
    pub airplane_mode: bool,
    /// Exposes developer-only shell surfaces.
    pub developer_mode: bool,
    /// Sync preference flag.
    pub sync_enabled: bool,
    /// User-facing display name.
    pub display_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            wallpaper_id: "aurora".to_string(),
            accent_color: "#3b82f6".to_string(),
            font_scale: 100,
            volume: 60,
            brightness: 80,
            wifi_enabled: true,
            bluetooth_enabled: false,
            airplane_mode: false,
            developer_mode: false,
            sync_enabled: false,
            display_name: "User".to_string(),
        }
    }
}

/// Credentials and wake-lock policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Account password, if set.
    pub password: Option<String>,
    /// Numeric PIN, if set.
    pub pin: Option<String>,
    /// Whether waking the session lands on the lock screen.
    pub require_sign_in_on_wake: bool,
}

impl SecuritySettings {
    /// Whether any credential is set. The lock screen may only be entered
    /// when this holds.
    pub fn has_credential(&self) -> bool {
        self.password.is_some() || self.pin.is_some()
    }

    /// Whether `attempt` matches the stored password or PIN; either is
    /// independently sufficient.
    pub fn matches(&self, attempt: &str) -> bool {
        self.password.as_deref() == Some(attempt) || self.pin.as_deref() == Some(attempt)
    }
}

/// Authoritative in-memory state for the whole desktop session.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    /// Next window identity; never reused within a session.
    pub next_window_id: u64,
    /// Session-wide monotonic stacking counter; never reset or reused.
    pub next_z: u64,
    /// Open windows in creation order (stacking comes from `z_index`).
    pub windows: Vec<WindowRecord>,
    /// Whether the start menu is open.
    pub start_menu_open: bool,
    /// Power/lock lifecycle.
    pub session: SessionState,
    /// User preferences.
    pub settings: Settings,
    /// Credentials and wake-lock policy.
    pub security: SecuritySettings,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            next_z: 1,
            windows: Vec::new(),
            start_menu_open: false,
            session: SessionState::default(),
            settings: Settings::default(),
            security: SecuritySettings::default(),
        }
    }
}

impl DesktopState {
    /// Draws the next value from the stacking counter.
    pub fn allocate_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    /// Returns the window carrying the highest z-index that is not
    /// minimized, which is by construction the most recently touched one.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    /// Finds an open built-in window for `app_id`, ignoring hosted views.
    pub fn window_for_app(&self, app_id: &ApplicationId) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .find(|w| w.hosted_content_ref.is_none() && &w.app_id == app_id)
    }

    /// Finds an open hosted-view window by its content reference.
    pub fn window_for_hosted_ref(&self, content_ref: &str) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .find(|w| w.hosted_content_ref.as_deref() == Some(content_ref))
    }

    /// Windows sorted ascending by z-index for painting.
    pub fn windows_in_paint_order(&self) -> Vec<WindowRecord> {
        let mut ordered = self.windows.clone();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }
}

/// Request passed to the registry when the dispatcher creates a window.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindowRequest {
    /// Application identity the new window hosts.
    pub app_id: ApplicationId,
    /// Titlebar text override.
    pub title: Option<String>,
    /// Icon override.
    pub icon_id: Option<String>,
    /// Requested extent; cascade placement supplies the position.
    pub size: Option<(i32, i32)>,
    /// Content reference for hosted-view windows.
    pub hosted_content_ref: Option<String>,
    /// Opaque payload forwarded to the mounted panel.
    pub launch_params: Value,
}

impl OpenWindowRequest {
    /// A plain request for `app_id` with catalog defaults.
    pub fn new(app_id: ApplicationId) -> Self {
        Self {
            app_id,
            title: None,
            icon_id: None,
            size: None,
            hosted_content_ref: None,
            launch_params: Value::Null,
        }
    }
}
