//! Window-registry transition helpers used by the desktop reducer.

use desktop_contract::ApplicationId;

use crate::model::{
    DesktopState, OpenWindowRequest, ResizeEdge, WindowId, WindowRecord, WindowRect, CASCADE_BASE,
    CASCADE_CYCLE, CASCADE_STEP, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

/// Appends a new window at the next cascade position with a fresh z-index
/// and returns its id.
///
/// The cascade offset is `(open_window_count mod 5) * 30` on both axes so
/// consecutive windows never stack exactly on top of each other.
pub fn create_window(
    state: &mut DesktopState,
    req: OpenWindowRequest,
    default_size: (i32, i32),
    fallback_title: &str,
    fallback_icon: &str,
) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id += 1;

    let offset = (state.windows.len() as i32 % CASCADE_CYCLE) * CASCADE_STEP;
    let (w, h) = req.size.unwrap_or(default_size);
    let record = WindowRecord {
        id,
        app_id: req.app_id,
        title: req.title.unwrap_or_else(|| fallback_title.to_string()),
        icon_id: req.icon_id.unwrap_or_else(|| fallback_icon.to_string()),
        rect: WindowRect {
            x: CASCADE_BASE + offset,
            y: CASCADE_BASE + offset,
            w: w.max(MIN_WINDOW_WIDTH),
            h: h.max(MIN_WINDOW_HEIGHT),
        },
        z_index: state.allocate_z(),
        minimized: false,
        maximized: false,
        hosted_content_ref: req.hosted_content_ref,
        launch_params: req.launch_params,
    };
    state.windows.push(record);
    id
}

/// Raises `window_id` to the top of the stack and clears its minimized
/// flag. Unknown ids are a silent no-op.
///
/// Returns `true` when the window exists.
pub fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
        return false;
    };
    let z = state.allocate_z();
    let window = &mut state.windows[index];
    window.z_index = z;
    window.minimized = false;
    true
}

/// Removes `window_id` from the registry. Unknown ids are a no-op.
pub fn close_window(state: &mut DesktopState, window_id: WindowId) {
    state.windows.retain(|w| w.id != window_id);
}

/// Directly replaces stored geometry, ignored while the window is
/// maximized (its displayed rect is viewport-derived, not stored).
pub fn set_geometry(state: &mut DesktopState, window_id: WindowId, rect: WindowRect) {
    if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
        if !window.maximized {
            window.rect = rect;
        }
    }
}

/// Finds an existing reuse target for a launch of `app_id`.
pub fn reuse_target(state: &DesktopState, app_id: &ApplicationId) -> Option<WindowId> {
    state.window_for_app(app_id).map(|w| w.id)
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Extents clamp at the minimum window size per axis; for west and north
/// drags the moving coordinate is recomputed from the clamped extent so
/// the opposite edge's absolute position stays pinned.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let mut rect = start;

    if edge.grows_east() {
        rect.w = (start.w + dx).max(MIN_WINDOW_WIDTH);
    } else if edge.grows_west() {
        let right = start.x + start.w;
        rect.w = (start.w - dx).max(MIN_WINDOW_WIDTH);
        rect.x = right - rect.w;
    }

    if edge.grows_south() {
        rect.h = (start.h + dy).max(MIN_WINDOW_HEIGHT);
    } else if edge.grows_north() {
        let bottom = start.y + start.h;
        rect.h = (start.h - dy).max(MIN_WINDOW_HEIGHT);
        rect.y = bottom - rect.h;
    }

    rect
}
