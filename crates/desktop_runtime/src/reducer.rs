//! Reducer actions, side-effect intents, and transition logic for the
//! desktop session runtime.
//!
//! [`reduce_desktop`] is the single authoritative mutation path: window
//! registry operations, launch dispatch, pointer interaction, session
//! power transitions, and settings updates all flow through it, so every
//! state change is auditable and testable without a browser.

use thiserror::Error;

use crate::{
    catalog,
    model::{
        DesktopState, DragSession, InteractionState, OpenWindowRequest, PointerPosition,
        ResizeEdge, ResizeSession, SecuritySettings, Settings, WindowId, WindowRect,
    },
    session, window_manager,
};
use desktop_contract::ApplicationId;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open or refocus the application `app_id` (single instance per app).
    LaunchApp {
        /// Catalog identifier to open.
        app_id: ApplicationId,
    },
    /// Open or refocus a window hosting externally supplied content,
    /// keyed by its content reference instead of the catalog.
    LaunchHosted {
        /// External content reference (for example a remote URL).
        content_ref: String,
        /// Titlebar text for a newly created window.
        title: String,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise a window to the top of the stack, clearing minimized.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Hide a window without destroying it.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Flip the maximized flag; stored geometry is never touched.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Directly replace stored geometry (no-op while maximized).
    SetWindowGeometry {
        /// Window to mutate.
        window_id: WindowId,
        /// New geometry.
        rect: WindowRect,
    },
    /// Taskbar button semantics: restore if minimized, minimize if
    /// focused, focus otherwise.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Begin dragging a window by its titlebar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window from an edge or corner handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Handle direction.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Replace the full user settings record.
    ApplySettings {
        /// New settings record.
        settings: Settings,
    },
    /// Replace credentials and wake-lock policy.
    SetSecurity {
        /// New security record.
        security: SecuritySettings,
    },
    /// Begin the boot transition (`resume` marks resume-from-reload).
    PowerOn {
        /// Whether this boot resumes a previously running session.
        resume: bool,
    },
    /// Startup timer elapsed.
    StartupElapsed,
    /// Begin the shutdown transition.
    Shutdown,
    /// Shutdown timer elapsed.
    ShutdownElapsed,
    /// Enter the lock screen (requires a stored credential).
    Lock,
    /// Attempt to leave the lock screen.
    Unlock {
        /// Credential attempt; password and PIN are both accepted.
        attempt: String,
    },
    /// Install persisted settings during boot hydration.
    HydrateSettings {
        /// Loaded settings record.
        settings: Settings,
    },
    /// Install persisted security state during boot hydration.
    HydrateSecurity {
        /// Loaded security record.
        security: SecuritySettings,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell to run.
pub enum RuntimeEffect {
    /// Persist the settings record.
    PersistSettings,
    /// Persist the security record.
    PersistSecurity,
    /// Persist the power-on flag used by resume-on-load.
    PersistPowerFlag(bool),
    /// Arm the one-shot startup timer.
    ScheduleStartupComplete {
        /// Timer duration in milliseconds.
        delay_ms: u32,
    },
    /// Arm the one-shot shutdown timer.
    ScheduleShutdownComplete {
        /// Timer duration in milliseconds.
        delay_ms: u32,
    },
    /// A credential attempt was rejected; the shell surfaces the message
    /// and clears the input.
    UnlockRejected,
    /// Move keyboard focus into the window's primary input.
    FocusWindowInput(WindowId),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Reducer errors. Unknown window/app ids are deliberately not errors
/// (fail-quiet policy); only session gating violations surface here.
pub enum ReducerError {
    /// A registry or dispatcher action arrived while the session was not
    /// running and unlocked.
    #[error("session is not interactive")]
    SessionNotInteractive,
}

/// Applies a [`DesktopAction`] and collects resulting side effects.
///
/// Window registry and launch dispatcher actions are only reachable while
/// the session is running and unlocked; session transitions, hydration,
/// and interaction-teardown actions are always accepted so timers and
/// listener cleanup can never wedge.
///
/// # Errors
///
/// Returns [`ReducerError::SessionNotInteractive`] when a gated action
/// arrives outside the running/unlocked state.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    match action {
        // Session lifecycle and hydration: never gated.
        DesktopAction::PowerOn { resume } => Ok(session::power_on(state, resume)),
        DesktopAction::StartupElapsed => Ok(session::startup_elapsed(state)),
        DesktopAction::Shutdown => {
            *interaction = InteractionState::default();
            Ok(session::shutdown(state))
        }
        DesktopAction::ShutdownElapsed => Ok(session::shutdown_elapsed(state)),
        DesktopAction::Lock => Ok(session::lock(state)),
        DesktopAction::Unlock { attempt } => Ok(session::unlock(state, &attempt)),
        DesktopAction::HydrateSettings { settings } => {
            state.settings = settings;
            Ok(Vec::new())
        }
        DesktopAction::HydrateSecurity { security } => {
            state.security = security;
            Ok(Vec::new())
        }
        // Interaction teardown: idempotent, never gated, so pointer-up
        // after a mid-drag shutdown still releases cleanly.
        DesktopAction::EndMove => {
            interaction.dragging = None;
            Ok(Vec::new())
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
            Ok(Vec::new())
        }
        other => {
            if !state.session.is_interactive() {
                return Err(ReducerError::SessionNotInteractive);
            }
            Ok(reduce_interactive(state, interaction, other))
        }
    }
}

fn reduce_interactive(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::LaunchApp { app_id } => {
            state.start_menu_open = false;
            if let Some(existing) = window_manager::reuse_target(state, &app_id) {
                window_manager::focus_window(state, existing);
                effects.push(RuntimeEffect::FocusWindowInput(existing));
            } else if let Some(descriptor) = catalog::descriptor(&app_id) {
                let id = window_manager::create_window(
                    state,
                    OpenWindowRequest::new(app_id),
                    (descriptor.default_size.w, descriptor.default_size.h),
                    descriptor.display_name,
                    descriptor.icon_id,
                );
                effects.push(RuntimeEffect::FocusWindowInput(id));
            }
            // Unknown app ids fall through silently.
        }
        DesktopAction::LaunchHosted { content_ref, title } => {
            state.start_menu_open = false;
            if let Some(existing) = state.window_for_hosted_ref(&content_ref).map(|w| w.id) {
                window_manager::focus_window(state, existing);
                effects.push(RuntimeEffect::FocusWindowInput(existing));
            } else {
                let descriptor = catalog::hosted_view_descriptor();
                let mut req =
                    OpenWindowRequest::new(ApplicationId::trusted(catalog::HOSTED_VIEW_APP_ID));
                req.title = Some(title);
                req.hosted_content_ref = Some(content_ref);
                let id = window_manager::create_window(
                    state,
                    req,
                    (descriptor.default_size.w, descriptor.default_size.h),
                    descriptor.display_name,
                    descriptor.icon_id,
                );
                effects.push(RuntimeEffect::FocusWindowInput(id));
            }
        }
        DesktopAction::CloseWindow { window_id } => {
            window_manager::close_window(state, window_id);
            if interaction.dragging.map(|s| s.window_id) == Some(window_id) {
                interaction.dragging = None;
            }
            if interaction.resizing.map(|s| s.window_id) == Some(window_id) {
                interaction.resizing = None;
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if window_manager::focus_window(state, window_id) {
                state.start_menu_open = false;
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
                window.minimized = true;
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
                window.maximized = !window.maximized;
            }
        }
        DesktopAction::SetWindowGeometry { window_id, rect } => {
            window_manager::set_geometry(state, window_id, rect);
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let Some(minimized) = state
                .windows
                .iter()
                .find(|w| w.id == window_id)
                .map(|w| w.minimized)
            else {
                return effects;
            };
            if minimized {
                window_manager::focus_window(state, window_id);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            } else if state.focused_window_id() == Some(window_id) {
                effects.extend(reduce_interactive(
                    state,
                    interaction,
                    DesktopAction::MinimizeWindow { window_id },
                ));
            } else {
                window_manager::focus_window(state, window_id);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.windows.iter().find(|w| w.id == window_id) else {
                return effects;
            };
            // Dragging a maximized window is a no-op by design: its
            // displayed rect is not derived from stored geometry.
            if window.maximized {
                window_manager::focus_window(state, window_id);
                return effects;
            }
            let rect_start = window.rect;
            window_manager::focus_window(state, window_id);
            interaction.dragging = Some(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(drag) = interaction.dragging {
                let dx = pointer.x - drag.pointer_start.x;
                let dy = pointer.y - drag.pointer_start.y;
                window_manager::set_geometry(
                    state,
                    drag.window_id,
                    drag.rect_start.dragged(dx, dy),
                );
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.windows.iter().find(|w| w.id == window_id) else {
                return effects;
            };
            if window.maximized {
                window_manager::focus_window(state, window_id);
                return effects;
            }
            let rect_start = window.rect;
            window_manager::focus_window(state, window_id);
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(resize) = interaction.resizing {
                let dx = pointer.x - resize.pointer_start.x;
                let dy = pointer.y - resize.pointer_start.y;
                let rect = window_manager::resize_rect(resize.rect_start, resize.edge, dx, dy);
                window_manager::set_geometry(state, resize.window_id, rect);
            }
        }
        DesktopAction::ApplySettings { settings } => {
            state.settings = settings;
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::SetSecurity { security } => {
            state.security = security;
            effects.push(RuntimeEffect::PersistSecurity);
        }
        // Session-scope actions are consumed before dispatch here.
        _ => {}
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{PowerState, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

    fn running_state() -> (DesktopState, InteractionState) {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(&mut state, &mut interaction, DesktopAction::PowerOn { resume: false })
            .expect("power on");
        reduce_desktop(&mut state, &mut interaction, DesktopAction::StartupElapsed)
            .expect("startup");
        (state, interaction)
    }

    fn launch(state: &mut DesktopState, interaction: &mut InteractionState, raw: &str) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::LaunchApp {
                app_id: ApplicationId::trusted(raw),
            },
        )
        .expect("launch");
        state.windows.last().expect("window created").id
    }

    fn window<'a>(state: &'a DesktopState, id: WindowId) -> &'a crate::model::WindowRecord {
        state.windows.iter().find(|w| w.id == id).expect("window")
    }

    #[test]
    fn relaunching_an_open_app_refocuses_instead_of_duplicating() {
        let (mut state, mut interaction) = running_state();

        let calc = launch(&mut state, &mut interaction, "system.calculator");
        assert_eq!(window(&state, calc).z_index, 1);
        let notes = launch(&mut state, &mut interaction, "system.notes");
        assert_eq!(window(&state, notes).z_index, 2);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::LaunchApp {
                app_id: ApplicationId::trusted("system.calculator"),
            },
        )
        .expect("relaunch");

        assert_eq!(state.windows.len(), 2);
        assert_eq!(window(&state, calc).z_index, 3);
        assert!(!window(&state, calc).minimized);
        assert_eq!(state.focused_window_id(), Some(calc));
    }

    #[test]
    fn relaunch_restores_a_minimized_window() {
        let (mut state, mut interaction) = running_state();
        let files = launch(&mut state, &mut interaction, "system.files");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: files },
        )
        .expect("minimize");
        assert!(window(&state, files).minimized);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::LaunchApp {
                app_id: ApplicationId::trusted("system.files"),
            },
        )
        .expect("relaunch");
        assert_eq!(state.windows.len(), 1);
        assert!(!window(&state, files).minimized);
    }

    #[test]
    fn unknown_app_id_is_a_silent_noop() {
        let (mut state, mut interaction) = running_state();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::LaunchApp {
                app_id: ApplicationId::trusted("vendor.missing"),
            },
        )
        .expect("fail quiet");
        assert!(effects.is_empty());
        assert!(state.windows.is_empty());
    }

    #[test]
    fn unknown_window_ids_never_error() {
        let (mut state, mut interaction) = running_state();
        let ghost = WindowId(999);
        for action in [
            DesktopAction::CloseWindow { window_id: ghost },
            DesktopAction::FocusWindow { window_id: ghost },
            DesktopAction::MinimizeWindow { window_id: ghost },
            DesktopAction::ToggleMaximize { window_id: ghost },
            DesktopAction::ToggleTaskbarWindow { window_id: ghost },
        ] {
            let effects =
                reduce_desktop(&mut state, &mut interaction, action).expect("noop");
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn hosted_windows_reuse_by_content_ref() {
        let (mut state, mut interaction) = running_state();
        let open = |state: &mut DesktopState, interaction: &mut InteractionState| {
            reduce_desktop(
                state,
                interaction,
                DesktopAction::LaunchHosted {
                    content_ref: "https://example.com/dash".to_string(),
                    title: "Dashboard".to_string(),
                },
            )
            .expect("hosted launch");
        };
        open(&mut state, &mut interaction);
        open(&mut state, &mut interaction);
        assert_eq!(state.windows.len(), 1);
        assert_eq!(
            state.windows[0].hosted_content_ref.as_deref(),
            Some("https://example.com/dash")
        );
    }

    #[test]
    fn cascade_placement_staggers_new_windows() {
        let (mut state, mut interaction) = running_state();
        let first = launch(&mut state, &mut interaction, "system.calculator");
        let second = launch(&mut state, &mut interaction, "system.notes");
        let third = launch(&mut state, &mut interaction, "system.files");

        assert_eq!(window(&state, first).rect.x, 60);
        assert_eq!(window(&state, second).rect.x, 90);
        assert_eq!(window(&state, third).rect.y, 120);
    }

    #[test]
    fn most_recently_touched_window_has_strictly_highest_z() {
        let (mut state, mut interaction) = running_state();
        let calc = launch(&mut state, &mut interaction, "system.calculator");
        let notes = launch(&mut state, &mut interaction, "system.notes");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: calc,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin resize");

        let calc_z = window(&state, calc).z_index;
        let notes_z = window(&state, notes).z_index;
        assert!(calc_z > notes_z);
        assert_eq!(state.focused_window_id(), Some(calc));
    }

    #[test]
    fn drag_clamps_to_top_left_screen_bounds() {
        let (mut state, mut interaction) = running_state();
        let win = launch(&mut state, &mut interaction, "system.notes");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetWindowGeometry {
                window_id: win,
                rect: WindowRect {
                    x: 100,
                    y: 50,
                    w: 400,
                    h: 300,
                },
            },
        )
        .expect("place");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 120, y: 60 },
            },
        )
        .expect("begin move");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: -30, y: 60 },
            },
        )
        .expect("move");

        let rect = window(&state, win).rect;
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 50);

        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end");
        assert!(!interaction.is_active());
    }

    #[test]
    fn resize_respects_minimums_through_the_reducer() {
        let (mut state, mut interaction) = running_state();
        let win = launch(&mut state, &mut interaction, "system.terminal");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: win,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 500, y: 500 },
            },
        )
        .expect("begin");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: -2000, y: -2000 },
            },
        )
        .expect("resize");

        let rect = window(&state, win).rect;
        assert_eq!(rect.w, MIN_WINDOW_WIDTH);
        assert_eq!(rect.h, MIN_WINDOW_HEIGHT);
    }

    #[test]
    fn maximize_round_trip_preserves_stored_geometry() {
        let (mut state, mut interaction) = running_state();
        let win = launch(&mut state, &mut interaction, "system.settings");
        let before = window(&state, win).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize { window_id: win },
        )
        .expect("maximize");
        assert!(window(&state, win).maximized);
        assert_eq!(window(&state, win).rect, before);

        // Geometry mutations are ignored while maximized.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 5, y: 5 },
            },
        )
        .expect("begin move on maximized");
        assert!(interaction.dragging.is_none());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetWindowGeometry {
                window_id: win,
                rect: WindowRect {
                    x: 1,
                    y: 2,
                    w: 500,
                    h: 500,
                },
            },
        )
        .expect("set geometry on maximized");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize { window_id: win },
        )
        .expect("restore");
        assert!(!window(&state, win).maximized);
        assert_eq!(window(&state, win).rect, before);
    }

    #[test]
    fn minimized_and_maximized_are_orthogonal() {
        let (mut state, mut interaction) = running_state();
        let win = launch(&mut state, &mut interaction, "system.notes");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize { window_id: win },
        )
        .expect("maximize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: win },
        )
        .expect("minimize");
        let record = window(&state, win);
        assert!(record.minimized && record.maximized);
    }

    #[test]
    fn taskbar_toggle_cycles_focus_minimize_restore() {
        let (mut state, mut interaction) = running_state();
        let calc = launch(&mut state, &mut interaction, "system.calculator");
        let notes = launch(&mut state, &mut interaction, "system.notes");

        // Focused window minimizes.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: notes },
        )
        .expect("minimize focused");
        assert!(window(&state, notes).minimized);

        // Minimized window restores and takes the top.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: notes },
        )
        .expect("restore");
        assert!(!window(&state, notes).minimized);
        assert_eq!(state.focused_window_id(), Some(notes));

        // Unfocused window just focuses.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: calc },
        )
        .expect("focus");
        assert_eq!(state.focused_window_id(), Some(calc));
        assert!(!window(&state, calc).minimized);
    }

    #[test]
    fn registry_is_unreachable_outside_running_unlocked() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let action = DesktopAction::LaunchApp {
            app_id: ApplicationId::trusted("system.calculator"),
        };

        assert_eq!(
            reduce_desktop(&mut state, &mut interaction, action.clone()),
            Err(ReducerError::SessionNotInteractive)
        );

        state.security = SecuritySettings {
            password: Some("pw".to_string()),
            pin: None,
            require_sign_in_on_wake: true,
        };
        reduce_desktop(&mut state, &mut interaction, DesktopAction::PowerOn { resume: false })
            .expect("power on");
        assert_eq!(
            reduce_desktop(&mut state, &mut interaction, action.clone()),
            Err(ReducerError::SessionNotInteractive)
        );

        reduce_desktop(&mut state, &mut interaction, DesktopAction::StartupElapsed)
            .expect("startup");
        assert!(state.session.locked);
        assert_eq!(
            reduce_desktop(&mut state, &mut interaction, action.clone()),
            Err(ReducerError::SessionNotInteractive)
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::Unlock {
                attempt: "pw".to_string(),
            },
        )
        .expect("unlock");
        reduce_desktop(&mut state, &mut interaction, action).expect("launch after unlock");
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn shutdown_clears_registry_and_start_menu_immediately() {
        let (mut state, mut interaction) = running_state();
        launch(&mut state, &mut interaction, "system.calculator");
        reduce_desktop(&mut state, &mut interaction, DesktopAction::ToggleStartMenu)
            .expect("open menu");

        reduce_desktop(&mut state, &mut interaction, DesktopAction::Shutdown).expect("shutdown");
        assert!(state.windows.is_empty());
        assert!(!state.start_menu_open);
        assert_eq!(state.session.power, PowerState::ShuttingDown);

        reduce_desktop(&mut state, &mut interaction, DesktopAction::ShutdownElapsed)
            .expect("complete");
        assert_eq!(state.session.power, PowerState::PoweredOff);
    }

    #[test]
    fn shutdown_mid_drag_clears_the_interaction() {
        let (mut state, mut interaction) = running_state();
        let win = launch(&mut state, &mut interaction, "system.notes");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin");
        assert!(interaction.is_active());

        reduce_desktop(&mut state, &mut interaction, DesktopAction::Shutdown).expect("shutdown");
        assert!(!interaction.is_active());

        // Late pointer-up still lands as a harmless teardown.
        reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("late up");
    }

    #[test]
    fn closing_a_dragged_window_releases_the_session() {
        let (mut state, mut interaction) = running_state();
        let win = launch(&mut state, &mut interaction, "system.files");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .expect("begin");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: win },
        )
        .expect("close");
        assert!(!interaction.is_active());
        assert!(state.windows.is_empty());
    }

    #[test]
    fn applying_settings_emits_a_persist_effect() {
        let (mut state, mut interaction) = running_state();
        let mut settings = state.settings.clone();
        settings.volume = 25;
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ApplySettings { settings },
        )
        .expect("apply");
        assert_eq!(effects, vec![RuntimeEffect::PersistSettings]);
        assert_eq!(state.settings.volume, 25);
    }
}
