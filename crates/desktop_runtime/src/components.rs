//! Desktop shell UI composition and interaction surfaces.
//!
//! This layer is intentionally thin: it renders from the state signal and
//! dispatches reducer actions, never mutating state itself. Hosted app
//! panels are opaque; window bodies mount them through the catalog.

mod window;

use std::time::Duration;

use leptos::{leptos_dom::helpers::WindowListenerHandle, *};

use self::window::DesktopWindow;
use crate::{
    catalog,
    model::{PointerPosition, PowerState},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Taskbar height reserved at the bottom of the viewport.
pub const TASKBAR_HEIGHT_PX: i32 = 38;

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn release_pointer_listeners(handles: StoredValue<Vec<WindowListenerHandle>>) {
    handles.update_value(|handles| {
        for handle in handles.drain(..) {
            handle.remove();
        }
    });
}

/// Acquires document-level pointer listeners only while a drag or resize
/// is open, and releases them on completion or teardown. Nothing may leak
/// a global handler across unrelated windows.
fn install_scoped_pointer_listeners(runtime: DesktopRuntimeContext) {
    let handles = store_value(Vec::<WindowListenerHandle>::new());

    create_effect(move |_| {
        let active = runtime.interaction.get().is_active();
        let already_listening = handles.with_value(|h| !h.is_empty());

        if active && !already_listening {
            let on_move = window_event_listener(ev::pointermove, move |ev| {
                let pointer = pointer_from_pointer_event(&ev);
                let interaction = runtime.interaction.get_untracked();
                if interaction.dragging.is_some() {
                    runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
                }
                if interaction.resizing.is_some() {
                    runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
                }
            });
            let on_up = window_event_listener(ev::pointerup, move |_| {
                end_active_pointer_interaction(runtime);
            });
            let on_cancel = window_event_listener(ev::pointercancel, move |_| {
                end_active_pointer_interaction(runtime);
            });
            handles.update_value(|h| h.extend([on_move, on_up, on_cancel]));
        } else if !active && already_listening {
            release_pointer_listeners(handles);
        }
    });

    on_cleanup(move || release_pointer_listeners(handles));
}

#[component]
/// Renders the whole desktop shell, gated by the session power state.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    install_scoped_pointer_listeners(runtime);

    let phase = create_memo(move |_| state.get().session.power);

    view! {
        <div class="desktop-shell" id="desktop-shell-root">
            {move || match phase.get() {
                PowerState::PoweredOff => view! { <PowerOffScreen /> }.into_view(),
                PowerState::StartingUp => {
                    view! { <TransitionScreen label="Starting up" /> }.into_view()
                }
                PowerState::ShuttingDown => {
                    view! { <TransitionScreen label="Shutting down" /> }.into_view()
                }
                PowerState::Running => view! { <RunningDesktop /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn PowerOffScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    view! {
        <div class="power-off-screen">
            <button
                class="power-button"
                aria-label="Power on"
                on:click=move |_| {
                    runtime.dispatch_action(DesktopAction::PowerOn { resume: false })
                }
            >
                "Power"
            </button>
        </div>
    }
}

#[component]
fn TransitionScreen(label: &'static str) -> impl IntoView {
    view! {
        <div class="transition-screen" role="status">
            <p>{label}</p>
        </div>
    }
}

#[component]
fn RunningDesktop() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let locked = create_memo(move |_| state.get().session.locked);

    view! {
        <Show
            when=move || !locked.get()
            fallback=move || view! { <LockScreen /> }
        >
            <div
                class="desktop-surface"
                style=move || {
                    let settings = state.with(|s| s.settings.clone());
                    format!(
                        "--accent:{};font-size:{}%;",
                        settings.accent_color, settings.font_scale
                    )
                }
                on:pointerdown=move |_| {
                    if state.with_untracked(|s| s.start_menu_open) {
                        runtime.dispatch_action(DesktopAction::CloseStartMenu);
                    }
                }
            >
                <div class="window-layer">
                    <For
                        each=move || state.get().windows_in_paint_order()
                        key=|win| win.id.0
                        let:win
                    >
                        <DesktopWindow window_id=win.id />
                    </For>
                </div>
                <StartMenu />
                <Taskbar />
            </div>
        </Show>
    }
}

#[component]
fn LockScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let attempt = create_rw_signal(String::new());

    let submit = move || {
        let value = attempt.get_untracked();
        attempt.set(String::new());
        runtime.unlock_error.set(None);
        runtime.dispatch_action(DesktopAction::Unlock { attempt: value });
    };

    view! {
        <div class="lock-screen">
            <p class="lock-screen-name">
                {move || runtime.state.with(|s| s.settings.display_name.clone())}
            </p>
            <input
                type="password"
                placeholder="Password or PIN"
                prop:value=attempt
                on:input=move |ev| attempt.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
            <button on:click=move |_| submit()>"Unlock"</button>
            <Show when=move || runtime.unlock_error.get().is_some() fallback=|| ()>
                <p class="lock-screen-error" role="alert">
                    {move || runtime.unlock_error.get().unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}

#[component]
fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let open = create_memo(move |_| runtime.state.get().start_menu_open);

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <nav class="start-menu" aria-label="Start menu">
                {catalog::launcher_entries()
                    .map(|entry| {
                        let app_id = entry.application_id();
                        view! {
                            <button
                                class="start-menu-entry"
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::LaunchApp {
                                        app_id: app_id.clone(),
                                    });
                                }
                            >
                                {entry.display_name}
                            </button>
                        }
                    })
                    .collect_view()}
                <button
                    class="start-menu-entry shutdown"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::Shutdown)
                >
                    "Shut down"
                </button>
            </nav>
        </Show>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockSnapshot {
    hour: u32,
    minute: u32,
}

impl ClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }

    fn label(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

#[component]
fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <footer class="taskbar" style=format!("height:{TASKBAR_HEIGHT_PX}px;")>
            <button
                class="start-button"
                aria-expanded=move || state.get().start_menu_open.to_string()
                on:pointerdown=|ev| ev.stop_propagation()
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
            >
                "Start"
            </button>
            <div class="taskbar-windows">
                <For each=move || state.get().windows key=|win| win.id.0 let:win>
                    {
                        let window_id = win.id;
                        view! {
                            <button
                                class="taskbar-window-button"
                                class:minimized=move || {
                                    state
                                        .get()
                                        .windows
                                        .iter()
                                        .find(|w| w.id == window_id)
                                        .map(|w| w.minimized)
                                        .unwrap_or(false)
                                }
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                                        window_id,
                                    });
                                }
                            >
                                {win.title.clone()}
                            </button>
                        }
                    }
                </For>
            </div>
            <div class="taskbar-tray">
                <button
                    aria-label="Lock"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::Lock)
                >
                    "Lock"
                </button>
                <span class="taskbar-clock">{move || clock_now.get().label()}</span>
            </div>
        </footer>
    }
}
