use desktop_contract::{AppModule, AppMountContext};
use leptos::*;

use super::{pointer_from_pointer_event, use_desktop_runtime, TASKBAR_HEIGHT_PX};
use crate::{
    catalog,
    model::{ResizeEdge, WindowId},
    reducer::DesktopAction,
};

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

fn stop_pointer_event(ev: &web_sys::PointerEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = Signal::derive(move || {
        runtime
            .state
            .get()
            .windows
            .into_iter()
            .find(|w| w.id == window_id)
    });

    let focus = move |_| {
        let already_top = runtime
            .state
            .with_untracked(|s| s.focused_window_id() == Some(window_id));
        if !already_top {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let minimize = move || runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
    let toggle_maximize =
        move || runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
    let close = move || runtime.dispatch_action(DesktopAction::CloseWindow { window_id });

    // Begins only for pointer-downs that reach the titlebar surface
    // itself; embedded controls stop propagation below.
    let begin_move = move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <Show when=move || window.get().is_some() fallback=|| ()>
            {move || {
                let win = window.get().expect("window exists while shown");
                let rect = if win.maximized {
                    runtime.host.get_value().desktop_viewport_rect(TASKBAR_HEIGHT_PX)
                } else {
                    win.rect
                };
                let style = format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};{}",
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    win.z_index,
                    if win.minimized { "display:none;" } else { "" }
                );

                view! {
                    <section
                        id=format!("desktop-window-{}", win.id.0)
                        class="desktop-window"
                        class:maximized=win.maximized
                        style=style
                        role="dialog"
                        aria-label=win.title.clone()
                        tabindex="-1"
                        on:pointerdown=focus
                    >
                        <header class="titlebar" on:pointerdown=begin_move>
                            <span class="titlebar-icon" data-icon=win.icon_id.clone()></span>
                            <span class="titlebar-title">{win.title.clone()}</span>
                            <div class="titlebar-controls">
                                <button
                                    aria-label="Minimize window"
                                    on:pointerdown=move |ev| stop_pointer_event(&ev)
                                    on:click=move |_| minimize()
                                >
                                    "_"
                                </button>
                                <button
                                    aria-label=if win.maximized {
                                        "Restore window"
                                    } else {
                                        "Maximize window"
                                    }
                                    on:pointerdown=move |ev| stop_pointer_event(&ev)
                                    on:click=move |_| toggle_maximize()
                                >
                                    {if win.maximized { "❐" } else { "□" }}
                                </button>
                                <button
                                    aria-label="Close window"
                                    on:pointerdown=move |ev| stop_pointer_event(&ev)
                                    on:click=move |_| close()
                                >
                                    "✕"
                                </button>
                            </div>
                        </header>
                        <div class="window-body">
                            <WindowBody window_id=window_id />
                        </div>
                        <Show
                            when=move || window.get().map(|w| !w.maximized).unwrap_or(false)
                            fallback=|| ()
                        >
                            {ResizeEdge::all()
                                .into_iter()
                                .map(|edge| {
                                    view! { <WindowResizeHandle window_id=window_id edge=edge /> }
                                })
                                .collect_view()}
                        </Show>
                    </section>
                }
                    .into_view()
            }}
        </Show>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        stop_pointer_event(&ev);
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! { <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown /> }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime
        .state
        .get_untracked()
        .windows
        .into_iter()
        .find(|w| w.id == window_id)
        .map(|w| {
            catalog::app_module(&w.app_id).mount(AppMountContext {
                window_id: w.id.0,
                hosted_content_ref: w.hosted_content_ref.clone(),
                launch_params: w.launch_params.clone(),
            })
        })
        .unwrap_or_else(|| view! { <p>"Closed"</p> }.into_view());

    view! { <div class="window-body-content">{contents}</div> }
}
