//! Host-side runtime wiring: the service bundle, boot hydration, and
//! execution of reducer-emitted effects.
//!
//! The reducer stays pure; everything that touches storage, timers, or
//! the document lands here behind [`DesktopHostContext`] so tests can run
//! the whole session against in-memory fakes.

use std::{rc::Rc, time::Duration};

use leptos::{logging, set_timeout, Callable, Callback, SignalSet, SignalWithUntracked};
use platform_store::KeyValueStore;

use crate::{
    model::WindowRect,
    persistence,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
    services::{
        BroadcastFeed, IdentityService, NoopBroadcastFeed, NoopIdentityService,
        NoopOwnershipService, OwnershipService,
    },
};

/// Fixed margin between a maximized window and the viewport edges.
pub const MAXIMIZED_MARGIN_PX: i32 = 0;

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    store: Rc<dyn KeyValueStore>,
    identity: Rc<dyn IdentityService>,
    ownership: Rc<dyn OwnershipService>,
    broadcast: Rc<dyn BroadcastFeed>,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            store: default_store(),
            identity: Rc::new(NoopIdentityService),
            ownership: Rc::new(NoopOwnershipService),
            broadcast: Rc::new(NoopBroadcastFeed),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn default_store() -> Rc<dyn KeyValueStore> {
    Rc::new(platform_store::LocalStore)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store() -> Rc<dyn KeyValueStore> {
    Rc::new(platform_store::MemoryStore::default())
}

impl DesktopHostContext {
    /// Builds a host bundle around an explicit store (tests, embedding).
    pub fn with_store(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Returns the durable store backing all persistence effects.
    pub fn store(&self) -> Rc<dyn KeyValueStore> {
        self.store.clone()
    }

    /// Returns the configured identity endpoint.
    pub fn identity_service(&self) -> Rc<dyn IdentityService> {
        self.identity.clone()
    }

    /// Returns the configured ownership endpoint.
    pub fn ownership_service(&self) -> Rc<dyn OwnershipService> {
        self.ownership.clone()
    }

    /// Returns the configured broadcast feed.
    pub fn broadcast_feed(&self) -> Rc<dyn BroadcastFeed> {
        self.broadcast.clone()
    }

    /// Current desktop viewport rect above the taskbar.
    ///
    /// The maximized display rect is derived from this, never from stored
    /// window geometry.
    pub fn desktop_viewport_rect(&self, taskbar_height_px: i32) -> WindowRect {
        let (w, h) = browser_viewport_size().unwrap_or((1280, 800));
        WindowRect {
            x: MAXIMIZED_MARGIN_PX,
            y: MAXIMIZED_MARGIN_PX,
            w: w - 2 * MAXIMIZED_MARGIN_PX,
            h: h - taskbar_height_px - 2 * MAXIMIZED_MARGIN_PX,
        }
    }

    /// Loads persisted user data and dispatches hydration, then resumes a
    /// previously running session when the power flag says so.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        let store = self.store();
        dispatch.call(DesktopAction::HydrateSettings {
            settings: persistence::load_settings(store.as_ref()),
        });
        dispatch.call(DesktopAction::HydrateSecurity {
            security: persistence::load_security(store.as_ref()),
        });
        if persistence::load_power_flag(store.as_ref()) {
            dispatch.call(DesktopAction::PowerOn { resume: true });
        }
    }

    /// Executes one reducer-emitted effect.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistSettings => {
                let settings = runtime.state.with_untracked(|s| s.settings.clone());
                if let Err(err) = persistence::save_settings(self.store.as_ref(), &settings) {
                    logging::warn!("settings persist failed: {err}");
                }
            }
            RuntimeEffect::PersistSecurity => {
                let security = runtime.state.with_untracked(|s| s.security.clone());
                if let Err(err) = persistence::save_security(self.store.as_ref(), &security) {
                    logging::warn!("security persist failed: {err}");
                }
            }
            RuntimeEffect::PersistPowerFlag(powered_on) => {
                if let Err(err) = persistence::save_power_flag(self.store.as_ref(), powered_on) {
                    logging::warn!("power flag persist failed: {err}");
                }
            }
            RuntimeEffect::ScheduleStartupComplete { delay_ms } => {
                set_timeout(
                    move || runtime.dispatch_action(DesktopAction::StartupElapsed),
                    Duration::from_millis(u64::from(delay_ms)),
                );
            }
            RuntimeEffect::ScheduleShutdownComplete { delay_ms } => {
                set_timeout(
                    move || runtime.dispatch_action(DesktopAction::ShutdownElapsed),
                    Duration::from_millis(u64::from(delay_ms)),
                );
            }
            RuntimeEffect::UnlockRejected => {
                runtime.unlock_error.set(Some(
                    "Incorrect password or PIN. Try again.".to_string(),
                ));
            }
            RuntimeEffect::FocusWindowInput(window_id) => focus_window_input(window_id.0),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_viewport_size() -> Option<(i32, i32)> {
    let window = web_sys::window()?;
    let w = window.inner_width().ok()?.as_f64()? as i32;
    let h = window.inner_height().ok()?.as_f64()? as i32;
    Some((w, h))
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_viewport_size() -> Option<(i32, i32)> {
    None
}

#[cfg(target_arch = "wasm32")]
fn focus_window_input(window_id: u64) {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(element) = document.get_element_by_id(&format!("desktop-window-{window_id}")) else {
        return;
    };
    if let Ok(html) = element.dyn_into::<web_sys::HtmlElement>() {
        let _ = html.focus();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn focus_window_input(_window_id: u64) {}
