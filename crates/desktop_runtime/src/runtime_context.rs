//! Runtime provider and context wiring for the desktop shell.
//!
//! Sole owner of the reducer container: the presentation layer reads the
//! state signal and dispatches [`DesktopAction`] values; it never mutates
//! state directly. This keeps mutation paths auditable in one place.

use leptos::*;

use crate::{
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching actions.
pub struct DesktopRuntimeContext {
    /// Host service bundle for side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects awaiting execution by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Last rejected-unlock message for the lock screen, if any.
    pub unlock_error: RwSignal<Option<String>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots
/// persisted state, including resume-on-load.
pub fn DesktopProvider(
    /// Injected host bundle assembled by the entry layer.
    #[prop(optional)]
    host_context: Option<DesktopHostContext>,
    children: Children,
) -> impl IntoView {
    let host = store_value(host_context.unwrap_or_default());
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let unlock_error = create_rw_signal(None::<String>);

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui;

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer rejected action: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        unlock_error,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    host.get_value().install_boot_hydration(dispatch);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
