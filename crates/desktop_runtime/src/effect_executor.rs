//! Drains the reducer's queued [`RuntimeEffect`] values into the host.
//!
//! Persistence effects are full-overwrite writes, so within one drained
//! batch only the last write per store key matters; the drain coalesces
//! them before handing the batch to the host. Timer and UI effects are
//! never coalesced.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Collapses redundant persistence writes in a single batch, keeping the
/// last occurrence per key and preserving the order of everything else.
fn coalesce_writes(effects: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    let mut last_settings = None;
    let mut last_security = None;
    let mut last_power = None;
    for (index, effect) in effects.iter().enumerate() {
        match effect {
            RuntimeEffect::PersistSettings => last_settings = Some(index),
            RuntimeEffect::PersistSecurity => last_security = Some(index),
            RuntimeEffect::PersistPowerFlag(_) => last_power = Some(index),
            _ => {}
        }
    }

    effects
        .into_iter()
        .enumerate()
        .filter(|(index, effect)| match effect {
            RuntimeEffect::PersistSettings => last_settings == Some(*index),
            RuntimeEffect::PersistSecurity => last_security == Some(*index),
            RuntimeEffect::PersistPowerFlag(_) => last_power == Some(*index),
            _ => true,
        })
        .map(|(_, effect)| effect)
        .collect()
}

/// Installs the reactive drain for the runtime effect queue.
///
/// The queue signal is emptied before any effect runs, so a dispatch
/// triggered from inside the host (focus handlers or timer completions
/// dispatching follow-up actions) lands in a fresh batch for the next
/// run instead of being lost to the in-flight one.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let batch = runtime.effects.get();
        if batch.is_empty() {
            return;
        }
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in coalesce_writes(batch) {
            host.run_runtime_effect(runtime, effect);
        }
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowId;

    #[test]
    fn repeated_writes_keep_only_the_last_per_key() {
        let batch = vec![
            RuntimeEffect::PersistSettings,
            RuntimeEffect::PersistPowerFlag(true),
            RuntimeEffect::PersistSettings,
            RuntimeEffect::PersistSecurity,
            RuntimeEffect::PersistPowerFlag(false),
        ];
        assert_eq!(
            coalesce_writes(batch),
            vec![
                RuntimeEffect::PersistSettings,
                RuntimeEffect::PersistSecurity,
                RuntimeEffect::PersistPowerFlag(false),
            ]
        );
    }

    #[test]
    fn non_persistence_effects_pass_through_in_order() {
        let batch = vec![
            RuntimeEffect::FocusWindowInput(WindowId(1)),
            RuntimeEffect::ScheduleStartupComplete { delay_ms: 2000 },
            RuntimeEffect::UnlockRejected,
            RuntimeEffect::ScheduleStartupComplete { delay_ms: 2000 },
        ];
        assert_eq!(coalesce_writes(batch.clone()), batch);
    }
}
