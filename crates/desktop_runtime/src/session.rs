//! Session power/lock state machine.
//!
//! Transitions mutate [`DesktopState`] in place and hand timer/persistence
//! work back to the shell as [`RuntimeEffect`] values; nothing here
//! touches the event loop directly. All entry points are guarded against
//! re-entrant calls: a second `shutdown()` while one is pending, or a
//! `power_on()` outside `PoweredOff`, is a no-op.

use crate::{
    model::{DesktopState, PowerState, RESUME_DELAY_MS, SHUTDOWN_DELAY_MS, STARTUP_DELAY_MS},
    reducer::RuntimeEffect,
};

/// Begins the boot transition.
///
/// `resume` marks a resume-from-reload boot, which uses the shorter
/// transition duration. The power flag persists immediately so a reload
/// mid-session resumes rather than landing on the power-off screen.
pub fn power_on(state: &mut DesktopState, resume: bool) -> Vec<RuntimeEffect> {
    if state.session.power != PowerState::PoweredOff {
        return Vec::new();
    }
    state.session.power = PowerState::StartingUp;
    state.session.locked = false;
    vec![
        RuntimeEffect::PersistPowerFlag(true),
        RuntimeEffect::ScheduleStartupComplete {
            delay_ms: if resume {
                RESUME_DELAY_MS
            } else {
                STARTUP_DELAY_MS
            },
        },
    ]
}

/// Completes the boot transition once its timer elapses.
///
/// Lands locked when the wake policy demands sign-in and at least one
/// credential exists; a policy with no credential cannot lock the user out.
pub fn startup_elapsed(state: &mut DesktopState) -> Vec<RuntimeEffect> {
    if state.session.power != PowerState::StartingUp {
        return Vec::new();
    }
    state.session.power = PowerState::Running;
    state.session.locked =
        state.security.require_sign_in_on_wake && state.security.has_credential();
    Vec::new()
}

/// Begins the shutdown transition.
///
/// The registry is cleared and the start menu closed immediately; the
/// remaining delay is purely presentational.
pub fn shutdown(state: &mut DesktopState) -> Vec<RuntimeEffect> {
    if state.session.power != PowerState::Running {
        return Vec::new();
    }
    state.session.power = PowerState::ShuttingDown;
    state.session.locked = false;
    state.windows.clear();
    state.start_menu_open = false;
    vec![
        RuntimeEffect::PersistPowerFlag(false),
        RuntimeEffect::ScheduleShutdownComplete {
            delay_ms: SHUTDOWN_DELAY_MS,
        },
    ]
}

/// Completes the shutdown transition once its timer elapses.
pub fn shutdown_elapsed(state: &mut DesktopState) -> Vec<RuntimeEffect> {
    if state.session.power != PowerState::ShuttingDown {
        return Vec::new();
    }
    state.session.power = PowerState::PoweredOff;
    state.windows.clear();
    Vec::new()
}

/// Enters the lock screen. Requires a running session and at least one
/// stored credential; otherwise nothing happens.
pub fn lock(state: &mut DesktopState) -> Vec<RuntimeEffect> {
    if state.session.power == PowerState::Running && state.security.has_credential() {
        state.session.locked = true;
    }
    Vec::new()
}

/// Attempts to leave the lock screen with `attempt`.
///
/// On mismatch the session stays locked and an [`RuntimeEffect::UnlockRejected`]
/// is emitted for shell messaging; there is no lockout or backoff.
pub fn unlock(state: &mut DesktopState, attempt: &str) -> Vec<RuntimeEffect> {
    if state.session.power != PowerState::Running || !state.session.locked {
        return Vec::new();
    }
    if state.security.matches(attempt) {
        state.session.locked = false;
        Vec::new()
    } else {
        vec![RuntimeEffect::UnlockRejected]
    }
}
