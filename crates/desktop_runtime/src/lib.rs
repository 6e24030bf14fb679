//! Desktop session runtime: window registry, launch dispatch, pointer
//! interaction, power/lock lifecycle, and durable settings persistence
//! for a simulated desktop running in a single browser tab.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod collections;
mod components;
mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod services;
pub mod session;
pub mod window_manager;

pub use components::{DesktopShell, TASKBAR_HEIGHT_PX};
pub use host::DesktopHostContext;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
