//! Built-in application catalog.
//!
//! Descriptors are resolved once at catalog-build time; the launch
//! dispatcher looks them up by [`ApplicationId`] and never by display
//! string. Hosted-view windows bypass this table entirely.

use desktop_contract::{AppDescriptor, AppModule, AppMountContext, ApplicationId, DefaultWindowSize};
use leptos::{view, IntoView, View};

/// Application id used for windows hosting externally supplied content.
pub const HOSTED_VIEW_APP_ID: &str = "system.hosted-view";

const CATALOG: [AppDescriptor; 6] = [
    AppDescriptor {
        app_id: "system.calculator",
        display_name: "Calculator",
        icon_id: "calculator",
        default_size: DefaultWindowSize { w: 420, h: 520 },
        show_in_launcher: true,
    },
    AppDescriptor {
        app_id: "system.notes",
        display_name: "Notes",
        icon_id: "notes",
        default_size: DefaultWindowSize { w: 520, h: 420 },
        show_in_launcher: true,
    },
    AppDescriptor {
        app_id: "system.files",
        display_name: "Files",
        icon_id: "folder",
        default_size: DefaultWindowSize { w: 640, h: 460 },
        show_in_launcher: true,
    },
    AppDescriptor {
        app_id: "system.terminal",
        display_name: "Terminal",
        icon_id: "terminal",
        default_size: DefaultWindowSize { w: 600, h: 400 },
        show_in_launcher: true,
    },
    AppDescriptor {
        app_id: "system.settings",
        display_name: "Settings",
        icon_id: "gear",
        default_size: DefaultWindowSize { w: 560, h: 480 },
        show_in_launcher: true,
    },
    AppDescriptor {
        app_id: HOSTED_VIEW_APP_ID,
        display_name: "Hosted View",
        icon_id: "globe",
        default_size: DefaultWindowSize { w: 720, h: 520 },
        show_in_launcher: false,
    },
];

/// The full static catalog.
pub fn catalog() -> &'static [AppDescriptor] {
    &CATALOG
}

/// Looks up a descriptor by application id.
pub fn descriptor(app_id: &ApplicationId) -> Option<&'static AppDescriptor> {
    CATALOG.iter().find(|d| d.app_id == app_id.as_str())
}

/// Descriptor backing hosted-view windows.
pub fn hosted_view_descriptor() -> &'static AppDescriptor {
    CATALOG
        .iter()
        .find(|d| d.app_id == HOSTED_VIEW_APP_ID)
        .expect("hosted view registered in catalog")
}

/// Entries listed by the start menu.
pub fn launcher_entries() -> impl Iterator<Item = &'static AppDescriptor> {
    CATALOG.iter().filter(|d| d.show_in_launcher)
}

/// Placeholder panel used for every catalog entry in this runtime.
///
/// Real app panels are external collaborators; the runtime only requires
/// that they satisfy [`AppModule`], so the placeholder keeps the mount
/// contract exercised without pulling presentation crates in.
pub struct PlaceholderPanel {
    label: &'static str,
}

impl AppModule for PlaceholderPanel {
    fn mount(&self, ctx: AppMountContext) -> View {
        let label = self.label;
        let hosted = ctx.hosted_content_ref.clone();
        view! {
            <div class="app-panel-placeholder" data-window-id=ctx.window_id.to_string()>
                <p>{label}</p>
                {hosted.map(|url| view! { <p class="hosted-ref">{url}</p> })}
            </div>
        }
        .into_view()
    }
}

/// Resolves the panel module mounted into a window body for `app_id`.
pub fn app_module(app_id: &ApplicationId) -> PlaceholderPanel {
    let label = descriptor(app_id)
        .map(|d| d.display_name)
        .unwrap_or("Unknown application");
    PlaceholderPanel { label }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_id_is_well_formed() {
        for entry in catalog() {
            assert!(
                ApplicationId::new(entry.app_id).is_ok(),
                "bad id {}",
                entry.app_id
            );
        }
    }

    #[test]
    fn descriptor_lookup_by_id() {
        let id = ApplicationId::trusted("system.terminal");
        let found = descriptor(&id).expect("terminal descriptor");
        assert_eq!(found.display_name, "Terminal");
        assert!(descriptor(&ApplicationId::trusted("vendor.unknown")).is_none());
    }

    #[test]
    fn hosted_view_is_not_listed_in_launcher() {
        assert!(launcher_entries().all(|d| d.app_id != HOSTED_VIEW_APP_ID));
        assert_eq!(hosted_view_descriptor().app_id, HOSTED_VIEW_APP_ID);
    }
}
