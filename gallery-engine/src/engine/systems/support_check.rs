//! Capability probe scheduling.
//!
//! Probes run off the frame: spawned on the browser's event loop for WASM,
//! blocked on for native where the desktop provider answers immediately.
//! Results land in [`ProbeResults`] and are applied at the start of a frame.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::capability::{ProbeTicket, SupportStatus, SupportVerdict, check_support};
use crate::config::GalleryConfig;
use crate::engine::systems::asset_loading::ConfigLoader;
use crate::notify::Notifications;

/// Request a (re-)run of the capability checklist.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SupportCheckRequested;

/// Completed probes waiting to be applied.
#[derive(Resource, Default, Clone)]
pub struct ProbeResults(Arc<Mutex<Vec<(ProbeTicket, SupportVerdict)>>>);

impl ProbeResults {
    pub fn push(&self, ticket: ProbeTicket, verdict: SupportVerdict) {
        if let Ok(mut results) = self.0.lock() {
            results.push((ticket, verdict));
        }
    }

    fn take(&self) -> Vec<(ProbeTicket, SupportVerdict)> {
        self.0
            .lock()
            .map(|mut results| std::mem::take(&mut *results))
            .unwrap_or_default()
    }
}

/// Issue the startup probe once configuration has settled, so the desktop
/// simulation flag is known before the provider is chosen.
pub fn request_initial_support_check(
    loader: Res<ConfigLoader>,
    mut requested: Local<bool>,
    mut support_checks: EventWriter<SupportCheckRequested>,
) {
    if *requested || !loader.is_settled() {
        return;
    }
    *requested = true;
    support_checks.write(SupportCheckRequested);
}

/// Start a probe for pending requests. Several requests in one frame collapse
/// into a single run.
pub fn start_support_checks(
    mut events: EventReader<SupportCheckRequested>,
    mut support: ResMut<SupportStatus>,
    results: Res<ProbeResults>,
    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))] config: Res<GalleryConfig>,
) {
    if events.read().count() == 0 {
        return;
    }

    let ticket = support.begin_check();
    info!("Starting AR capability probe");

    #[cfg(target_arch = "wasm32")]
    {
        let results = results.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let verdict = check_support(&crate::capability::web::WebCapabilities).await;
            results.push(ticket, verdict);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let provider = crate::capability::desktop::DesktopCapabilities {
            simulate: config.desktop_simulation,
        };
        let verdict = bevy::tasks::block_on(check_support(&provider));
        results.push(ticket, verdict);
    }
}

/// Apply finished probes. Stale results are discarded by the status itself.
pub fn apply_support_results(
    results: Res<ProbeResults>,
    mut support: ResMut<SupportStatus>,
    mut notifications: ResMut<Notifications>,
) {
    for (ticket, verdict) in results.take() {
        support.resolve(ticket, verdict, &mut notifications);
    }
}
