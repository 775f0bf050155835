//! Statistics polling for the dashboard page.

use super::state::STATS_POLL_INTERVAL_MS;
use crate::core::store::AppStore;
use crate::services::api::ApiClient;
use gloo::console;
use gloo_timers::callback::Interval;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::Dispatch;

/// Fetch statistics once and publish them to the store. Failures are logged only.
pub(crate) fn refresh_stats(client: Rc<ApiClient>) {
    yew::platform::spawn_local(async move {
        match client.fetch_dashboard_stats().await {
            Ok(stats) => Dispatch::<AppStore>::new().reduce_mut(|store| {
                store.dashboard.stats = Some(stats);
            }),
            Err(err) => console::error!("Error fetching dashboard stats:", err.to_string()),
        }
    });
}

/// Fetch immediately, then on a fixed interval while the caller is mounted.
#[hook]
pub(crate) fn use_stats_poller(client: Rc<ApiClient>) {
    use_effect_with_deps(
        move |_| {
            refresh_stats(Rc::clone(&client));
            let interval = Interval::new(STATS_POLL_INTERVAL_MS, move || {
                refresh_stats(Rc::clone(&client));
            });
            move || drop(interval)
        },
        (),
    );
}
