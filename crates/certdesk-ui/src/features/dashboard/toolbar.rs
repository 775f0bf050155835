use super::state::{
    DASHBOARD_FILTERS, REFRESH_COOLDOWN_MS, REPORT_FILE_NAME, filter_log_message, report_csv,
};
use crate::core::store::AppStore;
use crate::services::dom::{CSV_MIME, download_text};
use gloo::console;
use gloo_timers::callback::Timeout;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardToolbarProps {
    pub(crate) on_refresh: Callback<()>,
}

#[function_component(DashboardToolbar)]
pub(crate) fn dashboard_toolbar(props: &DashboardToolbarProps) -> Html {
    let refreshing = use_state_eq(|| false);
    let cooldown = use_mut_ref(|| None::<Timeout>);
    let stats = use_selector(|store: &AppStore| store.dashboard.stats.clone());

    let on_refresh = {
        let refreshing = refreshing.clone();
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| {
            if *refreshing {
                return;
            }
            refreshing.set(true);
            on_refresh.emit(());
            let refreshing = refreshing.clone();
            *cooldown.borrow_mut() = Some(Timeout::new(REFRESH_COOLDOWN_MS, move || {
                refreshing.set(false);
            }));
        })
    };
    let on_export = Callback::from(move |_: MouseEvent| {
        let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
        let exported = report_csv(&timestamp, (*stats).as_ref())
            .map_err(anyhow::Error::from)
            .and_then(|csv| download_text(REPORT_FILE_NAME, CSV_MIME, &csv));
        if let Err(err) = exported {
            console::error!("report export failed", err.to_string());
        }
    });

    html! {
        <div class="d-flex flex-wrap align-items-center gap-2 mb-4">
            {for DASHBOARD_FILTERS.iter().map(|&(key, label, options)| filter_select(key, label, options))}
            <div class="ms-auto d-flex gap-2">
                <button id="refreshStats" type="button" class="btn btn-outline-primary btn-sm" disabled={*refreshing} onclick={on_refresh}>
                    if *refreshing {
                        <i class="fas fa-spinner fa-spin me-1"></i>{"Refreshing..."}
                    } else {
                        <i class="fas fa-sync me-1"></i>{"Refresh"}
                    }
                </button>
                <button id="exportReport" type="button" class="btn btn-outline-secondary btn-sm" onclick={on_export}>
                    <i class="fas fa-download me-1"></i>{"Export Report"}
                </button>
            </div>
        </div>
    }
}

fn filter_select(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Html {
    let on_change = Callback::from(move |event: Event| {
        if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
            console::log!(filter_log_message(key, &select.value()));
        }
    });
    html! {
        <select class="form-select form-select-sm filter-select w-auto" data-filter={key} aria-label={label} onchange={on_change}>
            {for options.iter().map(|option| html! { <option value={*option}>{*option}</option> })}
        </select>
    }
}
