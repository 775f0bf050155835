//! Root component, routing and wasm bootstrap.

use crate::components::shell::AppShell;
use crate::core::store::AppStore;
use crate::core::theme::ThemeMode;
use crate::features::dashboard::DashboardPage;
use crate::features::upload::UploadPage;
use crate::services::charts::configure_defaults;
use crate::services::dom::{ThemeWatcher, current_theme};
pub(crate) use api::ApiCtx;
use gloo::console;
use preferences::{ROOT_ID, boot_config};
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

mod api;
mod preferences;
mod routes;

#[function_component(CertdeskApp)]
fn certdesk_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(boot_config()), ());

    use_effect_with_deps(
        move |_| {
            let dispatch = Dispatch::<AppStore>::new();
            let theme = current_theme();
            dispatch.reduce_mut(|store| store.dashboard.theme = theme);
            let on_change = Callback::from(move |theme: ThemeMode| {
                dispatch.reduce_mut(|store| store.dashboard.theme = theme);
            });
            let watcher = ThemeWatcher::start(on_change)
                .map_err(|err| console::warn!("theme watcher unavailable", err.to_string()))
                .ok();
            move || drop(watcher)
        },
        (),
    );

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <RoutedShell />
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

#[function_component(RoutedShell)]
fn routed_shell() -> Html {
    let api = use_context::<ApiCtx>();
    let active = use_route::<Route>().unwrap_or(Route::NotFound);
    let Some(api) = api else {
        return html! {};
    };

    html! {
        <AppShell {active}>
            <Switch<Route> render={move |route| match route {
                Route::Dashboard => html! { <DashboardPage api={api.clone()} /> },
                Route::Upload => html! { <UploadPage api={api.clone()} /> },
                Route::UploadProgress { batch_id } => html! {
                    <UploadPage api={api.clone()} batch_id={Some(AttrValue::from(batch_id))} />
                },
                Route::NotFound => html! {
                    <div class="text-center text-muted py-5">
                        <h5>{"Page not found"}</h5>
                        <Link<Route> to={Route::Dashboard}>{"Back to dashboard"}</Link<Route>>
                    </div>
                },
            }} />
        </AppShell>
    }
}

/// Mount the app into `#root` (or `body` when the host page has no mount element).
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = configure_defaults(current_theme()) {
        console::warn!("chart defaults not applied", err.to_string());
    }
    if let Some(root) = gloo::utils::document().get_element_by_id(ROOT_ID) {
        yew::Renderer::<CertdeskApp>::with_root(root).render();
    } else {
        yew::Renderer::<CertdeskApp>::new().render();
    }
}
