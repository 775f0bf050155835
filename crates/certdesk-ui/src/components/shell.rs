use crate::app::Route;
use crate::components::toast::NotificationOutlet;
use crate::core::store::Placement;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub(crate) children: Children,
    pub(crate) active: Route,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    html! {
        <div class="app-shell">
            <nav class="navbar navbar-expand border-bottom mb-4">
                <div class="container-fluid">
                    <span class="navbar-brand">
                        <i class="fas fa-certificate me-2"></i>
                        {"Certdesk"}
                    </span>
                    <ul class="navbar-nav">
                        {nav_item(Route::Dashboard, "Dashboard", &props.active)}
                        {nav_item(Route::Upload, "Upload", &props.active)}
                    </ul>
                </div>
            </nav>
            <main class="container-fluid">
                {props.children.clone()}
            </main>
            <NotificationOutlet placement={Placement::Floating} />
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let is_active = match (&route, active) {
        (Route::Upload, Route::UploadProgress { .. }) => true,
        _ => &route == active,
    };
    html! {
        <li class="nav-item">
            <Link<Route> to={route} classes={classes!("nav-link", is_active.then_some("active"))}>
                {label.to_string()}
            </Link<Route>>
        </li>
    }
}
