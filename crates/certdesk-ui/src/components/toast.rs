//! Notification banners rendered from the shared store.

use crate::core::store::{AppStore, NOTIFICATION_TTL_MS, Notification, Placement, Severity};
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Push a banner into the shared store.
pub(crate) fn notify(
    severity: Severity,
    placement: Placement,
    message: impl Into<String>,
) {
    let message = message.into();
    Dispatch::<AppStore>::new().reduce_mut(move |store| {
        store.notifications.push(severity, placement, message);
    });
}

fn dismiss(id: u64) {
    Dispatch::<AppStore>::new().reduce_mut(|store| {
        store.notifications.dismiss(id);
    });
}

#[derive(Properties, PartialEq)]
pub(crate) struct NotificationOutletProps {
    pub(crate) placement: Placement,
    #[prop_or_default]
    pub(crate) class: Classes,
}

#[function_component(NotificationOutlet)]
pub(crate) fn notification_outlet(props: &NotificationOutletProps) -> Html {
    let placement = props.placement;
    let items = use_selector(move |store: &AppStore| store.notifications.for_placement(placement));
    let host_class = match placement {
        Placement::Floating => "notification-host position-fixed top-0 end-0 p-3",
        Placement::Inline => "notification-host",
    };

    html! {
        <div class={classes!(host_class, props.class.clone())} aria-live="polite" aria-atomic="true">
            {for items.iter().map(|item| html! { <Banner key={item.id} notification={item.clone()} /> })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BannerProps {
    notification: Notification,
}

#[function_component(Banner)]
fn banner(props: &BannerProps) -> Html {
    let id = props.notification.id;
    use_effect_with_deps(
        move |id: &u64| {
            let id = *id;
            let timer = Timeout::new(NOTIFICATION_TTL_MS, move || dismiss(id));
            move || drop(timer)
        },
        id,
    );
    let on_close = Callback::from(move |_: MouseEvent| dismiss(id));
    let severity = props.notification.severity;

    html! {
        <div class={classes!("alert", severity.alert_class(), "alert-dismissible", "fade", "show")} role="alert">
            <i class={classes!("fas", severity.icon_class(), "me-2")}></i>
            {props.notification.message.clone()}
            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
        </div>
    }
}
