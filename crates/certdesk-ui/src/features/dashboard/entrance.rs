use super::state::entrance_delay_ms;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Whether the card in entrance `slot` has faded in yet.
#[hook]
pub(crate) fn use_entrance(slot: usize) -> bool {
    let entered = use_state_eq(|| false);
    {
        let entered = entered.clone();
        use_effect_with_deps(
            move |slot: &usize| {
                let timer = Timeout::new(entrance_delay_ms(*slot), move || entered.set(true));
                move || drop(timer)
            },
            slot,
        );
    }
    *entered
}
