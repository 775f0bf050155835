use super::entrance::use_entrance;
use super::state::{
    COUNTER_FRAME_MS, CounterAnimation, STAT_VISIBILITY_THRESHOLD, StatKind, card_style,
    stat_values,
};
use crate::core::store::AppStore;
use crate::services::dom::VisibilityWatcher;
use gloo::console;
use gloo_timers::callback::Interval;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(DashboardStatCards)]
pub(crate) fn dashboard_stat_cards() -> Html {
    let stats = use_selector(|store: &AppStore| store.dashboard.stats.clone());
    let values = stat_values((*stats).as_ref());

    html! {
        <div class="row">
            {for values.into_iter().enumerate().map(|(index, (kind, value))| html! {
                <StatCard key={kind.key()} {kind} {value} {index} />
            })}
        </div>
    }
}

/// Drives the displayed number of one card towards its target.
#[derive(Clone)]
struct CounterDriver {
    displayed: UseStateHandle<i64>,
    shown: Rc<Cell<i64>>,
    target: Rc<Cell<i64>>,
    timer: Rc<RefCell<Option<Interval>>>,
}

impl CounterDriver {
    fn show(&self, value: i64) {
        self.shown.set(value);
        self.displayed.set(value);
    }

    fn animate_from(&self, start: i64) {
        let end = self.target.get();
        let Some(mut counter) = CounterAnimation::new(start, end) else {
            self.timer.borrow_mut().take();
            self.show(end);
            return;
        };
        self.show(start);
        let driver = self.clone();
        let interval = Interval::new(COUNTER_FRAME_MS, move || match counter.next_frame() {
            Some(value) => driver.show(value),
            None => {
                driver.timer.borrow_mut().take();
            }
        });
        *self.timer.borrow_mut() = Some(interval);
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    kind: StatKind,
    value: i64,
    index: usize,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    let card_ref = use_node_ref();
    let displayed = use_state_eq(|| 0_i64);
    let hovered = use_state_eq(|| false);
    let entered = use_entrance(props.index);
    let highlighted = use_state_eq(|| false);
    let shown = use_memo(|_| Rc::new(Cell::new(0_i64)), ());
    let target = use_memo(|_| Rc::new(Cell::new(0_i64)), ());
    let timer = use_mut_ref(|| None::<Interval>);
    let driver = CounterDriver {
        displayed: displayed.clone(),
        shown: (*shown).clone(),
        target: (*target).clone(),
        timer: timer.clone(),
    };

    use_effect_with_deps(
        move |_| {
            move || {
                timer.borrow_mut().take();
            }
        },
        (),
    );
    {
        let driver = driver.clone();
        use_effect_with_deps(
            move |value: &i64| {
                driver.target.set(*value);
                driver.animate_from(driver.shown.get());
                || ()
            },
            props.value,
        );
    }
    {
        let card_ref = card_ref.clone();
        let highlighted = highlighted.clone();
        let driver = driver.clone();
        use_effect_with_deps(
            move |_| {
                let watcher = card_ref.cast::<Element>().and_then(|card| {
                    let on_visible = Callback::from(move |()| {
                        highlighted.set(true);
                        driver.animate_from(0);
                    });
                    VisibilityWatcher::start(&card, STAT_VISIBILITY_THRESHOLD, on_visible)
                        .map_err(|err| console::warn!("stat card observer unavailable", err.to_string()))
                        .ok()
                });
                move || drop(watcher)
            },
            (),
        );
    }

    let on_enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let on_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let style = card_style(entered, Some(*hovered));
    let kind = props.kind;

    html! {
        <div class="col-xl-3 col-md-6 mb-4">
            <div
                ref={card_ref}
                class={classes!("card", "stat-card", "h-100", (*highlighted).then_some("animate-stat"))}
                data-stat={kind.key()}
                {style}
                onmouseenter={on_enter}
                onmouseleave={on_leave}>
                <div class="card-body">
                    <div class="d-flex align-items-center justify-content-between">
                        <div>
                            <div class="small text-muted">{kind.label()}</div>
                            <div class="h4 mb-0">{format!("{}{}", *displayed, kind.unit())}</div>
                        </div>
                        <i class={classes!("fas", kind.icon_class(), "fa-2x", "text-primary")}></i>
                    </div>
                </div>
            </div>
        </div>
    }
}
