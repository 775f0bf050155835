use super::charts::{ChartKind, series_for};
use super::entrance::use_entrance;
use super::state::{RESIZE_DEBOUNCE_MS, card_style};
use crate::core::store::AppStore;
use crate::services::charts::ChartHandle;
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::window;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ChartCardProps {
    pub(crate) kind: ChartKind,
    /// Entrance animation slot.
    pub(crate) slot: usize,
    #[prop_or_default]
    pub(crate) class: Classes,
}

/// One chart card. The chart instance lives as long as the component.
#[function_component(ChartCard)]
pub(crate) fn chart_card(props: &ChartCardProps) -> Html {
    let kind = props.kind;
    let canvas_ref = use_node_ref();
    let entered = use_entrance(props.slot);
    let handle = use_mut_ref(|| None::<ChartHandle>);
    let theme = use_selector(|store: &AppStore| store.dashboard.theme);
    let series = use_selector(move |store: &AppStore| series_for(kind, store.dashboard.stats.as_ref()));

    {
        let canvas_ref = canvas_ref.clone();
        let handle = handle.clone();
        let theme = *theme;
        let initial = (*series).clone().unwrap_or_default();
        use_effect_with_deps(
            move |_| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    match ChartHandle::create(&canvas, kind, &initial, theme) {
                        Ok(chart) => *handle.borrow_mut() = Some(chart),
                        Err(err) => console::error!("chart init failed", kind.canvas_id(), err.to_string()),
                    }
                }
                move || {
                    handle.borrow_mut().take();
                }
            },
            (),
        );
    }
    {
        let handle = handle.clone();
        use_effect_with_deps(
            move |series: &Rc<Option<_>>| {
                if let (Some(chart), Some(series)) = (handle.borrow().as_ref(), series.as_ref()) {
                    if let Err(err) = chart.replace_series(series) {
                        console::error!("chart update failed", err.to_string());
                    }
                }
                || ()
            },
            series,
        );
    }
    {
        let handle = handle.clone();
        use_effect_with_deps(
            move |theme: &Rc<_>| {
                if let Some(chart) = handle.borrow().as_ref() {
                    if let Err(err) = chart.apply_theme(**theme) {
                        console::error!("chart theme update failed", err.to_string());
                    }
                }
                || ()
            },
            theme,
        );
    }
    {
        let handle = handle.clone();
        use_effect_with_deps(
            move |_| {
                let pending = Rc::new(RefCell::new(None::<Timeout>));
                let listener = EventListener::new(&window(), "resize", move |_| {
                    let handle = handle.clone();
                    let debounced = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                        if let Some(chart) = handle.borrow().as_ref() {
                            chart.resize().ok();
                        }
                    });
                    *pending.borrow_mut() = Some(debounced);
                });
                move || drop(listener)
            },
            (),
        );
    }

    html! {
        <div class={classes!("card", "h-100", props.class.clone())} style={card_style(entered, None)}>
            <div class="card-header">
                <h6 class="mb-0">{kind.title()}</h6>
            </div>
            <div class="card-body">
                <div class="chart-container" style="position: relative; height: 300px;">
                    <canvas id={kind.canvas_id()} ref={canvas_ref}></canvas>
                </div>
            </div>
        </div>
    }
}
