use super::poller::ProgressPoller;
use super::state::{Completion, FollowUp, PollStep, ProgressFrame, ProgressSession, TrackerStyle};
use crate::app::{ApiCtx, Route};
use crate::components::toast::notify;
use crate::core::store::Placement;
use crate::services::dom::redirect;
use gloo::console;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

#[derive(Properties, PartialEq)]
pub(crate) struct BatchTrackerProps {
    pub(crate) batch_id: AttrValue,
    pub(crate) style: TrackerStyle,
}

/// Progress bar bound to one batch; polling stops when the component unmounts.
#[function_component(BatchTracker)]
pub(crate) fn batch_tracker(props: &BatchTrackerProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let frame = use_state(ProgressFrame::waiting);
    let latest = use_mut_ref(ProgressFrame::waiting);
    let follow_up_timer = use_mut_ref(|| None::<Timeout>);
    let style = props.style;

    let show = {
        let frame = frame.clone();
        let latest = latest.clone();
        Callback::from(move |next: ProgressFrame| {
            *latest.borrow_mut() = next.clone();
            frame.set(next);
        })
    };
    let halt = {
        let show = show.clone();
        Callback::from(move |()| show.emit(latest.borrow().halted()))
    };

    use_effect_with_deps(
        move |batch_id: &AttrValue| {
            let poller = api_ctx.map(|ctx| {
                let on_step = {
                    let config = ctx.config.clone();
                    Callback::from(move |step: PollStep| match step {
                        PollStep::Progress(next) => show.emit(next),
                        PollStep::Finished(done) => {
                            show.emit(done.frame.clone());
                            let target = config.completion_redirect.clone();
                            let navigator = navigator.clone();
                            *follow_up_timer.borrow_mut() =
                                complete(&done, move |follow_up| match follow_up {
                                    FollowUp::Redirect { .. } => {
                                        if let Err(err) = redirect(&target) {
                                            console::error!("redirect failed", err.to_string());
                                        }
                                    }
                                    FollowUp::ResetForm { .. } => {
                                        if let Some(navigator) = &navigator {
                                            navigator.push(&Route::Upload);
                                        }
                                    }
                                });
                        }
                    })
                };
                let session = ProgressSession::new(batch_id.as_str(), style);
                ProgressPoller::start(ctx.client.clone(), session, on_step, halt)
            });
            move || drop(poller)
        },
        props.batch_id.clone(),
    );

    let (container, caption) = match style {
        TrackerStyle::Dashboard => ("progress-tracker mb-3", "progress-text small text-muted"),
        TrackerStyle::Upload => ("progress-tracker", "progress-text mt-2"),
    };

    html! {
        <div class={container} data-batch-id={props.batch_id.clone()}>
            <div class="progress">
                <div
                    class={classes!("progress-bar", "progress-bar-striped", frame.tone.class())}
                    role="progressbar"
                    style={frame.width_style()}
                    aria-valuenow={frame.percent.round().to_string()}
                    aria-valuemin="0"
                    aria-valuemax="100">
                </div>
            </div>
            <div class={caption}>{frame.text.clone()}</div>
        </div>
    }
}

/// Show the completion banner and schedule the follow-up, if any.
fn complete(done: &Completion, run: impl FnOnce(FollowUp) + 'static) -> Option<Timeout> {
    notify(done.severity, Placement::Floating, done.message.clone());
    done.follow_up.map(|follow_up| {
        let delay_ms = match follow_up {
            FollowUp::Redirect { delay_ms } | FollowUp::ResetForm { delay_ms } => delay_ms,
        };
        Timeout::new(delay_ms, move || run(follow_up))
    })
}
