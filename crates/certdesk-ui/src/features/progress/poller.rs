//! Timer-driven progress polling for one batch.

use super::state::{POLL_INTERVAL_MS, PollStep, ProgressSession};
use crate::services::api::ApiClient;
use gloo::console;
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use yew::Callback;

type TimerSlot = Rc<RefCell<Option<Interval>>>;

/// Owns the repeating timer of one [`ProgressSession`]. Dropping it cancels polling.
pub(crate) struct ProgressPoller {
    session: Rc<RefCell<ProgressSession>>,
    timer: TimerSlot,
}

impl ProgressPoller {
    pub(crate) fn start(
        client: Rc<ApiClient>,
        session: ProgressSession,
        on_step: Callback<PollStep>,
        on_halt: Callback<()>,
    ) -> Self {
        let session = Rc::new(RefCell::new(session));
        let timer: TimerSlot = Rc::new(RefCell::new(None));
        let tick = {
            let session = Rc::clone(&session);
            let timer = Rc::clone(&timer);
            move || poll_once(&client, &session, &timer, &on_step, &on_halt)
        };
        *timer.borrow_mut() = Some(Interval::new(POLL_INTERVAL_MS, tick));
        Self { session, timer }
    }
}

impl Drop for ProgressPoller {
    fn drop(&mut self) {
        self.session.borrow_mut().cancel();
        self.timer.borrow_mut().take();
    }
}

fn poll_once(
    client: &Rc<ApiClient>,
    session: &Rc<RefCell<ProgressSession>>,
    timer: &TimerSlot,
    on_step: &Callback<PollStep>,
    on_halt: &Callback<()>,
) {
    let path = {
        let mut session = session.borrow_mut();
        if !session.begin_request() {
            return;
        }
        session.path()
    };
    let client = Rc::clone(client);
    let session = Rc::clone(session);
    let timer = Rc::clone(timer);
    let on_step = on_step.clone();
    let on_halt = on_halt.clone();
    yew::platform::spawn_local(async move {
        match client.fetch_batch_progress(&path).await {
            Ok(progress) => {
                let step = session.borrow_mut().observe(&progress);
                if let Some(step) = step {
                    if matches!(step, PollStep::Finished(_)) {
                        timer.borrow_mut().take();
                    }
                    on_step.emit(step);
                }
            }
            Err(err) => {
                let halted = session.borrow_mut().transport_failed();
                if halted {
                    console::error!("Error tracking progress:", err.to_string());
                    timer.borrow_mut().take();
                    on_halt.emit(());
                }
            }
        }
    });
}
