use super::dropzone::DropZone;
use super::logic::{
    CsvRejection, FileMeta, FilePreview, FileRejection, SAMPLE_FILE_NAME, SIMULATION_TEXT,
    SIMULATION_TICK_MS, SUBMIT_FAILURE_MESSAGE, sample_csv, validate_csv_content, validate_file,
};
use super::preview::FileSummary;
use super::state::{UploadAction, UploadForm, simulated_width_style};
use crate::app::ApiCtx;
use crate::components::toast::{NotificationOutlet, notify};
use crate::core::store::{Placement, Severity};
use crate::features::progress::BatchTracker;
use crate::features::progress::state::TrackerStyle;
use crate::services::dom::{CSV_MIME, download_text, replace_body};
use gloo::console;
use gloo::file::futures::read_as_text;
use gloo_timers::callback::Interval;
use std::rc::Rc;
use web_sys::File;
use yew::prelude::*;

/// Yew reducer wrapper around the pure form model.
#[derive(Clone, Debug, Default, PartialEq)]
struct FormState(UploadForm);

impl Reducible for FormState {
    type Action = UploadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.apply(action)))
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct UploadPageProps {
    pub(crate) api: ApiCtx,
    #[prop_or_default]
    pub(crate) batch_id: Option<AttrValue>,
}

#[function_component(UploadPage)]
pub(crate) fn upload_page(props: &UploadPageProps) -> Html {
    html! {
        <div class="row justify-content-center">
            <div class="col-lg-8">
                <div class="card">
                    <div class="card-header d-flex align-items-center justify-content-between">
                        <h5 class="mb-0">{"Upload Student Data"}</h5>
                        <SampleDownload />
                    </div>
                    <div class="card-body">
                        <NotificationOutlet placement={Placement::Inline} />
                        if let Some(batch_id) = props.batch_id.clone() {
                            <BatchTracker {batch_id} style={TrackerStyle::Upload} />
                        } else {
                            <UploadFormCard api={props.api.clone()} />
                        }
                    </div>
                </div>
            </div>
        </div>
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn file_meta(file: &File) -> FileMeta {
    FileMeta {
        name: file.name(),
        size: file.size().max(0.0) as u64,
        media_type: file.type_(),
    }
}

fn reject(message: String) {
    notify(Severity::Error, Placement::Inline, message);
}

#[derive(Properties, PartialEq)]
struct UploadFormCardProps {
    api: ApiCtx,
}

#[function_component(UploadFormCard)]
fn upload_form_card(props: &UploadFormCardProps) -> Html {
    let form = use_reducer(FormState::default);
    let browser_file = use_mut_ref(|| None::<File>);
    let next_token = use_mut_ref(|| 0_u64);
    let simulation = use_mut_ref(|| None::<Interval>);
    let in_flight = use_mut_ref(|| false);

    {
        let dispatcher = form.dispatcher();
        use_effect_with_deps(
            move |running: &bool| {
                if *running {
                    if simulation.borrow().is_none() {
                        let interval = Interval::new(SIMULATION_TICK_MS, move || {
                            dispatcher.dispatch(UploadAction::SimulationTick(js_sys::Math::random()));
                        });
                        *simulation.borrow_mut() = Some(interval);
                    }
                } else {
                    simulation.borrow_mut().take();
                }
                || ()
            },
            form.0.simulation_running(),
        );
    }

    let on_drag = {
        let dispatcher = form.dispatcher();
        Callback::from(move |over: bool| {
            dispatcher.dispatch(if over {
                UploadAction::DragEnter
            } else {
                UploadAction::DragLeave
            });
        })
    };

    let on_file = {
        let dispatcher = form.dispatcher();
        let browser_file = browser_file.clone();
        Callback::from(move |file: File| match validate_file(Some(file_meta(&file))) {
            Ok(selected) => {
                let token = {
                    let mut next = next_token.borrow_mut();
                    *next = next.wrapping_add(1);
                    *next
                };
                let is_csv = selected.kind.is_csv();
                dispatcher.dispatch(UploadAction::Select(token, selected));
                *browser_file.borrow_mut() = Some(file.clone());
                if !is_csv {
                    dispatcher.dispatch(UploadAction::Preview(token, FilePreview::spreadsheet()));
                    return;
                }
                let dispatcher = dispatcher.clone();
                yew::platform::spawn_local(async move {
                    match read_as_text(&gloo::file::File::from(file)).await {
                        Ok(text) => dispatcher
                            .dispatch(UploadAction::Preview(token, FilePreview::from_csv(&text))),
                        Err(err) => console::error!("file preview failed", err.to_string()),
                    }
                });
            }
            Err(rejection) => {
                browser_file.borrow_mut().take();
                dispatcher.dispatch(UploadAction::Remove);
                reject(rejection.to_string());
            }
        })
    };

    let on_remove = {
        let dispatcher = form.dispatcher();
        let browser_file = browser_file.clone();
        Callback::from(move |()| {
            browser_file.borrow_mut().take();
            dispatcher.dispatch(UploadAction::Remove);
        })
    };

    let on_submit = {
        let dispatcher = form.dispatcher();
        let client = props.api.client.clone();
        let selected_kind = form.0.selected.as_ref().map(|file| file.kind);
        let can_submit = form.0.can_submit();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let file = browser_file.borrow().clone();
            let (Some(file), Some(kind)) = (file, selected_kind) else {
                reject(FileRejection::Missing.to_string());
                return;
            };
            // Handlers from an older render still see `can_submit`; the flag is shared.
            if !can_submit || *in_flight.borrow() {
                return;
            }
            *in_flight.borrow_mut() = true;
            dispatcher.dispatch(UploadAction::Validate);
            let dispatcher = dispatcher.clone();
            let browser_file = browser_file.clone();
            let in_flight = in_flight.clone();
            let client = client.clone();
            yew::platform::spawn_local(async move {
                if kind.is_csv() {
                    let checked = read_as_text(&gloo::file::File::from(file.clone()))
                        .await
                        .map_err(|_| CsvRejection::Unreadable)
                        .and_then(|text| validate_csv_content(&text));
                    if let Err(rejection) = checked {
                        reject(rejection.to_string());
                        *in_flight.borrow_mut() = false;
                        dispatcher.dispatch(UploadAction::ValidationFailed);
                        return;
                    }
                }
                dispatcher.dispatch(UploadAction::Submit);
                let uploaded = client.submit_upload(&file).await;
                if let Err(err) = uploaded.and_then(|html| replace_body(&html)) {
                    console::error!("Upload error:", err.to_string());
                    reject(SUBMIT_FAILURE_MESSAGE.to_string());
                    browser_file.borrow_mut().take();
                    *in_flight.borrow_mut() = false;
                    dispatcher.dispatch(UploadAction::Reset);
                }
            });
        })
    };

    let state = &form.0;
    html! {
        <form id="uploadForm" onsubmit={on_submit}>
            <DropZone
                dragging={state.dragging}
                disabled={state.is_locked()}
                {on_drag}
                {on_file}
            />
            if let Some(file) = state.selected.clone() {
                <FileSummary
                    {file}
                    preview={state.preview.clone()}
                    disabled={state.is_locked()}
                    {on_remove}
                />
            }
            if let Some(progress) = state.simulated_progress() {
                <div id="progressContainer" class="mt-3">
                    <div class="progress">
                        <div
                            class="progress-bar progress-bar-striped progress-bar-animated"
                            role="progressbar"
                            style={simulated_width_style(progress)}>
                        </div>
                    </div>
                    <div class="progress-text small text-muted mt-1">{SIMULATION_TEXT}</div>
                </div>
            }
            <div class="d-grid mt-4">
                <button id="submitBtn" type="submit" class="btn btn-primary" disabled={!state.can_submit()}>
                    if state.is_locked() {
                        <i class="fas fa-spinner fa-spin me-2"></i>
                    } else {
                        <i class="fas fa-upload me-2"></i>
                    }
                    {state.submit_label()}
                </button>
            </div>
        </form>
    }
}

#[function_component(SampleDownload)]
fn sample_download() -> Html {
    let on_click = Callback::from(|_: MouseEvent| {
        let downloaded = sample_csv()
            .map_err(anyhow::Error::from)
            .and_then(|csv| download_text(SAMPLE_FILE_NAME, CSV_MIME, &csv));
        if let Err(err) = downloaded {
            console::error!("sample download failed", err.to_string());
        }
    });
    html! {
        <button type="button" class="btn btn-outline-secondary btn-sm" onclick={on_click}>
            <i class="fas fa-download me-1"></i>{"Download sample"}
        </button>
    }
}
