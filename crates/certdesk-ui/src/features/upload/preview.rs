use super::logic::{FilePreview, SelectedFile};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct FileSummaryProps {
    pub(crate) file: SelectedFile,
    pub(crate) preview: Option<FilePreview>,
    pub(crate) disabled: bool,
    pub(crate) on_remove: Callback<()>,
}

/// Selected file name, size line, remove button and content preview.
#[function_component(FileSummary)]
pub(crate) fn file_summary(props: &FileSummaryProps) -> Html {
    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(()))
    };
    let icon = if props.file.kind.is_csv() {
        "fa-file-csv"
    } else {
        "fa-file-excel"
    };

    html! {
        <div class="file-preview card mt-3">
            <div class="card-body">
                <div class="d-flex align-items-center">
                    <i class={classes!("fas", icon, "fa-2x", "text-success", "me-3")}></i>
                    <div class="flex-grow-1">
                        <div id="fileName" class="fw-semibold">{props.file.meta.name.clone()}</div>
                        <small id="fileInfo" class="text-muted">{props.file.info_line()}</small>
                    </div>
                    <button type="button" class="btn btn-sm btn-outline-danger" disabled={props.disabled} onclick={on_remove}>
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                if let Some(preview) = &props.preview {
                    <div id="fileContentPreview" class="mt-3">
                        <h6 class="small text-muted">{format!("{} Preview", preview.label)}</h6>
                        <div class="bg-body-tertiary rounded p-2 font-monospace small">
                            {for preview.lines.iter().map(|line| html! { <div>{line.clone()}</div> })}
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}
