use super::logic::ACCEPT_ATTRIBUTE;
use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DropZoneProps {
    pub(crate) dragging: bool,
    pub(crate) disabled: bool,
    pub(crate) on_drag: Callback<bool>,
    pub(crate) on_file: Callback<File>,
}

/// Clickable drop target wrapping the hidden file input.
#[function_component(DropZone)]
pub(crate) fn drop_zone(props: &DropZoneProps) -> Html {
    let input_ref = use_node_ref();

    let on_click = {
        let input_ref = input_ref.clone();
        let disabled = props.disabled;
        Callback::from(move |event: MouseEvent| {
            // Clicks re-dispatched by the input itself bubble back up here.
            if disabled || event.target_dyn_into::<HtmlInputElement>().is_some() {
                return;
            }
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let on_change = {
        let on_file = props.on_file.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file.emit(file);
            }
            input.set_value("");
        })
    };
    let highlight = {
        let on_drag = props.on_drag.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            on_drag.emit(true);
        })
    };
    let unhighlight = {
        let on_drag = props.on_drag.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            on_drag.emit(false);
        })
    };
    let on_drop = {
        let on_drag = props.on_drag.clone();
        let on_file = props.on_file.clone();
        let disabled = props.disabled;
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            on_drag.emit(false);
            if disabled {
                return;
            }
            let dropped = event
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = dropped {
                on_file.emit(file);
            }
        })
    };

    html! {
        <div
            class={classes!("upload-area", "border", "border-2", "border-dashed", "rounded", "p-5", "text-center", props.dragging.then_some("dragover"))}
            role="button"
            onclick={on_click}
            ondragenter={highlight.clone()}
            ondragover={highlight}
            ondragleave={unhighlight}
            ondrop={on_drop}>
            <i class="fas fa-cloud-upload-alt fa-3x text-primary mb-3"></i>
            <p class="mb-1">{"Drag and drop your file here, or click to browse"}</p>
            <small class="text-muted">{"Supported formats: .xlsx, .xls, .csv (max 16MB)"}</small>
            <input
                ref={input_ref}
                id="fileInput"
                name="file"
                type="file"
                class="d-none"
                accept={ACCEPT_ATTRIBUTE}
                onchange={on_change}
            />
        </div>
    }
}
