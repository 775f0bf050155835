//! Document helpers: downloads, navigation and DOM observers.

use crate::core::theme::{THEME_ATTRIBUTE, ThemeMode};
use anyhow::anyhow;
use gloo::utils::{document, window};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Blob, BlobPropertyBag, Element, HtmlAnchorElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MutationObserver, MutationObserverInit,
    Url,
};
use yew::Callback;

/// Media type of every CSV download.
pub(crate) const CSV_MIME: &str = "text/csv;charset=utf-8;";

/// Offer `content` as a file download through a temporary object URL.
pub(crate) fn download_text(file_name: &str, mime: &str, content: &str) -> anyhow::Result<()> {
    let parts = Array::of1(&content.into());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| anyhow!("failed to create blob"))?;
    let url =
        Url::create_object_url_with_blob(&blob).map_err(|_| anyhow!("unable to create download"))?;

    let anchor: HtmlAnchorElement = document()
        .create_element("a")
        .map_err(|_| anyhow!("unable to create anchor"))?
        .dyn_into()
        .map_err(|_| anyhow!("anchor cast failed"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.set_attribute("style", "visibility: hidden").ok();
    let body = document().body().ok_or_else(|| anyhow!("missing body"))?;
    body.append_child(&anchor)
        .map_err(|_| anyhow!("unable to attach anchor"))?;
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();
    Ok(())
}

/// Replace the whole document body with server-rendered HTML.
pub(crate) fn replace_body(html: &str) -> anyhow::Result<()> {
    document()
        .body()
        .ok_or_else(|| anyhow!("missing body"))?
        .set_inner_html(html);
    Ok(())
}

/// Full-page navigation.
pub(crate) fn redirect(href: &str) -> anyhow::Result<()> {
    window()
        .location()
        .set_href(href)
        .map_err(|err| anyhow!("redirect failed: {:?}", err))
}

/// Theme currently declared on `<html>`.
pub(crate) fn current_theme() -> ThemeMode {
    let value = document()
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    ThemeMode::from_attribute(value.as_deref())
}

/// Reports theme attribute changes on `<html>` until dropped.
pub(crate) struct ThemeWatcher {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl ThemeWatcher {
    pub(crate) fn start(on_change: Callback<ThemeMode>) -> anyhow::Result<Self> {
        let root = document()
            .document_element()
            .ok_or_else(|| anyhow!("missing document element"))?;
        let callback = Closure::<dyn FnMut(Array)>::new(move |_records: Array| {
            on_change.emit(current_theme());
        });
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("mutation observer: {:?}", err))?;
        let options = MutationObserverInit::new();
        options.set_attributes(true);
        options.set_attribute_filter(&Array::of1(&THEME_ATTRIBUTE.into()));
        observer
            .observe_with_options(&root, &options)
            .map_err(|err| anyhow!("observe theme: {:?}", err))?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ThemeWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Fires a callback each time an element becomes visible past a threshold.
pub(crate) struct VisibilityWatcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl VisibilityWatcher {
    pub(crate) fn start(
        element: &Element,
        threshold: f64,
        on_visible: Callback<()>,
    ) -> anyhow::Result<Self> {
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let visible = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .is_ok_and(|entry| entry.is_intersecting())
            });
            if visible {
                on_visible.emit(());
            }
        });
        let options = IntersectionObserverInit::new();
        options.set_threshold(&threshold.into());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|err| anyhow!("intersection observer: {:?}", err))?;
        observer.observe(element);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
