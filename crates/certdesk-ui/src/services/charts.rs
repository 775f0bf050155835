//! Bridge to the Chart.js global loaded by the host page.
//!
//! # Design
//! - The library is reached through `Reflect` on the global object; configs are
//!   built as JSON in `features::dashboard::charts` and parsed into JS values here.
//! - A [`ChartHandle`] owns its chart instance and destroys it on drop.

use crate::core::theme::ThemeMode;
use crate::features::dashboard::charts::{
    ChartKind, ChartPatch, ChartSeries, chart_config, default_patches, status_colours,
    theme_patches,
};
use anyhow::anyhow;
use js_sys::{Array, Function, JSON, Object, Reflect};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!("{:?}", err)
}

fn to_js(value: &Value) -> anyhow::Result<JsValue> {
    JSON::parse(&value.to_string()).map_err(js_error)
}

fn get(target: &JsValue, key: &str) -> anyhow::Result<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(js_error)
}

fn chart_constructor() -> anyhow::Result<Function> {
    get(&js_sys::global(), "Chart")?
        .dyn_into::<Function>()
        .map_err(|_| anyhow!("Chart.js is not loaded"))
}

/// Assign `patch.value` at `patch.path`, creating missing intermediate objects.
fn assign(root: &JsValue, patch: &ChartPatch) -> anyhow::Result<()> {
    let Some((last, parents)) = patch.path.split_last() else {
        return Ok(());
    };
    let mut target = root.clone();
    for key in parents {
        let mut next = get(&target, key)?;
        if !next.is_object() {
            next = Object::new().into();
            Reflect::set(&target, &JsValue::from_str(key), &next).map_err(js_error)?;
        }
        target = next;
    }
    Reflect::set(&target, &JsValue::from_str(last), &to_js(&patch.value)?).map_err(js_error)?;
    Ok(())
}

/// Apply global `Chart.defaults` for the current theme.
pub(crate) fn configure_defaults(theme: ThemeMode) -> anyhow::Result<()> {
    let defaults = get(&chart_constructor()?, "defaults")?;
    for patch in default_patches(theme) {
        assign(&defaults, &patch)?;
    }
    Ok(())
}

/// A live chart bound to one canvas.
pub(crate) struct ChartHandle {
    kind: ChartKind,
    chart: JsValue,
}

impl ChartHandle {
    pub(crate) fn create(
        canvas: &HtmlCanvasElement,
        kind: ChartKind,
        series: &ChartSeries,
        theme: ThemeMode,
    ) -> anyhow::Result<Self> {
        let config = to_js(&chart_config(kind, series, theme.chart_palette()))?;
        let args = Array::of2(canvas.as_ref(), &config);
        let chart = Reflect::construct(&chart_constructor()?, &args).map_err(js_error)?;
        Ok(Self { kind, chart })
    }

    fn call(&self, method: &str, args: &Array) -> anyhow::Result<JsValue> {
        let function = get(&self.chart, method)?
            .dyn_into::<Function>()
            .map_err(|_| anyhow!("chart has no `{method}` method"))?;
        function.apply(&self.chart, args).map_err(js_error)
    }

    fn update_quiet(&self) -> anyhow::Result<()> {
        self.call("update", &Array::of1(&JsValue::from_str("none")))?;
        Ok(())
    }

    /// Swap labels and values; empty series leave the chart as is.
    pub(crate) fn replace_series(&self, series: &ChartSeries) -> anyhow::Result<()> {
        if series.is_empty() {
            return Ok(());
        }
        let data = get(&self.chart, "data")?;
        Reflect::set(
            &data,
            &JsValue::from_str("labels"),
            &to_js(&Value::from(series.labels.clone()))?,
        )
        .map_err(js_error)?;
        let dataset = Reflect::get_u32(&get(&data, "datasets")?, 0).map_err(js_error)?;
        Reflect::set(
            &dataset,
            &JsValue::from_str("data"),
            &to_js(&Value::from(series.values.clone()))?,
        )
        .map_err(js_error)?;
        if self.kind == ChartKind::Status {
            Reflect::set(
                &dataset,
                &JsValue::from_str("backgroundColor"),
                &to_js(&Value::from(status_colours(series)))?,
            )
            .map_err(js_error)?;
        }
        self.update_quiet()
    }

    /// Recolour legend, ticks and grid for `theme`.
    pub(crate) fn apply_theme(&self, theme: ThemeMode) -> anyhow::Result<()> {
        let options = get(&self.chart, "options")?;
        for patch in theme_patches(self.kind, theme) {
            assign(&options, &patch)?;
        }
        self.update_quiet()
    }

    pub(crate) fn resize(&self) -> anyhow::Result<()> {
        self.call("resize", &Array::new())?;
        Ok(())
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        let _ = self.call("destroy", &Array::new());
    }
}
