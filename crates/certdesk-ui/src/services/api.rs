//! HTTP client helpers (REST + multipart upload).

use crate::core::config::BootConfig;
use crate::core::logic::DASHBOARD_STATS_PATH;
use anyhow::{anyhow, bail};
use certdesk_api_models::{BatchProgress, DashboardStats};
use gloo_net::http::Request;
use std::rc::Rc;
use web_sys::{File, FormData};

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    config: Rc<BootConfig>,
}

impl ApiClient {
    pub(crate) const fn new(config: Rc<BootConfig>) -> Self {
        Self { config }
    }

    async fn get_json<T: for<'de> serde::Deserialize<'de>>(&self, path: &str) -> anyhow::Result<T> {
        let response = Request::get(&self.config.api_url(path))
            .send()
            .await?;
        if !response.ok() {
            bail!("GET {path} returned HTTP {}", response.status());
        }
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn fetch_dashboard_stats(&self) -> anyhow::Result<DashboardStats> {
        self.get_json(DASHBOARD_STATS_PATH).await
    }

    /// `path` comes from `ProgressSession::path`, already percent-encoded.
    pub(crate) async fn fetch_batch_progress(&self, path: &str) -> anyhow::Result<BatchProgress> {
        self.get_json(path).await
    }

    /// Post the file as multipart field `file` to the form action; returns the HTML response body.
    pub(crate) async fn submit_upload(&self, file: &File) -> anyhow::Result<String> {
        let form = FormData::new().map_err(|_| anyhow!("form-data failed"))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|err| anyhow!("attach file: {:?}", err))?;
        let response = Request::post(&self.config.upload_action).body(form).send().await?;
        if !response.ok() {
            bail!("upload returned HTTP {}", response.status());
        }
        Ok(response.text().await?)
    }
}
