//! The scheduled run: fetch, transform, write, deliver.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tracing::{info, trace};

use crate::climate::{ClimateQuery, fetch_features};
use crate::fetch::HttpClient;
use crate::fetch::auth::UrlParam;
use crate::infra::credentials::CredentialStore;
use crate::output::{report_file_name, write_report};
use crate::record::observations_from_features;
use crate::settings::TaskSettings;
use crate::upload::{FileTransfer, deliver};
use crate::window::{DATE_FORMAT, DateWindow};

/// Work item a scheduler may hand to a run. This task does not read it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueElement {
    pub reference: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Everything a run needs from its surroundings.
pub struct RunContext {
    pub settings: TaskSettings,
    pub credentials: Box<dyn CredentialStore>,
    pub http: Box<dyn HttpClient>,
    pub transfer: Box<dyn FileTransfer>,
}

/// Entry point for the scheduler. Uses the local wall-clock time.
pub async fn process(ctx: &RunContext, queue_element: Option<&QueueElement>) -> Result<()> {
    process_at(ctx, queue_element, Local::now().naive_local()).await
}

/// Runs the task as if started at `now`.
///
/// Any error aborts the run. A failed fetch leaves no file behind; a failed
/// upload leaves the written report in the working directory.
#[tracing::instrument(skip_all, fields(now = %now))]
pub async fn process_at(
    ctx: &RunContext,
    _queue_element: Option<&QueueElement>,
    now: NaiveDateTime,
) -> Result<()> {
    trace!("Running process.");
    let settings = &ctx.settings;

    let window = DateWindow::ending_before(now);
    let (from, to) = window.format(DATE_FORMAT);
    info!(from = %from, to = %to, "Date window");

    let dmi = ctx.credentials.get(&settings.api_credential).await?;
    let query = ClimateQuery::new(&dmi.username, settings, window);
    let client = UrlParam::api_key(&*ctx.http, dmi.password);
    let features = fetch_features(&client, &query).await?;

    let records = observations_from_features(&settings.station_id, &features)?;

    let path = settings.work_dir.join(report_file_name(now));
    write_report(&path, &records)?;
    info!(path = %path.display(), rows = records.len(), "Data written");

    if !settings.upload {
        info!("Upload disabled, keeping local file");
        return Ok(());
    }

    let server = ctx.credentials.get(&settings.server_credential).await?;
    let account = ctx.credentials.get(&settings.account_credential).await?;
    deliver(&*ctx.transfer, &server, &account, &path, &settings.remote_dir).await?;

    Ok(())
}
