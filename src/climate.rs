//! DMI climate data: municipality value query and response model.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::fetch::{HttpClient, fetch_json};
use crate::settings::TaskSettings;
use crate::window::DateWindow;

const ITEMS_PATH: &str = "v2/climateData/collections/municipalityValue/items";

#[derive(Debug, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Properties,
}

/// The fields of a feature this task reads; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    /// Mean temperature for the period. `null` when DMI has no value.
    pub value: Option<f64>,
    /// Start of the period as an ISO-8601 timestamp.
    pub from: Option<String>,
}

/// Query for one parameter of one municipality over a date window.
#[derive(Debug, Clone)]
pub struct ClimateQuery {
    pub base_url: String,
    pub municipality_id: String,
    pub parameter_id: String,
    pub time_resolution: String,
    pub window: DateWindow,
}

impl ClimateQuery {
    pub fn new(base_url: &str, settings: &TaskSettings, window: DateWindow) -> Self {
        Self {
            base_url: base_url.to_string(),
            municipality_id: settings.municipality_id.clone(),
            parameter_id: settings.parameter_id.clone(),
            time_resolution: settings.time_resolution.clone(),
            window,
        }
    }

    /// Builds the items URL. The API key is not part of it; see [`crate::fetch::auth::UrlParam`].
    pub fn url(&self) -> Result<reqwest::Url> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), ITEMS_PATH);
        let mut url = reqwest::Url::parse(&raw)
            .with_context(|| format!("Invalid climate API base URL '{}'", self.base_url))?;

        url.query_pairs_mut()
            .append_pair("municipalityId", &self.municipality_id)
            .append_pair("parameterId", &self.parameter_id)
            .append_pair("timeResolution", &self.time_resolution)
            .append_pair("datetime", &self.window.interval());

        Ok(url)
    }
}

/// Fetches the features for `query`. A body without `features` yields an empty list.
#[tracing::instrument(
    skip_all,
    fields(municipality = %query.municipality_id, parameter = %query.parameter_id)
)]
pub async fn fetch_features<C: HttpClient>(
    client: &C,
    query: &ClimateQuery,
) -> Result<Vec<Feature>> {
    let url = query.url()?;
    let collection: FeatureCollection = fetch_json(client, url).await?;

    info!(features = collection.features.len(), "Climate data fetched");
    Ok(collection.features)
}
