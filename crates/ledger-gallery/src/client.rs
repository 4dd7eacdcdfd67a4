use crate::config::AirtableConfig;
use crate::record::Record;
use crate::{Error, Result};
use reqwest::{Client, header};
use serde::Deserialize;
use url::{Url, form_urlencoded};

/// `records` may be absent or `null`; both read as an empty list.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Option<Vec<Record>>,
}

/// Percent-encodes a query value with spaces as `%20`, not `+`.
fn encode_query_value(value: &str) -> String {
    // byte_serialize escapes a literal '+' as %2B, so every '+' left is a space.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Read-only Airtable client. One request per call: no retries, caching or pagination.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    http: Client,
    config: AirtableConfig,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AirtableConfig {
        &self.config
    }

    /// `{base}/{baseId}/{table}?view={view}` with every part percent-encoded. Spaces in the
    /// view become `%20`.
    pub fn records_url(&self, table: &str, view: &str) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::CannotBeABase {
                url: self.config.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(&self.config.base_id)
            .push(table);
        url.set_query(Some(&format!("view={}", encode_query_value(view))));
        Ok(url)
    }

    pub async fn list_records(&self, table: &str, view: &str) -> Result<Vec<Record>> {
        let url = self.records_url(table, view)?;
        tracing::debug!(%table, %view, "fetching Airtable records");

        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %table, "Airtable request failed");
            return Err(Error::Server {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let records = serde_json::from_slice::<ListResponse>(&body)?
            .records
            .unwrap_or_default();
        tracing::debug!(count = records.len(), %table, "fetched Airtable records");
        Ok(records)
    }
}
