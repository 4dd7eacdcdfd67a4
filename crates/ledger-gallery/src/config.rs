use crate::{Error, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.airtable.com/v0/";
pub const API_KEY_VAR: &str = "AIRTABLE_API_KEY";
pub const BASE_ID_VAR: &str = "AIRTABLE_BASE_ID";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl std::fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AirtableConfig {
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads `AIRTABLE_API_KEY` and `AIRTABLE_BASE_ID`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_vars(API_KEY_VAR, BASE_ID_VAR)
    }

    pub fn from_env_vars(api_key_var: &str, base_id_var: &str) -> Result<Self> {
        Self::from_lookup(api_key_var, base_id_var, |name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env_vars`] with a custom lookup; blank values count as unset.
    pub fn from_lookup(
        api_key_var: &str,
        base_id_var: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::MissingEnv {
                    name: name.to_string(),
                })
        };
        Self::new(read(api_key_var)?, read(base_id_var)?)
    }

    /// Points the client somewhere else, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
