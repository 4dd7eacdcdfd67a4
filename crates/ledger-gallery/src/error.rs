pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable {name} is not set")]
    MissingEnv { name: String },

    #[error("invalid Airtable URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Airtable base URL cannot take path segments: {url}")]
    CannotBeABase { url: String },

    /// Carries the status only; the response body is dropped.
    #[error("Airtable fetch failed (HTTP {status})")]
    Server { status: u16 },

    #[error("Airtable fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Airtable response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
