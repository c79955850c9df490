use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvodkaError {
    #[error("Subtitle extraction failed for {url}: {reason}")]
    SubtitleFailed { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Prompt template for {mode} is missing the {{transcript}} placeholder")]
    TemplateMissingPlaceholder { mode: &'static str },

    #[error("Report generation failed: {reason}")]
    ReportFailed { reason: String },

    #[error("Missing API key: pass --api-key, set LLM_API_KEY, or add llm.api_key to the config")]
    MissingApiKey,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SvodkaError>;
