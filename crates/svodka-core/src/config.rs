use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SvodkaError};

/// Placeholder every prompt template must contain; replaced with the
/// transcript (or chunk) text at generation time.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub prompts: PromptConfig,
    pub subtitle: SubtitleConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Transcripts longer than this many chars are chunked before
    /// summarization.
    pub max_chars: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            max_chars: 15000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub system_prompt: String,
    /// Template for compressing one chunk of a long transcript.
    pub summary_prompt: String,
    /// Template for the final report, fed either the whole transcript or
    /// the concatenated chunk summaries.
    pub analysis_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are an assistant that writes concise, factual analysis \
                            reports from video transcripts. Use only information present \
                            in the transcript."
                .to_string(),
            summary_prompt: "Summarize the following transcript excerpt. Keep every \
                             technical detail, decision, number, and named concept; drop \
                             filler and repetition.\n\nTranscript excerpt:\n{transcript}"
                .to_string(),
            analysis_prompt: "Write a structured Markdown report from the following \
                              transcript with sections for Summary, Key Points, and \
                              Takeaways.\n\nTranscript:\n{transcript}"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubtitleConfig {
    /// Subtitle languages to request, in preference order.
    pub preferred_languages: Vec<String>,
    pub cookies_file: Option<String>,
    pub browser_for_cookies: Option<String>,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            preferred_languages: vec!["en".to_string()],
            cookies_file: None,
            browser_for_cookies: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub reports_dir: String,
    /// File extension for the final report.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: "reports".to_string(),
            format: "md".to_string(),
        }
    }
}

impl Config {
    /// Load and validate a config file. A missing file is an error; an
    /// empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SvodkaError::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate once at load time instead of probing at each use site.
    pub fn validate(&self) -> Result<()> {
        if self.llm.max_chars == 0 {
            return Err(SvodkaError::Config(
                "llm.max_chars must be a positive integer".to_string(),
            ));
        }
        if !self.prompts.summary_prompt.contains(TRANSCRIPT_PLACEHOLDER) {
            return Err(SvodkaError::Config(format!(
                "prompts.summary_prompt must contain the {} placeholder",
                TRANSCRIPT_PLACEHOLDER
            )));
        }
        if !self.prompts.analysis_prompt.contains(TRANSCRIPT_PLACEHOLDER) {
            return Err(SvodkaError::Config(format!(
                "prompts.analysis_prompt must contain the {} placeholder",
                TRANSCRIPT_PLACEHOLDER
            )));
        }
        if self.subtitle.preferred_languages.is_empty() {
            return Err(SvodkaError::Config(
                "subtitle.preferred_languages must list at least one language".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the LLM API key: explicit argument, then the `LLM_API_KEY`
/// environment variable, then the config file. Placeholder values left
/// over from a config template count as unset.
pub fn resolve_api_key(explicit: Option<&str>, config: &Config) -> Result<String> {
    resolve_api_key_with_env(explicit, std::env::var("LLM_API_KEY").ok(), config)
}

fn resolve_api_key_with_env(
    explicit: Option<&str>,
    env_key: Option<String>,
    config: &Config,
) -> Result<String> {
    let candidates = [
        explicit.map(str::to_string),
        env_key,
        config.llm.api_key.clone(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|key| !key.trim().is_empty() && !key.contains("YOUR_API_KEY"))
        .ok_or(SvodkaError::MissingApiKey)
}
