use std::sync::Arc;

use crate::{
    config::{PromptConfig, TRANSCRIPT_PLACEHOLDER},
    error::{Result, SvodkaError},
    llm::LlmClient,
};

/// Which prompt template a generation call uses.
///
/// `ChunkSummary` is the lossy intermediate-compression step for one chunk
/// of a long transcript; `FullReport` is the final synthesis step. Both go
/// through the same generation primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptMode {
    ChunkSummary,
    FullReport,
}

impl PromptMode {
    fn template_name(self) -> &'static str {
        match self {
            PromptMode::ChunkSummary => "summary_prompt",
            PromptMode::FullReport => "analysis_prompt",
        }
    }
}

/// Wraps a single language-model call behind the prompt templates.
pub struct ReportGenerator {
    prompts: PromptConfig,
    client: Arc<dyn LlmClient>,
}

impl ReportGenerator {
    pub fn new(prompts: PromptConfig, client: Arc<dyn LlmClient>) -> Self {
        Self { prompts, client }
    }

    /// Render the mode's template with `text` and issue exactly one
    /// collaborator call. No retries: a failure aborts the enclosing job.
    pub async fn generate(&self, text: &str, mode: PromptMode) -> Result<String> {
        let template = match mode {
            PromptMode::ChunkSummary => &self.prompts.summary_prompt,
            PromptMode::FullReport => &self.prompts.analysis_prompt,
        };
        let user_prompt = render_template(template, text, mode)?;
        let response = self
            .client
            .complete(&self.prompts.system_prompt, &user_prompt)
            .await?;
        Ok(response.trim().to_string())
    }
}

fn render_template(template: &str, text: &str, mode: PromptMode) -> Result<String> {
    if !template.contains(TRANSCRIPT_PLACEHOLDER) {
        return Err(SvodkaError::TemplateMissingPlaceholder {
            mode: mode.template_name(),
        });
    }
    Ok(template.replace(TRANSCRIPT_PLACEHOLDER, text))
}
