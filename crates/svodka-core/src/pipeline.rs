use std::{path::PathBuf, sync::Arc};

use tokio::fs;

use crate::{
    chunk::{needs_chunking, plan},
    clean::clean_vtt,
    config::Config,
    error::Result,
    progress::{NullProgress, PipelineEvent, ProgressSink},
    report::{PromptMode, ReportGenerator},
    store::{ArtifactKind, ArtifactStore},
    subtitle::{SubtitleSource, video_id},
};

/// Chars of report text surfaced as the job's preview.
const PREVIEW_CHARS: usize = 400;

/// Result of one completed job.
#[derive(Debug)]
pub struct JobOutcome {
    pub video_id: String,
    pub report: String,
    pub report_path: PathBuf,
    /// Bounded excerpt of the report for terminal display.
    pub preview: String,
}

/// Drives one job end to end: transcript acquisition, the direct or
/// chunked generation path, and artifact persistence.
///
/// Every intermediate artifact is written as soon as it exists and any
/// artifact already on disk is trusted without revalidation, so rerunning
/// a failed job resumes from the last completed step instead of repeating
/// collaborator calls.
pub struct Pipeline {
    config: Config,
    store: ArtifactStore,
    subtitles: Arc<dyn SubtitleSource>,
    generator: ReportGenerator,
    progress: Arc<dyn ProgressSink>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        store: ArtifactStore,
        subtitles: Arc<dyn SubtitleSource>,
        generator: ReportGenerator,
    ) -> Self {
        Self {
            config,
            store,
            subtitles,
            generator,
            progress: Arc::new(NullProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(&self, url: &str) -> Result<JobOutcome> {
        let video_id = video_id(url);

        // A finished report short-circuits the whole job.
        if self.store.exists(&video_id, ArtifactKind::Report) {
            let report = self.store.read(&video_id, ArtifactKind::Report).await?;
            self.progress
                .event(&PipelineEvent::ReportReady { cached: true });
            return Ok(self.outcome(video_id, report));
        }

        let transcript = self.obtain_transcript(url, &video_id).await?;

        let report = if needs_chunking(&transcript, self.config.llm.max_chars) {
            self.chunked_report(&video_id, &transcript).await?
        } else {
            self.progress.event(&PipelineEvent::DirectPath);
            self.generator
                .generate(&transcript, PromptMode::FullReport)
                .await?
        };

        self.store
            .write(&video_id, ArtifactKind::Report, &report)
            .await?;
        self.progress
            .event(&PipelineEvent::ReportReady { cached: false });
        Ok(self.outcome(video_id, report))
    }

    async fn obtain_transcript(&self, url: &str, video_id: &str) -> Result<String> {
        let cached = self.store.exists(video_id, ArtifactKind::Transcript);
        let transcript = if cached {
            self.store.read(video_id, ArtifactKind::Transcript).await?
        } else {
            let work_dir = self.store.temp_dir(video_id);
            fs::create_dir_all(&work_dir).await?;
            let raw = self.subtitles.fetch(url, &work_dir).await?;
            let cleaned = clean_vtt(&raw);
            self.store
                .write(video_id, ArtifactKind::Transcript, &cleaned)
                .await?;
            cleaned
        };
        self.progress.event(&PipelineEvent::TranscriptReady {
            chars: transcript.chars().count(),
            cached,
        });
        Ok(transcript)
    }

    /// Chunk, summarize each chunk (reusing cached summaries), then
    /// synthesize the final report from the concatenated summaries.
    ///
    /// Summaries are persisted one by one, so a failure mid-way leaves the
    /// completed ones on disk for the next run.
    async fn chunked_report(&self, video_id: &str, transcript: &str) -> Result<String> {
        let chunks = plan(transcript, self.config.llm.max_chars);
        let total = chunks.len();
        self.progress.event(&PipelineEvent::ChunkingStarted { total });

        let mut summaries = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            let key = ArtifactKind::ChunkSummary(index);
            let cached = self.store.exists(video_id, key);
            let summary = if cached {
                self.store.read(video_id, key).await?
            } else {
                let summary = self
                    .generator
                    .generate(chunk, PromptMode::ChunkSummary)
                    .await?;
                self.store.write(video_id, key, &summary).await?;
                summary
            };
            self.progress.event(&PipelineEvent::ChunkReady {
                index,
                total,
                cached,
            });
            summaries.push(summary);
        }

        self.progress
            .event(&PipelineEvent::CombiningSummaries { total });
        let combined = summaries.join("\n\n");
        self.store
            .write(video_id, ArtifactKind::CombinedSummary, &combined)
            .await?;

        self.generator
            .generate(&combined, PromptMode::FullReport)
            .await
    }

    fn outcome(&self, video_id: String, report: String) -> JobOutcome {
        let report_path = self.store.path(&video_id, ArtifactKind::Report);
        let preview = preview(&report);
        JobOutcome {
            video_id,
            report,
            report_path,
            preview,
        }
    }
}

/// First [`PREVIEW_CHARS`] chars of the report, char-boundary safe.
fn preview(report: &str) -> String {
    if report.chars().count() <= PREVIEW_CHARS {
        return report.to_string();
    }
    let excerpt: String = report.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", excerpt)
}
