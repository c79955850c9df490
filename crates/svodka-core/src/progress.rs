/// Pipeline progress notifications.
///
/// The core never prints. Adapters subscribe through this sink: the CLI
/// renders spinners and cache-hit marks, tests count events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineEvent {
    TranscriptReady { chars: usize, cached: bool },
    /// Transcript fits in one generation call; the summarize stage is
    /// skipped entirely.
    DirectPath,
    ChunkingStarted { total: usize },
    ChunkReady { index: usize, total: usize, cached: bool },
    CombiningSummaries { total: usize },
    ReportReady { cached: bool },
}

pub trait ProgressSink: Send + Sync {
    fn event(&self, event: &PipelineEvent);
}

/// Default sink that swallows every event.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn event(&self, _event: &PipelineEvent) {}
}
