//! Svodka Core Library
//!
//! Core functionality for pulling YouTube subtitle tracks, cleaning them
//! into plain transcripts, and generating AI-written reports, chunking
//! transcripts that are too long for a single model call.

pub mod chunk;
pub mod clean;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod store;
pub mod subtitle;

// Re-export commonly used items at crate root
pub use chunk::{needs_chunking, plan};
pub use clean::clean_vtt;
pub use config::{Config, LlmConfig, OutputConfig, PromptConfig, SubtitleConfig, resolve_api_key};
pub use error::{Result, SvodkaError};
pub use llm::{LlmClient, OpenAiClient};
pub use pipeline::{JobOutcome, Pipeline};
pub use progress::{NullProgress, PipelineEvent, ProgressSink};
pub use report::{PromptMode, ReportGenerator};
pub use store::{ArtifactKind, ArtifactStore};
pub use subtitle::{SubtitleSource, YtDlpSource, video_id};
