use std::path::PathBuf;

use tokio::fs;

use crate::error::Result;

/// Which persisted artifact of a job a key refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Transcript,
    /// Zero-based chunk index; file names are one-based like the chunk
    /// progress shown to the user.
    ChunkSummary(usize),
    CombinedSummary,
    Report,
}

/// Flat-file store for a job's intermediate and final text artifacts.
///
/// Intermediates live under `{reports_dir}/temp/{video_id}/`; the final
/// report sits at `{reports_dir}/{video_id}_report.{ext}`. Every
/// (video id, kind) pair maps to its own path, writes are whole-file
/// replaces, and nothing is ever deleted automatically.
pub struct ArtifactStore {
    reports_dir: PathBuf,
    report_ext: String,
}

impl ArtifactStore {
    pub fn new(reports_dir: impl Into<PathBuf>, report_ext: impl Into<String>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            report_ext: report_ext.into(),
        }
    }

    /// Scratch directory for a job, also used by the subtitle downloader.
    pub fn temp_dir(&self, video_id: &str) -> PathBuf {
        self.reports_dir.join("temp").join(video_id)
    }

    pub fn path(&self, video_id: &str, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::Transcript => self.temp_dir(video_id).join("transcript.txt"),
            ArtifactKind::ChunkSummary(index) => self
                .temp_dir(video_id)
                .join(format!("chunk_{}_summary.txt", index + 1)),
            ArtifactKind::CombinedSummary => self.temp_dir(video_id).join("combined_summary.txt"),
            ArtifactKind::Report => self
                .reports_dir
                .join(format!("{}_report.{}", video_id, self.report_ext)),
        }
    }

    pub fn exists(&self, video_id: &str, kind: ArtifactKind) -> bool {
        self.path(video_id, kind).exists()
    }

    /// Read a cached artifact. Errors if it was never written.
    pub async fn read(&self, video_id: &str, kind: ArtifactKind) -> Result<String> {
        Ok(fs::read_to_string(self.path(video_id, kind)).await?)
    }

    /// Write an artifact, creating parent directories and overwriting any
    /// previous content.
    pub async fn write(&self, video_id: &str, kind: ArtifactKind, content: &str) -> Result<()> {
        let path = self.path(video_id, kind);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_keys_map_to_distinct_paths() {
        let store = ArtifactStore::new("reports", "md");
        let kinds = [
            ArtifactKind::Transcript,
            ArtifactKind::ChunkSummary(0),
            ArtifactKind::ChunkSummary(1),
            ArtifactKind::CombinedSummary,
            ArtifactKind::Report,
        ];
        let mut paths: Vec<_> = kinds.iter().map(|k| store.path("abc123def45", *k)).collect();
        paths.push(store.path("other_id_999", ArtifactKind::Transcript));
        let unique: std::collections::HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn report_path_uses_configured_extension() {
        let store = ArtifactStore::new("reports", "txt");
        assert_eq!(
            store.path("abc123def45", ArtifactKind::Report),
            PathBuf::from("reports/abc123def45_report.txt")
        );
    }

    #[tokio::test]
    async fn write_read_exists_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "md");

        assert!(!store.exists("vid", ArtifactKind::Transcript));
        assert!(store.read("vid", ArtifactKind::Transcript).await.is_err());

        store
            .write("vid", ArtifactKind::Transcript, "hello")
            .await
            .unwrap();
        assert!(store.exists("vid", ArtifactKind::Transcript));
        assert_eq!(
            store.read("vid", ArtifactKind::Transcript).await.unwrap(),
            "hello"
        );
    }

    #[tokio::test]
    async fn write_overwrites_unconditionally() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "md");

        store
            .write("vid", ArtifactKind::ChunkSummary(0), "first")
            .await
            .unwrap();
        store
            .write("vid", ArtifactKind::ChunkSummary(0), "second")
            .await
            .unwrap();
        assert_eq!(
            store.read("vid", ArtifactKind::ChunkSummary(0)).await.unwrap(),
            "second"
        );
    }
}
