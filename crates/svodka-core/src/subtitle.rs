use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use regex::Regex;
use tokio::{fs, process::Command};

use crate::{
    config::SubtitleConfig,
    error::{Result, SvodkaError},
};

/// Derive the job identifier from a video URL.
///
/// YouTube URLs carry an 11-char `[0-9A-Za-z_-]` token after `v=` or a
/// path separator; when none is found the URL is hashed instead, so the
/// identifier is deterministic and never empty for any input.
pub fn video_id(url: &str) -> String {
    let pattern = Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("valid video id regex");
    if let Some(captures) = pattern.captures(url) {
        return captures[1].to_string();
    }
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    hasher.finish().to_string()
}

/// Fetches the raw cue-based subtitle text for a video, or fails if no
/// track is available in an acceptable language.
#[async_trait]
pub trait SubtitleSource: Send + Sync {
    async fn fetch(&self, url: &str, work_dir: &Path) -> Result<String>;
}

/// Subtitle source shelling out to yt-dlp. Requests manual subtitles and
/// auto-captions in the configured language preference order, in VTT
/// format, without downloading the video itself.
pub struct YtDlpSource {
    config: SubtitleConfig,
}

impl YtDlpSource {
    pub fn new(config: SubtitleConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SubtitleSource for YtDlpSource {
    async fn fetch(&self, url: &str, work_dir: &Path) -> Result<String> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let temp_prefix = format!("temp_sub_{}", stamp);
        let output_template = work_dir.join(&temp_prefix);

        let mut command = Command::new("yt-dlp");
        command
            .arg(url)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(self.config.preferred_languages.join(","))
            .arg("--sub-format")
            .arg("vtt")
            .arg("-o")
            .arg(&output_template)
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--no-check-certificates");

        if let Some(browser) = &self.config.browser_for_cookies {
            command.arg("--cookies-from-browser").arg(browser);
        } else if let Some(cookies_file) = &self.config.cookies_file {
            command.arg("--cookies").arg(cookies_file);
        }

        let output = command.output().await?;
        if !output.status.success() {
            return Err(SvodkaError::SubtitleFailed {
                url: url.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        // yt-dlp appends the language and .vtt to the template on its own
        let downloaded = find_downloaded_vtt(work_dir, &temp_prefix)?.ok_or_else(|| {
            SvodkaError::SubtitleFailed {
                url: url.to_string(),
                reason: format!(
                    "no subtitle track found in languages [{}]",
                    self.config.preferred_languages.join(", ")
                ),
            }
        })?;

        let raw = fs::read_to_string(&downloaded).await?;
        let _ = fs::remove_file(&downloaded).await;
        Ok(raw)
    }
}

fn find_downloaded_vtt(work_dir: &Path, prefix: &str) -> Result<Option<std::path::PathBuf>> {
    for entry in std::fs::read_dir(work_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(prefix) && name.ends_with(".vtt") {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
