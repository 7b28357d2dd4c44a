use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct TranscriptEntry<'a> {
    timestamp: String, // ISO-8601 local time
    speaker: &'a str,
    content: &'a str,
}

/// Append-only JSONL record of everything shown in the conversation
pub struct Transcript {
    file_path: PathBuf,
    file: File,
}

impl Transcript {
    /// Create a transcript under `logs_dir`; the file name is based on the current local time.
    pub fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir)
            .with_context(|| format!("Failed to create logs directory: {}", logs_dir.display()))?;

        let filename = format!("advisor-{}.jsonl", Local::now().format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open transcript: {}", file_path.display()))?;

        Ok(Self { file_path, file })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Append a single entry. Write failures are reported and otherwise ignored.
    pub fn record(&mut self, speaker: &str, content: &str) {
        let entry = TranscriptEntry {
            timestamp: Local::now().to_rfc3339(),
            speaker,
            content,
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            if let Err(e) = writeln!(self.file, "{}", json) {
                log::warn!("Transcript write failed: {}", e);
            }
        }
    }
}
