//! Plain-text study notes built from a transcript snapshot.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveDate};

use crate::error::Result;
use crate::message::Role;
use crate::transcript::TranscriptSnapshot;

const TITLE: &str = "Socratis Accounts Tutor - Session";
const TITLE_RULE: &str = "===========================================";
const MESSAGE_RULE: &str = "-------------------------------------------";

pub fn file_name(date: NaiveDate) -> String {
    format!("socratis-notes-{}.txt", date.format("%Y-%m-%d"))
}

/// Renders the notes. Message times are shown in `offset`.
pub fn format_transcript(
    snapshot: &TranscriptSnapshot,
    date: NaiveDate,
    offset: FixedOffset,
) -> String {
    let mut out = format!("{TITLE} {}\n{TITLE_RULE}\n\n", date.format("%Y-%m-%d"));
    for msg in snapshot.iter() {
        let speaker = match msg.role {
            Role::User => "YOU",
            Role::Model => "SOCRATIS",
        };
        let time = msg.timestamp.with_timezone(&offset).format("%H:%M:%S");
        out.push_str(&format!(
            "[{time}] {speaker}:\n{}\n\n{MESSAGE_RULE}\n\n",
            msg.text
        ));
    }
    out
}

/// Writes the notes into `dir` and returns the file path. Nothing is written
/// for an empty transcript.
pub fn write_to_dir(
    snapshot: &TranscriptSnapshot,
    dir: &Path,
    date: NaiveDate,
    offset: FixedOffset,
) -> Result<Option<PathBuf>> {
    if snapshot.is_empty() {
        return Ok(None);
    }
    let path = dir.join(file_name(date));
    std::fs::write(&path, format_transcript(snapshot, date, offset))?;
    Ok(Some(path))
}
