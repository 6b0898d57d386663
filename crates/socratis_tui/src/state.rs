//! TUI state: the chat session, input buffer, scroll, status and pending images.
//!
//! [TuiState] owns the [ChatSession]; every event from a turn driver is
//! applied here, on the UI thread.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, Offset};
use socratis_core::{ChatEvent, ImageAttachment, Role, export};
use socratis_observability::LogBuffer;
use socratis_runtime::{ChatSession, RuntimeError, TurnRequest, parse_image_arg};
use tracing::{error, info, warn};

use crate::commands::{Command, HELP_TEXT};
use crate::layouts::HeaderStatus;
use crate::theme::{Appearance, Palette};

/// Which screen is shown (chat vs captured logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    DebugTraces,
}

pub const STATUS_READY: &str = "Ready";
pub const STATUS_THINKING: &str = "Thinking deeply";
pub const STATUS_ANSWERING: &str = "Answering";
pub const STATUS_ERROR: &str = "Error";
pub const BUSY_HINT: &str = "Socratis abhi jawab de raha hai. Thoda ruko.";

#[derive(Debug)]
pub struct TuiState {
    pub session: ChatSession,
    /// Current input line (footer).
    pub input_buffer: String,
    /// Byte cursor within input_buffer (0..=len).
    pub input_cursor: usize,
    /// Lines scrolled up from the bottom.
    pub scroll: usize,
    /// When true, stick to the bottom on new content.
    pub auto_scroll: bool,
    pub palette: Palette,
    /// Transient status shown in the header.
    pub status: String,
    pub status_set_at: Option<Instant>,
    /// Images attached to the next submission.
    pub pending_images: Vec<ImageAttachment>,
    /// Default directory for `/export`.
    pub export_dir: PathBuf,
    pub screen: Screen,
    /// Captured log lines for the debug screen.
    pub logs: Option<LogBuffer>,
    pub trace_scroll: usize,
    /// Incremented each loop iteration for cursor blink and the thinking dots.
    pub frame_count: u64,
    pub needs_redraw: bool,
    /// Lines for every message except the one in flight.
    pub cached_lines: Vec<ratatui::text::Line<'static>>,
    pub cached_width: usize,
    pub cache_dirty: bool,
    pub last_content_height: usize,
    pub last_viewport_height: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::with_session(ChatSession::new())
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: ChatSession) -> Self {
        Self {
            session,
            input_buffer: String::new(),
            input_cursor: 0,
            scroll: 0,
            auto_scroll: true,
            palette: Palette::default(),
            status: String::new(),
            status_set_at: None,
            pending_images: Vec::new(),
            export_dir: PathBuf::from("."),
            screen: Screen::Main,
            logs: None,
            trace_scroll: 0,
            frame_count: 0,
            needs_redraw: true,
            cached_lines: Vec::new(),
            cached_width: 0,
            cache_dirty: true,
            last_content_height: 0,
            last_viewport_height: 0,
        }
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.palette = Palette::for_appearance(appearance);
        self
    }

    pub fn with_logs(mut self, logs: LogBuffer) -> Self {
        self.logs = Some(logs);
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_set_at = Some(Instant::now());
        self.needs_redraw = true;
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
        self.status_set_at = None;
        self.needs_redraw = true;
    }

    /// Header text and dot color.
    pub fn header_status(&self) -> (String, HeaderStatus) {
        if self.session.is_thinking() {
            (STATUS_THINKING.to_string(), HeaderStatus::Busy)
        } else if self.session.is_busy() {
            (STATUS_ANSWERING.to_string(), HeaderStatus::Busy)
        } else if !self.status.is_empty() {
            (self.status.clone(), HeaderStatus::Ready)
        } else if self.session.last_failure().is_some() {
            (STATUS_ERROR.to_string(), HeaderStatus::Error)
        } else {
            (STATUS_READY.to_string(), HeaderStatus::Ready)
        }
    }

    fn touch(&mut self) {
        self.cache_dirty = true;
        self.needs_redraw = true;
        if self.auto_scroll {
            self.scroll = 0;
        }
    }

    /// Enter: runs a command or submits the input. Returns the turn to drive.
    /// While busy the input is kept and a hint is shown.
    pub fn submit_input(&mut self) -> Option<TurnRequest> {
        if let Some(command) = Command::parse(&self.input_buffer) {
            self.input_take();
            self.run_command(command);
            return None;
        }

        let images = std::mem::take(&mut self.pending_images);
        match self.session.submit(&self.input_buffer, images.clone()) {
            Ok(turn) => {
                self.input_take();
                self.auto_scroll = true;
                self.clear_status();
                self.touch();
                Some(turn)
            }
            Err(RuntimeError::Busy) => {
                self.pending_images = images;
                self.set_status(BUSY_HINT);
                None
            }
            Err(RuntimeError::EmptySubmission) => {
                self.pending_images = images;
                None
            }
            Err(e) => {
                self.pending_images = images;
                error!(error = %e, "submit failed");
                self.set_status(format!("Submit failed: {e}"));
                None
            }
        }
    }

    pub fn run_command(&mut self, command: Command) {
        match command {
            Command::Image(arg) => self.attach_image(&arg),
            Command::ClearImages => {
                self.pending_images.clear();
                self.set_status("Images cleared");
            }
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                self.export_notes(&dir);
            }
            Command::Help => self.set_status(HELP_TEXT),
            Command::Unknown(line) => self.set_status(format!("Unknown command: {line}")),
        }
    }

    pub fn attach_image(&mut self, arg: &str) {
        match parse_image_arg(arg) {
            Ok(image) => {
                info!(mime = %image.mime_type, bytes = image.len(), "image attached");
                self.pending_images.push(image);
                let count = self.pending_images.len();
                self.set_status(format!("{count} image(s) attached to next message"));
            }
            Err(e) => {
                warn!(error = %e, "image rejected");
                self.set_status(format!("Image not attached: {e}"));
            }
        }
    }

    /// Writes study notes into `dir`; returns the written path.
    pub fn export_notes(&mut self, dir: &Path) -> Option<PathBuf> {
        let now = Local::now();
        let offset = now.offset().fix();
        match export::write_to_dir(&self.session.snapshot(), dir, now.date_naive(), offset) {
            Ok(Some(path)) => {
                info!(path = %path.display(), "notes exported");
                self.set_status(format!("Notes saved: {}", path.display()));
                Some(path)
            }
            Ok(None) => {
                self.set_status("Nothing to export yet");
                None
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.set_status(format!("Export failed: {e}"));
                None
            }
        }
    }

    /// Applies an event from the turn driver to the session.
    pub fn apply_event(&mut self, event: ChatEvent) {
        let structural = !matches!(event, ChatEvent::TextUpdated { .. });
        if let Err(e) = self.session.apply(event) {
            // Already logged by the session; keep the UI running.
            self.set_status(format!("Dropped update: {e}"));
        }
        if structural {
            self.touch();
        } else {
            self.needs_redraw = true;
            if self.auto_scroll {
                self.scroll = 0;
            }
        }
    }

    /// Text of the most recent tutor reply with content.
    pub fn last_answer(&self) -> Option<String> {
        self.session
            .transcript()
            .iter()
            .rev()
            .find(|m| m.role == Role::Model && !m.text.trim().is_empty())
            .map(|m| m.text.clone())
    }

    pub fn input_insert(&mut self, c: char) {
        self.input_buffer.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
        self.needs_redraw = true;
    }

    fn prev_boundary(&self) -> usize {
        self.input_buffer[..self.input_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.input_buffer[self.input_cursor..]
            .chars()
            .next()
            .map(|c| self.input_cursor + c.len_utf8())
            .unwrap_or(self.input_buffer.len())
    }

    pub fn input_backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let start = self.prev_boundary();
        self.input_buffer.drain(start..self.input_cursor);
        self.input_cursor = start;
        self.needs_redraw = true;
    }

    pub fn input_delete(&mut self) {
        if self.input_cursor >= self.input_buffer.len() {
            return;
        }
        let end = self.next_boundary();
        self.input_buffer.drain(self.input_cursor..end);
        self.needs_redraw = true;
    }

    pub fn input_cursor_left(&mut self) {
        self.input_cursor = self.prev_boundary();
        self.needs_redraw = true;
    }

    pub fn input_cursor_right(&mut self) {
        self.input_cursor = self.next_boundary();
        self.needs_redraw = true;
    }

    pub fn input_cursor_home(&mut self) {
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    pub fn input_cursor_end(&mut self) {
        self.input_cursor = self.input_buffer.len();
        self.needs_redraw = true;
    }

    /// Ctrl+U
    pub fn input_clear_line(&mut self) {
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    pub fn input_take(&mut self) -> String {
        self.input_cursor = 0;
        self.needs_redraw = true;
        std::mem::take(&mut self.input_buffer)
    }

    /// Scroll up; disables auto_scroll.
    pub fn scroll_up(&mut self, delta: usize) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    /// Scroll down; re-enables auto_scroll at the bottom.
    pub fn scroll_down(&mut self, delta: usize) {
        self.scroll = self.scroll.saturating_sub(delta);
        if self.scroll == 0 {
            self.auto_scroll = true;
        }
        self.needs_redraw = true;
    }

    pub fn toggle_logs(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::DebugTraces,
            Screen::DebugTraces => Screen::Main,
        };
        self.trace_scroll = 0;
        self.needs_redraw = true;
    }

    pub fn trace_scroll_up(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    pub fn trace_scroll_down(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_sub(delta);
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use socratis_core::MessageId;

    use super::*;

    fn typed(s: &mut TuiState, text: &str) {
        for c in text.chars() {
            s.input_insert(c);
        }
    }

    #[test]
    fn input_insert_utf8() {
        let mut s = TuiState::new();
        typed(&mut s, "é🎉");
        assert_eq!(s.input_buffer, "é🎉");
        assert_eq!(s.input_cursor, "é🎉".len());
        s.input_backspace();
        assert_eq!(s.input_buffer, "é");
    }

    #[test]
    fn cursor_moves_by_char() {
        let mut s = TuiState::new();
        typed(&mut s, "aé");
        s.input_cursor_left();
        assert_eq!(s.input_cursor, 1);
        s.input_delete();
        assert_eq!(s.input_buffer, "a");
        s.input_cursor_left();
        s.input_cursor_left();
        assert_eq!(s.input_cursor, 0);
        s.input_cursor_right();
        s.input_cursor_right();
        assert_eq!(s.input_cursor, 1);
    }

    #[test]
    fn submit_starts_turn_and_clears_input() {
        let mut s = TuiState::new();
        typed(&mut s, "Trial balance kya hai?");
        let turn = s.submit_input().unwrap();
        assert_eq!(turn.user.text, "Trial balance kya hai?");
        assert!(s.input_buffer.is_empty());
        assert!(s.session.is_busy());
        assert_eq!(s.header_status().0, STATUS_THINKING);
    }

    #[test]
    fn submit_while_busy_keeps_input_and_hints() {
        let mut s = TuiState::new();
        typed(&mut s, "first");
        s.submit_input().unwrap();
        typed(&mut s, "second");
        assert!(s.submit_input().is_none());
        assert_eq!(s.input_buffer, "second");
        assert_eq!(s.status, BUSY_HINT);
        assert_eq!(s.session.transcript().len(), 2);
    }

    #[test]
    fn pending_images_sent_with_next_message() {
        let mut s = TuiState::new();
        s.pending_images
            .push(ImageAttachment::new("image/png", b"x".to_vec()));
        let turn = s.submit_input().unwrap();
        assert_eq!(turn.user.images.len(), 1);
        assert!(s.pending_images.is_empty());
    }

    #[test]
    fn image_command_rejects_missing_file() {
        let mut s = TuiState::new();
        typed(&mut s, "/image /definitely/not/here.png");
        assert!(s.submit_input().is_none());
        assert!(s.pending_images.is_empty());
        assert!(s.status.starts_with("Image not attached"));
        assert_eq!(s.session.transcript().len(), 1);
    }

    #[test]
    fn image_command_accepts_data_url() {
        let mut s = TuiState::new();
        typed(&mut s, "/image data:image/png;base64,aGk=");
        s.submit_input();
        assert_eq!(s.pending_images.len(), 1);
        s.run_command(Command::ClearImages);
        assert!(s.pending_images.is_empty());
    }

    #[test]
    fn stream_events_update_reply() {
        let mut s = TuiState::new();
        typed(&mut s, "q");
        let id = s.submit_input().unwrap().reply_id;
        s.apply_event(ChatEvent::turn_start(id.clone()));
        s.apply_event(ChatEvent::text_updated(id.clone(), "Debit"));
        assert_eq!(s.header_status().0, STATUS_ANSWERING);
        s.apply_event(ChatEvent::turn_end(id));
        assert_eq!(s.header_status(), (STATUS_READY.to_string(), HeaderStatus::Ready));
        assert_eq!(s.last_answer().as_deref(), Some("Debit"));
    }

    #[test]
    fn unknown_update_sets_status() {
        let mut s = TuiState::new();
        s.apply_event(ChatEvent::text_updated(MessageId::from("ghost"), "x"));
        assert!(s.status.starts_with("Dropped update"));
    }

    #[test]
    fn failure_shows_error_status() {
        let mut s = TuiState::new();
        typed(&mut s, "q");
        s.submit_input().unwrap();
        s.apply_event(ChatEvent::turn_failed(None, "provider error 503: overloaded"));
        assert_eq!(s.header_status(), (STATUS_ERROR.to_string(), HeaderStatus::Error));
    }

    #[test]
    fn export_writes_notes() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = TuiState::new();
        let path = s.export_notes(dir.path()).unwrap();
        let notes = std::fs::read_to_string(&path).unwrap();
        assert!(notes.contains("SOCRATIS:"));
        assert!(s.status.starts_with("Notes saved"));
    }

    #[test]
    fn scroll_toggles_auto_scroll() {
        let mut s = TuiState::new();
        s.scroll_up(3);
        assert!(!s.auto_scroll);
        s.scroll_down(3);
        assert!(s.auto_scroll);
    }
}
