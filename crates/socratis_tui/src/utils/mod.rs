//! Spacing constants and width-aware text helpers.

mod format;

pub use format::{horizontal_padding, pad_to_width, truncate_ellipsis, wrap_lines};

/// Columns of padding on each side of the header and transcript.
pub const HORIZONTAL_PADDING: u16 = 2;

/// Indent for message continuation lines.
pub const LEFT_PADDING: &str = "  ";

/// Blank lines between messages.
pub const MESSAGE_SPACING_LINES: usize = 1;

/// Capacity of the captured log buffer behind Ctrl+D.
pub const MAX_TRACE_LINES: usize = 2000;
