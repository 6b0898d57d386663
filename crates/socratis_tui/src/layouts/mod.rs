//! Layout components built from [crate::utils] and [crate::theme].
//!
//! - **[split]**: header, body, footer regions.
//! - **[style]**: palette colors to ratatui styles.
//! - **[head]**: title, subtitle and status dot.
//! - **[footer]**: input box, cursor and hint line.

mod footer;
mod head;
mod split;
mod style;

pub use head::{HEADER_SUBTITLE, HEADER_TITLE, HeaderStatus, header_lines, render_header};
pub use footer::{FooterView, INPUT_ICON, INPUT_PLACEHOLDER, hint_line, input_block, render_footer};
pub use split::{FOOTER_HEIGHT, HEADER_HEIGHT, MainSplits, main_splits, vertical_split};
pub use style::{bg, code_style, emphasis_style, fg};
