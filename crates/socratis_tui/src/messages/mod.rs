//! Message rendering for the TUI. Colors come from [crate::theme].
//!
//! - **blocks**: parsed content blocks (text runs, code blocks, tables) to lines.
//! - **user**: student messages.
//! - **model**: tutor replies and the thinking indicator.
//! - **error**: the failure alert.

pub mod blocks;
pub mod error;
pub mod model;
pub mod user;
