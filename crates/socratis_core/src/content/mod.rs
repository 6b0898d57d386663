//! Structural content parser: fenced code, pipe tables, and inline `**bold**`
//! / `` `code` `` spans. Not a Markdown engine; anything else stays literal.

mod block;
mod inline;
mod parse;
mod table;

pub use block::{ContentBlock, InlineSpan};
pub use inline::parse_inline;
pub use parse::parse;
pub use table::parse_table;
