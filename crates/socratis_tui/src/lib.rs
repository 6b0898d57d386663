//! socratis-tui: terminal front end for Socratis.
//!
//! Theming in `theme`; layout in `layouts`; messages in `messages`; state and
//! view in [state] and [view]. Run with [run_tui].

pub mod commands;
pub mod layouts;
pub mod messages;
pub mod run;
pub mod state;
pub mod theme;
pub mod utils;
pub mod view;

pub use run::{TuiChannels, run_tui};
pub use state::{Screen, TuiState};
pub use theme::Appearance;
pub use view::draw as draw_view;
