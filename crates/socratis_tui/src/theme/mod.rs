//! Dark and light palettes; the choice comes from `SOCRATIS_THEME`.

mod appearance;
mod palette;

pub use appearance::Appearance;
pub use palette::{Palette, Rgb};
