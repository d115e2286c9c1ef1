use gpui::App;

mod geometry;
mod styled;

pub mod animation;
pub mod colors;
pub mod progress;
pub mod theme;

pub use geometry::*;
pub use styled::*;
pub use theme::{ActiveTheme, Theme, ThemeColor, ThemeOverride, ThemeProvider};

/// Initialize the components.
///
/// You must initialize the components at your application's entry point.
pub fn init(cx: &mut App) {
    theme::init(cx);
}
