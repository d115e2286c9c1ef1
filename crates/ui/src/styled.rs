use gpui::{Div, Refineable as _, StyleRefinement, Styled, div};

/// Returns a `Div` as horizontal flex layout.
#[inline]
pub fn h_flex() -> Div {
    div().h_flex()
}

/// Returns a `Div` as vertical flex layout.
#[inline]
pub fn v_flex() -> Div {
    div().v_flex()
}

/// Extends [`Styled`] with the layout shortcuts used by the progress elements.
pub trait StyledExt: Styled + Sized {
    /// Apply the user style of an element on top of its defaults.
    fn refine_style(mut self, style: &StyleRefinement) -> Self {
        self.style().refine(style);
        self
    }

    /// Apply self into a horizontal flex layout.
    #[inline]
    fn h_flex(self) -> Self {
        self.flex().flex_row().items_center()
    }

    /// Apply self into a vertical flex layout.
    #[inline]
    fn v_flex(self) -> Self {
        self.flex().flex_col()
    }
}

impl<E: Styled> StyledExt for E {}
