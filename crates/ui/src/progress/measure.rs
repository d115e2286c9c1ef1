use gpui::{App, Bounds, Entity, IntoElement, Pixels, Styled, Window, canvas};

use crate::PixelsExt;

/// The laid out width of an element, unknown until the first layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LayoutMeasurement {
    width: Option<f32>,
}

impl LayoutMeasurement {
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// The measured width, or `fallback` before the first layout.
    pub fn width_or(&self, fallback: f32) -> f32 {
        self.width.unwrap_or(fallback)
    }

    /// Record a new measurement, returns `true` when the width changed.
    pub fn update(&mut self, width: f32) -> bool {
        if !width.is_finite() || self.width == Some(width) {
            return false;
        }
        self.width = Some(width);
        true
    }
}

/// Element state that owns a [`LayoutMeasurement`].
pub(crate) trait Measured {
    fn measurement_mut(&mut self) -> &mut LayoutMeasurement;
}

/// An invisible element that fills its parent and writes the parent's width
/// into the state's measurement during prepaint.
///
/// A changed width schedules another frame so the next render can use it.
pub(crate) fn measure<S: Measured + 'static>(state: Entity<S>) -> impl IntoElement {
    canvas(
        move |bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App| {
            let width = bounds.size.width.as_f32();
            let changed = state.update(cx, |state, _| state.measurement_mut().update(width));
            if changed {
                tracing::trace!(width, "progress track measured");
                window.request_animation_frame();
            }
        },
        |_, _, _, _| {},
    )
    .absolute()
    .top_0()
    .left_0()
    .size_full()
}
