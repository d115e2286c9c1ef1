mod circular;
mod linear;
mod liquid;
mod measure;

pub use circular::*;
pub use linear::*;
pub use liquid::*;
pub use measure::LayoutMeasurement;

use gpui::{Hsla, PathBuilder, Pixels, Point, SharedString, Window, point, px};

/// The numeric value a progress element reports to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessibilityValue {
    pub min: f32,
    pub max: f32,
    pub now: u32,
}

/// The accessibility description of a progress element.
///
/// The role is always a progress bar; indeterminate elements carry no value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAccessibility {
    pub label: SharedString,
    pub value: Option<AccessibilityValue>,
}

impl ProgressAccessibility {
    pub const ROLE: &'static str = "progressbar";
}

/// Stroke a polyline of box-relative `points`, offset by `origin`.
pub(crate) fn paint_stroke(
    points: &[(f32, f32)],
    origin: Point<Pixels>,
    stroke_width: f32,
    color: Hsla,
    window: &mut Window,
) {
    let Some(((x, y), rest)) = points.split_first() else {
        return;
    };

    let mut builder = PathBuilder::stroke(px(stroke_width));
    builder.move_to(origin + point(px(*x), px(*y)));
    for (x, y) in rest {
        builder.line_to(origin + point(px(*x), px(*y)));
    }

    match builder.build() {
        Ok(path) => window.paint_path(path, color),
        Err(err) => tracing::error!("failed to build progress path: {:?}", err),
    }
}
