//! Pure numeric helpers shared by the progress elements.
//!
//! Nothing in here knows about time or the window, every function describes a
//! single frame from the current parameters.
use std::f32::consts::PI;

use gpui::Pixels;

/// A trait for converting [`Pixels`] to `f32`.
pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

/// Saturating clamp that also accepts non-finite input.
///
/// `NaN` and `-inf` map to `min`, `+inf` maps to `max`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Clamp into `0.0..=1.0`.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0., 1.)
}

#[inline]
fn snap(value: f32, floor: f32) -> f32 {
    if !value.is_finite() {
        return floor;
    }
    value.round().max(floor)
}

/// Snap a size to a whole number of pixels, never less than 1.
#[inline]
pub fn snap_size(value: f32) -> f32 {
    snap(value, 1.)
}

/// Snap an inset or radius to a whole number of pixels, never negative.
#[inline]
pub fn snap_inset(value: f32) -> f32 {
    snap(value, 0.)
}

/// The width of a horizontal progress track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ProgressWidth {
    /// Fill the available space, the actual width is only known after layout.
    #[default]
    Fill,
    /// A fixed width in pixels.
    Fixed(f32),
}

impl From<f32> for ProgressWidth {
    fn from(value: f32) -> Self {
        Self::Fixed(value)
    }
}

impl From<Pixels> for ProgressWidth {
    fn from(value: Pixels) -> Self {
        Self::Fixed(value.as_f32())
    }
}

impl ProgressWidth {
    /// The snapped fixed width, `None` for [`ProgressWidth::Fill`].
    pub fn fixed(&self) -> Option<f32> {
        match self {
            Self::Fill => None,
            Self::Fixed(width) => Some(snap_size(*width)),
        }
    }
}

/// Stroke geometry of a circular progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    /// Outer size (width and height) in whole pixels.
    pub size: f32,
    pub stroke_width: f32,
    /// Radius of the stroke center line.
    pub radius: f32,
    pub circumference: f32,
}

impl CircleGeometry {
    /// The rotation applied to every arc so it starts at 12 o'clock.
    pub const START_ANGLE: f32 = -PI / 2.;
    /// The fraction of the circumference covered by the indeterminate arc.
    pub const INDETERMINATE_FRACTION: f32 = 0.25;

    pub fn new(size: f32, thickness: Option<f32>) -> Self {
        let size = snap_size(size);
        let stroke_width =
            snap_size(thickness.unwrap_or_else(|| (size / 10.).round().max(2.)));
        let radius = ((size - stroke_width) / 2.).max(0.);
        let circumference = 2. * PI * radius;

        Self {
            size,
            stroke_width,
            radius,
            circumference,
        }
    }

    /// The stroke dash offset of the determinate arc for a `0..=100` value.
    pub fn dash_offset(&self, value: f32) -> f32 {
        self.circumference * (1. - clamp(value, 0., 100.) / 100.)
    }

    /// The visible fraction of the determinate arc for a `0..=100` value.
    pub fn progress_fraction(&self, value: f32) -> f32 {
        if self.circumference <= 0. {
            return 0.;
        }
        1. - self.dash_offset(value) / self.circumference
    }

    /// Length of the indeterminate arc.
    pub fn indeterminate_arc_length(&self) -> f32 {
        self.circumference * Self::INDETERMINATE_FRACTION
    }

    pub fn center(&self) -> f32 {
        self.size / 2.
    }

    /// Sample points along an arc that starts at `start_angle` (radians,
    /// measured clockwise from 3 o'clock) and covers `fraction` of the circle.
    ///
    /// Points are relative to the top-left corner of the `size × size` box.
    pub fn arc_points(&self, start_angle: f32, fraction: f32) -> Vec<(f32, f32)> {
        let fraction = clamp01(fraction);
        if fraction <= 0. || self.radius <= 0. {
            return vec![];
        }

        let sweep = fraction * 2. * PI;
        // One segment per ~3 degrees keeps the stroke smooth at any size.
        let segments = ((sweep / (PI / 60.)).ceil() as usize).max(2);
        let center = self.center();

        (0..=segments)
            .map(|ix| {
                let angle = start_angle + sweep * ix as f32 / segments as f32;
                (
                    center + self.radius * angle.cos(),
                    center + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// A bar that sweeps across the linear track in indeterminate mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepBar {
    pub width: f32,
    /// The translation at the start of the loop.
    pub from: f32,
    /// The translation at the end of the loop.
    pub to: f32,
    pub opacity: f32,
}

/// Geometry of the linear progress track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGeometry {
    pub height: f32,
    pub radius: f32,
}

impl LinearGeometry {
    pub const PRIMARY_BAR_RATIO: f32 = 0.35;
    pub const SECONDARY_BAR_RATIO: f32 = 0.2;
    pub const PRIMARY_BAR_MIN_WIDTH: f32 = 24.;
    pub const SECONDARY_BAR_MIN_WIDTH: f32 = 18.;
    pub const SECONDARY_BAR_OPACITY: f32 = 0.35;

    pub fn new(height: f32, border_radius: Option<f32>) -> Self {
        let height = snap_size(height);
        let radius = snap_inset(border_radius.unwrap_or(height / 2.));
        Self { height, radius }
    }

    /// The fill width in pixels of a `0..=1` value over `track_width`.
    pub fn fill_width(value: f32, track_width: f32) -> f32 {
        clamp01(value) * track_width.max(0.)
    }

    /// The leading indeterminate bar.
    ///
    /// `measured` is the laid out track width, only used when `width` is
    /// [`ProgressWidth::Fill`].
    pub fn primary_bar(width: ProgressWidth, measured: Option<f32>) -> SweepBar {
        match width.fixed() {
            Some(width) => SweepBar {
                width: width * Self::PRIMARY_BAR_RATIO,
                from: -width,
                to: width * 2.,
                opacity: 1.,
            },
            None => {
                let measured = measured.map(snap_inset).unwrap_or(0.);
                let track = measured.max(1.);
                SweepBar {
                    width: (measured * Self::PRIMARY_BAR_RATIO).max(Self::PRIMARY_BAR_MIN_WIDTH),
                    from: -track,
                    to: track * 2.,
                    opacity: 1.,
                }
            }
        }
    }

    /// The trailing, translucent indeterminate bar.
    pub fn secondary_bar(width: ProgressWidth, measured: Option<f32>) -> SweepBar {
        match width.fixed() {
            Some(width) => SweepBar {
                width: width * Self::SECONDARY_BAR_RATIO,
                from: -width * 0.6,
                to: width * 1.6,
                opacity: Self::SECONDARY_BAR_OPACITY,
            },
            None => {
                let measured = measured.map(snap_inset).unwrap_or(0.);
                let track = measured.max(1.);
                SweepBar {
                    width: (measured * Self::SECONDARY_BAR_RATIO)
                        .max(Self::SECONDARY_BAR_MIN_WIDTH),
                    from: -track * 0.6,
                    to: track * 1.6,
                    opacity: Self::SECONDARY_BAR_OPACITY,
                }
            }
        }
    }
}

/// Geometry of the liquid progress track and its inset fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidGeometry {
    pub height: f32,
    pub inset: f32,
    /// Corner radius of the outer track.
    pub radius: f32,
    /// Corner radius of the inner fill.
    pub fill_radius: f32,
    pub content_height: f32,
}

impl LiquidGeometry {
    pub fn new(height: f32, inset: f32, border_radius: Option<f32>) -> Self {
        let height = snap_size(height);
        let inset = snap_inset(inset);
        let radius = snap_inset(border_radius.unwrap_or(height / 2.));

        Self {
            height,
            inset,
            radius,
            fill_radius: (radius - inset).max(0.),
            content_height: (height - inset * 2.).max(0.),
        }
    }

    /// The width available to the fill for an outer track width.
    pub fn content_width(&self, track_width: f32) -> f32 {
        (snap_inset(track_width) - self.inset * 2.).max(0.)
    }

    /// The narrowest the fill may get, keeps the rounded caps visible.
    pub fn min_fill_width(&self) -> f32 {
        self.inset * 2.
    }

    /// Fill width for an animated `progress` (nominally `0..=1`).
    ///
    /// The result stays within `[min(2 * inset, content), content]` even when
    /// the easing curve overshoots.
    pub fn fill_width(&self, progress: f32, content_width: f32) -> f32 {
        let min = self.min_fill_width();
        let width = crate::animation::interpolate(progress, (0., 1.), (min, content_width));
        clamp(width, min.min(content_width), content_width)
    }

    /// The shimmer band translation range for a content width.
    pub fn shimmer_range(content_width: f32) -> (f32, f32) {
        (-content_width, content_width)
    }
}
