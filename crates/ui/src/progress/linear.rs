use std::{rc::Rc, time::Duration};

use gpui::{
    App, Div, ElementId, Hsla, InteractiveElement as _, IntoElement, ParentElement, RenderOnce,
    SharedString, StyleRefinement, Styled, Window, div, prelude::FluentBuilder as _, px, relative,
};
use instant::Instant;

use super::{
    AccessibilityValue, LayoutMeasurement, ProgressAccessibility,
    measure::{Measured, measure},
};
use crate::{
    StyledExt,
    animation::{AnimationChannel, Easing, interpolate},
    geometry::{LinearGeometry, ProgressWidth, SweepBar, clamp01},
    theme::Theme,
};

/// Display mode of a [`LinearProgress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LinearVariant {
    /// Two bars sweeping across the track forever.
    #[default]
    Indeterminate,
    /// A single bar covering the value.
    Determinate,
    /// A buffer bar under the value bar.
    Buffer,
    /// Same animation as [`LinearVariant::Indeterminate`], used while a
    /// request is still being prepared.
    Query,
}

impl LinearVariant {
    /// Whether this variant runs the sweep animation.
    #[inline]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate | Self::Query)
    }
}

/// A horizontal progress bar element.
#[derive(IntoElement)]
pub struct LinearProgress {
    id: ElementId,
    style: StyleRefinement,
    theme: Option<Rc<Theme>>,
    variant: LinearVariant,
    value: Option<f32>,
    value_buffer: Option<f32>,
    color: Option<Hsla>,
    track_color: Option<Hsla>,
    buffer_color: Option<Hsla>,
    height: f32,
    border_radius: Option<f32>,
    width: ProgressWidth,
    label: SharedString,
}

impl LinearProgress {
    pub const DEFAULT_HEIGHT: f32 = 6.;
    pub const SWEEP_DURATION: Duration = Duration::from_millis(1200);

    /// Create a new linear progress, indeterminate and full width by default.
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            style: StyleRefinement::default(),
            theme: None,
            variant: LinearVariant::default(),
            value: None,
            value_buffer: None,
            color: None,
            track_color: None,
            buffer_color: None,
            height: Self::DEFAULT_HEIGHT,
            border_radius: None,
            width: ProgressWidth::Fill,
            label: "Progress".into(),
        }
    }

    pub fn variant(mut self, variant: LinearVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the value, clamped to `0.0..=1.0`.
    pub fn value(mut self, value: f32) -> Self {
        self.value = Some(clamp01(value));
        self
    }

    /// Set the buffer value of [`LinearVariant::Buffer`], clamped to `0.0..=1.0`.
    pub fn value_buffer(mut self, value: f32) -> Self {
        self.value_buffer = Some(clamp01(value));
        self
    }

    /// Set the bar color, default is the theme primary color.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the track color, default is the theme track color.
    pub fn track_color(mut self, color: impl Into<Hsla>) -> Self {
        self.track_color = Some(color.into());
        self
    }

    /// Set the buffer bar color, default is the theme buffer color.
    pub fn buffer_color(mut self, color: impl Into<Hsla>) -> Self {
        self.buffer_color = Some(color.into());
        self
    }

    /// Set the track height in pixels, default: 6.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the corner radius, default: half the height.
    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Set the track width, default: [`ProgressWidth::Fill`].
    pub fn width(mut self, width: impl Into<ProgressWidth>) -> Self {
        self.width = width.into();
        self
    }

    /// Use this theme instead of the app-level one.
    pub fn theme(mut self, theme: Rc<Theme>) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn accessibility_label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = label.into();
        self
    }

    pub fn geometry(&self) -> LinearGeometry {
        LinearGeometry::new(self.height, self.border_radius)
    }

    /// Reported on a `0..=1` scale, unlike [`super::CircularProgress`].
    pub fn accessibility(&self) -> ProgressAccessibility {
        let value = match self.variant {
            LinearVariant::Determinate | LinearVariant::Buffer => self.value,
            LinearVariant::Indeterminate | LinearVariant::Query => None,
        };

        ProgressAccessibility {
            label: self.label.clone(),
            value: value.map(|value| AccessibilityValue {
                min: 0.,
                max: 1.,
                now: (value * 100.).round() as u32,
            }),
        }
    }

    fn render_bar(fraction: f32, color: Hsla, radius: f32) -> Div {
        div()
            .absolute()
            .top_0()
            .left_0()
            .h_full()
            .w(relative(clamp01(fraction)))
            .rounded(px(radius))
            .bg(color)
    }

    fn render_sweep(bar: SweepBar, progress: f32, color: Hsla, radius: f32) -> Div {
        div()
            .absolute()
            .top_0()
            .left(px(interpolate(progress, (0., 1.), (bar.from, bar.to))))
            .h_full()
            .w(px(bar.width))
            .rounded(px(radius))
            .bg(color)
            .opacity(bar.opacity)
    }
}

impl Styled for LinearProgress {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

/// Per-instance animation state, kept across frames.
pub(crate) struct LinearState {
    variant: Option<LinearVariant>,
    pub(crate) primary: AnimationChannel,
    pub(crate) secondary: AnimationChannel,
    pub(crate) measurement: LayoutMeasurement,
}

impl LinearState {
    pub(crate) fn new() -> Self {
        Self {
            variant: None,
            primary: AnimationChannel::new("linear-primary", 0.),
            secondary: AnimationChannel::new("linear-secondary", 0.),
            measurement: LayoutMeasurement::default(),
        }
    }

    /// Any variant change restarts both sweeps, even between the two
    /// indeterminate variants.
    pub(crate) fn sync(&mut self, variant: LinearVariant, now: Instant) {
        if self.variant != Some(variant) {
            self.primary.stop();
            self.secondary.stop();
            self.variant = Some(variant);
        }

        let active = variant.is_indeterminate();
        for channel in [&mut self.primary, &mut self.secondary] {
            channel.sync_loop(
                active,
                now,
                LinearProgress::SWEEP_DURATION,
                Easing::EaseInOut,
            );
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.primary.is_running() || self.secondary.is_running()
    }
}

impl Measured for LinearState {
    fn measurement_mut(&mut self) -> &mut LayoutMeasurement {
        &mut self.measurement
    }
}

impl RenderOnce for LinearProgress {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = Theme::resolve(self.theme.as_ref(), cx);
        let color = self.color.unwrap_or(theme.primary);
        let track_color = self.track_color.unwrap_or(theme.track);
        let buffer_color = self.buffer_color.unwrap_or(theme.buffer);

        let geometry = self.geometry();
        let variant = self.variant;
        let width = self.width;
        let radius = geometry.radius;

        let state = window.use_keyed_state(self.id.clone(), cx, |_, _| LinearState::new());
        let now = Instant::now();
        let (primary, secondary, measured, animating) = state.update(cx, |state, _| {
            state.sync(variant, now);
            (
                state.primary.tick(now),
                state.secondary.tick(now),
                state.measurement.width(),
                state.is_animating(),
            )
        });
        if animating {
            window.request_animation_frame();
        }

        div()
            .id(self.id)
            .relative()
            .overflow_hidden()
            .flex_none()
            .h(px(geometry.height))
            .rounded(px(radius))
            .bg(track_color)
            .map(|this| match width.fixed() {
                Some(width) => this.w(px(width)),
                None => this.w_full().child(measure(state.clone())),
            })
            .refine_style(&self.style)
            .map(|this| match variant {
                LinearVariant::Determinate => {
                    this.child(Self::render_bar(self.value.unwrap_or(0.), color, radius))
                }
                LinearVariant::Buffer => this
                    .child(Self::render_bar(
                        self.value_buffer.unwrap_or(0.),
                        buffer_color,
                        radius,
                    ))
                    .child(Self::render_bar(self.value.unwrap_or(0.), color, radius)),
                LinearVariant::Indeterminate | LinearVariant::Query => this
                    .child(Self::render_sweep(
                        LinearGeometry::primary_bar(width, measured),
                        primary,
                        color,
                        radius,
                    ))
                    .child(Self::render_sweep(
                        LinearGeometry::secondary_bar(width, measured),
                        secondary,
                        color,
                        radius,
                    )),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ChannelState;

    #[test]
    fn test_defaults() {
        let progress = LinearProgress::new("linear");
        assert_eq!(progress.variant, LinearVariant::Indeterminate);
        assert_eq!(progress.width, ProgressWidth::Fill);
        assert_eq!(progress.value, None);

        let geometry = progress.geometry();
        assert_eq!(geometry.height, 6.);
        assert_eq!(geometry.radius, 3.);
    }

    #[test]
    fn test_is_indeterminate() {
        assert!(LinearVariant::Indeterminate.is_indeterminate());
        assert!(LinearVariant::Query.is_indeterminate());
        assert!(!LinearVariant::Determinate.is_indeterminate());
        assert!(!LinearVariant::Buffer.is_indeterminate());
    }

    #[test]
    fn test_values_are_clamped() {
        let progress = LinearProgress::new("linear")
            .variant(LinearVariant::Buffer)
            .value(-0.2)
            .value_buffer(1.7);
        assert_eq!(progress.value, Some(0.));
        assert_eq!(progress.value_buffer, Some(1.));
        assert_eq!(LinearGeometry::fill_width(progress.value.unwrap(), 300.), 0.);
    }

    #[test]
    fn test_accessibility() {
        let progress = LinearProgress::new("linear")
            .variant(LinearVariant::Determinate)
            .value(0.456);
        let accessibility = progress.accessibility();
        assert_eq!(accessibility.label, SharedString::from("Progress"));
        assert_eq!(
            accessibility.value,
            Some(AccessibilityValue {
                min: 0.,
                max: 1.,
                now: 46
            })
        );

        let progress = LinearProgress::new("linear")
            .variant(LinearVariant::Buffer)
            .value(2.);
        assert_eq!(progress.accessibility().value.map(|v| v.now), Some(100));

        // No value set, nothing to report.
        let progress = LinearProgress::new("linear").variant(LinearVariant::Determinate);
        assert_eq!(progress.accessibility().value, None);

        for variant in [LinearVariant::Indeterminate, LinearVariant::Query] {
            let progress = LinearProgress::new("linear").variant(variant).value(0.5);
            assert_eq!(progress.accessibility().value, None);
        }
    }

    #[test]
    fn test_geometry_props() {
        let geometry = LinearProgress::new("linear")
            .height(9.5)
            .border_radius(-1.)
            .geometry();
        assert_eq!(geometry.height, 10.);
        assert_eq!(geometry.radius, 0.);

        let progress = LinearProgress::new("linear").width(px(240.));
        assert_eq!(progress.width.fixed(), Some(240.));
    }

    #[test]
    fn test_sweep_lifecycle() {
        let now = Instant::now();
        let mut state = LinearState::new();

        state.sync(LinearVariant::Indeterminate, now);
        assert!(state.primary.is_looping());
        assert!(state.secondary.is_looping());
        assert!(state.is_animating());

        state.sync(LinearVariant::Indeterminate, now + Duration::from_millis(16));
        assert_eq!(state.primary.generation(), 1);

        // Switching between the indeterminate variants restarts the sweep.
        state.sync(LinearVariant::Query, now + Duration::from_millis(32));
        assert_eq!(state.primary.generation(), 2);
        assert_eq!(state.secondary.generation(), 2);

        state.sync(LinearVariant::Determinate, now + Duration::from_millis(48));
        assert_eq!(state.primary.state(), ChannelState::Stopped);
        assert_eq!(state.secondary.state(), ChannelState::Stopped);
        assert!(!state.is_animating());

        let frozen = state.primary.value();
        state.primary.tick(now + Duration::from_secs(10));
        assert_eq!(state.primary.value(), frozen);
    }

    #[test]
    fn test_buffer_never_animates() {
        let now = Instant::now();
        let mut state = LinearState::new();
        state.sync(LinearVariant::Buffer, now);
        assert!(!state.is_animating());
        assert_eq!(state.primary.generation(), 0);
    }
}
