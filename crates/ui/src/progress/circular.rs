use std::{f32::consts::TAU, rc::Rc, time::Duration};

use gpui::{
    App, Bounds, ElementId, Hsla, InteractiveElement as _, IntoElement, ParentElement, Pixels,
    RenderOnce, SharedString, StyleRefinement, Styled, Window, canvas, div, px,
};
use instant::Instant;

use super::{AccessibilityValue, ProgressAccessibility, paint_stroke};
use crate::{
    StyledExt,
    animation::{AnimationChannel, Easing, millis},
    geometry::{CircleGeometry, clamp},
    theme::Theme,
};

/// Display mode of a [`CircularProgress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CircularVariant {
    /// A quarter arc spinning forever.
    #[default]
    Indeterminate,
    /// An arc covering the value.
    Determinate,
}

/// A circular progress indicator element.
///
/// ```ignore
/// CircularProgress::new("upload")
///     .determinate()
///     .value(42.)
///     .size(48.)
/// ```
#[derive(IntoElement)]
pub struct CircularProgress {
    id: ElementId,
    style: StyleRefinement,
    theme: Option<Rc<Theme>>,
    variant: CircularVariant,
    value: f32,
    size: f32,
    color: Option<Hsla>,
    track_color: Option<Hsla>,
    thickness: Option<f32>,
    duration: Duration,
    label: SharedString,
}

impl CircularProgress {
    pub const DEFAULT_SIZE: f32 = 24.;
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(900);

    /// Create a new circular progress, indeterminate by default.
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            style: StyleRefinement::default(),
            theme: None,
            variant: CircularVariant::default(),
            value: 0.,
            size: Self::DEFAULT_SIZE,
            color: None,
            track_color: None,
            thickness: None,
            duration: Self::DEFAULT_DURATION,
            label: "Loading".into(),
        }
    }

    pub fn variant(mut self, variant: CircularVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Shortcut for `variant(CircularVariant::Determinate)`.
    pub fn determinate(self) -> Self {
        self.variant(CircularVariant::Determinate)
    }

    /// Set the percentage value, clamped to `0.0..=100.0`.
    pub fn value(mut self, value: f32) -> Self {
        self.value = clamp(value, 0., 100.);
        self
    }

    /// Set the outer size in pixels, default: 24.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the stroke width, default: a tenth of the size but at least 2.
    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// Set the arc color, default is the theme primary color.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the track color, default is the theme track color.
    pub fn track_color(mut self, color: impl Into<Hsla>) -> Self {
        self.track_color = Some(color.into());
        self
    }

    /// Set the time of one indeterminate rotation, default: 900ms.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Like [`CircularProgress::duration`] in milliseconds.
    pub fn duration_ms(self, ms: f32) -> Self {
        self.duration(millis(ms))
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

    pub fn geometry(&self) -> CircleGeometry {
        CircleGeometry::new(self.size, self.thickness)
    }

    pub fn accessibility(&self) -> ProgressAccessibility {
        ProgressAccessibility {
            label: self.label.clone(),
            value: match self.variant {
                CircularVariant::Determinate => Some(AccessibilityValue {
                    min: 0.,
                    max: 100.,
                    now: self.value.round() as u32,
                }),
                CircularVariant::Indeterminate => None,
            },
        }
    }
}

impl Styled for CircularProgress {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

/// Per-instance animation state, kept across frames.
pub(crate) struct CircularState {
    variant: Option<CircularVariant>,
    pub(crate) rotation: AnimationChannel,
}

impl CircularState {
    pub(crate) fn new() -> Self {
        Self {
            variant: None,
            rotation: AnimationChannel::new("circular-rotation", 0.),
        }
    }

    /// Start, restart or stop the rotation for the current props.
    pub(crate) fn sync(&mut self, variant: CircularVariant, duration: Duration, now: Instant) {
        if self.variant != Some(variant) {
            self.rotation.stop();
            self.variant = Some(variant);
        }

        self.rotation.sync_loop(
            variant == CircularVariant::Indeterminate,
            now,
            duration,
            Easing::Linear,
        );
    }
}

impl RenderOnce for CircularProgress {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = Theme::resolve(self.theme.as_ref(), cx);
        let color = self.color.unwrap_or(theme.primary);
        let track_color = self.track_color.unwrap_or(theme.track);

        let geometry = self.geometry();
        let variant = self.variant;
        let value = self.value;
        let duration = self.duration;

        let state = window.use_keyed_state(self.id.clone(), cx, |_, _| CircularState::new());
        let now = Instant::now();
        let (rotation, animating) = state.update(cx, |state, _| {
            state.sync(variant, duration, now);
            (state.rotation.tick(now), state.rotation.is_running())
        });
        if animating {
            window.request_animation_frame();
        }

        let (start_angle, fraction) = match variant {
            CircularVariant::Determinate => (
                CircleGeometry::START_ANGLE,
                geometry.progress_fraction(value),
            ),
            CircularVariant::Indeterminate => (
                CircleGeometry::START_ANGLE + rotation * TAU,
                CircleGeometry::INDETERMINATE_FRACTION,
            ),
        };
        let size = px(geometry.size);

        div()
            .id(self.id)
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .relative()
            .size(size)
            .refine_style(&self.style)
            .child(
                canvas(
                    |bounds: Bounds<Pixels>, _: &mut Window, _: &mut App| bounds,
                    move |_, bounds, window: &mut Window, _: &mut App| {
                        let track = geometry.arc_points(CircleGeometry::START_ANGLE, 1.);
                        paint_stroke(
                            &track,
                            bounds.origin,
                            geometry.stroke_width,
                            track_color,
                            window,
                        );

                        let arc = geometry.arc_points(start_angle, fraction);
                        paint_stroke(&arc, bounds.origin, geometry.stroke_width, color, window);
                    },
                )
                .absolute()
                .top_0()
                .left_0()
                .size(size),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ChannelState;

    #[test]
    fn test_defaults() {
        let progress = CircularProgress::new("circular");
        assert_eq!(progress.variant, CircularVariant::Indeterminate);
        assert_eq!(progress.value, 0.);
        assert_eq!(progress.duration, Duration::from_millis(900));

        let geometry = progress.geometry();
        assert_eq!(geometry.size, 24.);
        assert_eq!(geometry.stroke_width, 2.);
    }

    #[test]
    fn test_value_is_clamped() {
        let progress = CircularProgress::new("circular").determinate().value(150.);
        assert_eq!(
            progress.accessibility().value,
            Some(AccessibilityValue {
                min: 0.,
                max: 100.,
                now: 100
            })
        );

        let progress = CircularProgress::new("circular").determinate().value(-20.);
        assert_eq!(progress.accessibility().value.map(|v| v.now), Some(0));

        let progress = CircularProgress::new("circular").determinate().value(f32::NAN);
        assert_eq!(progress.accessibility().value.map(|v| v.now), Some(0));

        let progress = CircularProgress::new("circular").determinate().value(33.5);
        assert_eq!(progress.accessibility().value.map(|v| v.now), Some(34));
    }

    #[test]
    fn test_accessibility() {
        let progress = CircularProgress::new("circular").value(50.);
        let accessibility = progress.accessibility();
        assert_eq!(accessibility.label, SharedString::from("Loading"));
        assert_eq!(accessibility.value, None);

        let progress = CircularProgress::new("circular").accessibility_label("Uploading");
        assert_eq!(progress.accessibility().label, SharedString::from("Uploading"));
    }

    #[test]
    fn test_geometry_props() {
        let geometry = CircularProgress::new("circular")
            .size(3.6)
            .thickness(-2.)
            .geometry();
        assert_eq!(geometry.size, 4.);
        assert_eq!(geometry.stroke_width, 1.);

        let geometry = CircularProgress::new("circular")
            .size(100.)
            .thickness(10.)
            .geometry();
        assert_eq!(geometry.radius, 45.);
    }

    #[test]
    fn test_duration_ms() {
        let progress = CircularProgress::new("circular").duration_ms(-100.);
        assert_eq!(progress.duration, Duration::ZERO);
        let progress = CircularProgress::new("circular").duration_ms(1200.);
        assert_eq!(progress.duration, Duration::from_millis(1200));
    }

    #[test]
    fn test_rotation_lifecycle() {
        let now = Instant::now();
        let duration = Duration::from_millis(900);
        let mut state = CircularState::new();

        state.sync(CircularVariant::Indeterminate, duration, now);
        assert!(state.rotation.is_looping());
        assert_eq!(state.rotation.generation(), 1);

        // Same props on the next frame keep the loop.
        state.sync(CircularVariant::Indeterminate, duration, now + duration / 2);
        assert_eq!(state.rotation.generation(), 1);

        // A new duration replaces the loop.
        state.sync(CircularVariant::Indeterminate, duration * 2, now + duration);
        assert_eq!(state.rotation.generation(), 2);

        state.sync(CircularVariant::Determinate, duration, now + duration);
        assert_eq!(state.rotation.state(), ChannelState::Stopped);
        let frozen = state.rotation.tick(now + duration * 3);
        assert_eq!(state.rotation.tick(now + duration * 4), frozen);

        // Back to indeterminate restarts from 0.
        state.sync(CircularVariant::Indeterminate, duration, now + duration * 5);
        assert_eq!(state.rotation.generation(), 3);
        assert_eq!(state.rotation.value(), 0.);
    }

    #[test]
    fn test_determinate_never_starts_rotation() {
        let now = Instant::now();
        let mut state = CircularState::new();
        state.sync(CircularVariant::Determinate, Duration::from_millis(900), now);
        assert_eq!(state.rotation.state(), ChannelState::Idle);
        assert_eq!(state.rotation.generation(), 0);
    }
}
