use std::{rc::Rc, time::Duration};

use gpui::{
    App, Div, ElementId, Hsla, InteractiveElement as _, IntoElement, ParentElement, RenderOnce,
    SharedString, StyleRefinement, Styled, Window, div, hsla, linear_color_stop, linear_gradient,
    prelude::FluentBuilder as _, px,
};
use instant::Instant;
use smallvec::{SmallVec, smallvec};

use super::{
    AccessibilityValue, LayoutMeasurement, ProgressAccessibility,
    measure::{Measured, measure},
};
use crate::{
    StyledExt,
    animation::{AnimationChannel, Easing, interpolate},
    geometry::{LiquidGeometry, ProgressWidth, clamp01},
    theme::Theme,
};

/// Display mode of a [`LiquidProgress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LiquidVariant {
    /// The fill keeps flowing from empty to full.
    #[default]
    Indeterminate,
    /// The fill eases to the value.
    Determinate,
}

/// A pill shaped progress with a gradient fill and a moving shimmer.
#[derive(IntoElement)]
pub struct LiquidProgress {
    id: ElementId,
    style: StyleRefinement,
    theme: Option<Rc<Theme>>,
    variant: LiquidVariant,
    value: f32,
    width: ProgressWidth,
    height: f32,
    inset: f32,
    border_radius: Option<f32>,
    track_color: Option<Hsla>,
    gradient_colors: Option<SmallVec<[Hsla; 4]>>,
    label: SharedString,
}

impl LiquidProgress {
    pub const DEFAULT_WIDTH: f32 = 180.;
    pub const DEFAULT_HEIGHT: f32 = 32.;
    pub const DEFAULT_INSET: f32 = 2.;
    pub const FILL_DURATION: Duration = Duration::from_millis(450);
    pub const FLOW_DURATION: Duration = Duration::from_millis(4000);
    pub const SHIMMER_DURATION: Duration = Duration::from_millis(3000);

    /// Create a new liquid progress, indeterminate and 180×32 by default.
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            style: StyleRefinement::default(),
            theme: None,
            variant: LiquidVariant::default(),
            value: 0.,
            width: ProgressWidth::Fixed(Self::DEFAULT_WIDTH),
            height: Self::DEFAULT_HEIGHT,
            inset: Self::DEFAULT_INSET,
            border_radius: None,
            track_color: None,
            gradient_colors: None,
            label: "Loading".into(),
        }
    }

    pub fn variant(mut self, variant: LiquidVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Shortcut for `variant(LiquidVariant::Determinate)`.
    pub fn determinate(self) -> Self {
        self.variant(LiquidVariant::Determinate)
    }

    /// Set the value, clamped to `0.0..=1.0`.
    pub fn value(mut self, value: f32) -> Self {
        self.value = clamp01(value);
        self
    }

    /// Set the track width, default: 180px.
    ///
    /// With [`ProgressWidth::Fill`] the default width is used until the
    /// track has been laid out.
    pub fn width(mut self, width: impl Into<ProgressWidth>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the track height in pixels, default: 32.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the gap between the track border and the fill, default: 2.
    pub fn inset(mut self, inset: f32) -> Self {
        self.inset = inset;
        self
    }

    /// Set the track corner radius, default: half the height.
    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Set the track color, default is the theme track color.
    pub fn track_color(mut self, color: impl Into<Hsla>) -> Self {
        self.track_color = Some(color.into());
        self
    }

    /// Set the fill gradient stops, left to right.
    ///
    /// Default is theme primary, buffer, primary.
    pub fn gradient_colors(mut self, colors: impl IntoIterator<Item = Hsla>) -> Self {
        self.gradient_colors = Some(colors.into_iter().collect());
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

    pub fn geometry(&self) -> LiquidGeometry {
        LiquidGeometry::new(self.height, self.inset, self.border_radius)
    }

    /// The outer width before (or without) a layout measurement.
    fn fallback_width(&self) -> f32 {
        self.width.fixed().unwrap_or(Self::DEFAULT_WIDTH)
    }

    pub fn accessibility(&self) -> ProgressAccessibility {
        ProgressAccessibility {
            label: self.label.clone(),
            value: match self.variant {
                LiquidVariant::Determinate => Some(AccessibilityValue {
                    min: 0.,
                    max: 100.,
                    now: (self.value * 100.).round() as u32,
                }),
                LiquidVariant::Indeterminate => None,
            },
        }
    }

    fn resolve_gradient(&self, theme: &Theme) -> SmallVec<[Hsla; 4]> {
        match &self.gradient_colors {
            Some(colors) if !colors.is_empty() => colors.clone(),
            _ => smallvec![theme.primary, theme.buffer, theme.primary],
        }
    }
}

/// One painted piece of a horizontal gradient, in fill relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GradientSegment {
    pub(crate) left: f32,
    pub(crate) width: f32,
    pub(crate) from: Hsla,
    pub(crate) to: Hsla,
    /// Corner radius of the left and the right end.
    pub(crate) corners: (f32, f32),
}

fn mix(a: Hsla, b: Hsla, t: f32) -> Hsla {
    if t <= 0. {
        return a;
    }
    if t >= 1. {
        return b;
    }
    Hsla {
        h: a.h + (b.h - a.h) * t,
        s: a.s + (b.s - a.s) * t,
        l: a.l + (b.l - a.l) * t,
        a: a.a + (b.a - a.a) * t,
    }
}

/// Split `colors` into equal two-stop segments laid over `band` (start and
/// width), clipped to `0..=clip`.
///
/// A segment that touches an end of the clip range gets `radius` corners on
/// that end, so the pieces together keep the rounded caps of the fill.
pub(crate) fn gradient_segments(
    colors: &[Hsla],
    band: (f32, f32),
    clip: f32,
    radius: f32,
) -> SmallVec<[GradientSegment; 4]> {
    let (start, width) = band;
    let mut segments = SmallVec::new();
    if colors.is_empty() || width <= 0. || clip <= 0. {
        return segments;
    }

    let stops: SmallVec<[Hsla; 4]> = match colors {
        [color] => smallvec![*color, *color],
        colors => colors.iter().copied().collect(),
    };
    let count = stops.len() - 1;

    for (ix, pair) in stops.windows(2).enumerate() {
        let x0 = start + width * ix as f32 / count as f32;
        let x1 = if ix + 1 == count {
            start + width
        } else {
            start + width * (ix + 1) as f32 / count as f32
        };
        let left = x0.max(0.);
        let right = x1.min(clip);
        if right <= left {
            continue;
        }

        let span = x1 - x0;
        segments.push(GradientSegment {
            left,
            width: right - left,
            from: mix(pair[0], pair[1], (left - x0) / span),
            to: mix(pair[0], pair[1], (right - x0) / span),
            corners: (
                if left <= 0. { radius } else { 0. },
                if right >= clip { radius } else { 0. },
            ),
        });
    }

    segments
}

fn render_segment(segment: GradientSegment) -> Div {
    div()
        .absolute()
        .top_0()
        .h_full()
        .left(px(segment.left))
        .w(px(segment.width))
        .rounded_l(px(segment.corners.0))
        .rounded_r(px(segment.corners.1))
        .bg(linear_gradient(
            90.,
            linear_color_stop(segment.from, 0.),
            linear_color_stop(segment.to, 1.),
        ))
}

impl Styled for LiquidProgress {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

/// Per-instance animation state, kept across frames.
pub(crate) struct LiquidState {
    variant: Option<LiquidVariant>,
    target: Option<f32>,
    pub(crate) fill: AnimationChannel,
    pub(crate) shimmer: AnimationChannel,
    pub(crate) measurement: LayoutMeasurement,
}

impl LiquidState {
    pub(crate) fn new() -> Self {
        Self {
            variant: None,
            target: None,
            fill: AnimationChannel::new("liquid-fill", 0.),
            shimmer: AnimationChannel::new("liquid-shimmer", 0.),
            measurement: LayoutMeasurement::default(),
        }
    }

    /// The shimmer loops in both variants; the fill eases to `value` when
    /// determinate and loops when indeterminate.
    pub(crate) fn sync(&mut self, variant: LiquidVariant, value: f32, now: Instant) {
        if self.variant != Some(variant) {
            self.fill.stop();
            self.shimmer.stop();
            self.variant = Some(variant);
            self.target = None;
        }

        match variant {
            LiquidVariant::Determinate => {
                let value = clamp01(value);
                if self.target != Some(value) {
                    self.target = Some(value);
                    self.fill.animate_to(
                        value,
                        now,
                        LiquidProgress::FILL_DURATION,
                        Easing::EaseOutCubic,
                    );
                }
            }
            LiquidVariant::Indeterminate => {
                self.fill
                    .sync_loop(true, now, LiquidProgress::FLOW_DURATION, Easing::EaseOut);
            }
        }

        self.shimmer
            .sync_loop(true, now, LiquidProgress::SHIMMER_DURATION, Easing::Linear);
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.fill.is_running() || self.shimmer.is_running()
    }
}

impl Measured for LiquidState {
    fn measurement_mut(&mut self) -> &mut LayoutMeasurement {
        &mut self.measurement
    }
}

impl RenderOnce for LiquidProgress {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = Theme::resolve(self.theme.as_ref(), cx);
        let track_color = self.track_color.unwrap_or(theme.track);
        let gradient_colors = self.resolve_gradient(theme);

        let geometry = self.geometry();
        let variant = self.variant;
        let value = self.value;
        let fallback_width = self.fallback_width();

        let state = window.use_keyed_state(self.id.clone(), cx, |_, _| LiquidState::new());
        let now = Instant::now();
        let (fill, shimmer, measured, animating) = state.update(cx, |state, _| {
            state.sync(variant, value, now);
            (
                state.fill.tick(now),
                state.shimmer.tick(now),
                state.measurement,
                state.is_animating(),
            )
        });
        if animating {
            window.request_animation_frame();
        }

        let track_width = match self.width.fixed() {
            Some(width) => width,
            None => measured.width_or(fallback_width),
        };
        let content_width = geometry.content_width(track_width);
        let fill_width = geometry.fill_width(fill, content_width);
        let shimmer_x = interpolate(
            shimmer,
            (0., 1.),
            LiquidGeometry::shimmer_range(content_width),
        );
        let shimmer_colors = [
            hsla(0., 0., 1., 0.),
            hsla(0., 0., 1., 0.25),
            hsla(0., 0., 1., 0.),
        ];

        div()
            .id(self.id)
            .relative()
            .overflow_hidden()
            .flex_none()
            .h(px(geometry.height))
            .rounded(px(geometry.radius))
            .bg(track_color)
            .map(|this| match self.width.fixed() {
                Some(width) => this.w(px(width)),
                None => this.w_full().child(measure(state.clone())),
            })
            .refine_style(&self.style)
            .child(
                div()
                    .absolute()
                    .left(px(geometry.inset))
                    .top(px(geometry.inset))
                    .h(px(geometry.content_height))
                    .w(px(fill_width))
                    .children(
                        gradient_segments(
                            &gradient_colors,
                            (0., fill_width),
                            fill_width,
                            geometry.fill_radius,
                        )
                        .into_iter()
                        .map(render_segment),
                    )
                    .children(
                        gradient_segments(
                            &shimmer_colors,
                            (shimmer_x, content_width),
                            fill_width,
                            geometry.fill_radius,
                        )
                        .into_iter()
                        .map(render_segment),
                    ),
            )
    }
}
