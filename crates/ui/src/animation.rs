//! Timed animation channels.
//!
//! A channel is a scalar that a widget samples once per frame. Nothing here
//! spawns timers: a running channel only needs the owner to request the next
//! animation frame, so a stopped or dropped channel can never fire again.
use std::time::Duration;

use instant::Instant;

use crate::geometry::clamp01;

/// Returns a cubic bezier easing function, like CSS `cubic-bezier()`.
///
/// `x1` and `x2` must be within `0.0..=1.0` for the curve to be monotonic.
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> impl Fn(f32) -> f32 {
    move |t: f32| {
        let t = clamp01(t);
        if t == 0. || t == 1. {
            return t;
        }

        let sample = |a1: f32, a2: f32, s: f32| {
            let inv = 1. - s;
            3. * a1 * s * inv * inv + 3. * a2 * s * s * inv + s * s * s
        };

        // Bisection on x, the curve parameter is not the time.
        let (mut lo, mut hi) = (0_f32, 1_f32);
        let mut s = t;
        for _ in 0..32 {
            let x = sample(x1, x2, s);
            if (x - t).abs() < 1e-5 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.;
        }

        sample(y1, y2, s)
    }
}

/// Easing curves understood by [`AnimationChannel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`.
    Ease,
    /// [`Easing::Ease`] mirrored around the midpoint.
    EaseInOut,
    /// [`Easing::Ease`] played backwards.
    EaseOut,
    /// `1 - (1 - t)^3`.
    EaseOutCubic,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map a linear `0..=1` time fraction onto the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = clamp01(t);
        match *self {
            Easing::Linear => t,
            Easing::Ease => ease(t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    ease(t * 2.) / 2.
                } else {
                    1. - ease((1. - t) * 2.) / 2.
                }
            }
            Easing::EaseOut => 1. - ease(1. - t),
            Easing::EaseOutCubic => 1. - (1. - t).powi(3),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2)(t),
        }
    }
}

#[inline]
fn ease(t: f32) -> f32 {
    cubic_bezier(0.42, 0., 1., 1.)(t)
}

/// Linearly map `value` from `input` onto `output`, extrapolating outside.
pub fn interpolate(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let (in_start, in_end) = input;
    let (out_start, out_end) = output;
    if in_start == in_end {
        return out_start;
    }

    let t = (value - in_start) / (in_end - in_start);
    out_start + (out_end - out_start) * t
}

/// Convert a millisecond count, negative or non-finite input becomes zero.
pub fn millis(ms: f32) -> Duration {
    if ms.is_finite() && ms > 0. {
        Duration::from_micros((ms * 1000.).round() as u64)
    } else {
        Duration::ZERO
    }
}

/// Lifecycle of an [`AnimationChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// Not animating, either never started or a bounded transition completed.
    #[default]
    Idle,
    Running,
    /// Explicitly stopped, the value is frozen.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
    looping: bool,
}

impl Transition {
    /// Returns the value at `now` and whether a bounded transition is done.
    fn sample(&self, now: Instant) -> (f32, bool) {
        if self.duration.is_zero() {
            return (self.to, !self.looping);
        }

        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        let total = self.duration.as_secs_f32();
        let (t, finished) = if self.looping {
            ((elapsed % total) / total, false)
        } else if elapsed >= total {
            (1., true)
        } else {
            (elapsed / total, false)
        };

        let progress = self.easing.apply(t);
        (self.from + (self.to - self.from) * progress, finished)
    }
}

/// One independently start/stop-able animated value.
#[derive(Debug)]
pub struct AnimationChannel {
    name: &'static str,
    value: f32,
    state: ChannelState,
    transition: Option<Transition>,
    generation: u64,
}

impl AnimationChannel {
    pub fn new(name: &'static str, initial: f32) -> Self {
        Self {
            name,
            value: initial,
            state: ChannelState::Idle,
            transition: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == ChannelState::Running
    }

    /// Whether the running transition repeats forever.
    pub fn is_looping(&self) -> bool {
        self.is_running() && self.transition.is_some_and(|t| t.looping)
    }

    /// Increases every time a transition starts.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The last sampled value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The value at `now` without advancing the channel.
    pub fn value_at(&self, now: Instant) -> f32 {
        match (self.state, self.transition) {
            (ChannelState::Running, Some(transition)) => transition.sample(now).0,
            _ => self.value,
        }
    }

    /// Reset to 0 and loop 0 → 1 forever.
    ///
    /// A previous transition on this channel is stopped first.
    pub fn start_loop(&mut self, now: Instant, duration: Duration, easing: Easing) {
        self.stop();
        self.value = 0.;
        self.begin(Transition {
            from: 0.,
            to: 1.,
            started_at: now,
            duration,
            easing,
            looping: true,
        });
    }

    /// Run one bounded transition from the current value to `target`.
    pub fn animate_to(&mut self, target: f32, now: Instant, duration: Duration, easing: Easing) {
        let from = self.value_at(now);
        self.stop();
        self.value = from;
        self.begin(Transition {
            from,
            to: target,
            started_at: now,
            duration,
            easing,
            looping: false,
        });
    }

    /// Keep a loop running while `active`, otherwise stop it.
    ///
    /// A running loop is restarted when `duration` or `easing` changed.
    /// Returns `true` when a new loop was started.
    pub fn sync_loop(
        &mut self,
        active: bool,
        now: Instant,
        duration: Duration,
        easing: Easing,
    ) -> bool {
        if !active {
            self.stop();
            return false;
        }

        let unchanged = self.is_looping()
            && self
                .transition
                .is_some_and(|t| t.duration == duration && t.easing == easing);
        if unchanged {
            return false;
        }

        self.start_loop(now, duration, easing);
        true
    }

    /// Stop the running transition, the value stays where it was last sampled.
    ///
    /// Calling this on a channel that is not running does nothing.
    pub fn stop(&mut self) {
        if self.state != ChannelState::Running {
            return;
        }

        self.state = ChannelState::Stopped;
        tracing::trace!(
            channel = self.name,
            generation = self.generation,
            value = self.value,
            "animation stopped"
        );
    }

    /// Advance to `now` and return the value.
    ///
    /// A channel that is not running is left untouched.
    pub fn tick(&mut self, now: Instant) -> f32 {
        if self.state != ChannelState::Running {
            return self.value;
        }
        let Some(transition) = self.transition else {
            return self.value;
        };

        let (value, finished) = transition.sample(now);
        self.value = value;
        if finished {
            self.state = ChannelState::Idle;
            tracing::trace!(channel = self.name, value, "animation finished");
        }
        value
    }

    fn begin(&mut self, transition: Transition) {
        self.generation += 1;
        self.state = ChannelState::Running;
        self.transition = Some(transition);
        tracing::trace!(
            channel = self.name,
            generation = self.generation,
            looping = transition.looping,
            duration_ms = transition.duration.as_millis() as u64,
            "animation started"
        );
    }
}

impl Drop for AnimationChannel {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseInOut,
            Easing::EaseOut,
            Easing::EaseOutCubic,
            Easing::CubicBezier(0.4, 0., 0.2, 1.),
        ] {
            assert_eq!(easing.apply(0.), 0., "{:?}", easing);
            assert_eq!(easing.apply(1.), 1., "{:?}", easing);
            assert_eq!(easing.apply(-1.), 0., "{:?}", easing);
            assert_eq!(easing.apply(2.), 1., "{:?}", easing);
        }
    }

    #[test]
    fn test_easing_shape() {
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
        assert!(approx_eq(Easing::EaseOutCubic.apply(0.5), 0.875));
        assert!(approx_eq(Easing::EaseInOut.apply(0.5), 0.5));
        // Ease-in starts slow, ease-out starts fast.
        assert!(Easing::Ease.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
        assert!(Easing::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_cubic_bezier_linear() {
        let f = cubic_bezier(0.25, 0.25, 0.75, 0.75);
        for step in 0..=10 {
            let t = step as f32 / 10.;
            assert!(approx_eq(f(t), t));
        }
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate(0.5, (0., 1.), (0., 360.)), 180.);
        assert_eq!(interpolate(0., (0., 1.), (-200., 400.)), -200.);
        assert_eq!(interpolate(1., (0., 1.), (-200., 400.)), 400.);
        assert_eq!(interpolate(2., (0., 1.), (0., 10.)), 20.);
        assert_eq!(interpolate(5., (1., 1.), (3., 10.)), 3.);
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(900.), ms(900));
        assert_eq!(millis(-1.), Duration::ZERO);
        assert_eq!(millis(f32::NAN), Duration::ZERO);
        assert_eq!(millis(f32::INFINITY), Duration::ZERO);
    }

    #[test]
    fn test_loop() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("rotation", 0.7);
        assert_eq!(channel.state(), ChannelState::Idle);
        assert_eq!(channel.value(), 0.7);

        channel.start_loop(now, ms(1000), Easing::Linear);
        assert!(channel.is_running());
        assert!(channel.is_looping());
        assert_eq!(channel.generation(), 1);
        assert_eq!(channel.value(), 0.);

        assert!(approx_eq(channel.tick(now + ms(250)), 0.25));
        // Wraps around, no upper bound on iterations.
        assert!(approx_eq(channel.tick(now + ms(10_500)), 0.5));
        assert!(channel.is_running());
    }

    #[test]
    fn test_stop_is_idempotent_and_freezes() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("rotation", 0.);
        channel.start_loop(now, ms(1000), Easing::Linear);
        channel.tick(now + ms(400));

        channel.stop();
        assert_eq!(channel.state(), ChannelState::Stopped);
        let frozen = channel.value();
        assert!(approx_eq(frozen, 0.4));

        channel.stop();
        assert_eq!(channel.state(), ChannelState::Stopped);
        assert_eq!(channel.tick(now + ms(900)), frozen);
        assert_eq!(channel.value_at(now + ms(900)), frozen);
        assert_eq!(channel.generation(), 1);
    }

    #[test]
    fn test_restart_replaces_loop() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("translate", 0.);
        channel.start_loop(now, ms(1200), Easing::EaseInOut);
        channel.tick(now + ms(600));

        channel.start_loop(now + ms(600), ms(1200), Easing::EaseInOut);
        assert_eq!(channel.generation(), 2);
        assert_eq!(channel.value(), 0.);
        assert_eq!(channel.tick(now + ms(600)), 0.);
    }

    #[test]
    fn test_sync_loop() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("rotation", 0.);

        assert!(channel.sync_loop(true, now, ms(900), Easing::Linear));
        assert!(!channel.sync_loop(true, now + ms(10), ms(900), Easing::Linear));
        assert_eq!(channel.generation(), 1);

        // Duration change restarts.
        assert!(channel.sync_loop(true, now + ms(20), ms(500), Easing::Linear));
        assert_eq!(channel.generation(), 2);

        assert!(!channel.sync_loop(false, now + ms(30), ms(500), Easing::Linear));
        assert_eq!(channel.state(), ChannelState::Stopped);
        assert!(!channel.is_looping());
    }

    #[test]
    fn test_animate_to() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("fill", 0.);
        channel.animate_to(0.8, now, ms(450), Easing::EaseOutCubic);
        assert!(channel.is_running());
        assert!(!channel.is_looping());
        assert_eq!(channel.value_at(now + ms(450)), 0.8);

        let mid = channel.tick(now + ms(225));
        assert!(mid > 0.4 && mid < 0.8);

        assert_eq!(channel.tick(now + ms(450)), 0.8);
        assert_eq!(channel.state(), ChannelState::Idle);
        assert_eq!(channel.tick(now + ms(2000)), 0.8);
    }

    #[test]
    fn test_animate_to_from_current_value() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("fill", 0.);
        channel.animate_to(1., now, ms(1000), Easing::Linear);

        // Retarget halfway, the new transition starts from the sampled value.
        channel.animate_to(0., now + ms(500), ms(1000), Easing::Linear);
        assert!(approx_eq(channel.value(), 0.5));
        assert!(approx_eq(channel.tick(now + ms(1000)), 0.25));
    }

    #[test]
    fn test_zero_duration() {
        let now = Instant::now();
        let mut channel = AnimationChannel::new("fill", 0.);
        channel.animate_to(0.3, now, Duration::ZERO, Easing::EaseOutCubic);
        assert_eq!(channel.tick(now), 0.3);
        assert_eq!(channel.state(), ChannelState::Idle);

        channel.start_loop(now, Duration::ZERO, Easing::Linear);
        assert_eq!(channel.tick(now + ms(5)), 1.);
        assert!(channel.is_running());
    }

    #[test]
    fn test_channels_are_independent() {
        let now = Instant::now();
        let mut fill = AnimationChannel::new("fill", 0.);
        let mut shimmer = AnimationChannel::new("shimmer", 0.);
        fill.start_loop(now, ms(4000), Easing::EaseOut);
        shimmer.start_loop(now, ms(3000), Easing::Linear);

        fill.stop();
        assert!(!fill.is_running());
        assert!(shimmer.is_running());
        assert!(approx_eq(shimmer.tick(now + ms(1500)), 0.5));
    }
}
