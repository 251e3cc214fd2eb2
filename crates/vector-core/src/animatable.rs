use glam::Vec2;
use std::f32::consts::PI;
use std::time::Duration;
use vector_data::model::{Color, Easing, PathCommand, PathData, Point, Timeline};

pub trait Interpolatable: Sized + Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::new(
            self.r.lerp(&other.r, t),
            self.g.lerp(&other.g, t),
            self.b.lerp(&other.b, t),
            self.a.lerp(&other.a, t),
        )
    }
}

impl<T: Interpolatable> Interpolatable for Option<T> {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.lerp(b, t)),
            _ => {
                if t < 1.0 {
                    self.clone()
                } else {
                    other.clone()
                }
            }
        }
    }
}

fn lerp_point(a: &Point, b: &Point, t: f32) -> Point {
    [a[0].lerp(&b[0], t), a[1].lerp(&b[1], t)]
}

impl Interpolatable for PathData {
    /// Morphs point by point when both command lists share a shape, otherwise holds the start
    /// path until the end of the interval.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if !self.is_morphable_with(other) {
            return if t < 1.0 {
                self.clone()
            } else {
                other.clone()
            };
        }

        self.commands
            .iter()
            .zip(&other.commands)
            .map(|(a, b)| match (a, b) {
                (PathCommand::MoveTo(p), PathCommand::MoveTo(q)) => {
                    PathCommand::MoveTo(lerp_point(p, q, t))
                }
                (PathCommand::LineTo(p), PathCommand::LineTo(q)) => {
                    PathCommand::LineTo(lerp_point(p, q, t))
                }
                (PathCommand::QuadTo(p1, p2), PathCommand::QuadTo(q1, q2)) => {
                    PathCommand::QuadTo(lerp_point(p1, q1, t), lerp_point(p2, q2, t))
                }
                (PathCommand::CubicTo(p1, p2, p3), PathCommand::CubicTo(q1, q2, q3)) => {
                    PathCommand::CubicTo(
                        lerp_point(p1, q1, t),
                        lerp_point(p2, q2, t),
                        lerp_point(p3, q3, t),
                    )
                }
                _ => *a,
            })
            .collect()
    }
}

// Cubic Bezier Easing
pub fn solve_cubic_bezier(p1: Vec2, p2: Vec2, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson
    let mut t = x;
    for _ in 0..8 {
        let one_minus_t = 1.0 - t;
        let x_est = 3.0 * one_minus_t * one_minus_t * t * p1.x
            + 3.0 * one_minus_t * t * t * p2.x
            + t * t * t;

        let err = x_est - x;
        if err.abs() < 1e-4 {
            break;
        }

        let dx_dt = 3.0 * one_minus_t * one_minus_t * p1.x
            + 6.0 * one_minus_t * t * (p2.x - p1.x)
            + 3.0 * t * t * (1.0 - p2.x);

        if dx_dt.abs() < 1e-6 {
            break;
        }
        t -= err / dx_dt;
    }

    let one_minus_t = 1.0 - t;
    3.0 * one_minus_t * one_minus_t * t * p1.y + 3.0 * one_minus_t * t * t * p2.y + t * t * t
}

/// Maps a linear fraction in `0..=1` through an easing curve.
pub fn ease(easing: &Easing, t: f32) -> f32 {
    match easing {
        Easing::Linear => t,
        Easing::Step => {
            if t >= 1.0 {
                1.0
            } else {
                0.0
            }
        }
        Easing::Accelerate => t * t,
        Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        Easing::FastOutSlowIn => solve_cubic_bezier(Vec2::new(0.4, 0.0), Vec2::new(0.2, 1.0), t),
        Easing::CubicBezier { x1, y1, x2, y2 } => {
            solve_cubic_bezier(Vec2::new(*x1, *y1), Vec2::new(*x2, *y2), t)
        }
    }
}

pub struct Animator;

impl Animator {
    /// Resolves one attribute at `progress` of a scene lasting `total`.
    ///
    /// Without a timeline, or with an empty one, `default` is returned unchanged.
    pub fn resolve<T, U>(
        timeline: Option<&Timeline<T>>,
        progress: f32,
        total: Duration,
        converter: impl Fn(&T) -> U,
        default: U,
    ) -> U
    where
        U: Interpolatable,
    {
        let Some(timeline) = timeline else {
            return default;
        };
        if timeline.keyframes.is_empty() {
            return default;
        }

        let local = Self::local_fraction(timeline, progress, total);
        Self::resolve_keyframes(timeline, ease(&timeline.easing, local), &converter)
    }

    /// Position inside the timeline's own window, clamped to `0..=1`.
    pub fn local_fraction<T>(timeline: &Timeline<T>, progress: f32, total: Duration) -> f32 {
        let time = progress * total.as_secs_f32();
        let start = timeline.start.as_secs_f32();
        let duration = timeline
            .duration
            .unwrap_or_else(|| total.saturating_sub(timeline.start))
            .as_secs_f32();

        if duration <= 0.0 {
            return if time >= start { 1.0 } else { 0.0 };
        }
        ((time - start) / duration).clamp(0.0, 1.0)
    }

    fn resolve_keyframes<T, U>(
        timeline: &Timeline<T>,
        fraction: f32,
        converter: &impl Fn(&T) -> U,
    ) -> U
    where
        U: Interpolatable,
    {
        let keyframes = &timeline.keyframes;

        // Index of the first keyframe strictly after `fraction`; the active segment is
        // [idx - 1, idx].
        let idx = keyframes.partition_point(|kf| kf.fraction <= fraction);

        if idx == 0 {
            return converter(&keyframes[0].value);
        }

        let len = keyframes.len();
        if idx >= len {
            return converter(&keyframes[len - 1].value);
        }

        let kf_start = &keyframes[idx - 1];
        let kf_end = &keyframes[idx];
        let start_val = converter(&kf_start.value);

        let span = kf_end.fraction - kf_start.fraction;
        if span <= 0.0 {
            return start_val;
        }
        if let Easing::Step = kf_start.easing {
            return start_val;
        }

        let local_t = ease(&kf_start.easing, (fraction - kf_start.fraction) / span);
        start_val.lerp(&converter(&kf_end.value), local_t)
    }
}
