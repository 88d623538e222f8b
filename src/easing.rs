//! Easing curves for shader parameter animation.
//!
//! [`ease`] maps a normalized progress `t` in `[0, 1]` to an eased progress
//! in the same range. Every curve satisfies `ease(0) == 0` and
//! `ease(1) == 1`, so animations always start and end exactly on their
//! endpoint values.

use serde::{Deserialize, Deserializer, Serialize};

/// Easing functions for smooth interpolation.
///
/// Unknown names coming from data files deserialize to [`Easing::Linear`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Easing {
    /// Constant speed (no easing).
    #[default]
    Linear,
    /// Starts slow, accelerates (quadratic).
    EaseIn,
    /// Starts fast, decelerates (quadratic).
    EaseOut,
    /// Slow start and end (quadratic).
    EaseInOut,
    /// Hermite smoothstep, `t²(3 − 2t)`.
    SmoothStep,
}

impl Easing {
    /// All easing kinds, in declaration order.
    pub const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::SmoothStep,
    ];

    /// Parse an easing name, falling back to [`Easing::Linear`] for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "easein" | "ease_in" | "in" => Easing::EaseIn,
            "easeout" | "ease_out" | "out" => Easing::EaseOut,
            "easeinout" | "ease_in_out" | "inout" => Easing::EaseInOut,
            "smoothstep" | "smooth_step" | "smooth" => Easing::SmoothStep,
            _ => Easing::Linear,
        }
    }

    /// Apply this curve to `t`. See [`ease`].
    pub fn apply(self, t: f32) -> f32 {
        ease(self, t)
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Easing::from_name(&name))
    }
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                let p = -2.0 * t + 2.0;
                1.0 - p * p / 2.0
            }
        }
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_ease_all_types_at_endpoints() {
        for easing in Easing::ALL {
            assert!(
                approx_eq(ease(easing, 0.0), 0.0),
                "{:?} at t=0.0 should be 0.0",
                easing
            );
            assert!(
                approx_eq(ease(easing, 1.0), 1.0),
                "{:?} at t=1.0 should be 1.0",
                easing
            );
        }
    }

    #[test]
    fn test_ease_clamps_out_of_range_input() {
        for easing in Easing::ALL {
            assert!(approx_eq(ease(easing, -0.5), 0.0), "{:?}", easing);
            assert!(approx_eq(ease(easing, 1.5), 1.0), "{:?}", easing);
        }
    }

    #[test]
    fn test_ease_quadratic_curves() {
        assert!(approx_eq(ease(Easing::EaseIn, 0.5), 0.25));
        assert!(approx_eq(ease(Easing::EaseOut, 0.5), 0.75));
        assert!(approx_eq(ease(Easing::EaseOut, 0.25), 0.4375));
        assert!(approx_eq(ease(Easing::EaseInOut, 0.25), 0.125));
        assert!(approx_eq(ease(Easing::EaseInOut, 0.5), 0.5));
        assert!(approx_eq(ease(Easing::EaseInOut, 0.75), 0.875));
    }

    #[test]
    fn test_ease_smoothstep() {
        assert!(approx_eq(ease(Easing::SmoothStep, 0.5), 0.5));
        // 0.25² * (3 - 0.5) = 0.15625
        assert!(approx_eq(ease(Easing::SmoothStep, 0.25), 0.15625));
    }

    #[test]
    fn test_ease_monotonicity() {
        for easing in Easing::ALL {
            let mut prev = ease(easing, 0.0);
            for i in 1..=100 {
                let t = i as f32 / 100.0;
                let curr = ease(easing, t);
                assert!(
                    curr >= prev - EPSILON,
                    "{:?} should be monotonic at t={}",
                    easing,
                    t
                );
                prev = curr;
            }
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_linear() {
        assert_eq!(Easing::from_name("bounce"), Easing::Linear);
        assert_eq!(Easing::from_name("EaseInOut"), Easing::EaseInOut);
        assert_eq!(Easing::from_name("smoothstep"), Easing::SmoothStep);
    }

    #[test]
    fn test_unknown_serde_name_falls_back_to_linear() {
        let e: Easing = serde_json::from_str("\"Elastic\"").unwrap();
        assert_eq!(e, Easing::Linear);
        let e: Easing = serde_json::from_str("\"EaseOut\"").unwrap();
        assert_eq!(e, Easing::EaseOut);
    }
}
