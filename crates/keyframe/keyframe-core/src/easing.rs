//! Easing curves.
//!
//! Every curve maps a normalized progress `p` to an eased progress. Inputs are
//! not clamped: values outside `[0, 1]` return whatever the formula yields,
//! and the Back, Elastic and Bounce families overshoot `[0, 1]` on purpose.
//!
//! The curves are addressed by a dense tag (`0..=31`, see [`EASING_NAMES`])
//! so that persisted keyframes can store them as a plain integer.
//!
//! Formulas are evaluated in `f64` and rounded once to `f32`. Together with
//! the exact special cases of the exponential family this keeps `f(0) == 0`
//! and `f(1) == 1` exact for every curve but `Constant`.

use crate::value::Lerp;
use crate::KeyframeError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Signature shared by every easing curve.
pub type EasingFn = fn(f32) -> f32;

/// Number of entries in the easing table.
pub const EASING_COUNT: usize = 32;

/// sin(pi * x), exactly zero for integer `x`.
#[inline]
fn sin_pi(x: f64) -> f64 {
    let r = x - 2.0 * (x / 2.0).round();
    let folded = if r > 0.5 {
        1.0 - r
    } else if r < -0.5 {
        -1.0 - r
    } else {
        r
    };
    (folded * PI).sin()
}

/// Zero until the end of the segment, then one.
pub fn constant(p: f32) -> f32 {
    if p < 1.0 {
        0.0
    } else {
        1.0
    }
}

/// y = x
pub fn linear(p: f32) -> f32 {
    p
}

/// y = x^2
pub fn quadratic_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    (p * p) as f32
}

/// y = -x^2 + 2x
pub fn quadratic_ease_out(p: f32) -> f32 {
    let p = f64::from(p);
    (-(p * (p - 2.0))) as f32
}

/// Piecewise quadratic:
/// y = (1/2)((2x)^2)             ; [0, 0.5)
/// y = -(1/2)((2x-1)*(2x-3) - 1) ; [0.5, 1]
pub fn quadratic_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        2.0 * p * p
    } else {
        (-2.0 * p * p) + (4.0 * p) - 1.0
    };
    y as f32
}

/// y = x^3
pub fn cubic_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    (p * p * p) as f32
}

/// y = (x - 1)^3 + 1
pub fn cubic_ease_out(p: f32) -> f32 {
    let f = f64::from(p) - 1.0;
    (f * f * f + 1.0) as f32
}

/// Piecewise cubic:
/// y = (1/2)((2x)^3)       ; [0, 0.5)
/// y = (1/2)((2x-2)^3 + 2) ; [0.5, 1]
pub fn cubic_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        4.0 * p * p * p
    } else {
        let f = (2.0 * p) - 2.0;
        0.5 * f * f * f + 1.0
    };
    y as f32
}

/// y = x^4
pub fn quartic_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    (p * p * p * p) as f32
}

/// y = 1 - (x - 1)^4
pub fn quartic_ease_out(p: f32) -> f32 {
    let p = f64::from(p);
    let f = p - 1.0;
    (f * f * f * (1.0 - p) + 1.0) as f32
}

/// Piecewise quartic:
/// y = (1/2)((2x)^4)        ; [0, 0.5)
/// y = -(1/2)((2x-2)^4 - 2) ; [0.5, 1]
pub fn quartic_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        8.0 * p * p * p * p
    } else {
        let f = p - 1.0;
        -8.0 * f * f * f * f + 1.0
    };
    y as f32
}

/// y = x^5
pub fn quintic_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    (p * p * p * p * p) as f32
}

/// y = (x - 1)^5 + 1
pub fn quintic_ease_out(p: f32) -> f32 {
    let f = f64::from(p) - 1.0;
    (f * f * f * f * f + 1.0) as f32
}

/// Piecewise quintic:
/// y = (1/2)((2x)^5)       ; [0, 0.5)
/// y = (1/2)((2x-2)^5 + 2) ; [0.5, 1]
pub fn quintic_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        16.0 * p * p * p * p * p
    } else {
        let f = (2.0 * p) - 2.0;
        0.5 * f * f * f * f * f + 1.0
    };
    y as f32
}

/// Quarter-cycle of sine wave
pub fn sine_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    (((p - 1.0) * FRAC_PI_2).sin() + 1.0) as f32
}

/// Quarter-cycle of sine wave (different phase)
pub fn sine_ease_out(p: f32) -> f32 {
    let p = f64::from(p);
    (p * FRAC_PI_2).sin() as f32
}

/// Half sine wave
pub fn sine_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    (0.5 * (1.0 - (p * PI).cos())) as f32
}

/// Shifted quadrant IV of unit circle
pub fn circular_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    (1.0 - (1.0 - (p * p)).sqrt()) as f32
}

/// Shifted quadrant II of unit circle
pub fn circular_ease_out(p: f32) -> f32 {
    let p = f64::from(p);
    ((2.0 - p) * p).sqrt() as f32
}

/// Piecewise circular:
/// y = (1/2)(1 - sqrt(1 - 4x^2))           ; [0, 0.5)
/// y = (1/2)(sqrt(-(2x - 3)*(2x - 1)) + 1) ; [0.5, 1]
pub fn circular_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        0.5 * (1.0 - (1.0 - 4.0 * (p * p)).sqrt())
    } else {
        0.5 * ((-((2.0 * p) - 3.0) * ((2.0 * p) - 1.0)).sqrt() + 1.0)
    };
    y as f32
}

/// y = 2^(10(x - 1)), exactly 0 at x == 0
pub fn exponential_ease_in(p: f32) -> f32 {
    if p == 0.0 {
        return p;
    }
    (10.0 * (f64::from(p) - 1.0)).exp2() as f32
}

/// y = 1 - 2^(-10x), exactly 1 at x == 1
pub fn exponential_ease_out(p: f32) -> f32 {
    if p == 1.0 {
        return p;
    }
    (1.0 - (-10.0 * f64::from(p)).exp2()) as f32
}

/// Piecewise exponential:
/// y = (1/2)2^(10(2x - 1))         ; [0, 0.5)
/// y = -(1/2)*2^(-10(2x - 1))) + 1 ; [0.5, 1]
pub fn exponential_ease_in_out(p: f32) -> f32 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    let p = f64::from(p);
    let y = if p < 0.5 {
        0.5 * ((20.0 * p) - 10.0).exp2()
    } else {
        -0.5 * ((-20.0 * p) + 10.0).exp2() + 1.0
    };
    y as f32
}

/// Damped sine wave y = sin(13pi/2*x)*2^(10(x - 1))
pub fn elastic_ease_in(p: f32) -> f32 {
    let p = f64::from(p);
    ((13.0 * FRAC_PI_2 * p).sin() * (10.0 * (p - 1.0)).exp2()) as f32
}

/// Damped sine wave y = sin(-13pi/2*(x + 1))*2^(-10x) + 1
pub fn elastic_ease_out(p: f32) -> f32 {
    let p = f64::from(p);
    ((-13.0 * FRAC_PI_2 * (p + 1.0)).sin() * (-10.0 * p).exp2() + 1.0) as f32
}

/// Piecewise damped sine wave:
/// y = (1/2)*sin(13pi/2*(2*x))*2^(10((2*x) - 1))      ; [0, 0.5)
/// y = (1/2)*(sin(-13pi/2*((2x-1)+1))*2^(-10(2*x-1)) + 2) ; [0.5, 1]
pub fn elastic_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        0.5 * (13.0 * FRAC_PI_2 * (2.0 * p)).sin() * (10.0 * ((2.0 * p) - 1.0)).exp2()
    } else {
        0.5 * ((-13.0 * FRAC_PI_2 * ((2.0 * p - 1.0) + 1.0)).sin()
            * (-10.0 * (2.0 * p - 1.0)).exp2()
            + 2.0)
    };
    y as f32
}

#[inline]
fn back_curve(f: f64) -> f64 {
    f * f * f - f * sin_pi(f)
}

/// Overshooting cubic y = x^3 - x*sin(x*pi)
pub fn back_ease_in(p: f32) -> f32 {
    back_curve(f64::from(p)) as f32
}

/// Overshooting cubic y = 1 - ((1-x)^3 - (1-x)*sin((1-x)*pi))
pub fn back_ease_out(p: f32) -> f32 {
    let f = 1.0 - f64::from(p);
    (1.0 - back_curve(f)) as f32
}

/// Piecewise overshooting cubic:
/// y = (1/2)*((2x)^3 - (2x)*sin(2*x*pi))           ; [0, 0.5)
/// y = (1/2)*(1 - ((1-x)^3 - (1-x)*sin((1-x)*pi)) + 1) ; [0.5, 1]
pub fn back_ease_in_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 0.5 {
        0.5 * back_curve(2.0 * p)
    } else {
        let f = 1.0 - (2.0 * p - 1.0);
        0.5 * (1.0 - back_curve(f)) + 0.5
    };
    y as f32
}

/// Mirror of [`bounce_ease_out`].
pub fn bounce_ease_in(p: f32) -> f32 {
    1.0 - bounce_ease_out(1.0 - p)
}

/// Four decaying parabolic bounces.
pub fn bounce_ease_out(p: f32) -> f32 {
    let p = f64::from(p);
    let y = if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    };
    y as f32
}

pub fn bounce_ease_in_out(p: f32) -> f32 {
    if p < 0.5 {
        0.5 * bounce_ease_in(p * 2.0)
    } else {
        0.5 * bounce_ease_out(p * 2.0 - 1.0) + 0.5
    }
}

/// Easing curves indexed by tag.
pub static EASING_FUNCTIONS: [EasingFn; EASING_COUNT] = [
    constant,
    linear,
    quadratic_ease_in,
    quadratic_ease_out,
    quadratic_ease_in_out,
    cubic_ease_in,
    cubic_ease_out,
    cubic_ease_in_out,
    quartic_ease_in,
    quartic_ease_out,
    quartic_ease_in_out,
    quintic_ease_in,
    quintic_ease_out,
    quintic_ease_in_out,
    sine_ease_in,
    sine_ease_out,
    sine_ease_in_out,
    circular_ease_in,
    circular_ease_out,
    circular_ease_in_out,
    exponential_ease_in,
    exponential_ease_out,
    exponential_ease_in_out,
    elastic_ease_in,
    elastic_ease_out,
    elastic_ease_in_out,
    back_ease_in,
    back_ease_out,
    back_ease_in_out,
    bounce_ease_in,
    bounce_ease_out,
    bounce_ease_in_out,
];

/// Symbolic easing names, same order as [`EASING_FUNCTIONS`].
pub static EASING_NAMES: [&str; EASING_COUNT] = [
    "Constant",
    "Linear",
    "QuadraticEaseIn",
    "QuadraticEaseOut",
    "QuadraticEaseInOut",
    "CubicEaseIn",
    "CubicEaseOut",
    "CubicEaseInOut",
    "QuarticEaseIn",
    "QuarticEaseOut",
    "QuarticEaseInOut",
    "QuinticEaseIn",
    "QuinticEaseOut",
    "QuinticEaseInOut",
    "SineEaseIn",
    "SineEaseOut",
    "SineEaseInOut",
    "CircularEaseIn",
    "CircularEaseOut",
    "CircularEaseInOut",
    "ExponentialEaseIn",
    "ExponentialEaseOut",
    "ExponentialEaseInOut",
    "ElasticEaseIn",
    "ElasticEaseOut",
    "ElasticEaseInOut",
    "BackEaseIn",
    "BackEaseOut",
    "BackEaseInOut",
    "BounceEaseIn",
    "BounceEaseOut",
    "BounceEaseInOut",
];

/// Look up an easing curve by tag.
pub fn easing_fn(tag: i64) -> Result<EasingFn, KeyframeError> {
    EasingMode::from_tag(tag).map(EasingMode::function)
}

/// Look up an easing curve by its symbolic name (e.g. `"BackEaseOut"`).
pub fn easing_by_name(name: &str) -> Result<EasingFn, KeyframeError> {
    EasingMode::from_name(name).map(EasingMode::function)
}

/// Linearly interpolate `a -> b` (unclamped) by `mode` applied to `progress`.
pub fn ease_lerp<T: Lerp>(mode: EasingMode, a: &T, b: &T, progress: f32) -> T {
    a.lerp_unclamped(b, mode.apply(progress))
}

/// Easing selector stored on each keyframe.
///
/// The discriminant is the tag persisted in the `mode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
#[repr(u8)]
pub enum EasingMode {
    Constant = 0,
    #[default]
    Linear = 1,
    QuadraticEaseIn = 2,
    QuadraticEaseOut = 3,
    QuadraticEaseInOut = 4,
    CubicEaseIn = 5,
    CubicEaseOut = 6,
    CubicEaseInOut = 7,
    QuarticEaseIn = 8,
    QuarticEaseOut = 9,
    QuarticEaseInOut = 10,
    QuinticEaseIn = 11,
    QuinticEaseOut = 12,
    QuinticEaseInOut = 13,
    SineEaseIn = 14,
    SineEaseOut = 15,
    SineEaseInOut = 16,
    CircularEaseIn = 17,
    CircularEaseOut = 18,
    CircularEaseInOut = 19,
    ExponentialEaseIn = 20,
    ExponentialEaseOut = 21,
    ExponentialEaseInOut = 22,
    ElasticEaseIn = 23,
    ElasticEaseOut = 24,
    ElasticEaseInOut = 25,
    BackEaseIn = 26,
    BackEaseOut = 27,
    BackEaseInOut = 28,
    BounceEaseIn = 29,
    BounceEaseOut = 30,
    BounceEaseInOut = 31,
}

impl EasingMode {
    /// Every mode, in tag order.
    pub const ALL: [EasingMode; EASING_COUNT] = [
        Self::Constant,
        Self::Linear,
        Self::QuadraticEaseIn,
        Self::QuadraticEaseOut,
        Self::QuadraticEaseInOut,
        Self::CubicEaseIn,
        Self::CubicEaseOut,
        Self::CubicEaseInOut,
        Self::QuarticEaseIn,
        Self::QuarticEaseOut,
        Self::QuarticEaseInOut,
        Self::QuinticEaseIn,
        Self::QuinticEaseOut,
        Self::QuinticEaseInOut,
        Self::SineEaseIn,
        Self::SineEaseOut,
        Self::SineEaseInOut,
        Self::CircularEaseIn,
        Self::CircularEaseOut,
        Self::CircularEaseInOut,
        Self::ExponentialEaseIn,
        Self::ExponentialEaseOut,
        Self::ExponentialEaseInOut,
        Self::ElasticEaseIn,
        Self::ElasticEaseOut,
        Self::ElasticEaseInOut,
        Self::BackEaseIn,
        Self::BackEaseOut,
        Self::BackEaseInOut,
        Self::BounceEaseIn,
        Self::BounceEaseOut,
        Self::BounceEaseInOut,
    ];

    /// Resolve a persisted tag. Out-of-range tags are rejected, never clamped.
    pub fn from_tag(tag: i64) -> Result<Self, KeyframeError> {
        usize::try_from(tag)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(KeyframeError::InvalidEasingTag { tag })
    }

    /// Resolve a symbolic name such as `"QuadraticEaseIn"`.
    pub fn from_name(name: &str) -> Result<Self, KeyframeError> {
        EASING_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| KeyframeError::UnknownEasingName {
                name: name.to_string(),
            })
    }

    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn name(self) -> &'static str {
        EASING_NAMES[self as usize]
    }

    #[inline]
    pub fn function(self) -> EasingFn {
        EASING_FUNCTIONS[self as usize]
    }

    /// Remap `progress` through this curve.
    #[inline]
    pub fn apply(self, progress: f32) -> f32 {
        (self.function())(progress)
    }

    /// Whether the curve may leave `[0, 1]` for inputs inside `[0, 1]`.
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Self::ElasticEaseIn
                | Self::ElasticEaseOut
                | Self::ElasticEaseInOut
                | Self::BackEaseIn
                | Self::BackEaseOut
                | Self::BackEaseInOut
        )
    }
}

impl TryFrom<i64> for EasingMode {
    type Error = KeyframeError;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

impl From<EasingMode> for u8 {
    fn from(mode: EasingMode) -> Self {
        mode.tag()
    }
}

impl FromStr for EasingMode {
    type Err = KeyframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for EasingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
