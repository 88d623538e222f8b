//! Typed shader uniform values and their interpolation.
//!
//! [`UniformValue`] is the closed set of value kinds a shader parameter can
//! hold. [`lerp`] interpolates between two values of the same kind and
//! returns `None` when the kinds differ, so callers can skip the parameter
//! instead of failing the whole tick.

use std::fmt;

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Normalized `[0, 1]` components, the form shaders consume.
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

/// Discriminant of a [`UniformValue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Color,
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UniformKind::Float => "float",
            UniformKind::Vec2 => "vec2",
            UniformKind::Vec3 => "vec3",
            UniformKind::Vec4 => "vec4",
            UniformKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// A value that can be bound to a shader uniform and animated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Color(Color),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Color(_) => UniformKind::Color,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Interpolate towards `other`. See [`lerp`].
    pub fn lerp(&self, other: &UniformValue, t: f32) -> Option<UniformValue> {
        lerp(self, other, t)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Color> for UniformValue {
    fn from(c: Color) -> Self {
        UniformValue::Color(c)
    }
}

// `a * (1 - t) + b * t` lands exactly on `b` at t = 1, unlike `a + (b - a) * t`.
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    lerp_f32(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8
}

/// Linearly interpolate between two values of the same kind.
///
/// `t` is clamped to `[0, 1]`. Returns `None` if `a` and `b` are different
/// kinds.
pub fn lerp(a: &UniformValue, b: &UniformValue, t: f32) -> Option<UniformValue> {
    let t = t.clamp(0.0, 1.0);
    match (a, b) {
        (UniformValue::Float(a), UniformValue::Float(b)) => {
            Some(UniformValue::Float(lerp_f32(*a, *b, t)))
        }
        (UniformValue::Vec2(a), UniformValue::Vec2(b)) => {
            Some(UniformValue::Vec2(*a * (1.0 - t) + *b * t))
        }
        (UniformValue::Vec3(a), UniformValue::Vec3(b)) => {
            Some(UniformValue::Vec3(*a * (1.0 - t) + *b * t))
        }
        (UniformValue::Vec4(a), UniformValue::Vec4(b)) => {
            Some(UniformValue::Vec4(*a * (1.0 - t) + *b * t))
        }
        (UniformValue::Color(a), UniformValue::Color(b)) => Some(UniformValue::Color(Color {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        })),
        _ => None,
    }
}
