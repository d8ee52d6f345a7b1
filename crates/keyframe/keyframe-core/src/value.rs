//! Vector and transform values consumed by the sampler.
//!
//! Color is a plain 4-component vector here (RGBA order, no color space).

use nalgebra::{Vector3 as NVector3, Vector4 as NVector4};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Unclamped linear interpolation.
///
/// `t` outside `[0, 1]` extrapolates past the endpoints so that overshooting
/// easing curves stay visible.
pub trait Lerp: Sized {
    fn lerp_unclamped(&self, other: &Self, t: f32) -> Self;
}

/// Weighted form, exact at `t == 0` and `t == 1`.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl Lerp for f32 {
    #[inline]
    fn lerp_unclamped(&self, other: &Self, t: f32) -> Self {
        lerp_f32(*self, *other, t)
    }
}

/// 3D vector type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Lerp for Vector3 {
    #[inline]
    fn lerp_unclamped(&self, other: &Self, t: f32) -> Self {
        Self::new(
            lerp_f32(self.x, other.x, t),
            lerp_f32(self.y, other.y, t),
            lerp_f32(self.z, other.z, t),
        )
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<NVector3<f32>> for Vector3 {
    fn from(v: NVector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for NVector3<f32> {
    fn from(v: Vector3) -> Self {
        NVector3::new(v.x, v.y, v.z)
    }
}

/// 4D vector type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque white in RGBA order.
    pub const fn white() -> Self {
        Self::one()
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Lerp for Vector4 {
    #[inline]
    fn lerp_unclamped(&self, other: &Self, t: f32) -> Self {
        Self::new(
            lerp_f32(self.x, other.x, t),
            lerp_f32(self.y, other.y, t),
            lerp_f32(self.z, other.z, t),
            lerp_f32(self.w, other.w, t),
        )
    }
}

impl Add for Vector4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl AddAssign for Vector4 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl Sub for Vector4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<NVector4<f32>> for Vector4 {
    fn from(v: NVector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for NVector4<f32> {
    fn from(v: Vector4) -> Self {
        NVector4::new(v.x, v.y, v.z, v.w)
    }
}

/// Transform snapshot held by a keyframe.
///
/// `rotation` holds Euler angles; the convention is left to the host.
/// Missing fields deserialize to the values of [`Transform::empty`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
    pub color: Vector4,
}

impl Transform {
    pub const fn new(position: Vector3, rotation: Vector3, scale: Vector3, color: Vector4) -> Self {
        Self {
            position,
            rotation,
            scale,
            color,
        }
    }

    /// Zero position and rotation, unit scale, opaque white.
    pub const fn empty() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::one(),
            color: Vector4::white(),
        }
    }

    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            ..Self::empty()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::empty()
    }
}

impl Lerp for Transform {
    fn lerp_unclamped(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp_unclamped(&other.position, t),
            rotation: self.rotation.lerp_unclamped(&other.rotation, t),
            scale: self.scale.lerp_unclamped(&other.scale, t),
            color: self.color.lerp_unclamped(&other.color, t),
        }
    }
}
