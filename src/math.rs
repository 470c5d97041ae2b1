//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};
use num_traits::Float;

use crate::color::{Component, Components};

/// A 3x3 matrix stored in a 4x4 transform.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Create a transform from a 3x3 matrix given in row-major order, so that
/// `transform` computes `M * [x, y, z]`.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    a11: Component,
    a12: Component,
    a13: Component,
    a21: Component,
    a22: Component,
    a23: Component,
    a31: Component,
    a32: Component,
    a33: Component,
) -> Transform {
    // euclid multiplies row vectors, so the matrix is stored transposed.
    Transform::new(
        a11, a21, a31, 0.0, //
        a12, a22, a32, 0.0, //
        a13, a23, a33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Components(x, y, z) = components;
    let Vector { x, y, z, .. } = transform.transform_vector3d(Vector::new(x, y, z));
    Components(x, y, z)
}

/// Returns true if the value is within `epsilon` of zero.
pub fn almost_zero(value: Component, epsilon: Component) -> bool {
    value.abs() <= epsilon
}

/// Wrap a hue in degrees into `[0, 360)`. NaN stays NaN.
pub fn normalize_hue(hue: Component) -> Component {
    hue.rem_euclid(360.0)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// The inverse of [`lerp`]: where `value` lies between `a` and `b`.
pub fn inverse_lerp<T: Float>(a: T, b: T, value: T) -> T {
    if a == b {
        return T::zero();
    }
    (value - a) / (b - a)
}

/// Map `value` from the range `from` onto the range `to`.
pub fn map_range<T: Float>(from: [T; 2], to: [T; 2], value: T) -> T {
    lerp(to[0], to[1], inverse_lerp(from[0], from[1], value))
}

/// Most significant digits a [`Component`] can carry.
#[cfg(not(feature = "f64"))]
pub const MAX_PRECISION: u32 = 9;

/// Most significant digits a [`Component`] can carry.
#[cfg(feature = "f64")]
pub const MAX_PRECISION: u32 = 17;

/// Round `n` to `precision` significant digits, counting the digits of the
/// integer part. Numbers smaller than one keep `precision` decimals.
/// `precision` is capped at [`MAX_PRECISION`].
pub fn to_precision(n: Component, precision: u32) -> Component {
    if n == 0.0 || !n.is_finite() {
        return n;
    }

    let precision = precision.min(MAX_PRECISION);

    let integer = n.trunc();
    let digits = if integer != 0.0 && precision > 0 {
        integer.abs().log10().floor() as i32 + 1
    } else {
        0
    };

    let exponent = precision as i32 - digits;
    let rounded = if exponent >= 0 {
        let multiplier = (10.0 as Component).powi(exponent);
        (n * multiplier + 0.5).floor() / multiplier
    } else {
        let divisor = (10.0 as Component).powi(-exponent);
        (n / divisor + 0.5).floor() * divisor
    };

    // Avoid "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
