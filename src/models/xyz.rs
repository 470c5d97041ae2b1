//! Model a color in the CIE-XYZ color space.

use crate::color::{Component, Components};
use crate::math::{transform, transform_3x3, Transform};

/// A reference white used by an XYZ model.
pub trait WhitePoint {
    /// The XYZ coordinates of the reference white.
    const WHITE_POINT: Components;
}

/// CIE-XYZ color with a D50 white point reference.
#[derive(Clone, Debug)]
pub struct D50;

impl WhitePoint for D50 {
    #[allow(clippy::excessive_precision)]
    const WHITE_POINT: Components = Components(0.9642956764295677, 1.0, 0.8251046025104602);
}

/// CIE-XYZ color with a D65 white point reference.
#[derive(Clone, Debug)]
pub struct D65;

impl WhitePoint for D65 {
    #[allow(clippy::excessive_precision)]
    const WHITE_POINT: Components = Components(0.9504559270516716, 1.0, 1.0890577507598784);
}

/// Specify that a color model supports conversion to CIE-XYZ.
pub trait ToXyz<W: WhitePoint> {
    /// Convert this color to CIE-XYZ.
    fn to_xyz(&self) -> Xyz<W>;
}

colorway_macros::gen_model! {
    /// A model for a color in the CIE-XYZ color space with a specified white point reference.
    pub struct Xyz<W: WhitePoint> {
        /// The X component of the color.
        pub x: Component,
        /// The Y component of the color.
        pub y: Component,
        /// The Z component of the color.
        pub z: Component,
    }
}

/// Model for a color in the CIE-XYZ color space with a D50 white point.
pub type XyzD50 = Xyz<D50>;

/// Model for a color in the CIE-XYZ color space with a D65 white point.
pub type XyzD65 = Xyz<D65>;

// Bradford chromatic adaptation.
#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const D65_TO_D50: Transform = transform_3x3(
     1.0479297925449969,    0.022946870601609652, -0.05019226628920524,
     0.02962780877005599,   0.9904344267538799,   -0.017073799063418826,
    -0.009243040646204504,  0.015055191490298152,  0.7518742814281371,
);

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const D50_TO_D65: Transform = transform_3x3(
     0.955473421488075,    -0.02309845494876471,   0.06325924320057072,
    -0.0283697093338637,    1.0099953980813041,    0.021041441191917323,
     0.012314014864481998, -0.020507649298898964,  1.330365926242124,
);

impl XyzD65 {
    /// Adapt this color to the D50 white point.
    pub fn to_d50(&self) -> XyzD50 {
        transform(&D65_TO_D50, self.to_components()).into()
    }
}

impl XyzD50 {
    /// Adapt this color to the D65 white point.
    pub fn to_d65(&self) -> XyzD65 {
        transform(&D50_TO_D65, self.to_components()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn white_points_are_adapted() {
        let Components(x, y, z) = D65::WHITE_POINT;
        let d50 = XyzD65::new(x, y, z).to_d50();
        assert_component_eq!(d50.x, D50::WHITE_POINT.0);
        assert_component_eq!(d50.y, D50::WHITE_POINT.1);
        assert_component_eq!(d50.z, D50::WHITE_POINT.2);
    }

    #[test]
    fn adaptation_round_trips() {
        let xyz = XyzD65::new(0.318634, 0.239006, 0.041637);
        let back = xyz.to_d50().to_d65();
        assert_component_eq!(back.x, xyz.x);
        assert_component_eq!(back.y, xyz.y);
        assert_component_eq!(back.z, xyz.z);
    }

    #[test]
    fn coordinate_names_come_from_fields() {
        assert_eq!(XyzD50::COORD_NAMES, ["X", "Y", "Z"]);
    }
}
