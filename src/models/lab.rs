//! Models for rectangular and polar coordinate systems used to model CIE-Lab,
//! CIE-LCh, Oklab and OkLCh.

use crate::color::{Component, Components};
use crate::math::{normalize_hue, transform, transform_3x3, Transform};
use crate::models::xyz::{ToXyz, WhitePoint, Xyz, XyzD50, XyzD65, D50, D65};

/// Tags for the Lab-like color spaces.
pub mod space {
    use crate::color::Component;

    /// A Lab-like color space.
    pub trait Space {
        /// Chroma at or below which the hue of the polar form is powerless.
        const POWERLESS_CHROMA: Component;
    }

    /// Tag for CIE-Lab.
    #[derive(Clone, Debug)]
    pub struct Lab;

    impl Space for Lab {
        const POWERLESS_CHROMA: Component = 0.0015;
    }

    /// Tag for Oklab.
    #[derive(Clone, Debug)]
    pub struct Oklab;

    impl Space for Oklab {
        const POWERLESS_CHROMA: Component = 0.000004;
    }
}

colorway_macros::gen_model! {
    /// The model for a color specified in the rectangular orthogonal form.
    pub struct Rectangular<S: space::Space> {
        /// The lightness component.
        pub lightness: Component,
        /// The a component.
        pub a: Component,
        /// The b component.
        pub b: Component,
    }
}

impl<S: space::Space> Rectangular<S> {
    /// Convert this orthogonal rectangular model into its cylindrical polar
    /// form. The hue is NaN when the chroma is too small for it to matter.
    pub fn to_polar(&self) -> Polar<S> {
        let chroma = (self.a * self.a + self.b * self.b).sqrt();
        let hue = if chroma <= S::POWERLESS_CHROMA {
            Component::NAN
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };

        Polar::new(self.lightness, chroma, hue)
    }
}

colorway_macros::gen_model! {
    /// The model for a color specified in the cylindrical polar form.
    pub struct Polar<S: space::Space> {
        /// The lightness component.
        pub lightness: Component,
        /// The chroma component.
        pub chroma: Component,
        /// The hue component.
        pub hue: Component,
    }
}

impl<S: space::Space> Polar<S> {
    /// Convert this cylindrical polar model into its orthogonal rectangular
    /// form. A missing hue is ignored when the chroma makes it powerless.
    pub fn to_rectangular(&self) -> Rectangular<S> {
        // `max` would swallow a NaN chroma.
        let chroma = if self.chroma < 0.0 { 0.0 } else { self.chroma };

        if self.hue.is_nan() && chroma <= S::POWERLESS_CHROMA {
            return Rectangular::new(self.lightness, 0.0, 0.0);
        }

        let hue = self.hue.to_radians();
        Rectangular::new(self.lightness, chroma * hue.cos(), chroma * hue.sin())
    }
}

/// The model for a color specified in the CIE-Lab color space with the rectangular orthogonal form.
pub type Lab = Rectangular<space::Lab>;

/// The model for a color specified in the CIE-Lab color space with the cylindrical polar form.
pub type Lch = Polar<space::Lab>;

const KAPPA: Component = 24389.0 / 27.0;
const EPSILON: Component = 216.0 / 24389.0;

impl ToXyz<D50> for Lab {
    fn to_xyz(&self) -> Xyz<D50> {
        let (lightness, a, b) = (self.lightness, self.a, self.b);

        let f1 = (lightness + 16.0) / 116.0;
        let f0 = f1 + a / 500.0;
        let f2 = f1 - b / 200.0;

        let f0_cubed = f0 * f0 * f0;
        let x = if f0_cubed > EPSILON {
            f0_cubed
        } else {
            (116.0 * f0 - 16.0) / KAPPA
        };

        let y = if lightness > KAPPA * EPSILON {
            f1 * f1 * f1
        } else {
            lightness / KAPPA
        };

        let f2_cubed = f2 * f2 * f2;
        let z = if f2_cubed > EPSILON {
            f2_cubed
        } else {
            (116.0 * f2 - 16.0) / KAPPA
        };

        Xyz::new(
            x * D50::WHITE_POINT.0,
            y * D50::WHITE_POINT.1,
            z * D50::WHITE_POINT.2,
        )
    }
}

impl From<XyzD50> for Lab {
    fn from(value: XyzD50) -> Self {
        let adapted = Components(
            value.x / D50::WHITE_POINT.0,
            value.y / D50::WHITE_POINT.1,
            value.z / D50::WHITE_POINT.2,
        );

        let Components(f0, f1, f2) = adapted.map(|v| {
            if v > EPSILON {
                v.cbrt()
            } else {
                (KAPPA * v + 16.0) / 116.0
            }
        });

        Lab::new(116.0 * f1 - 16.0, 500.0 * (f0 - f1), 200.0 * (f1 - f2))
    }
}

/// The model for a color specified in the oklab color space with the rectangular orthogonal form.
pub type Oklab = Rectangular<space::Oklab>;

/// The model for a color specified in the oklab color space with the cylindrical polar form.
pub type Oklch = Polar<space::Oklab>;

impl From<XyzD65> for Oklab {
    fn from(value: XyzD65) -> Self {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const XYZ_TO_LMS: Transform = transform_3x3(
            0.8190224379967030, 0.3619062600528904, -0.1288737815209879,
            0.0329836539323885, 0.9292868615863434,  0.0361446663506424,
            0.0481771893596242, 0.2642395317527308,  0.6335478284694309,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_OKLAB: Transform = transform_3x3(
            0.2104542683093140,  0.7936177747023054, -0.0040720430116193,
            1.9779985324311684, -2.4285922420485799,  0.4505937096174110,
            0.0259040424655478,  0.7827717124575296, -0.8086757549230774,
        );

        let lms = transform(&XYZ_TO_LMS, value.to_components()).map(|v| v.cbrt());
        transform(&LMS_TO_OKLAB, lms).into()
    }
}

impl ToXyz<D65> for Oklab {
    fn to_xyz(&self) -> Xyz<D65> {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const OKLAB_TO_LMS: Transform = transform_3x3(
            1.0,  0.3963377773761749,  0.2158037573099136,
            1.0, -0.1055613458156586, -0.0638541728258133,
            1.0, -0.0894841775298119, -1.2914855480194092,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_XYZ: Transform = transform_3x3(
             1.2268798758459243, -0.5578149944602171,  0.2813910456659647,
            -0.0405757452148008,  1.1122868032803170, -0.0717110580655164,
            -0.0763729366746601, -0.4214933324022432,  1.5869240198367816,
        );

        let lms = transform(&OKLAB_TO_LMS, self.to_components()).map(|v| v * v * v);
        transform(&LMS_TO_XYZ, lms).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn converting_to_polar_should_set_hue_to_missing_for_small_a_b_values() {
        let polar = Lab::new(50.0, 0.0, 0.0).to_polar();
        assert!(polar.hue.is_nan());

        let polar = Oklab::new(0.5, 0.000001, 0.000001).to_polar();
        assert!(polar.hue.is_nan());

        let polar = Oklab::new(0.5, 0.1, 0.0).to_polar();
        assert_component_eq!(polar.hue, 0.0);
    }

    #[test]
    fn powerless_hue_is_ignored_when_converting_back() {
        let lab = Lch::new(50.0, 0.0, Component::NAN).to_rectangular();
        assert_component_eq!(lab.lightness, 50.0);
        assert_component_eq!(lab.a, 0.0);
        assert_component_eq!(lab.b, 0.0);
    }

    #[test]
    fn missing_hue_with_chroma_poisons_a_and_b() {
        let lab = Lch::new(50.0, 30.0, Component::NAN).to_rectangular();
        assert_component_eq!(lab.lightness, 50.0);
        assert!(lab.a.is_nan());
        assert!(lab.b.is_nan());

        let lab = Lch::new(50.0, Component::NAN, 120.0).to_rectangular();
        assert!(lab.a.is_nan());
    }

    #[test]
    fn lab_round_trips_through_xyz() {
        let lab = Lab::new(56.6293, 39.23708, 57.553769);
        let xyz = lab.to_xyz();
        assert_component_eq!(xyz.x, 0.337301);
        assert_component_eq!(xyz.y, 0.245449);
        assert_component_eq!(xyz.z, 0.031959);

        let back = Lab::from(xyz);
        assert!((back.lightness - lab.lightness).abs() < 0.001);
        assert!((back.a - lab.a).abs() < 0.001);
        assert!((back.b - lab.b).abs() < 0.001);
    }

    #[test]
    fn oklab_white_is_one() {
        let Components(x, y, z) = D65::WHITE_POINT;
        let white = Oklab::from(XyzD65::new(x, y, z));
        assert_component_eq!(white.lightness, 1.0);
        assert_component_eq!(white.a, 0.0);
        assert_component_eq!(white.b, 0.0);
    }
}
