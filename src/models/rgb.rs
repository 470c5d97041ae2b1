//! Model a color in one of the RGB color spaces.

use crate::color::Component;
use crate::math::{transform, transform_3x3, Transform};
use crate::models::xyz::{ToXyz, Xyz, D50, D65};

/// Tags marking whether components are gamma encoded.
pub mod encoding {
    use crate::color::Components;

    /// This trait is used to identity tags that specify gamma encoding.
    pub trait Encoding {}

    /// Components with the transfer function of the space applied.
    #[derive(Clone, Debug)]
    pub struct GammaEncoded;
    impl Encoding for GammaEncoded {}

    /// Components proportional to light intensity.
    #[derive(Clone, Debug)]
    pub struct LinearLight;
    impl Encoding for LinearLight {}

    /// The transfer function of an RGB space.
    pub trait GammaConversion {
        /// Apply the transfer function.
        fn to_gamma_encoded(from: &Components) -> Components;
        /// Remove the transfer function.
        fn to_linear_light(from: &Components) -> Components;
    }
}

/// Tags for the RGB color spaces.
pub mod space {
    use crate::color::{Component, Components};

    use super::encoding::GammaConversion;

    /// This trait is used to identify tags that specify an RGB color space.
    pub trait Space {}

    /// Tag for the sRGB color space.
    #[derive(Clone, Debug)]
    pub struct Srgb;

    impl Space for Srgb {}

    impl GammaConversion for Srgb {
        fn to_gamma_encoded(from: &Components) -> Components {
            from.map(|value| {
                let abs = value.abs();

                if abs > 0.0031308 {
                    value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
                } else {
                    12.92 * value
                }
            })
        }

        fn to_linear_light(from: &Components) -> Components {
            from.map(|value| {
                let abs = value.abs();

                if abs <= 0.04045 {
                    value / 12.92
                } else {
                    value.signum() * ((abs + 0.055) / 1.055).powf(2.4)
                }
            })
        }
    }

    /// Tag for the Display P3 color space. Shares the sRGB transfer function.
    #[derive(Clone, Debug)]
    pub struct DisplayP3;

    impl Space for DisplayP3 {}

    impl GammaConversion for DisplayP3 {
        fn to_gamma_encoded(from: &Components) -> Components {
            Srgb::to_gamma_encoded(from)
        }

        fn to_linear_light(from: &Components) -> Components {
            Srgb::to_linear_light(from)
        }
    }

    /// Tag for the a98-rgb color space.
    #[derive(Clone, Debug)]
    pub struct A98Rgb;

    impl Space for A98Rgb {}

    impl GammaConversion for A98Rgb {
        fn to_gamma_encoded(from: &Components) -> Components {
            from.map(|v| v.signum() * v.abs().powf(256.0 / 563.0))
        }

        fn to_linear_light(from: &Components) -> Components {
            from.map(|v| v.signum() * v.abs().powf(563.0 / 256.0))
        }
    }

    /// Tag for the ProPhoto RGB color space.
    #[derive(Clone, Debug)]
    pub struct ProPhotoRgb;

    impl Space for ProPhotoRgb {}

    impl GammaConversion for ProPhotoRgb {
        fn to_gamma_encoded(from: &Components) -> Components {
            const E: Component = 1.0 / 512.0;

            from.map(|v| {
                let abs = v.abs();

                if abs >= E {
                    v.signum() * abs.powf(1.0 / 1.8)
                } else {
                    16.0 * v
                }
            })
        }

        fn to_linear_light(from: &Components) -> Components {
            const E: Component = 16.0 / 512.0;

            from.map(|v| {
                let abs = v.abs();

                if abs <= E {
                    v / 16.0
                } else {
                    v.signum() * abs.powf(1.8)
                }
            })
        }
    }

    /// Tag for the Rec2020 color space.
    #[derive(Clone, Debug)]
    pub struct Rec2020;

    impl Rec2020 {
        #[allow(clippy::excessive_precision)]
        const ALPHA: Component = 1.09929682680944;
        #[allow(clippy::excessive_precision)]
        const BETA: Component = 0.018053968510807;
    }

    impl Space for Rec2020 {}

    impl GammaConversion for Rec2020 {
        fn to_gamma_encoded(from: &Components) -> Components {
            from.map(|v| {
                let abs = v.abs();

                if abs > Self::BETA {
                    v.signum() * (Self::ALPHA * abs.powf(0.45) - (Self::ALPHA - 1.0))
                } else {
                    4.5 * v
                }
            })
        }

        fn to_linear_light(from: &Components) -> Components {
            from.map(|v| {
                let abs = v.abs();

                if abs < Self::BETA * 4.5 {
                    v / 4.5
                } else {
                    v.signum() * ((abs + Self::ALPHA - 1.0) / Self::ALPHA).powf(1.0 / 0.45)
                }
            })
        }
    }
}

colorway_macros::gen_model! {
    /// A color specified in one of the RGB color spaces.
    pub struct Rgb<S: space::Space, E: encoding::Encoding> {
        /// The red component of the color.
        pub red: Component,
        /// The green component of the color.
        pub green: Component,
        /// The blue component of the color.
        pub blue: Component,
    }
}

impl<S: space::Space + encoding::GammaConversion> Rgb<S, encoding::GammaEncoded> {
    /// Convert this model from gamma encoded to linear light.
    pub fn to_linear_light(&self) -> Rgb<S, encoding::LinearLight> {
        S::to_linear_light(&self.to_components()).into()
    }
}

impl<S: space::Space + encoding::GammaConversion> Rgb<S, encoding::LinearLight> {
    /// Convert this model from linear light to gamma encoded.
    pub fn to_gamma_encoded(&self) -> Rgb<S, encoding::GammaEncoded> {
        S::to_gamma_encoded(&self.to_components()).into()
    }
}

/// Implement the linear light <-> XYZ edges of an RGB space from its
/// row-major matrices.
macro_rules! linear_to_xyz {
    ($space:ty, $white:ty, $to_xyz:expr, $from_xyz:expr) => {
        impl ToXyz<$white> for Rgb<$space, encoding::LinearLight> {
            fn to_xyz(&self) -> Xyz<$white> {
                #[allow(clippy::excessive_precision)]
                const TO_XYZ: Transform = $to_xyz;
                transform(&TO_XYZ, self.to_components()).into()
            }
        }

        impl From<Xyz<$white>> for Rgb<$space, encoding::LinearLight> {
            fn from(value: Xyz<$white>) -> Self {
                #[allow(clippy::excessive_precision)]
                const FROM_XYZ: Transform = $from_xyz;
                transform(&FROM_XYZ, value.to_components()).into()
            }
        }
    };
}

/// Model for a color in the sRGB color space with gamma encoding.
pub type Srgb = Rgb<space::Srgb, encoding::GammaEncoded>;

/// Model for a color in the sRGB color space with no gamma encoding.
pub type SrgbLinear = Rgb<space::Srgb, encoding::LinearLight>;

#[rustfmt::skip]
linear_to_xyz!(space::Srgb, D65,
    transform_3x3(
        0.41239079926595934, 0.357584339383878,   0.1804807884018343,
        0.21263900587151027, 0.715168678767756,   0.07219231536073371,
        0.01933081871559182, 0.11919477979462598, 0.9505321522496607,
    ),
    transform_3x3(
         3.2409699419045226,  -1.537383177570094,   -0.4986107602930034,
        -0.9692436362808796,   1.8759675015077202,   0.04155505740717559,
         0.05563007969699366, -0.20397695888897652,  1.0569715142428786,
    )
);

/// Model for a color in the Display P3 color space with gamma encoding.
pub type DisplayP3 = Rgb<space::DisplayP3, encoding::GammaEncoded>;

/// Model for a color in the Display P3 color space without gamma encoding.
pub type DisplayP3Linear = Rgb<space::DisplayP3, encoding::LinearLight>;

#[rustfmt::skip]
linear_to_xyz!(space::DisplayP3, D65,
    transform_3x3(
        0.4865709486482162, 0.26566769316909306, 0.1982172852343625,
        0.2289745640697488, 0.6917385218365064,  0.079286914093745,
        0.0,                0.04511338185890264, 1.043944368900976,
    ),
    transform_3x3(
         2.493496911941425,   -0.9313836179191239,  -0.40271078445071684,
        -0.8294889695615747,   1.7626640603183463,   0.023624685841943577,
         0.03584583024378447, -0.07617238926804182,  0.9568845240076872,
    )
);

/// Model for a color in the a98 RGB color space with gamma encoding.
pub type A98Rgb = Rgb<space::A98Rgb, encoding::GammaEncoded>;

/// Model for a color in the a98 RGB color space without gamma encoding.
pub type A98RgbLinear = Rgb<space::A98Rgb, encoding::LinearLight>;

#[rustfmt::skip]
linear_to_xyz!(space::A98Rgb, D65,
    transform_3x3(
        0.5766690429101305,  0.1855582379065463,  0.1882286462349947,
        0.29734497525053605, 0.6273635662554661,  0.0752914584939978,
        0.02703136138641234, 0.07068885253582723, 0.9913375368376388,
    ),
    transform_3x3(
         2.0415879038107465,   -0.5650069742788596,  -0.34473135077832956,
        -0.9692436362808795,    1.8759675015077202,   0.04155505740717557,
         0.013444280632031142, -0.11836239223101838,  1.0151749943912054,
    )
);

/// Model for a color in the ProPhoto RGB color space with gamma encoding.
pub type ProPhotoRgb = Rgb<space::ProPhotoRgb, encoding::GammaEncoded>;

/// Model for a color in the ProPhoto RGB color space without gamma encoding.
pub type ProPhotoRgbLinear = Rgb<space::ProPhotoRgb, encoding::LinearLight>;

#[rustfmt::skip]
linear_to_xyz!(space::ProPhotoRgb, D50,
    transform_3x3(
        0.7977666449006423, 0.13518129153597377, 0.0313477341283922,
        0.2880748288194013, 0.711835234241873,   0.00008993693872564,
        0.0,                0.0,                 0.8251046025104602,
    ),
    transform_3x3(
         1.3457868816471583, -0.25557208737979464, -0.05110186497554526,
        -0.5446307051249019,  1.5082477428451468,   0.02052744743642139,
         0.0,                 0.0,                  1.2119675456389452,
    )
);

/// Model for a color in the Rec2020 color space with gamma encoding.
pub type Rec2020 = Rgb<space::Rec2020, encoding::GammaEncoded>;

/// Model for a color in the Rec2020 color space without gamma encoding.
pub type Rec2020Linear = Rgb<space::Rec2020, encoding::LinearLight>;

#[rustfmt::skip]
linear_to_xyz!(space::Rec2020, D65,
    transform_3x3(
        0.6369580483012914, 0.14461690358620832,  0.1688809751641721,
        0.2627002120112671, 0.6779980715188708,   0.05930171646986196,
        0.0,                0.028072693049087428, 1.060985057710791,
    ),
    transform_3x3(
         1.716651187971268,  -0.355670783776392,  -0.253366281373660,
        -0.666684351832489,   1.616481236634939,   0.0157685458139111,
         0.017639857445311,  -0.042770613257809,   0.942103121235474,
    )
);
