//! Model a color with the HSL notation in the sRGB color space.
//!
//! Saturation and lightness are percentages in `[0, 100]`.

use crate::color::{Component, Components};
use crate::math::{almost_zero, normalize_hue};
use crate::models::rgb::Srgb;

const EPSILON: Component = 1.0e-6;

colorway_macros::gen_model! {
    /// A color specified with the HSL notation in the sRGB color space.
    pub struct Hsl {
        /// The hue component of the color.
        pub hue: Component,
        /// The saturation component of the color.
        pub saturation: Component,
        /// The lightness component of the color.
        pub lightness: Component,
    }
}

/// Calculate the hue from RGB components and return it along with the min
/// and max RGB values. The hue is NaN for achromatic colors.
pub(crate) fn rgb_to_hue_with_min_max(from: &Components) -> (Component, Component, Component) {
    if from.any_nan() {
        return (Component::NAN, Component::NAN, Component::NAN);
    }

    let Components(red, green, blue) = *from;

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);

    let delta = max - min;

    let hue = if delta != 0.0 {
        60.0 * if max == red {
            (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
        } else if max == green {
            (blue - red) / delta + 2.0
        } else {
            (red - green) / delta + 4.0
        }
    } else {
        Component::NAN
    };

    (hue, min, max)
}

/// Convert from RGB notation to HSL notation.
/// <https://drafts.csswg.org/css-color-4/#rgb-to-hsl>
pub(crate) fn rgb_to_hsl(from: &Components) -> Components {
    let (mut hue, min, max) = rgb_to_hue_with_min_max(from);

    let lightness = (min + max) / 2.0;
    let delta = max - min;

    let mut saturation = if almost_zero(delta, EPSILON)
        || almost_zero(lightness, EPSILON)
        || almost_zero(1.0 - lightness, EPSILON)
    {
        0.0
    } else {
        (max - lightness) / lightness.min(1.0 - lightness)
    };

    // Out of gamut colors can end up with a negative saturation.
    if saturation < 0.0 {
        hue += 180.0;
        saturation = -saturation;
    }

    if from.any_nan() {
        saturation = Component::NAN;
    }

    Components(normalize_hue(hue), saturation * 100.0, lightness * 100.0)
}

/// Convert from HSL notation to RGB notation.
/// <https://drafts.csswg.org/css-color-4/#hsl-to-rgb>
pub(crate) fn hsl_to_rgb(from: &Components) -> Components {
    let Components(mut hue, saturation, lightness) = *from;
    let mut saturation = saturation / 100.0;
    let lightness = lightness / 100.0;

    if saturation < 0.0 {
        hue += 180.0;
        saturation = -saturation;
    }

    if almost_zero(saturation, EPSILON) {
        return Components(lightness, lightness, lightness);
    }

    let hue = normalize_hue(hue);

    let f = |n: Component| {
        let k = (n + hue / 30.0) % 12.0;
        let a = saturation * lightness.min(1.0 - lightness);
        lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };

    Components(f(0.0), f(8.0), f(4.0))
}

impl Srgb {
    /// Convert a color specified in the sRGB color space to the HSL notation.
    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(&self.to_components()).into()
    }
}

impl Hsl {
    /// Convert this color from the HSL notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        hsl_to_rgb(&self.to_components()).into()
    }
}
