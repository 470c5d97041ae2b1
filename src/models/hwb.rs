//! Model a color with the HWB notation in the sRGB color space.

use crate::color::{Component, Components};
use crate::models::hsl::{hsl_to_rgb, rgb_to_hue_with_min_max};
use crate::models::rgb::Srgb;

colorway_macros::gen_model! {
    /// A color specified with the HWB notation in the sRGB color space.
    /// Whiteness and blackness are percentages in `[0, 100]`.
    pub struct Hwb {
        /// The hue component of the color.
        pub hue: Component,
        /// The whiteness component of the color.
        pub whiteness: Component,
        /// The blackness component of the color.
        pub blackness: Component,
    }
}

/// Convert from RGB notation to HWB notation.
/// <https://drafts.csswg.org/css-color-4/#rgb-to-hwb>
fn rgb_to_hwb(from: &Components) -> Components {
    let (hue, min, max) = rgb_to_hue_with_min_max(from);
    Components(hue, min * 100.0, (1.0 - max) * 100.0)
}

/// Convert from HWB notation to RGB notation.
/// <https://drafts.csswg.org/css-color-4/#hwb-to-rgb>
fn hwb_to_rgb(from: &Components) -> Components {
    let hue = from.0;
    let whiteness = from.1 / 100.0;
    let blackness = from.2 / 100.0;

    if whiteness + blackness >= 1.0 {
        let gray = whiteness / (whiteness + blackness);
        return Components(gray, gray, gray);
    }

    let rgb = hsl_to_rgb(&Components(hue, 100.0, 50.0));
    rgb.map(|v| v * (1.0 - whiteness - blackness) + whiteness)
}

impl Srgb {
    /// Convert a color specified in the sRGB color space to the HWB notation.
    pub fn to_hwb(&self) -> Hwb {
        rgb_to_hwb(&self.to_components()).into()
    }
}

impl Hwb {
    /// Convert this color from the HWB notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        hwb_to_rgb(&self.to_components()).into()
    }
}
