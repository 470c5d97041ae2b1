//! The RGB spaces and the sRGB based notations (HSL, HWB).

use crate::color::Components;
use crate::format::{CoordType, Format};
use crate::gamut::GamutMethod;
use crate::models::{
    A98Rgb, A98RgbLinear, DisplayP3, DisplayP3Linear, Hsl, Hwb, ProPhotoRgb, ProPhotoRgbLinear,
    Rec2020, Rec2020Linear, Srgb, SrgbLinear, ToXyz, XyzD50, XyzD65,
};
use crate::space::{CoordMeta, Edge, SpaceDescriptor};

use super::{cylindrical_grammar, hex, keywords};

const RGB_COORDS: [CoordMeta; 3] = [
    CoordMeta::ranged("r", "Red", 0.0, 1.0),
    CoordMeta::ranged("g", "Green", 0.0, 1.0),
    CoordMeta::ranged("b", "Blue", 0.0, 1.0),
];

fn srgb_to_linear(c: &Components) -> Components {
    Srgb::from(*c).to_linear_light().to_components()
}

fn linear_to_srgb(c: &Components) -> Components {
    SrgbLinear::from(*c).to_gamma_encoded().to_components()
}

fn srgb_linear_to_xyz(c: &Components) -> Components {
    SrgbLinear::from(*c).to_xyz().to_components()
}

fn xyz_to_srgb_linear(c: &Components) -> Components {
    SrgbLinear::from(XyzD65::from(*c)).to_components()
}

fn hsl_to_srgb(c: &Components) -> Components {
    Hsl::from(*c).to_srgb().to_components()
}

fn srgb_to_hsl(c: &Components) -> Components {
    Srgb::from(*c).to_hsl().to_components()
}

fn hwb_to_srgb(c: &Components) -> Components {
    Hwb::from(*c).to_srgb().to_components()
}

fn srgb_to_hwb(c: &Components) -> Components {
    Srgb::from(*c).to_hwb().to_components()
}

fn hwb_to_hsl(c: &Components) -> Components {
    Hwb::from(*c).to_srgb().to_hsl().to_components()
}

fn hsl_to_hwb(c: &Components) -> Components {
    Hsl::from(*c).to_srgb().to_hwb().to_components()
}

fn display_p3_to_xyz(c: &Components) -> Components {
    DisplayP3::from(*c).to_linear_light().to_xyz().to_components()
}

fn xyz_to_display_p3(c: &Components) -> Components {
    DisplayP3Linear::from(XyzD65::from(*c))
        .to_gamma_encoded()
        .to_components()
}

fn a98_rgb_to_xyz(c: &Components) -> Components {
    A98Rgb::from(*c).to_linear_light().to_xyz().to_components()
}

fn xyz_to_a98_rgb(c: &Components) -> Components {
    A98RgbLinear::from(XyzD65::from(*c))
        .to_gamma_encoded()
        .to_components()
}

fn prophoto_rgb_to_xyz(c: &Components) -> Components {
    ProPhotoRgb::from(*c).to_linear_light().to_xyz().to_components()
}

fn xyz_to_prophoto_rgb(c: &Components) -> Components {
    ProPhotoRgbLinear::from(XyzD50::from(*c))
        .to_gamma_encoded()
        .to_components()
}

fn rec2020_to_xyz(c: &Components) -> Components {
    Rec2020::from(*c).to_linear_light().to_xyz().to_components()
}

fn xyz_to_rec2020(c: &Components) -> Components {
    Rec2020Linear::from(XyzD65::from(*c))
        .to_gamma_encoded()
        .to_components()
}

/// `rgb()` accepts percentages or numbers in `[0, 255]`.
fn rgb_grammar(first: CoordType, second: CoordType) -> [Vec<CoordType>; 3] {
    [
        vec![first, second],
        vec![first, second],
        vec![first, second],
    ]
}

/// A space with the RGB coordinates, a base edge to `xyz-d65` (or
/// `xyz-d50`) and the generic `color()` format.
fn rgb_space(
    id: &'static str,
    name: &'static str,
    base: &'static str,
    to_xyz: fn(&Components) -> Components,
    from_xyz: fn(&Components) -> Components,
) -> SpaceDescriptor {
    SpaceDescriptor::new(id, name, RGB_COORDS)
        .base(Edge::new(base, to_xyz, from_xyz))
        .format(Format::color())
        .gamut_mapping(GamutMethod::Css)
}

pub(super) fn srgb() -> SpaceDescriptor {
    let number = CoordType::number_in(0.0, 255.0);

    rgb_space("srgb", "sRGB", "srgb-linear", srgb_to_linear, linear_to_srgb)
        .format(Format::functional(
            "rgb",
            "rgb",
            rgb_grammar(CoordType::Percentage, number),
        ))
        .format(
            Format::functional("rgb_number", "rgb", rgb_grammar(number, number))
                .with_commas()
                .with_alpha(false),
        )
        .format(
            Format::functional("rgba", "rgba", rgb_grammar(number, CoordType::Percentage))
                .with_commas()
                .with_alpha(true),
        )
        .format(hex::format())
        .format(keywords::format())
        .default_format("color")
}

pub(super) fn srgb_linear() -> SpaceDescriptor {
    rgb_space(
        "srgb-linear",
        "Linear sRGB",
        "xyz-d65",
        srgb_linear_to_xyz,
        xyz_to_srgb_linear,
    )
}

pub(super) fn hsl() -> SpaceDescriptor {
    SpaceDescriptor::new(
        "hsl",
        "HSL",
        [
            CoordMeta::angle("h", "Hue"),
            CoordMeta::ranged("s", "Saturation", 0.0, 100.0),
            CoordMeta::ranged("l", "Lightness", 0.0, 100.0),
        ],
    )
    .base(Edge::new("srgb", hsl_to_srgb, srgb_to_hsl))
    .format(Format::functional("hsl", "hsl", cylindrical_grammar()))
    .format(
        Format::functional("hsla", "hsla", cylindrical_grammar())
            .with_commas()
            .with_alpha(true),
    )
    .gamut_mapping(GamutMethod::Css)
}

pub(super) fn hwb() -> SpaceDescriptor {
    SpaceDescriptor::new(
        "hwb",
        "HWB",
        [
            CoordMeta::angle("h", "Hue"),
            CoordMeta::ranged("w", "Whiteness", 0.0, 100.0),
            CoordMeta::ranged("b", "Blackness", 0.0, 100.0),
        ],
    )
    .base(Edge::new("srgb", hwb_to_srgb, srgb_to_hwb))
    .edge(Edge::new("hsl", hwb_to_hsl, hsl_to_hwb))
    .format(Format::functional("hwb", "hwb", cylindrical_grammar()))
    .gamut_mapping(GamutMethod::Css)
}

pub(super) fn display_p3() -> SpaceDescriptor {
    rgb_space(
        "display-p3",
        "Display P3",
        "xyz-d65",
        display_p3_to_xyz,
        xyz_to_display_p3,
    )
}

pub(super) fn a98_rgb() -> SpaceDescriptor {
    rgb_space(
        "a98-rgb",
        "Adobe 98 RGB compatible",
        "xyz-d65",
        a98_rgb_to_xyz,
        xyz_to_a98_rgb,
    )
}

pub(super) fn prophoto_rgb() -> SpaceDescriptor {
    rgb_space(
        "prophoto-rgb",
        "ProPhoto",
        "xyz-d50",
        prophoto_rgb_to_xyz,
        xyz_to_prophoto_rgb,
    )
}

pub(super) fn rec2020() -> SpaceDescriptor {
    rgb_space(
        "rec2020",
        "REC.2020",
        "xyz-d65",
        rec2020_to_xyz,
        xyz_to_rec2020,
    )
}
