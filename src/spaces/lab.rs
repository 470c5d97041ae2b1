//! The CIE-XYZ hub spaces and the Lab-like spaces.

use crate::color::Components;
use crate::format::Format;
use crate::models::{Lab, Lch, Oklab, Oklch, ToXyz, XyzD50, XyzD65};
use crate::space::{CoordMeta, Edge, SpaceDescriptor};

use super::{lab_grammar, lch_grammar};

const XYZ_COORDS: [CoordMeta; 3] = [
    CoordMeta::unbounded("x", "X", 0.0, 1.0),
    CoordMeta::unbounded("y", "Y", 0.0, 1.0),
    CoordMeta::unbounded("z", "Z", 0.0, 1.0),
];

fn xyz_d50_to_d65(c: &Components) -> Components {
    XyzD50::from(*c).to_d65().to_components()
}

fn xyz_d65_to_d50(c: &Components) -> Components {
    XyzD65::from(*c).to_d50().to_components()
}

fn lab_to_xyz(c: &Components) -> Components {
    Lab::from(*c).to_xyz().to_components()
}

fn xyz_to_lab(c: &Components) -> Components {
    Lab::from(XyzD50::from(*c)).to_components()
}

fn lch_to_lab(c: &Components) -> Components {
    Lch::from(*c).to_rectangular().to_components()
}

fn lab_to_lch(c: &Components) -> Components {
    Lab::from(*c).to_polar().to_components()
}

fn oklab_to_xyz(c: &Components) -> Components {
    Oklab::from(*c).to_xyz().to_components()
}

fn xyz_to_oklab(c: &Components) -> Components {
    Oklab::from(XyzD65::from(*c)).to_components()
}

fn oklch_to_oklab(c: &Components) -> Components {
    Oklch::from(*c).to_rectangular().to_components()
}

fn oklab_to_oklch(c: &Components) -> Components {
    Oklab::from(*c).to_polar().to_components()
}

pub(super) fn xyz_d65() -> SpaceDescriptor {
    SpaceDescriptor::new("xyz-d65", "XYZ D65", XYZ_COORDS)
        .alias("xyz")
        .format(Format::color())
}

pub(super) fn xyz_d50() -> SpaceDescriptor {
    SpaceDescriptor::new("xyz-d50", "XYZ D50", XYZ_COORDS)
        .base(Edge::new("xyz-d65", xyz_d50_to_d65, xyz_d65_to_d50))
        .format(Format::color())
}

pub(super) fn lab() -> SpaceDescriptor {
    SpaceDescriptor::new(
        "lab",
        "Lab",
        [
            CoordMeta::unbounded("l", "Lightness", 0.0, 100.0),
            CoordMeta::unbounded("a", "A", -125.0, 125.0),
            CoordMeta::unbounded("b", "B", -125.0, 125.0),
        ],
    )
    .base(Edge::new("xyz-d50", lab_to_xyz, xyz_to_lab))
    .format(Format::functional("lab", "lab", lab_grammar()))
}

pub(super) fn lch() -> SpaceDescriptor {
    SpaceDescriptor::new(
        "lch",
        "LCH",
        [
            CoordMeta::unbounded("l", "Lightness", 0.0, 100.0),
            CoordMeta::unbounded("c", "Chroma", 0.0, 150.0),
            CoordMeta::angle("h", "Hue"),
        ],
    )
    .base(Edge::new("lab", lch_to_lab, lab_to_lch))
    .format(Format::functional("lch", "lch", lch_grammar()))
}

pub(super) fn oklab() -> SpaceDescriptor {
    SpaceDescriptor::new(
        "oklab",
        "Oklab",
        [
            CoordMeta::unbounded("l", "Lightness", 0.0, 1.0),
            CoordMeta::unbounded("a", "A", -0.4, 0.4),
            CoordMeta::unbounded("b", "B", -0.4, 0.4),
        ],
    )
    .base(Edge::new("xyz-d65", oklab_to_xyz, xyz_to_oklab))
    .format(Format::functional("oklab", "oklab", lab_grammar()))
}

pub(super) fn oklch() -> SpaceDescriptor {
    SpaceDescriptor::new(
        "oklch",
        "Oklch",
        [
            CoordMeta::unbounded("l", "Lightness", 0.0, 1.0),
            CoordMeta::unbounded("c", "Chroma", 0.0, 0.4),
            CoordMeta::angle("h", "Hue"),
        ],
    )
    .base(Edge::new("oklab", oklch_to_oklab, oklab_to_oklch))
    .format(Format::functional("oklch", "oklch", lch_grammar()))
}
