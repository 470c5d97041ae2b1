//! colorway converts colors between the color spaces of CSS Color 4, checks
//! and maps them into gamut, and reads and writes them as text.
//!
//! Spaces, their conversion edges and their formats live in a [`Registry`].
//! The functions at the root of the crate use the process-wide registry,
//! which holds the built-in spaces unless another one was installed.
//!
//! ```rust
//! use colorway::{GamutOptions, SerializeOptions};
//!
//! let p3 = colorway::parse("color(display-p3 1 0 0)").unwrap();
//! let srgb = colorway::to(&p3, "srgb").unwrap();
//! assert!(!colorway::in_gamut(&srgb, &GamutOptions::default()).unwrap());
//!
//! let options = SerializeOptions {
//!     format: Some("hex"),
//!     ..SerializeOptions::default()
//! };
//! let hex = colorway::serialize(&srgb, &options).unwrap();
//! assert!(hex.starts_with("#ff"));
//! ```

#![deny(missing_docs)]

mod color;
mod convert;
mod error;
mod format;
mod gamut;
mod math;
pub mod models;
mod parse;
mod registry;
mod serialize;
mod space;
pub mod spaces;

#[cfg(test)]
#[macro_use]
mod test;

pub use color::{Color, ColorInput, Component, ComponentDetails, Components, Coords, Flags, SpaceId};
pub use error::{ColorError, ColorResult};
pub use format::{
    CoordGrammar, CoordType, Custom, Format, FormatKind, Functional, ParseHook, SerializeHook,
};
pub use gamut::{clip, in_gamut_of, GamutMethod, GamutOptions, GamutPolicy};
pub use registry::{
    Defaults, Registry, RegistryBuilder, DEFAULT_EPSILON, DEFAULT_HUB, DEFAULT_PRECISION,
};
pub use serialize::{AlphaFormat, AlphaKind, Precision, SerializeOptions};
pub use space::{CoordMeta, CoordTransform, Edge, SpaceDescriptor};

/// Convert a color into `space` with the process-wide registry.
pub fn to<'a>(color: impl Into<ColorInput<'a>>, space: &str) -> ColorResult<Color> {
    Registry::global().to(color, space)
}

/// Check a color against a gamut with the process-wide registry.
pub fn in_gamut<'a>(color: impl Into<ColorInput<'a>>, options: &GamutOptions) -> ColorResult<bool> {
    Registry::global().in_gamut(color, options)
}

/// Map a color into a gamut with the process-wide registry.
pub fn to_gamut<'a>(color: impl Into<ColorInput<'a>>, options: &GamutOptions) -> ColorResult<Color> {
    Registry::global().to_gamut(color, options)
}

/// Write a color as text with the process-wide registry.
pub fn serialize<'a>(
    color: impl Into<ColorInput<'a>>,
    options: &SerializeOptions,
) -> ColorResult<String> {
    Registry::global().serialize(color, options)
}

/// Read a color from text with the process-wide registry.
pub fn parse(text: &str) -> ColorResult<Color> {
    Registry::global().parse(text)
}
