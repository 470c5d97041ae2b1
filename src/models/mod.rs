//! Each built-in color space/form is modeled with its own type. Conversions
//! are only implemented on relevant models, so the type system keeps every
//! edge of the built-in space graph honest.
//!
//! Models operate on the 3 color components only (no alpha, no flags). A
//! missing component is passed in as NaN and any component that depends on
//! it comes out as NaN.
//!
//! ```rust
//! use colorway::models::{Lab, Srgb, ToXyz};
//! let blue_in_lch = Lab::from(
//!     Srgb::new(0.0, 0.0, 1.0)
//!         .to_linear_light() // srgb-linear
//!         .to_xyz()          // xyz-d65
//!         .to_d50(),         // xyz-d50
//! )
//! .to_polar();               // lch
//! assert!(blue_in_lch.chroma > 100.0);
//! ```

pub mod hsl;
pub mod hwb;
pub mod lab;
pub mod rgb;
pub mod xyz;

pub use hsl::Hsl;
pub use hwb::Hwb;
pub use lab::{Lab, Lch, Oklab, Oklch, Polar, Rectangular};
pub use rgb::{
    A98Rgb, A98RgbLinear, DisplayP3, DisplayP3Linear, ProPhotoRgb, ProPhotoRgbLinear, Rec2020,
    Rec2020Linear, Rgb, Srgb, SrgbLinear,
};
pub use xyz::{ToXyz, WhitePoint, Xyz, XyzD50, XyzD65, D50, D65};
