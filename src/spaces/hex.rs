//! The `#rrggbb` notation of sRGB colors.

use crate::color::{Component, Coords};
use crate::format::Format;
use crate::gamut::GamutPolicy;
use crate::serialize::SerializeOptions;

/// The `hex` format: always gamut mapped, collapsed to `#rgb` when possible.
pub(super) fn format() -> Format {
    Format::custom("hex", Some(parse), Some(serialize)).with_to_gamut(GamutPolicy::On)
}

fn to_unit(byte: u8) -> Component {
    byte as Component / 255.0
}

fn to_byte(value: Component) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse(text: &str) -> Option<(Coords, Option<Component>)> {
    let digits = text.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let bytes = match digits.len() {
        3 | 4 => digits
            .chars()
            .map(|c| c.to_digit(16).map(|v| v as u8 * 17))
            .collect::<Option<Vec<_>>>()?,
        6 | 8 => (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect::<Option<Vec<_>>>()?,
        _ => return None,
    };

    let alpha = bytes.get(3).map_or(1.0, |&a| to_unit(a));
    Some((
        [
            Some(to_unit(bytes[0])),
            Some(to_unit(bytes[1])),
            Some(to_unit(bytes[2])),
        ],
        Some(alpha),
    ))
}

fn serialize(coords: &Coords, alpha: Option<Component>, options: &SerializeOptions) -> String {
    let mut bytes = coords
        .iter()
        .map(|c| to_byte(c.unwrap_or(0.0)))
        .collect::<Vec<_>>();

    let alpha = alpha.unwrap_or(1.0);
    if options.alpha.include.unwrap_or(alpha < 1.0) {
        bytes.push(to_byte(alpha));
    }

    let collapse = options.collapse && bytes.iter().all(|b| b >> 4 == b & 0xf);

    let mut text = String::with_capacity(9);
    text.push('#');
    for byte in bytes {
        if collapse {
            text.push_str(&format!("{:x}", byte & 0xf));
        } else {
            text.push_str(&format!("{byte:02x}"));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;
    use crate::serialize::AlphaFormat;

    #[test]
    fn parses_every_length() {
        let (coords, alpha) = parse("#f00").expect("short");
        assert_eq!(coords, [Some(1.0), Some(0.0), Some(0.0)]);
        assert_eq!(alpha, Some(1.0));

        let (coords, alpha) = parse("#FF000080").expect("long with alpha");
        assert_eq!(coords, [Some(1.0), Some(0.0), Some(0.0)]);
        assert_component_eq!(alpha.unwrap_or_default(), 128.0 / 255.0);

        let (coords, _) = parse("#336699").expect("long");
        assert_component_eq!(coords[1].unwrap_or_default(), 0.4);

        assert!(parse("#ff00").is_some());
        assert!(parse("#ff000").is_none());
        assert!(parse("#ggg").is_none());
        assert!(parse("red").is_none());
    }

    #[test]
    fn collapses_when_allowed() {
        let red = [Some(1.0), Some(0.0), Some(0.0)];
        let options = SerializeOptions::default();
        assert_eq!(serialize(&red, Some(1.0), &options), "#f00");

        let options = SerializeOptions {
            collapse: false,
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(&red, Some(1.0), &options), "#ff0000");

        let color = [Some(0.2), Some(0.5), Some(0.0)];
        assert_eq!(
            serialize(&color, Some(1.0), &SerializeOptions::default()),
            "#338000"
        );
    }

    #[test]
    fn alpha_is_written_when_translucent_or_forced() {
        let red = [Some(1.0), Some(0.0), Some(0.0)];
        assert_eq!(
            serialize(&red, Some(0.5), &SerializeOptions::default()),
            "#ff000080"
        );

        let options = SerializeOptions {
            alpha: AlphaFormat::from(true),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(&red, Some(1.0), &options), "#f00f");
    }
}
