//! Conversion of colors between the spaces of a registry.
//!
//! A conversion walks the space graph. A direct edge between the two spaces
//! is used when one exists, in either direction. Otherwise both base chains
//! are climbed up to their lowest common ancestor, which is the hub in the
//! worst case.
//!
//! Inside a conversion missing components travel as NaN. Any transform that
//! needs a missing component produces NaN, which is turned back into a
//! missing component when the result is built.
//!
//! ```rust
//! use colorway::Registry;
//! let registry = Registry::builtin();
//! let lch = registry.to(("srgb", [0.0, 0.0, 1.0]), "lch").unwrap();
//! assert!(lch.c1().unwrap() > 100.0);
//! ```

use tracing::trace;

use crate::color::{Color, ColorInput, SpaceId};
use crate::error::{ColorError, ColorResult};
use crate::registry::Registry;
use crate::space::{CoordTransform, SpaceDescriptor};

/// A single step of a conversion: the space reached and how to get there.
type Step<'r> = (&'r SpaceDescriptor, CoordTransform);

impl Registry {
    /// Convert a color that is already in a registered space into `space`.
    /// Alpha is passed through unchanged.
    pub fn convert(&self, color: &Color, space: &str) -> ColorResult<Color> {
        let from = self.lookup(color.space.as_str())?;
        let to = self.lookup(space)?;

        if from.id() == to.id() {
            let mut color = color.clone();
            color.space = to.id().clone();
            return Ok(color);
        }

        let components = self
            .route(from, to)?
            .into_iter()
            .fold(color.components_for_transform(), |components, (_, transform)| {
                transform(&components)
            });

        Ok(Color::from_transformed(
            to.id().clone(),
            components,
            color.alpha(),
        ))
    }

    /// Convert any color input into `space`.
    pub fn to<'a>(&self, color: impl Into<ColorInput<'a>>, space: &str) -> ColorResult<Color> {
        let color = self.normalize(color)?;
        self.convert(&color, space)
    }

    /// The spaces visited when converting from `from` into `to`, both
    /// included.
    pub fn conversion_path(&self, from: &str, to: &str) -> ColorResult<Vec<SpaceId>> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;

        let mut path = vec![from.id().clone()];
        if from.id() != to.id() {
            path.extend(self.route(from, to)?.into_iter().map(|(space, _)| space.id().clone()));
        }
        Ok(path)
    }

    fn route<'r>(
        &'r self,
        from: &'r SpaceDescriptor,
        to: &'r SpaceDescriptor,
    ) -> ColorResult<Vec<Step<'r>>> {
        if let Some(step) = self.direct_edge(from, to) {
            trace!(from = %from.id(), to = %to.id(), "direct conversion");
            return Ok(vec![step]);
        }

        let up = self.base_chain(from);
        let down = self.base_chain(to);

        let Some((up_len, down_len)) = up.iter().enumerate().find_map(|(i, ancestor)| {
            down.iter()
                .position(|other| other.id() == ancestor.id())
                .map(|j| (i, j))
        }) else {
            return Err(ColorError::NoConversionPath {
                from: from.id().to_string(),
                to: to.id().to_string(),
            });
        };

        trace!(
            from = %from.id(),
            to = %to.id(),
            ancestor = %up[up_len].id(),
            steps = up_len + down_len,
            "conversion through common ancestor"
        );

        let mut steps = Vec::with_capacity(up_len + down_len);

        // Climb from the source to the common ancestor.
        for pair in up[..=up_len].windows(2) {
            if let Some(edge) = pair[0].base_edge() {
                steps.push((pair[1], edge.forward));
            }
        }

        // Descend from the common ancestor to the target.
        for pair in down[..=down_len].windows(2).rev() {
            if let Some(edge) = pair[0].base_edge() {
                steps.push((pair[0], edge.inverse));
            }
        }

        Ok(steps)
    }

    /// An edge between the two spaces, stored on either of them.
    fn direct_edge<'r>(
        &'r self,
        from: &'r SpaceDescriptor,
        to: &'r SpaceDescriptor,
    ) -> Option<Step<'r>> {
        let leads_to = |space: &SpaceDescriptor, target: &SpaceId| {
            self.get(target.as_str())
                .is_some_and(|other| other.id() == space.id())
        };

        if let Some(edge) = from
            .base_edge()
            .into_iter()
            .chain(from.edges())
            .find(|edge| leads_to(to, &edge.target))
        {
            return Some((to, edge.forward));
        }

        to.base_edge()
            .into_iter()
            .chain(to.edges())
            .find(|edge| leads_to(from, &edge.target))
            .map(|edge| (to, edge.inverse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Component, Components, Coords};
    use crate::registry::RegistryBuilder;
    use crate::space::{CoordMeta, Edge};
    use crate::{assert_component_eq, assert_coords_eq};

    fn registry() -> &'static Registry {
        Registry::global()
    }

    /// `chocolate` (#d2691e) in every built-in space.
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const CHOCOLATE: &[(&str, [Component; 3])] = &[
        ("srgb", [0.823529, 0.411765, 0.117647]),
        ("srgb-linear", [0.644480, 0.141263, 0.012983]),
        ("hsl", [25.000000, 75.000000, 47.058824]),
        ("hwb", [25.000000, 11.764706, 17.647059]),
        ("display-p3", [0.770569, 0.434015, 0.199849]),
        ("a98-rgb", [0.730405, 0.410688, 0.162005]),
        ("prophoto-rgb", [0.592311, 0.394149, 0.164286]),
        ("rec2020", [0.669266, 0.401900, 0.142716]),
        ("xyz-d65", [0.318634, 0.239006, 0.041637]),
        ("xyz-d50", [0.337301, 0.245449, 0.031959]),
        ("lab", [56.629300, 39.237080, 57.553769]),
        ("lch", [56.629300, 69.656190, 55.715927]),
        ("oklab", [0.634398, 0.099074, 0.119193]),
        ("oklch", [0.634398, 0.154992, 50.266483]),
    ];

    #[test]
    fn test_conversions() {
        for (from, source) in CHOCOLATE {
            for (to, expected) in CHOCOLATE {
                let result = registry()
                    .to((*from, *source), to)
                    .unwrap_or_else(|err| panic!("{from} -> {to}: {err}"));
                assert_eq!(result.space, *to);

                let space = registry().lookup(to).expect("built-in space");
                for (index, (actual, expected)) in
                    result.coords().iter().zip(expected.iter()).enumerate()
                {
                    let actual = actual.unwrap_or_else(|| panic!("{from} -> {to}: missing"));
                    let [min, max] = space.coords()[index].reference().unwrap_or([0.0, 1.0]);
                    let epsilon = ((max - min) * 1.0e-4).max(1.0e-4);
                    assert!(
                        (actual - expected).abs() <= epsilon,
                        "{from} -> {to} [{index}]: {actual} != {expected}"
                    );
                }
            }
        }
    }

    #[test]
    fn identity_returns_the_same_coordinates() {
        let color = Color::new("lab", 50.123456, -20.5, 33.3, 0.25);
        let result = registry().convert(&color, "lab").expect("identity");
        assert_eq!(result, color);

        let aliased = registry()
            .convert(&Color::new("xyz-d65", 0.1, 0.2, 0.3, 1.0), "xyz")
            .expect("alias");
        assert_eq!(aliased.space, "xyz-d65");
        assert_eq!(aliased.coords(), [Some(0.1), Some(0.2), Some(0.3)]);
    }

    #[test]
    fn alpha_passes_through() {
        let color = Color::new("srgb", 0.5, 0.5, 0.5, 0.3);
        let result = registry().convert(&color, "oklch").expect("convert");
        assert_eq!(result.alpha(), Some(0.3));

        let color = Color::new("srgb", 0.5, 0.5, 0.5, None);
        let result = registry().convert(&color, "lab").expect("convert");
        assert_eq!(result.alpha(), None);
    }

    #[test]
    fn achromatic_colors_have_missing_hue() {
        let gray = registry().to(("srgb", [0.5, 0.5, 0.5]), "hsl").expect("hsl");
        assert_eq!(gray.c0(), None);
        assert_component_eq!(gray.c1().unwrap_or(-1.0), 0.0);
        assert_component_eq!(gray.c2().unwrap_or(-1.0), 50.0);

        let white = registry().to(("srgb", [1.0, 1.0, 1.0]), "lch").expect("lch");
        assert_eq!(white.c2(), None);
    }

    #[test]
    fn missing_components_poison_dependent_outputs() {
        let color = Color::new("lab", 50.0, None, None, 1.0);
        let lch = registry().convert(&color, "lch").expect("lch");
        assert_coords_eq!(lch.coords(), [Some(50.0), None, None]);

        let color = Color::new("srgb", None, 0.5, 0.5, 1.0);
        let linear = registry().convert(&color, "srgb-linear").expect("linear");
        assert_eq!(linear.c0(), None);
        assert!(linear.c1().is_some());

        let xyz = registry().convert(&color, "xyz-d65").expect("xyz");
        let missing: Coords = [None; 3];
        assert_eq!(xyz.coords(), missing);
    }

    #[test]
    fn powerless_hue_is_not_needed() {
        let color = Color::new("lch", 50.0, 0.0, None, 1.0);
        let lab = registry().convert(&color, "lab").expect("lab");
        assert_coords_eq!(lab.coords(), [Some(50.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn paths_prefer_direct_edges() {
        let path = |from, to| registry().conversion_path(from, to).expect("path");

        assert_eq!(path("hsl", "hwb"), vec![SpaceId::new("hsl"), SpaceId::new("hwb")]);
        assert_eq!(path("hwb", "hsl"), vec![SpaceId::new("hwb"), SpaceId::new("hsl")]);
        assert_eq!(path("lab", "lab"), vec![SpaceId::new("lab")]);
        assert_eq!(
            path("hsl", "srgb-linear"),
            vec![
                SpaceId::new("hsl"),
                SpaceId::new("srgb"),
                SpaceId::new("srgb-linear")
            ]
        );
        assert_eq!(
            path("lch", "prophoto-rgb"),
            vec![
                SpaceId::new("lch"),
                SpaceId::new("lab"),
                SpaceId::new("xyz-d50"),
                SpaceId::new("prophoto-rgb")
            ]
        );
        assert_eq!(
            path("oklch", "srgb"),
            vec![
                SpaceId::new("oklch"),
                SpaceId::new("oklab"),
                SpaceId::new("xyz-d65"),
                SpaceId::new("srgb-linear"),
                SpaceId::new("srgb")
            ]
        );
    }

    #[test]
    fn unknown_spaces_fail() {
        assert_eq!(
            registry().to(("srgb", [1.0, 0.0, 0.0]), "nope").err(),
            Some(ColorError::UnknownSpace("nope".into()))
        );
    }

    #[test]
    fn disconnected_spaces_have_no_path() {
        fn double(c: &Components) -> Components {
            c.map(|v| v * 2.0)
        }
        fn half(c: &Components) -> Components {
            c.map(|v| v / 2.0)
        }

        let coords = [
            CoordMeta::unbounded("a", "A", 0.0, 1.0),
            CoordMeta::unbounded("b", "B", 0.0, 1.0),
            CoordMeta::unbounded("c", "C", 0.0, 1.0),
        ];

        let mut builder = RegistryBuilder::new().hub("hub");
        builder
            .register(SpaceDescriptor::new("hub", "Hub", coords.clone()))
            .and_then(|b| {
                b.register(
                    SpaceDescriptor::new("twice", "Twice", coords.clone())
                        .base(Edge::new("hub", half, double)),
                )
            })
            .and_then(|b| b.register(SpaceDescriptor::new("island", "Island", coords.clone())))
            .expect("register");
        let registry = builder.seal().expect("seal");

        let twice = registry
            .to(("hub", [0.1, 0.2, 0.3]), "twice")
            .expect("down the base edge");
        assert_coords_eq!(twice.coords(), [Some(0.2), Some(0.4), Some(0.6)]);

        assert_eq!(
            registry.to(("twice", [0.0, 0.0, 0.0]), "island").err(),
            Some(ColorError::NoConversionPath {
                from: "twice".into(),
                to: "island".into()
            })
        );
    }

    #[test]
    fn round_trips_do_not_drift() {
        let source = Color::new("srgb", 0.823529, 0.411765, 0.117647, 1.0);
        let mut color = source.clone();
        for space in ["oklch", "lab", "hwb", "display-p3", "srgb"] {
            color = registry().convert(&color, space).expect("convert");
        }
        for (a, b) in color.coords().iter().zip(source.coords().iter()) {
            approx::assert_abs_diff_eq!(
                a.unwrap_or_default(),
                b.unwrap_or_default(),
                epsilon = 1.0e-4
            );
        }
    }
}
