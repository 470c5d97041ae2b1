//! Gamut checking and gamut mapping.
//! <https://drafts.csswg.org/css-color-4/#gamut-mapping>

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::color::{Color, ColorInput, Component};
use crate::error::{ColorError, ColorResult};
use crate::registry::Registry;
use crate::space::SpaceDescriptor;

/// Upper bound on the number of steps of any gamut search.
const MAX_ITERATIONS: usize = 64;

/// Just noticeable difference in deltaEOK.
const JND: Component = 0.02;

/// Search precision.
const EPSILON: Component = 1.0e-4;

/// Attempts at pulling drifting coordinates back inside their range.
const SETTLE_STEPS: i32 = 6;

/// First inset, as a fraction of the range, used on drifting coordinates.
const SETTLE_INSET: Component = 1.0e-6;

/// A strategy for bringing colors into gamut.
#[derive(Clone, Debug, PartialEq)]
pub enum GamutMethod {
    /// Clamp each ranged coordinate.
    Clip,
    /// The CSS Color 4 binary search on OkLCh chroma.
    Css,
    /// Reduce a single coordinate of a space until the color fits, e.g.
    /// `oklch.c`.
    Reduce {
        /// The space the coordinate belongs to.
        space: Cow<'static, str>,
        /// Id or name of the coordinate.
        coord: Cow<'static, str>,
    },
}

impl FromStr for GamutMethod {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clip" => Ok(GamutMethod::Clip),
            "css" => Ok(GamutMethod::Css),
            _ => match s.split_once('.') {
                Some((space, coord)) if !space.is_empty() && !coord.is_empty() => {
                    Ok(GamutMethod::Reduce {
                        space: Cow::Owned(space.to_string()),
                        coord: Cow::Owned(coord.to_string()),
                    })
                }
                _ => Err(ColorError::UnknownGamutMethod(s.to_string())),
            },
        }
    }
}

impl fmt::Display for GamutMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamutMethod::Clip => f.write_str("clip"),
            GamutMethod::Css => f.write_str("css"),
            GamutMethod::Reduce { space, coord } => write!(f, "{space}.{coord}"),
        }
    }
}

/// Whether, and how, to map a color into gamut.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GamutPolicy {
    /// Leave the coordinates as they are.
    Off,
    /// Map with the default strategy of the space.
    #[default]
    On,
    /// Map with the given strategy.
    Method(GamutMethod),
}

impl GamutPolicy {
    /// True unless the policy is [`GamutPolicy::Off`].
    pub fn is_on(&self) -> bool {
        !matches!(self, GamutPolicy::Off)
    }

    /// The strategy named by the policy, if any.
    pub fn method(&self) -> Option<&GamutMethod> {
        match self {
            GamutPolicy::Method(method) => Some(method),
            _ => None,
        }
    }

    /// This policy, or `other` if this one is off.
    pub fn or(self, other: GamutPolicy) -> GamutPolicy {
        match self {
            GamutPolicy::Off => other,
            policy => policy,
        }
    }
}

impl From<bool> for GamutPolicy {
    fn from(value: bool) -> Self {
        if value {
            GamutPolicy::On
        } else {
            GamutPolicy::Off
        }
    }
}

impl From<GamutMethod> for GamutPolicy {
    fn from(value: GamutMethod) -> Self {
        GamutPolicy::Method(value)
    }
}

/// Options for [`Registry::in_gamut`] and [`Registry::to_gamut`].
#[derive(Clone, Debug, Default)]
pub struct GamutOptions<'a> {
    /// The strategy. Defaults to the strategy registered for the space, then
    /// to clipping.
    pub method: Option<GamutMethod>,
    /// The space whose gamut is used. Defaults to the space of the color.
    pub space: Option<&'a str>,
    /// Tolerance of the check. Defaults to the registry default.
    pub epsilon: Option<Component>,
}

/// Returns true if every ranged coordinate of `color` lies within the range
/// declared by `space`, give or take `epsilon`. Missing coordinates and
/// angles always pass.
pub fn in_gamut_of(space: &SpaceDescriptor, color: &Color, epsilon: Component) -> bool {
    space.coords().iter().enumerate().all(|(index, meta)| {
        let (Some([min, max]), Some(value)) = (meta.range, color.coord(index)) else {
            return true;
        };
        meta.is_angle || (value >= min - epsilon && value <= max + epsilon)
    })
}

/// Return a color with each ranged coordinate clamped into the range
/// declared by `space`. Missing coordinates stay missing.
pub fn clip(space: &SpaceDescriptor, color: &Color) -> Color {
    let mut coords = color.coords();
    for (coord, meta) in coords.iter_mut().zip(space.coords()) {
        if let (Some(value), Some([min, max]), false) = (coord.as_mut(), meta.range, meta.is_angle) {
            *value = value.clamp(min, max);
        }
    }
    Color::from_coords(color.space.clone(), coords, color.alpha())
}

/// Clip `color` into `space`, moving coordinates that are out by more than
/// `epsilon` an extra `inset` (a fraction of their range) inside.
fn pull_inside(
    space: &SpaceDescriptor,
    color: &Color,
    epsilon: Component,
    inset: Component,
) -> Color {
    let mut coords = color.coords();
    for (coord, meta) in coords.iter_mut().zip(space.coords()) {
        let (Some(value), Some([min, max]), false) = (coord.as_mut(), meta.range, meta.is_angle)
        else {
            continue;
        };
        if *value < min - epsilon || *value > max + epsilon {
            let margin = (max - min) * inset;
            *value = value.clamp(min + margin, max - margin);
        } else {
            *value = value.clamp(min, max);
        }
    }
    Color::from_coords(color.space.clone(), coords, color.alpha())
}

impl Registry {
    /// Returns true if the color lies within the gamut of its own space, or
    /// of `options.space`.
    pub fn in_gamut<'a>(
        &self,
        color: impl Into<ColorInput<'a>>,
        options: &GamutOptions,
    ) -> ColorResult<bool> {
        let color = self.normalize(color)?;
        let space = self.lookup(options.space.unwrap_or(color.space.as_str()))?;
        let color = self.convert(&color, space.id().as_str())?;
        let epsilon = options.epsilon.unwrap_or(self.defaults().epsilon);
        Ok(in_gamut_of(space, &color, epsilon))
    }

    /// Map a color into the gamut of its own space, or of `options.space`.
    /// The result is expressed in the space of the input, and passes
    /// [`Registry::in_gamut`] with the same options. A color that cannot be
    /// converted back without leaving the gamut is returned in the target
    /// space instead.
    pub fn to_gamut<'a>(
        &self,
        color: impl Into<ColorInput<'a>>,
        options: &GamutOptions,
    ) -> ColorResult<Color> {
        let color = self.normalize(color)?;
        let target = self.lookup(options.space.unwrap_or(color.space.as_str()))?;
        let epsilon = options.epsilon.unwrap_or(self.defaults().epsilon);

        let origin = self.convert(&color, target.id().as_str())?;
        if in_gamut_of(target, &origin, epsilon) {
            return Ok(color);
        }

        let method = options
            .method
            .clone()
            .or_else(|| target.default_gamut_mapping().cloned())
            .unwrap_or(GamutMethod::Clip);

        debug!(space = %target.id(), method = %method, "mapping color into gamut");

        let mapped = match &method {
            GamutMethod::Clip => clip(target, &origin),
            GamutMethod::Css => self.map_css(target, &origin)?,
            GamutMethod::Reduce { space, coord } => {
                self.map_reduce(target, &origin, space, coord)?
            }
        };

        self.settle(target, mapped, color.space.as_str(), epsilon)
    }

    /// Express `mapped`, a color in gamut of `target`, in `space` so that it
    /// still passes the gamut check of `target` after the round trip. Values
    /// that drift out are pulled inside their range by a growing inset.
    /// If no inset holds, the clipped color is returned in `target`.
    fn settle(
        &self,
        target: &SpaceDescriptor,
        mapped: Color,
        space: &str,
        epsilon: Component,
    ) -> ColorResult<Color> {
        let mut candidate = mapped;
        for step in 0..SETTLE_STEPS {
            let back = self.convert(&candidate, space)?;
            let seen = self.convert(&back, target.id().as_str())?;
            if in_gamut_of(target, &seen, epsilon) {
                return Ok(back);
            }
            let inset = SETTLE_INSET * (10.0 as Component).powi(step);
            candidate = pull_inside(target, &seen, epsilon, inset);
        }

        warn!(
            space,
            target = %target.id(),
            "mapped color leaves the gamut when converted back, keeping the target space"
        );
        Ok(clip(target, &candidate))
    }

    /// Calculate deltaE OK (simple root sum of squares). Missing components
    /// count as zero.
    /// <https://drafts.csswg.org/css-color-4/#color-difference-OK>
    pub fn delta_eok(&self, reference: &Color, sample: &Color) -> ColorResult<Component> {
        let reference = self.convert(reference, "oklab")?.coords();
        let sample = self.convert(sample, "oklab")?.coords();

        Ok(reference
            .iter()
            .zip(sample.iter())
            .map(|(r, s)| r.unwrap_or(0.0) - s.unwrap_or(0.0))
            .map(|d| d * d)
            .sum::<Component>()
            .sqrt())
    }

    /// <https://drafts.csswg.org/css-color-4/#binsearch>
    fn map_css(&self, destination: &SpaceDescriptor, origin: &Color) -> ColorResult<Color> {
        let space = destination.id().as_str();

        // 1. if destination has no gamut limits return origin.
        if !destination.is_bounded() {
            return Ok(origin.clone());
        }

        // 2. let origin_Oklch be origin converted from origin color space to
        //    the Oklch color space.
        let mut origin_oklch = self.convert(origin, "oklch")?;
        if origin_oklch.c2().is_none() {
            origin_oklch = origin_oklch.with_coord(2, Some(0.0));
        }
        let (Some(lightness), Some(chroma)) = (origin_oklch.c0(), origin_oklch.c1()) else {
            return Ok(clip(destination, origin));
        };

        // 3. if the Lightness of origin_Oklch is greater than or equal to
        //    100%, return white in destination.
        if lightness >= 1.0 {
            let white = Color::new("oklab", 1.0, 0.0, 0.0, origin.alpha());
            return Ok(clip(destination, &self.convert(&white, space)?));
        }

        // 4. if the Lightness of origin_Oklch is less than than or equal to
        //    0%, return black in destination.
        if lightness <= 0.0 {
            let black = Color::new("oklab", 0.0, 0.0, 0.0, origin.alpha());
            return Ok(clip(destination, &self.convert(&black, space)?));
        }

        // 5. - 10. inGamut is `in_gamut_of`, delta is `delta_eok` and clip is
        //          `clip`.

        // 11. set min to zero
        let mut min = 0.0;

        // 12. set max to the Oklch chroma of origin_Oklch.
        let mut max = chroma;

        // 13. let min_inGamut be a boolean that represents when min is still
        //     in gamut, and set it to true
        let mut min_in_gamut = true;

        let mut current = origin_oklch;
        let mut current_in_space = origin.clone();

        // Skip the search when clipping is already close enough.
        let clipped = clip(destination, &current_in_space);
        if self.delta_eok(&current, &clipped)? < JND {
            return Ok(clipped);
        }

        // 14. while (max - min is greater than epsilon) repeat the following
        //     steps.
        let mut iterations = 0;
        while max - min > EPSILON {
            if iterations == MAX_ITERATIONS {
                warn!(space, iterations, "gamut search did not converge, clipping");
                break;
            }
            iterations += 1;

            // 14.1. set chroma to (min + max) / 2
            let chroma = (min + max) / 2.0;

            // 14.2. set current to origin_Oklch and then set the chroma
            //       component to chroma
            current = current.with_coord(1, Some(chroma));
            current_in_space = self.convert(&current, space)?;

            // 14.3. if min_inGamut is true and also if inGamut(current) is
            //       true, set min to chroma and continue to repeat these steps.
            if min_in_gamut && in_gamut_of(destination, &current_in_space, 0.0) {
                min = chroma;
                continue;
            }

            // 14.4.1. set clipped to clip(current)
            let clipped = clip(destination, &current_in_space);

            // 14.4.2. set E to delta(clipped, current)
            let e = self.delta_eok(&clipped, &current)?;

            // 14.4.3. if E < JND
            if e < JND {
                // 14.4.3.1. if (JND - E < epsilon) return clipped as the gamut
                //           mapped color
                if JND - e < EPSILON {
                    return Ok(clipped);
                }

                // 14.4.3.2. otherwise set min_inGamut to false and min to
                //           chroma
                min_in_gamut = false;
                min = chroma;
            } else {
                // 14.4.4. otherwise, set max to chroma
                max = chroma;
            }
        }

        // 15. return current clipped, so the result is in gamut even when the
        //     search stopped early.
        Ok(clip(destination, &current_in_space))
    }

    /// Bisect a single coordinate of `space` between its lower reference
    /// bound and its current value, keeping the largest value in gamut.
    fn map_reduce(
        &self,
        destination: &SpaceDescriptor,
        origin: &Color,
        space: &str,
        coord: &str,
    ) -> ColorResult<Color> {
        let mapping_space = self.lookup(space)?;
        let index = mapping_space
            .coord_index(coord)
            .ok_or_else(|| ColorError::UnknownGamutMethod(format!("{space}.{coord}")))?;
        let destination_id = destination.id().as_str();

        let mapped = self.convert(origin, mapping_space.id().as_str())?;
        let Some(value) = mapped.coord(index) else {
            return Ok(clip(destination, origin));
        };

        let clipped = clip(destination, origin);
        if self.delta_eok(origin, &clipped)? < JND {
            return Ok(clipped);
        }

        let floor = mapping_space.coords()[index]
            .reference()
            .map_or(0.0, |[min, _]| min);
        let mut low = floor.min(value);
        let mut high = value;

        let mut iterations = 0;
        while high - low > EPSILON {
            if iterations == MAX_ITERATIONS {
                warn!(space = destination_id, method = %format!("{space}.{coord}"), iterations, "gamut search did not converge, clipping");
                break;
            }
            iterations += 1;

            let middle = (low + high) / 2.0;
            let candidate = self.convert(&mapped.with_coord(index, Some(middle)), destination_id)?;
            if in_gamut_of(destination, &candidate, 0.0) {
                low = middle;
            } else {
                high = middle;
            }
        }

        let result = self.convert(&mapped.with_coord(index, Some(low)), destination_id)?;
        Ok(clip(destination, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    fn registry() -> &'static Registry {
        Registry::global()
    }

    fn srgb() -> &'static SpaceDescriptor {
        registry().get("srgb").expect("srgb is built in")
    }

    #[test]
    fn parse_methods() {
        assert_eq!("clip".parse::<GamutMethod>(), Ok(GamutMethod::Clip));
        assert_eq!("css".parse::<GamutMethod>(), Ok(GamutMethod::Css));
        assert_eq!(
            "oklch.c".parse::<GamutMethod>(),
            Ok(GamutMethod::Reduce {
                space: "oklch".into(),
                coord: "c".into()
            })
        );
        assert_eq!(
            "nonsense".parse::<GamutMethod>(),
            Err(ColorError::UnknownGamutMethod("nonsense".into()))
        );
        assert_eq!(
            ".c".parse::<GamutMethod>(),
            Err(ColorError::UnknownGamutMethod(".c".into()))
        );
        assert_eq!(GamutMethod::Reduce { space: "hsl".into(), coord: "s".into() }.to_string(), "hsl.s");
    }

    #[test]
    fn policies_combine() {
        assert_eq!(GamutPolicy::Off.or(GamutPolicy::On), GamutPolicy::On);
        assert_eq!(
            GamutPolicy::from(GamutMethod::Clip).or(GamutPolicy::On),
            GamutPolicy::Method(GamutMethod::Clip)
        );
        assert_eq!(GamutPolicy::from(false), GamutPolicy::Off);
        assert!(!GamutPolicy::Off.is_on());
    }

    #[test]
    fn in_gamut_checks_ranges_with_epsilon() {
        let space = srgb();
        assert!(in_gamut_of(space, &Color::new("srgb", 1.0, 0.0, 0.5, 1.0), 0.0));
        assert!(in_gamut_of(space, &Color::new("srgb", 1.00005, 0.0, 0.5, 1.0), 0.000075));
        assert!(!in_gamut_of(space, &Color::new("srgb", 1.0001, 0.0, 0.5, 1.0), 0.000075));
        assert!(in_gamut_of(space, &Color::new("srgb", None, 0.0, 0.5, 1.0), 0.0));
    }

    #[test]
    fn unbounded_spaces_are_always_in_gamut() {
        let lab = ("lab", [50.0, 300.0, -300.0]);
        assert_eq!(registry().in_gamut(lab, &GamutOptions::default()), Ok(true));

        let options = GamutOptions {
            space: Some("srgb"),
            ..GamutOptions::default()
        };
        assert_eq!(registry().in_gamut(lab, &options), Ok(false));
    }

    #[test]
    fn clip_keeps_missing_coordinates() {
        let clipped = clip(srgb(), &Color::new("srgb", 1.5, None, -0.5, 0.5));
        assert_eq!(clipped.coords(), [Some(1.0), None, Some(0.0)]);
        assert_eq!(clipped.alpha(), Some(0.5));
    }

    #[test]
    fn map_red() {
        // color(display-p3 1 0 0)
        let source = registry()
            .to(("display-p3", [1.0, 0.0, 0.0]), "srgb")
            .expect("convert");
        let options = GamutOptions {
            method: Some(GamutMethod::Css),
            ..GamutOptions::default()
        };
        let mapped = registry().to_gamut(&source, &options).expect("map");

        approx::assert_abs_diff_eq!(mapped.c0().unwrap_or_default(), 1.0, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(mapped.c1().unwrap_or_default(), 0.0446, epsilon = 1.0e-2);
        approx::assert_abs_diff_eq!(mapped.c2().unwrap_or_default(), 0.0459, epsilon = 1.0e-2);
        assert_eq!(registry().in_gamut(&mapped, &GamutOptions::default()), Ok(true));
    }

    #[test]
    fn every_method_lands_in_gamut() {
        let methods = [
            GamutMethod::Clip,
            GamutMethod::Css,
            "oklch.c".parse().expect("method"),
            "hsl.s".parse().expect("method"),
        ];
        let colors = [
            ("display-p3", [1.0, 0.0, 0.0]),
            ("rec2020", [0.0, 1.0, 0.2]),
            ("srgb", [1.3, -0.2, 0.4]),
            ("oklch", [0.7, 0.35, 150.0]),
        ];

        for method in methods {
            for (space, coords) in colors {
                let options = GamutOptions {
                    method: Some(method.clone()),
                    space: Some("srgb"),
                    ..GamutOptions::default()
                };
                let mapped = registry().to_gamut((space, coords), &options).expect("map");
                assert_eq!(mapped.space, space);
                assert_eq!(
                    registry().in_gamut(&mapped, &options),
                    Ok(true),
                    "{method} {space} {coords:?}"
                );
            }
        }
    }

    #[test]
    fn mapped_colors_stay_in_gamut_after_converting_back() {
        let methods = [
            GamutMethod::Clip,
            GamutMethod::Css,
            "oklch.c".parse().expect("method"),
        ];
        let targets = ["a98-rgb", "hwb", "hsl", "display-p3", "prophoto-rgb"];
        let colors = [
            ("srgb", [2.0, -1.0, 0.5]),
            ("oklch", [0.5, 0.37, 264.0]),
            ("lch", [60.0, 140.0, 30.0]),
            ("lab", [50.0, 100.0, -120.0]),
            ("display-p3", [1.0, 0.0, 0.0]),
            ("rec2020", [0.0, 1.0, 0.2]),
            ("xyz-d65", [0.9, 0.1, 0.02]),
        ];

        for method in methods {
            for target in targets {
                for (space, coords) in colors {
                    let options = GamutOptions {
                        method: Some(method.clone()),
                        space: Some(target),
                        ..GamutOptions::default()
                    };
                    let mapped = registry().to_gamut((space, coords), &options).expect("map");
                    assert_eq!(
                        registry().in_gamut(&mapped, &options),
                        Ok(true),
                        "{method} {space} {coords:?} into {target}: {mapped:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn drifting_coordinates_are_pulled_inside() {
        let space = srgb();
        let color = Color::new("srgb", -0.001, 1.00001, 1.5, 1.0);
        let pulled = pull_inside(space, &color, 0.000075, 0.01);
        assert_eq!(pulled.c0(), Some(0.01));
        assert_eq!(pulled.c1(), Some(1.0));
        assert_component_eq!(pulled.c2().unwrap_or_default(), 0.99);
        assert!(in_gamut_of(space, &pulled, 0.0));
    }

    #[test]
    fn mapping_is_idempotent() {
        let options = GamutOptions::default();
        let once = registry()
            .to_gamut(("srgb", [1.2, 0.5, -0.1]), &options)
            .expect("map");
        let twice = registry().to_gamut(&once, &options).expect("map");
        assert_eq!(once, twice);
    }

    #[test]
    fn extreme_lightness_maps_to_white_and_black() {
        let options = GamutOptions::default();

        let white = registry()
            .to_gamut(("srgb", [1.5, 1.4, 1.6]), &options)
            .expect("map");
        assert_component_eq!(white.c0().unwrap_or_default(), 1.0);
        assert_component_eq!(white.c1().unwrap_or_default(), 1.0);
        assert_component_eq!(white.c2().unwrap_or_default(), 1.0);

        let black = registry()
            .to_gamut(("srgb", [-0.5, -0.4, -0.6]), &options)
            .expect("map");
        assert_component_eq!(black.c0().unwrap_or_default(), 0.0);
        assert_component_eq!(black.c1().unwrap_or_default(), 0.0);
        assert_component_eq!(black.c2().unwrap_or_default(), 0.0);
    }

    #[test]
    fn input_is_not_mutated() {
        let color = Color::new("srgb", 1.2, 0.5, -0.1, 1.0);
        let copy = color.clone();
        let _ = registry().to_gamut(&color, &GamutOptions::default());
        assert_eq!(color, copy);
    }

    #[test]
    fn unknown_reduce_targets_fail() {
        let options = GamutOptions {
            method: Some("oklch.q".parse().expect("method")),
            ..GamutOptions::default()
        };
        assert_eq!(
            registry().to_gamut(("srgb", [1.2, 0.5, 0.5]), &options),
            Err(ColorError::UnknownGamutMethod("oklch.q".into()))
        );

        let options = GamutOptions {
            method: Some("nope.c".parse().expect("method")),
            ..GamutOptions::default()
        };
        assert_eq!(
            registry().to_gamut(("srgb", [1.2, 0.5, 0.5]), &options),
            Err(ColorError::UnknownSpace("nope".into()))
        );
    }

    #[test]
    fn delta_eok_treats_missing_as_zero() {
        let a = Color::new("oklab", 0.5, 0.1, None, 1.0);
        let b = Color::new("oklab", 0.5, 0.1, 0.0, 1.0);
        assert_component_eq!(registry().delta_eok(&a, &b).unwrap_or(1.0), 0.0);

        let c = Color::new("oklab", 0.5, 0.0, 0.0, 1.0);
        let d = Color::new("oklab", 0.5, 0.3, 0.4, 1.0);
        assert_component_eq!(registry().delta_eok(&c, &d).unwrap_or(0.0), 0.5);
    }
}
