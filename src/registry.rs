//! The registry of color spaces and their formats.
//!
//! Registration happens on a [`RegistryBuilder`]. Calling
//! [`RegistryBuilder::seal`] validates the space graph and produces an
//! immutable [`Registry`] that every operation reads from. A sealed registry
//! never changes, so it can be shared freely between threads.
//!
//! ```rust
//! use colorway::{Registry, SerializeOptions};
//! let registry = Registry::builtin();
//! let text = registry
//!     .serialize(("srgb", [1.0, 0.0, 0.0]), &SerializeOptions::default())
//!     .unwrap();
//! assert_eq!(text, "color(srgb 1 0 0)");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::color::{Color, ColorInput, Component, SpaceId};
use crate::error::{ColorError, ColorResult};
use crate::format::Format;
use crate::space::SpaceDescriptor;

/// Default precision, in significant digits, used when serializing.
pub const DEFAULT_PRECISION: u32 = 5;

/// Default tolerance of the gamut check.
pub const DEFAULT_EPSILON: Component = 0.000075;

/// The id of the default hub space.
pub const DEFAULT_HUB: &str = "xyz-d65";

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Settings used when an operation does not specify them.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults {
    /// Significant digits used when serializing.
    pub precision: u32,
    /// Tolerance of the gamut check.
    pub epsilon: Component,
    /// Format id used when serializing.
    pub format: Cow<'static, str>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            epsilon: DEFAULT_EPSILON,
            format: Cow::Borrowed("default"),
        }
    }
}

/// Collects spaces and formats before the registry is sealed.
#[derive(Debug)]
pub struct RegistryBuilder {
    spaces: Vec<SpaceDescriptor>,
    hub: SpaceId,
    defaults: Defaults,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// An empty builder using `xyz-d65` as the hub.
    pub fn new() -> Self {
        Self {
            spaces: vec![],
            hub: SpaceId::new(DEFAULT_HUB),
            defaults: Defaults::default(),
        }
    }

    /// A builder with all the built-in spaces registered.
    pub fn with_builtins() -> ColorResult<Self> {
        let mut builder = Self::new();
        for space in crate::spaces::builtin() {
            builder.register(space)?;
        }
        Ok(builder)
    }

    /// Set the hub space used to route conversions between spaces with no
    /// direct edge.
    pub fn hub(mut self, hub: impl Into<SpaceId>) -> Self {
        self.hub = hub.into();
        self
    }

    /// Set the defaults used by operations.
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Register a space. Fails if its id or any of its aliases is already
    /// taken.
    pub fn register(&mut self, space: SpaceDescriptor) -> ColorResult<&mut Self> {
        for id in space.all_ids() {
            if self.find(id).is_some() {
                return Err(ColorError::DuplicateSpace(id.to_string()));
            }
        }

        debug!(space = %space.id(), formats = space.formats().len(), "registering color space");
        self.spaces.push(space);
        Ok(self)
    }

    /// Add a format to the catalog of an already registered space.
    pub fn register_format(&mut self, space: &str, mut format: Format) -> ColorResult<&mut Self> {
        let index = self
            .find(space)
            .ok_or_else(|| ColorError::UnknownSpace(space.to_string()))?;
        let space = &mut self.spaces[index];
        if format.space.is_none() {
            format.space = Some(space.id.clone());
        }

        debug!(space = %space.id(), format = %format.id, "registering format");
        space.formats.push(format);
        Ok(self)
    }

    fn find(&self, id: &str) -> Option<usize> {
        self.spaces
            .iter()
            .position(|space| space.all_ids().any(|other| other == id))
    }

    /// Validate the space graph and end the registration phase.
    pub fn seal(self) -> ColorResult<Registry> {
        let registry = Registry::from_parts(self.spaces, self.hub, self.defaults);

        registry.lookup(registry.hub.as_str())?;

        for space in &registry.spaces {
            for edge in space.edges().iter().chain(space.base_edge()) {
                registry.lookup(edge.target.as_str())?;
            }

            let chain = registry.base_chain(space);
            let root = chain.last().map(|s| s.id()).unwrap_or(space.id());
            if chain.len() > registry.spaces.len()
                || chain.last().and_then(|s| s.base_edge()).is_some()
            {
                return Err(ColorError::NoConversionPath {
                    from: space.id().to_string(),
                    to: registry.hub.to_string(),
                });
            }
            if *root != registry.hub {
                warn!(space = %space.id(), root = %root, "color space does not reach the hub");
            }
        }

        debug!(spaces = registry.spaces.len(), hub = %registry.hub, "sealed color space registry");
        Ok(registry)
    }
}

/// An immutable set of color spaces and formats.
#[derive(Debug)]
pub struct Registry {
    spaces: Vec<SpaceDescriptor>,
    index: HashMap<String, usize>,
    hub: SpaceId,
    defaults: Defaults,
}

impl Registry {
    fn from_parts(spaces: Vec<SpaceDescriptor>, hub: SpaceId, defaults: Defaults) -> Self {
        let mut index = HashMap::new();
        for (i, space) in spaces.iter().enumerate() {
            for id in space.all_ids() {
                index.entry(id.to_string()).or_insert(i);
            }
        }

        Self {
            spaces,
            index,
            hub,
            defaults,
        }
    }

    /// A sealed registry holding the built-in spaces.
    pub fn builtin() -> Self {
        RegistryBuilder::with_builtins()
            .and_then(RegistryBuilder::seal)
            .expect("built-in color spaces form a valid registry")
    }

    /// The process-wide registry. Unless another registry was installed
    /// before the first call, this holds the built-in spaces.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::builtin)
    }

    /// Install `registry` as the process-wide registry. This must happen
    /// before the first call to [`Registry::global`]; afterwards the registry
    /// is handed back.
    pub fn install(registry: Registry) -> Result<(), Registry> {
        GLOBAL.set(registry)
    }

    /// Look up a space by id, CSS id or alias.
    pub fn lookup(&self, id: &str) -> ColorResult<&SpaceDescriptor> {
        self.get(id)
            .ok_or_else(|| ColorError::UnknownSpace(id.to_string()))
    }

    /// Look up a space by id, CSS id or alias.
    pub fn get(&self, id: &str) -> Option<&SpaceDescriptor> {
        self.index.get(id).map(|&i| &self.spaces[i])
    }

    /// All spaces in registration order.
    pub fn spaces(&self) -> impl Iterator<Item = &SpaceDescriptor> {
        self.spaces.iter()
    }

    /// All formats with the space that owns them, in registration order.
    pub fn formats(&self) -> impl Iterator<Item = (&SpaceDescriptor, &Format)> {
        self.spaces
            .iter()
            .flat_map(|space| space.formats().iter().map(move |format| (space, format)))
    }

    /// Find the first format with the given id in any space.
    pub fn find_format(&self, id: &str) -> Option<&Format> {
        self.formats()
            .find(|(_, format)| format.id == id)
            .map(|(_, format)| format)
    }

    /// The hub space conversions are routed through.
    pub fn hub(&self) -> &SpaceId {
        &self.hub
    }

    /// The defaults used by operations.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// The chain of spaces from `space` following base edges up to a root.
    pub(crate) fn base_chain<'r>(&'r self, space: &'r SpaceDescriptor) -> Vec<&'r SpaceDescriptor> {
        let mut chain = vec![space];
        let mut current = space;
        while let Some(base) = current.base_edge().and_then(|e| self.get(e.target.as_str())) {
            chain.push(base);
            if chain.len() > self.spaces.len() {
                break;
            }
            current = base;
        }
        chain
    }

    /// Turn any supported input into a color in a registered space.
    pub fn normalize<'a>(&self, input: impl Into<ColorInput<'a>>) -> ColorResult<Color> {
        match input.into() {
            ColorInput::Color(color) => {
                let space = self.lookup(color.space.as_str())?;
                check_finite(&color.coords(), color.alpha(), space.id())?;
                Ok(Color::from_coords(
                    space.id().clone(),
                    color.coords(),
                    color.alpha().map(|a| a.clamp(0.0, 1.0)),
                ))
            }
            ColorInput::Text(text) => self.parse(text),
            ColorInput::Parts {
                space,
                coords,
                alpha,
            } => {
                let space = self.lookup(space)?;
                check_finite(&coords, alpha, space.id())?;
                Ok(Color::from_coords(
                    space.id().clone(),
                    coords,
                    alpha.map(|a| a.clamp(0.0, 1.0)),
                ))
            }
        }
    }
}

fn check_finite(
    coords: &[Option<Component>; 3],
    alpha: Option<Component>,
    space: &SpaceId,
) -> ColorResult<()> {
    if let Some(value) = coords.iter().flatten().find(|c| !c.is_finite()) {
        return Err(ColorError::InvalidColorInput(format!(
            "coordinate {value} in {space} is not a finite number"
        )));
    }
    if let Some(alpha) = alpha.filter(|a| !a.is_finite()) {
        return Err(ColorError::InvalidColorInput(format!(
            "alpha {alpha} in {space} is not a finite number"
        )));
    }
    Ok(())
}
