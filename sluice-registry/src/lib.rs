//! # Sluice Registry
//!
//! Static game data the covers look things up in. Only fluids are needed here.

use std::sync::LazyLock;

pub mod fluid;

pub use fluid::{FluidEntry, FluidId, FluidRegistry, fluid_tags};

/// Common behaviour of the individual registries.
pub trait RegistryExt {
    /// Forbids any further registration.
    fn freeze(&mut self);
}

/// All registries, built once with the vanilla content.
pub struct Registry {
    /// The fluid registry.
    pub fluids: FluidRegistry,
}

impl Registry {
    /// Builds and freezes the vanilla registries.
    #[must_use]
    pub fn new_vanilla() -> Self {
        let mut fluids = FluidRegistry::new();
        fluid::vanilla::register_fluids(&mut fluids);
        fluid::vanilla::register_fluid_tags(&mut fluids);
        fluids.freeze();

        log::debug!("Fluid registry frozen with {} fluids", fluids.len());
        Self { fluids }
    }
}

/// The global registry.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new_vanilla);
