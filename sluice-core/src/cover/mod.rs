//! Covers: behaviours attached to one face of a machine block.
//!
//! A cover never owns the block it sits on. It talks to it through a [`CoverHolder`],
//! which the host implements, and it can put itself in front of the block's
//! capabilities on its face through [`CoverBehavior::get_capability`].

mod filtered_handler;
mod fluid_filter;

pub use filtered_handler::FilteredFluidHandler;
pub use fluid_filter::{CoverFluidFilter, FilterSettings, FluidFilterMode, MODE_WIDGET};

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use simdnbt::owned::NbtCompound;
use sluice_utils::Direction;
use uuid::Uuid;

use crate::fluid::SharedFluidHandler;

/// The block a cover is attached to, as seen by the cover.
pub trait CoverHolder: Send + Sync {
    /// Flags the block as needing to be saved.
    fn mark_dirty(&self);

    /// The fluid handler the block exposes on `side`, if any.
    fn fluid_handler(&self, side: Direction) -> Option<SharedFluidHandler>;

    /// Returns true on the client. Interactions only act on the server.
    fn is_client_side(&self) -> bool;

    /// Opens the window of the cover on `side` for a player.
    fn open_cover_ui(&self, side: Direction, player: Uuid);
}

/// Capability tokens a holder can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A [`crate::fluid::FluidHandler`].
    FluidHandler,
    /// An item container.
    ItemHandler,
    /// An energy store.
    Energy,
}

/// A capability implementation returned by a holder or a cover.
#[derive(Clone, Default)]
pub enum CapabilityHandle {
    /// The capability is not available.
    #[default]
    None,
    /// A fluid handler.
    Fluid(SharedFluidHandler),
    /// Any capability covers do not inspect.
    Other(Arc<dyn Any + Send + Sync>),
}

impl CapabilityHandle {
    /// Returns the fluid handler, if this is one.
    #[must_use]
    pub fn as_fluid(&self) -> Option<&SharedFluidHandler> {
        match self {
            Self::Fluid(handler) => Some(handler),
            _ => None,
        }
    }

    /// Returns true if this is [`CapabilityHandle::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for CapabilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Fluid(handler) => write!(f, "Fluid({:p})", Arc::as_ptr(handler)),
            Self::Other(_) => f.write_str("Other(..)"),
        }
    }
}

/// Outcome of a player interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResult {
    /// The interaction was handled.
    Success,
    /// The interaction was not handled and may fall through to the block.
    Pass,
    /// The interaction was handled and refused.
    Fail,
}

/// Behaviour of a cover attached to a block face.
pub trait CoverBehavior: Send + Sync {
    /// The face the cover is attached to.
    fn attached_side(&self) -> Direction;

    /// Whether the cover may be placed on its holder.
    fn can_attach(&self) -> bool;

    /// Whether pipes may still connect through the cover.
    fn can_pipe_pass_through(&self) -> bool {
        false
    }

    /// Called when a player uses a screwdriver on the cover.
    fn on_screwdriver_click(&mut self, _player: Uuid) -> InteractionResult {
        InteractionResult::Pass
    }

    /// Lets the cover replace the capability the holder exposes on its face.
    ///
    /// `default` is what the holder would expose without the cover. Covers return it
    /// unchanged for capabilities they do not care about.
    fn get_capability(
        &mut self,
        _capability: Capability,
        default: CapabilityHandle,
    ) -> CapabilityHandle {
        default
    }

    /// Writes the cover state.
    fn write_nbt(&self, nbt: &mut NbtCompound);

    /// Restores the cover state. Malformed data must not panic.
    fn read_nbt(&mut self, nbt: &NbtCompound);
}
