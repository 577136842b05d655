//! The fluid handler capability.

use std::sync::Arc;

use parking_lot::Mutex;

use super::FluidStack;

/// Whether a transfer is performed or only simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidAction {
    /// Perform the transfer.
    Execute,
    /// Report what the transfer would do without changing anything.
    Simulate,
}

impl FluidAction {
    /// Returns true for [`FluidAction::Execute`].
    #[must_use]
    pub const fn execute(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// Returns true for [`FluidAction::Simulate`].
    #[must_use]
    pub const fn simulate(self) -> bool {
        matches!(self, Self::Simulate)
    }
}

impl From<bool> for FluidAction {
    /// Converts a "commit" flag.
    fn from(commit: bool) -> Self {
        if commit { Self::Execute } else { Self::Simulate }
    }
}

/// Anything that stores fluid and lets it be filled or drained.
///
/// This is the fluid counterpart of an item container: tanks, machines and the
/// wrappers covers put in front of them all implement it.
pub trait FluidHandler: Send + Sync {
    /// Number of tanks.
    fn tanks(&self) -> usize;

    /// Contents of a tank. Out-of-range tanks are empty.
    fn fluid_in_tank(&self, tank: usize) -> FluidStack;

    /// Capacity of a tank in millibuckets.
    fn tank_capacity(&self, tank: usize) -> i32;

    /// Returns whether the fluid may be stored in the tank at all.
    fn is_fluid_valid(&self, tank: usize, stack: &FluidStack) -> bool;

    /// Fills fluid in. Returns the amount that was (or would be) accepted.
    fn fill(&mut self, resource: &FluidStack, action: FluidAction) -> i32;

    /// Drains up to `resource.amount()` of `resource`'s fluid.
    fn drain(&mut self, resource: &FluidStack, action: FluidAction) -> FluidStack;

    /// Drains up to `max_drain` of whatever fluid the handler chooses.
    fn drain_amount(&mut self, max_drain: i32, action: FluidAction) -> FluidStack;
}

/// A shared fluid handler as hosts hand them out.
///
/// Two handles refer to the same handler exactly when `Arc::ptr_eq` holds.
pub type SharedFluidHandler = Arc<Mutex<dyn FluidHandler>>;

/// Wraps a handler into a [`SharedFluidHandler`].
pub fn shared<H: FluidHandler + 'static>(handler: H) -> SharedFluidHandler {
    Arc::new(Mutex::new(handler))
}
