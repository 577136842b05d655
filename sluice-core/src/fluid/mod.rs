//! Fluid storage and transfer.

mod handler;
mod stack;
mod tank;

pub use handler::{FluidAction, FluidHandler, SharedFluidHandler, shared};
pub use stack::{BUCKET_VOLUME, FluidStack};
pub use tank::FluidTank;
