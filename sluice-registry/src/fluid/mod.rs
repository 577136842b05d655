pub mod fluid;
pub mod fluid_tags;
pub mod registry;
pub mod vanilla;

pub use fluid::*;
pub use registry::*;

#[allow(non_upper_case_globals)]
impl FluidId {
    pub const Empty: FluidId = FluidId(0);
    pub const Flowing_Water: FluidId = FluidId(1);
    pub const Water: FluidId = FluidId(2);
    pub const Flowing_Lava: FluidId = FluidId(3);
    pub const Lava: FluidId = FluidId(4);
}
