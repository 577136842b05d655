/// Fluid ID - uses raw registry ID (u16) to match vanilla
/// Vanilla IDs:
///   0 = Empty
///   1 = Flowing_Water
///   2 = Water
///   3 = Flowing_Lava
///   4 = Lava
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FluidId(pub u16);

impl FluidId {
    /// Returns true if this is the empty fluid
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// A registered fluid.
#[derive(Debug, Clone)]
pub struct FluidEntry {
    /// Raw registry id.
    pub id: FluidId,
    /// Path of the fluid key, also used as the persisted fluid name.
    pub name: &'static str,
    /// Translation key shown in filter slots.
    pub translation_key: &'static str,
}
