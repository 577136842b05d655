use super::{FluidEntry, FluidId, FluidRegistry, fluid_tags};

pub const EMPTY: FluidEntry = FluidEntry {
    id: FluidId::Empty,
    name: "empty",
    translation_key: "block.minecraft.air",
};

pub const FLOWING_WATER: FluidEntry = FluidEntry {
    id: FluidId::Flowing_Water,
    name: "flowing_water",
    translation_key: "block.minecraft.water",
};

pub const WATER: FluidEntry = FluidEntry {
    id: FluidId::Water,
    name: "water",
    translation_key: "block.minecraft.water",
};

pub const FLOWING_LAVA: FluidEntry = FluidEntry {
    id: FluidId::Flowing_Lava,
    name: "flowing_lava",
    translation_key: "block.minecraft.lava",
};

pub const LAVA: FluidEntry = FluidEntry {
    id: FluidId::Lava,
    name: "lava",
    translation_key: "block.minecraft.lava",
};

/// Registers every vanilla fluid.
pub fn register_fluids(registry: &mut FluidRegistry) {
    for entry in [EMPTY, FLOWING_WATER, WATER, FLOWING_LAVA, LAVA] {
        registry.register(entry);
    }
}

/// Registers the vanilla `water` and `lava` fluid tags.
pub fn register_fluid_tags(registry: &mut FluidRegistry) {
    registry.register_tag(
        fluid_tags::water(),
        &[FluidId::Water, FluidId::Flowing_Water],
    );
    registry.register_tag(fluid_tags::lava(), &[FluidId::Lava, FluidId::Flowing_Lava]);
}
