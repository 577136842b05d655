//! A filter holding a fixed number of fluid slots.

use simdnbt::owned::{NbtCompound, NbtList, NbtTag};
use sluice_registry::{FluidId, REGISTRY};
use sluice_utils::nbt::{NbtReadError, nbt_i32, nbt_string};

use super::FluidPredicate;
use crate::config::SluiceConfig;
use crate::fluid::FluidStack;
use crate::ui::{Pos2d, SLOT_SIZE, Widget, WidgetValue};

/// Largest number of slots a simple filter may have.
pub const MAX_SIMPLE_FILTER_SIZE: usize = 36;

/// Slots per row in the filter panel.
const SLOTS_PER_ROW: usize = 3;

const SLOT_WIDGET_PREFIX: &str = "filter/slot/";

/// Matches stacks whose fluid sits in one of its slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleFluidFilter {
    slots: Vec<Option<FluidId>>,
    inverted: bool,
}

impl SimpleFluidFilter {
    /// Creates an empty allow-list with `size` slots, clamped to `1..=36`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size.clamp(1, MAX_SIMPLE_FILTER_SIZE)],
            inverted: false,
        }
    }

    /// Creates an empty filter sized by the configuration.
    #[must_use]
    pub fn from_config(config: &SluiceConfig) -> Self {
        Self::new(config.simple_filter_size)
    }

    /// Creates an allow-list pre-filled with `fluids`. Extra fluids are dropped.
    #[must_use]
    pub fn with_fluids(size: usize, fluids: &[FluidId]) -> Self {
        let mut filter = Self::new(size);
        for fluid in fluids {
            filter.add_fluid(*fluid);
        }
        filter
    }

    /// Number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// The fluid in a slot.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<FluidId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Sets a slot. Returns false if the slot does not exist.
    pub fn set_slot(&mut self, slot: usize, fluid: Option<FluidId>) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        *entry = fluid.filter(|fluid| !fluid.is_empty());
        true
    }

    /// Puts `fluid` in the first free slot unless it is already listed.
    ///
    /// Returns false if the filter is full or the fluid is the empty fluid.
    pub fn add_fluid(&mut self, fluid: FluidId) -> bool {
        if fluid.is_empty() {
            return false;
        }
        if self.slots.contains(&Some(fluid)) {
            return true;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(fluid);
                true
            }
            None => false,
        }
    }

    /// Iterates over the listed fluids.
    pub fn fluids(&self) -> impl Iterator<Item = FluidId> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }
}

impl FluidPredicate for SimpleFluidFilter {
    fn test(&self, stack: &FluidStack) -> bool {
        !stack.is_empty() && self.slots.contains(&Some(stack.fluid()))
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    fn filter_type(&self) -> &'static str {
        "simple"
    }

    fn clear(&mut self) {
        self.slots.fill(None);
    }

    fn write_contents(&self, nbt: &mut NbtCompound) {
        let mut fluids: Vec<NbtCompound> = Vec::new();
        for (slot, fluid) in self.slots.iter().enumerate() {
            let Some(entry) = fluid.and_then(|fluid| REGISTRY.fluids.get(fluid)) else {
                continue;
            };
            let mut fluid_nbt = NbtCompound::new();
            fluid_nbt.insert("Slot", NbtTag::Byte(slot as i8));
            fluid_nbt.insert("FluidName", NbtTag::String(entry.name.to_string().into()));
            fluids.push(fluid_nbt);
        }
        nbt.insert("Fluids", NbtTag::List(NbtList::Compound(fluids)));
    }

    fn read_contents(&mut self, nbt: &NbtCompound) -> Result<(), NbtReadError> {
        let mut slots = vec![None; self.slots.len()];

        let compounds: &[NbtCompound] = match nbt.get("Fluids") {
            None | Some(NbtTag::List(NbtList::Empty)) => &[],
            Some(NbtTag::List(NbtList::Compound(compounds))) => compounds,
            Some(_) => {
                return Err(NbtReadError::WrongType {
                    key: "Fluids",
                    expected: "compound list",
                });
            }
        };

        for compound in compounds {
            let slot = compound.get("Slot").and_then(nbt_i32);
            let name = compound.get("FluidName").and_then(nbt_string);
            let (Some(slot), Some(name)) = (slot, name) else {
                log::warn!("Skipping fluid filter entry without Slot or FluidName");
                continue;
            };

            let Some(target) = usize::try_from(slot).ok().and_then(|s| slots.get_mut(s)) else {
                log::warn!("Skipping fluid filter entry for slot {slot} outside the filter");
                continue;
            };

            match REGISTRY.fluids.get_by_name(&name) {
                Some(fluid) if !fluid.is_empty() => *target = Some(fluid),
                _ => log::warn!("Skipping unknown fluid `{name}` in fluid filter"),
            }
        }

        self.slots = slots;
        Ok(())
    }

    fn contents_ui(&self) -> Vec<Widget> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, fluid)| Widget::FluidSlot {
                id: format!("{SLOT_WIDGET_PREFIX}{slot}"),
                fluid: *fluid,
                label: fluid
                    .and_then(|fluid| REGISTRY.fluids.get(fluid))
                    .map(|entry| entry.translation_key),
                pos: Pos2d::new(
                    (slot % SLOTS_PER_ROW) as i32 * SLOT_SIZE,
                    (slot / SLOTS_PER_ROW) as i32 * SLOT_SIZE,
                ),
            })
            .collect()
    }

    fn handle_contents_widget(&mut self, id: &str, value: &WidgetValue) -> bool {
        let Some(slot) = id
            .strip_prefix(SLOT_WIDGET_PREFIX)
            .and_then(|slot| slot.parse::<usize>().ok())
        else {
            return false;
        };
        match value {
            WidgetValue::Fluid(fluid) => self.set_slot(slot, *fluid),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped() {
        assert_eq!(SimpleFluidFilter::new(0).size(), 1);
        assert_eq!(SimpleFluidFilter::new(100).size(), MAX_SIMPLE_FILTER_SIZE);
        assert_eq!(
            SimpleFluidFilter::from_config(&SluiceConfig::default()).size(),
            9
        );
    }

    #[test]
    fn add_fluid_deduplicates_and_fills_up() {
        let mut filter = SimpleFluidFilter::new(2);
        assert!(filter.add_fluid(FluidId::Water));
        assert!(filter.add_fluid(FluidId::Water));
        assert!(filter.add_fluid(FluidId::Lava));
        assert!(!filter.add_fluid(FluidId::Flowing_Lava));
        assert!(!filter.add_fluid(FluidId::Empty));
        assert_eq!(
            filter.fluids().collect::<Vec<_>>(),
            vec![FluidId::Water, FluidId::Lava]
        );
    }

    #[test]
    fn test_ignores_amount_but_not_emptiness() {
        let filter = SimpleFluidFilter::with_fluids(9, &[FluidId::Water]);
        assert!(filter.test(&FluidStack::new(FluidId::Water, 1)));
        assert!(filter.test(&FluidStack::new(FluidId::Water, 64_000)));
        assert!(!filter.test(&FluidStack::new(FluidId::Water, 0)));
        assert!(!filter.test(&FluidStack::new(FluidId::Flowing_Water, 10)));
    }

    #[test]
    fn read_skips_bad_entries() {
        let mut entries = Vec::new();
        for (slot, name) in [(0i8, "lava"), (1, "steam"), (40, "water")] {
            let mut entry = NbtCompound::new();
            entry.insert("Slot", NbtTag::Byte(slot));
            entry.insert("FluidName", NbtTag::String(name.to_string().into()));
            entries.push(entry);
        }
        entries.push(NbtCompound::new());

        let mut nbt = NbtCompound::new();
        nbt.insert("Fluids", NbtTag::List(NbtList::Compound(entries)));

        let mut filter = SimpleFluidFilter::with_fluids(9, &[FluidId::Water]);
        filter.read_contents(&nbt).unwrap();
        assert_eq!(filter.fluids().collect::<Vec<_>>(), vec![FluidId::Lava]);
    }

    #[test]
    fn read_rejects_wrong_list_type() {
        let mut nbt = NbtCompound::new();
        nbt.insert("Fluids", NbtTag::Int(3));

        let mut filter = SimpleFluidFilter::with_fluids(9, &[FluidId::Water]);
        assert!(filter.read_contents(&nbt).is_err());
        assert_eq!(filter.slot(0), Some(FluidId::Water));
    }

    #[test]
    fn slot_widgets_are_laid_out_in_rows() {
        let mut filter = SimpleFluidFilter::new(9);
        let widgets = filter.contents_ui();
        assert_eq!(widgets.len(), 9);
        assert_eq!(widgets[4].pos(), Pos2d::new(SLOT_SIZE, SLOT_SIZE));
        assert!(matches!(&widgets[0], Widget::FluidSlot { label: None, .. }));

        assert!(filter.handle_contents_widget(
            "filter/slot/4",
            &WidgetValue::Fluid(Some(FluidId::Lava))
        ));
        assert_eq!(filter.slot(4), Some(FluidId::Lava));
        assert!(matches!(
            &filter.contents_ui()[4],
            Widget::FluidSlot { label: Some("block.minecraft.lava"), .. }
        ));
        assert!(!filter.handle_contents_widget(
            "filter/slot/9",
            &WidgetValue::Fluid(Some(FluidId::Lava))
        ));
        assert!(!filter.handle_contents_widget("filter/tag", &WidgetValue::Text(String::new())));
    }
}
