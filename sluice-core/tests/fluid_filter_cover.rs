//! End-to-end behaviour of a fluid filter cover sitting on a machine with one tank.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use simdnbt::owned::{NbtCompound, NbtTag};
use sluice_core::config::SluiceConfig;
use sluice_core::cover::{
    Capability, CapabilityHandle, CoverBehavior, CoverFluidFilter, CoverHolder, FluidFilterMode,
};
use sluice_core::filter::{FluidFilter, FluidPredicate, SimpleFluidFilter, TagFluidFilter};
use sluice_core::fluid::{
    FluidAction, FluidHandler, FluidStack, FluidTank, SharedFluidHandler, shared,
};
use sluice_registry::{FluidId, fluid_tags};
use sluice_utils::Direction;
use sluice_utils::logger;
use uuid::Uuid;

/// Records every call that reaches the machine's tank.
struct RecordingTank {
    tank: FluidTank,
    log: Arc<Mutex<Vec<String>>>,
}

impl FluidHandler for RecordingTank {
    fn tanks(&self) -> usize {
        self.tank.tanks()
    }

    fn fluid_in_tank(&self, tank: usize) -> FluidStack {
        self.tank.fluid_in_tank(tank)
    }

    fn tank_capacity(&self, tank: usize) -> i32 {
        self.tank.tank_capacity(tank)
    }

    fn is_fluid_valid(&self, tank: usize, stack: &FluidStack) -> bool {
        self.tank.is_fluid_valid(tank, stack)
    }

    fn fill(&mut self, resource: &FluidStack, action: FluidAction) -> i32 {
        self.log.lock().push(format!("fill {action:?}"));
        self.tank.fill(resource, action)
    }

    fn drain(&mut self, resource: &FluidStack, action: FluidAction) -> FluidStack {
        self.log.lock().push(format!("drain {action:?}"));
        self.tank.drain(resource, action)
    }

    fn drain_amount(&mut self, max_drain: i32, action: FluidAction) -> FluidStack {
        self.log.lock().push(format!("drain_amount {action:?}"));
        self.tank.drain_amount(max_drain, action)
    }
}

struct Machine {
    tank: SharedFluidHandler,
    log: Arc<Mutex<Vec<String>>>,
    dirty: AtomicUsize,
}

impl Machine {
    fn new(contents: FluidStack) -> Arc<Self> {
        let log = Arc::new(Mutex::new(Vec::new()));
        Arc::new(Self {
            tank: shared(RecordingTank {
                tank: FluidTank::with_fluid(8000, contents),
                log: log.clone(),
            }),
            log,
            dirty: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn contents(&self) -> FluidStack {
        self.tank.lock().fluid_in_tank(0)
    }
}

impl CoverHolder for Machine {
    fn mark_dirty(&self) {
        self.dirty.fetch_add(1, Ordering::Relaxed);
    }

    fn fluid_handler(&self, _side: Direction) -> Option<SharedFluidHandler> {
        Some(self.tank.clone())
    }

    fn is_client_side(&self) -> bool {
        false
    }

    fn open_cover_ui(&self, _side: Direction, _player: Uuid) {}
}

fn water(amount: i32) -> FluidStack {
    FluidStack::new(FluidId::Water, amount)
}

fn lava(amount: i32) -> FluidStack {
    FluidStack::new(FluidId::Lava, amount)
}

fn water_filter() -> FluidFilter {
    FluidFilter::from(SimpleFluidFilter::with_fluids(9, &[FluidId::Water]))
}

fn attach(machine: &Arc<Machine>, filter: FluidFilter) -> CoverFluidFilter {
    logger::init_for_tests();
    let holder: Arc<dyn CoverHolder> = machine.clone();
    CoverFluidFilter::with_config(
        Arc::downgrade(&holder),
        Direction::East,
        "cover.fluid_filter.title",
        filter,
        &SluiceConfig {
            log_filter_decisions: true,
            ..SluiceConfig::default()
        },
    )
}

fn filtered(machine: &Machine, cover: &mut CoverFluidFilter) -> SharedFluidHandler {
    let handle = cover.get_capability(
        Capability::FluidHandler,
        CapabilityHandle::Fluid(machine.tank.clone()),
    );
    match handle {
        CapabilityHandle::Fluid(handler) => handler,
        other => panic!("expected a fluid handler, got {other:?}"),
    }
}

#[test]
fn fill_only_blocks_stack_drains() {
    let machine = Machine::new(water(1000));
    let mut cover = attach(&machine, water_filter());
    let handler = filtered(&machine, &mut cover);

    assert!(handler.lock().drain(&water(100), FluidAction::Execute).is_empty());
    assert_eq!(handler.lock().fill(&water(100), FluidAction::Execute), 100);
    assert_eq!(handler.lock().fill(&lava(100), FluidAction::Execute), 0);

    assert_eq!(machine.calls(), vec!["fill Execute"]);
    assert_eq!(machine.contents(), water(1100));
}

#[test]
fn fill_only_passes_amount_drains_through_untested() {
    let machine = Machine::new(lava(500));
    let mut cover = attach(&machine, water_filter());
    let handler = filtered(&machine, &mut cover);

    assert_eq!(handler.lock().drain_amount(100, FluidAction::Execute), lava(100));
    assert_eq!(machine.calls(), vec!["drain_amount Execute"]);
    assert_eq!(machine.contents(), lava(400));
}

#[test]
fn drain_only_never_fills() {
    let machine = Machine::new(FluidStack::empty());
    let mut cover = attach(&machine, water_filter());
    cover.set_filter_mode(FluidFilterMode::FilterDrain);
    let handler = filtered(&machine, &mut cover);

    for action in [FluidAction::Execute, FluidAction::Simulate] {
        assert_eq!(handler.lock().fill(&water(100), action), 0);
        assert_eq!(handler.lock().fill(&lava(100), action), 0);
    }
    assert!(machine.calls().is_empty());
    assert!(machine.contents().is_empty());
}

#[test]
fn both_mode_filters_fills() {
    let machine = Machine::new(FluidStack::empty());
    let mut cover = attach(&machine, water_filter());
    cover.set_filter_mode(FluidFilterMode::FilterBoth);
    let handler = filtered(&machine, &mut cover);

    assert_eq!(handler.lock().fill(&water(100), FluidAction::Execute), 100);
    assert_eq!(handler.lock().fill(&lava(100), FluidAction::Execute), 0);
    assert_eq!(machine.calls(), vec!["fill Execute"]);
}

#[test]
fn drain_only_rejects_lava_without_committing() {
    let machine = Machine::new(lava(50));
    let mut cover = attach(&machine, water_filter());
    cover.set_filter_mode(FluidFilterMode::FilterDrain);
    let handler = filtered(&machine, &mut cover);

    assert!(handler.lock().drain_amount(50, FluidAction::Execute).is_empty());
    assert_eq!(machine.calls(), vec!["drain_amount Simulate"]);
    assert_eq!(machine.contents(), lava(50));
}

#[test]
fn accepted_amount_drain_simulates_then_commits_once() {
    let machine = Machine::new(water(500));
    let mut cover = attach(&machine, water_filter());
    cover.set_filter_mode(FluidFilterMode::FilterBoth);
    let handler = filtered(&machine, &mut cover);

    assert_eq!(handler.lock().drain_amount(200, FluidAction::Simulate), water(200));
    assert_eq!(machine.calls(), vec!["drain_amount Simulate"]);

    assert_eq!(handler.lock().drain_amount(200, FluidAction::Execute), water(200));
    assert_eq!(
        machine.calls(),
        vec![
            "drain_amount Simulate",
            "drain_amount Simulate",
            "drain_amount Execute",
        ]
    );
    assert_eq!(machine.contents(), water(300));
}

#[test]
fn blacklist_lets_everything_else_through() {
    let machine = Machine::new(FluidStack::empty());
    let mut deny_water = water_filter();
    deny_water.set_inverted(true);
    let mut cover = attach(&machine, deny_water);
    let handler = filtered(&machine, &mut cover);

    assert!(!cover.test_fluid_stack(&water(1)));
    assert!(cover.test_fluid_stack(&lava(1)));
    assert_eq!(handler.lock().fill(&water(100), FluidAction::Execute), 0);
    assert_eq!(handler.lock().fill(&lava(100), FluidAction::Execute), 100);
}

#[test]
fn tag_filter_accepts_flowing_variants() {
    let machine = Machine::new(FluidStack::empty());
    let mut cover = attach(
        &machine,
        FluidFilter::from(TagFluidFilter::new(Some(fluid_tags::lava()))),
    );
    let handler = filtered(&machine, &mut cover);

    let flowing_lava = FluidStack::new(FluidId::Flowing_Lava, 100);
    assert_eq!(handler.lock().fill(&flowing_lava, FluidAction::Simulate), 100);
    assert_eq!(handler.lock().fill(&water(100), FluidAction::Simulate), 0);
}

#[test]
fn state_survives_a_save_and_load() {
    let machine = Machine::new(FluidStack::empty());
    let mut cover = attach(&machine, water_filter());
    cover.set_filter_mode(FluidFilterMode::FilterDrain);
    cover.update_filter(|filter| {
        if let FluidFilter::Simple(simple) = filter {
            simple.add_fluid(FluidId::Flowing_Water);
        }
    });

    let mut nbt = NbtCompound::new();
    cover.write_nbt(&mut nbt);

    let mut loaded = attach(
        &machine,
        FluidFilter::from(SimpleFluidFilter::new(9)),
    );
    loaded.read_nbt(&nbt);

    assert_eq!(loaded.filter_mode(), FluidFilterMode::FilterDrain);
    for stack in [
        water(10),
        lava(10),
        FluidStack::new(FluidId::Flowing_Water, 10),
        FluidStack::new(FluidId::Flowing_Lava, 10),
        FluidStack::empty(),
    ] {
        assert_eq!(loaded.test_fluid_stack(&stack), cover.test_fluid_stack(&stack));
    }
}

#[test]
fn saved_tag_filter_replaces_a_simple_one() {
    let machine = Machine::new(FluidStack::empty());
    let mut saved = attach(
        &machine,
        FluidFilter::from(TagFluidFilter::new(Some(fluid_tags::lava()))),
    );
    saved.set_filter_mode(FluidFilterMode::FilterBoth);
    let mut nbt = NbtCompound::new();
    saved.write_nbt(&mut nbt);

    let mut cover = attach(&machine, water_filter());
    cover.read_nbt(&nbt);

    assert_eq!(cover.filter(), saved.filter());
    assert!(!cover.filter().is_inverted());
    assert!(cover.test_fluid_stack(&lava(1)));
    assert!(!cover.test_fluid_stack(&water(1)));
}

#[test]
fn legacy_blacklist_flag_overrides_the_filter() {
    let machine = Machine::new(FluidStack::empty());
    let mut filter_nbt = NbtCompound::new();
    water_filter().write_nbt(&mut filter_nbt);

    let mut nbt = NbtCompound::new();
    nbt.insert("FilterMode", NbtTag::Int(2));
    nbt.insert("Filter", NbtTag::Compound(filter_nbt));
    nbt.insert("IsBlacklist", NbtTag::Byte(1));

    let mut cover = attach(&machine, FluidFilter::from(SimpleFluidFilter::new(9)));
    cover.read_nbt(&nbt);

    assert_eq!(cover.filter_mode(), FluidFilterMode::FilterBoth);
    assert!(cover.filter().is_inverted());
    assert!(!cover.test_fluid_stack(&water(1)));
    assert!(cover.test_fluid_stack(&lava(1)));
}

#[test]
fn corrupt_state_fails_safe() {
    let machine = Machine::new(FluidStack::empty());

    let mut nbt = NbtCompound::new();
    nbt.insert("FilterMode", NbtTag::Int(7));
    nbt.insert("Filter", NbtTag::Int(3));

    let mut cover = attach(&machine, water_filter());
    cover.set_filter_mode(FluidFilterMode::FilterBoth);
    cover.read_nbt(&nbt);

    assert_eq!(cover.filter_mode(), FluidFilterMode::FilterFill);
    assert!(cover.test_fluid_stack(&water(1)));
    assert!(cover.test_fluid_stack(&lava(1)));

    let mut nbt = NbtCompound::new();
    nbt.insert("FilterMode", NbtTag::Int(-1));
    cover.read_nbt(&nbt);
    assert_eq!(cover.filter_mode(), FluidFilterMode::FilterFill);
}

#[test]
fn replaced_tank_gets_a_fresh_wrapper() {
    let machine = Machine::new(FluidStack::empty());
    let mut cover = attach(&machine, water_filter());

    let first = filtered(&machine, &mut cover);
    let again = filtered(&machine, &mut cover);
    assert!(Arc::ptr_eq(&first, &again));

    let replacement = Machine::new(FluidStack::empty());
    let swapped = filtered(&replacement, &mut cover);
    assert!(!Arc::ptr_eq(&first, &swapped));

    assert_eq!(swapped.lock().fill(&water(100), FluidAction::Execute), 100);
    assert_eq!(replacement.contents(), water(100));
    assert!(machine.contents().is_empty());
}

#[test]
fn setters_mark_the_machine_dirty() {
    let machine = Machine::new(FluidStack::empty());
    let mut cover = attach(&machine, water_filter());

    cover.set_filter_mode(FluidFilterMode::FilterBoth);
    cover.set_filter(FluidFilter::from(TagFluidFilter::new(None)));
    assert_eq!(machine.dirty.load(Ordering::Relaxed), 2);

    let mut nbt = NbtCompound::new();
    cover.write_nbt(&mut nbt);
    cover.read_nbt(&nbt);
    assert_eq!(machine.dirty.load(Ordering::Relaxed), 2);
}
