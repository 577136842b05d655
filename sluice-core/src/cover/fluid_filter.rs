//! The fluid filter cover.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::Deserialize;
use simdnbt::owned::{NbtCompound, NbtTag};
use sluice_utils::Direction;
use sluice_utils::nbt::{NbtReadError, read_bool, read_compound, read_i32};
use uuid::Uuid;

use super::{
    Capability, CapabilityHandle, CoverBehavior, CoverHolder, FilteredFluidHandler,
    InteractionResult,
};
use crate::config::{SLUICE_CONFIG, SluiceConfig};
use crate::filter::{FluidFilter, FluidPredicate};
use crate::fluid::{FluidStack, SharedFluidHandler, shared};
use crate::ui::{
    CoverWindow, CoverWithUi, Pos2d, Size, WINDOW_HEIGHT, WINDOW_WIDTH, Widget, WidgetValue,
};

/// Binding id of the mode cycle button.
pub const MODE_WIDGET: &str = "filter_mode";

/// Which transfer directions the cover filters.
///
/// The ordinal is what gets persisted, so the variant order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FluidFilterMode {
    /// Filtered fills pass, drains are blocked.
    #[default]
    #[serde(rename = "fill")]
    FilterFill,
    /// Filtered drains pass, fills are blocked.
    #[serde(rename = "drain")]
    FilterDrain,
    /// Filtered fills and drains both pass.
    #[serde(rename = "both")]
    FilterBoth,
}

impl FluidFilterMode {
    /// All modes in ordinal order.
    pub const ALL: [FluidFilterMode; 3] = [Self::FilterFill, Self::FilterDrain, Self::FilterBoth];

    /// The persisted ordinal.
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    /// Looks a mode up by ordinal.
    #[must_use]
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    /// Translation key shown on the cycle button.
    #[must_use]
    pub const fn translation_key(self) -> &'static str {
        match self {
            Self::FilterFill => "cover.fluid_filter.mode.filter_fill",
            Self::FilterDrain => "cover.fluid_filter.mode.filter_drain",
            Self::FilterBoth => "cover.fluid_filter.mode.filter_both",
        }
    }

    /// The mode after this one on the cycle button.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::FilterFill => Self::FilterDrain,
            Self::FilterDrain => Self::FilterBoth,
            Self::FilterBoth => Self::FilterFill,
        }
    }

    /// Whether fills are subject to the filter rather than blocked.
    #[must_use]
    pub const fn allows_fill(self) -> bool {
        !matches!(self, Self::FilterDrain)
    }

    /// Whether drains are subject to the filter rather than blocked.
    #[must_use]
    pub const fn allows_drain(self) -> bool {
        !matches!(self, Self::FilterFill)
    }
}

/// Mode and filter of a cover, shared with the handlers it hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    /// The transfer mode.
    pub mode: FluidFilterMode,
    /// The filter.
    pub filter: FluidFilter,
}

/// The last wrapper built, keyed by the handler it wraps.
struct CachedHandler {
    delegate: SharedFluidHandler,
    filtered: SharedFluidHandler,
}

/// A cover that only lets fluids through that its filter accepts.
pub struct CoverFluidFilter {
    holder: Weak<dyn CoverHolder>,
    attached_side: Direction,
    title_key: String,
    settings: Arc<RwLock<FilterSettings>>,
    log_decisions: bool,
    fluid_handler: Option<CachedHandler>,
}

impl CoverFluidFilter {
    /// Creates a cover using the global configuration.
    #[must_use]
    pub fn new(
        holder: Weak<dyn CoverHolder>,
        attached_side: Direction,
        title_key: impl Into<String>,
        filter: FluidFilter,
    ) -> Self {
        Self::with_config(holder, attached_side, title_key, filter, &SLUICE_CONFIG)
    }

    /// Creates a cover using an explicit configuration.
    #[must_use]
    pub fn with_config(
        holder: Weak<dyn CoverHolder>,
        attached_side: Direction,
        title_key: impl Into<String>,
        filter: FluidFilter,
        config: &SluiceConfig,
    ) -> Self {
        Self {
            holder,
            attached_side,
            title_key: title_key.into(),
            settings: Arc::new(RwLock::new(FilterSettings {
                mode: config.default_filter_mode,
                filter,
            })),
            log_decisions: config.log_filter_decisions,
            fluid_handler: None,
        }
    }

    fn mark_dirty(&self) {
        if let Some(holder) = self.holder.upgrade() {
            holder.mark_dirty();
        }
    }

    /// Replaces the mode and marks the holder dirty.
    pub fn set_filter_mode(&mut self, mode: FluidFilterMode) {
        self.settings.write().mode = mode;
        self.mark_dirty();
    }

    /// The current mode.
    #[must_use]
    pub fn filter_mode(&self) -> FluidFilterMode {
        self.settings.read().mode
    }

    /// Advances the mode the way the cycle button does.
    pub fn cycle_filter_mode(&mut self) -> FluidFilterMode {
        let next = self.filter_mode().next();
        self.set_filter_mode(next);
        next
    }

    /// A copy of the current filter.
    #[must_use]
    pub fn filter(&self) -> FluidFilter {
        self.settings.read().filter.clone()
    }

    /// Replaces the filter and marks the holder dirty.
    pub fn set_filter(&mut self, filter: FluidFilter) {
        self.settings.write().filter = filter;
        self.mark_dirty();
    }

    /// Edits the filter in place and marks the holder dirty.
    pub fn update_filter<R>(&mut self, edit: impl FnOnce(&mut FluidFilter) -> R) -> R {
        let result = edit(&mut self.settings.write().filter);
        self.mark_dirty();
        result
    }

    /// Tests a stack against the filter without transferring anything.
    #[must_use]
    pub fn test_fluid_stack(&self, stack: &FluidStack) -> bool {
        self.settings.read().filter.matches(stack)
    }

    /// The translation key of the window title.
    #[must_use]
    pub fn title_key(&self) -> &str {
        &self.title_key
    }

    fn read_mode(nbt: &NbtCompound) -> Result<FluidFilterMode, NbtReadError> {
        // An absent tag reads as ordinal 0, like any unset int.
        let ordinal = read_i32(nbt, "FilterMode")?.unwrap_or(0);
        FluidFilterMode::from_ordinal(ordinal).ok_or(NbtReadError::OutOfRange {
            key: "FilterMode",
            value: ordinal,
            min: 0,
            max: FluidFilterMode::ALL.len() as i32 - 1,
        })
    }

    fn read_filter(filter: &mut FluidFilter, nbt: &NbtCompound) -> Result<(), NbtReadError> {
        match read_compound(nbt, "Filter")? {
            Some(filter_nbt) => filter.read_nbt(filter_nbt),
            None => filter.read_nbt(&NbtCompound::new()),
        }
    }
}

impl CoverBehavior for CoverFluidFilter {
    fn attached_side(&self) -> Direction {
        self.attached_side
    }

    fn can_attach(&self) -> bool {
        self.holder
            .upgrade()
            .is_some_and(|holder| holder.fluid_handler(self.attached_side).is_some())
    }

    fn can_pipe_pass_through(&self) -> bool {
        true
    }

    fn on_screwdriver_click(&mut self, player: Uuid) -> InteractionResult {
        if let Some(holder) = self.holder.upgrade()
            && !holder.is_client_side()
        {
            holder.open_cover_ui(self.attached_side, player);
        }
        InteractionResult::Success
    }

    fn get_capability(
        &mut self,
        capability: Capability,
        default: CapabilityHandle,
    ) -> CapabilityHandle {
        if capability != Capability::FluidHandler {
            return default;
        }
        let CapabilityHandle::Fluid(delegate) = default else {
            // The holder lost its tank; drop the wrapper so the old one can be freed.
            self.fluid_handler = None;
            return default;
        };

        if let Some(cached) = &self.fluid_handler
            && Arc::ptr_eq(&cached.delegate, &delegate)
        {
            return CapabilityHandle::Fluid(cached.filtered.clone());
        }

        let filtered = shared(FilteredFluidHandler::new(
            delegate.clone(),
            self.settings.clone(),
            self.log_decisions,
        ));
        self.fluid_handler = Some(CachedHandler {
            delegate,
            filtered: filtered.clone(),
        });
        CapabilityHandle::Fluid(filtered)
    }

    fn write_nbt(&self, nbt: &mut NbtCompound) {
        let settings = self.settings.read();
        nbt.insert("FilterMode", NbtTag::Int(settings.mode.ordinal()));

        let mut filter_nbt = NbtCompound::new();
        settings.filter.write_nbt(&mut filter_nbt);
        nbt.insert("Filter", NbtTag::Compound(filter_nbt));
    }

    fn read_nbt(&mut self, nbt: &NbtCompound) {
        let mut settings = self.settings.write();

        settings.mode = Self::read_mode(nbt).unwrap_or_else(|err| {
            log::warn!(
                "Fluid filter cover on {} has a bad mode ({err}), using {:?}",
                self.attached_side.name(),
                FluidFilterMode::default()
            );
            FluidFilterMode::default()
        });

        if let Err(err) = Self::read_filter(&mut settings.filter, nbt) {
            log::warn!(
                "Fluid filter cover on {} has a bad filter ({err}), resetting it",
                self.attached_side.name()
            );
            settings.filter.reset_to_match_all();
        }

        // Older saves stored only a blacklist flag; it wins over the filter's own.
        match read_bool(nbt, "IsBlacklist") {
            Ok(Some(is_blacklist)) => settings.filter.set_inverted(is_blacklist),
            Ok(None) => {}
            Err(err) => log::warn!("Ignoring legacy blacklist flag: {err}"),
        }
    }
}

impl CoverWithUi for CoverFluidFilter {
    fn create_window(&self) -> CoverWindow {
        let settings = self.settings.read();
        CoverWindow::builder(WINDOW_WIDTH, WINDOW_HEIGHT)
            .bind_player_inventory(Pos2d::new(7, 83))
            .widget(Widget::Text {
                key: self.title_key.clone(),
                pos: Pos2d::new(6, 6),
            })
            .widget(Widget::CycleButton {
                id: MODE_WIDGET,
                options: FluidFilterMode::ALL
                    .iter()
                    .map(|mode| mode.translation_key())
                    .collect(),
                selected: settings.mode.ordinal() as usize,
                pos: Pos2d::new(10, 14),
                size: Size::new(110, 20),
            })
            .widget(settings.filter.create_filter_ui().at(Pos2d::new(7, 40)))
            .build()
    }

    fn handle_widget(&mut self, id: &str, value: WidgetValue) -> bool {
        if id == MODE_WIDGET {
            let WidgetValue::Index(index) = value else {
                return false;
            };
            let Some(mode) = i32::try_from(index)
                .ok()
                .and_then(FluidFilterMode::from_ordinal)
            else {
                return false;
            };
            self.set_filter_mode(mode);
            return true;
        }

        let changed = self.settings.write().filter.handle_widget(id, &value);
        if changed {
            self.mark_dirty();
        }
        changed
    }
}
