//! The fluid handler a fluid filter cover puts in front of its holder.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{FilterSettings, FluidFilterMode};
use crate::fluid::{FluidAction, FluidHandler, FluidStack, SharedFluidHandler};

/// Forwards to a delegate handler, but only transfers the cover's mode and filter allow.
///
/// Rejected calls return 0 or an empty stack and never reach the delegate. The
/// settings are shared with the cover, so mode and filter changes apply to handlers
/// that were handed out earlier.
pub struct FilteredFluidHandler {
    delegate: SharedFluidHandler,
    settings: Arc<RwLock<FilterSettings>>,
    log_decisions: bool,
}

impl FilteredFluidHandler {
    pub(super) fn new(
        delegate: SharedFluidHandler,
        settings: Arc<RwLock<FilterSettings>>,
        log_decisions: bool,
    ) -> Self {
        Self {
            delegate,
            settings,
            log_decisions,
        }
    }

    /// The wrapped handler.
    #[must_use]
    pub fn delegate(&self) -> &SharedFluidHandler {
        &self.delegate
    }

    fn mode(&self) -> FluidFilterMode {
        self.settings.read().mode
    }

    fn allows(&self, stack: &FluidStack) -> bool {
        self.settings.read().filter.matches(stack)
    }

    fn rejected(&self, operation: &str, reason: &str, stack: Option<&FluidStack>) {
        if !self.log_decisions {
            return;
        }
        match stack {
            Some(stack) => log::debug!("Fluid filter rejected {operation} of {stack}: {reason}"),
            None => log::debug!("Fluid filter rejected {operation}: {reason}"),
        }
    }
}

impl FluidHandler for FilteredFluidHandler {
    fn tanks(&self) -> usize {
        self.delegate.lock().tanks()
    }

    fn fluid_in_tank(&self, tank: usize) -> FluidStack {
        self.delegate.lock().fluid_in_tank(tank)
    }

    fn tank_capacity(&self, tank: usize) -> i32 {
        self.delegate.lock().tank_capacity(tank)
    }

    fn is_fluid_valid(&self, tank: usize, stack: &FluidStack) -> bool {
        self.delegate.lock().is_fluid_valid(tank, stack)
    }

    fn fill(&mut self, resource: &FluidStack, action: FluidAction) -> i32 {
        if !self.mode().allows_fill() {
            self.rejected("fill", "cover only drains", Some(resource));
            return 0;
        }
        if !self.allows(resource) {
            self.rejected("fill", "filter mismatch", Some(resource));
            return 0;
        }
        self.delegate.lock().fill(resource, action)
    }

    fn drain(&mut self, resource: &FluidStack, action: FluidAction) -> FluidStack {
        if !self.mode().allows_drain() {
            self.rejected("drain", "cover only fills", Some(resource));
            return FluidStack::empty();
        }
        if !self.allows(resource) {
            self.rejected("drain", "filter mismatch", Some(resource));
            return FluidStack::empty();
        }
        self.delegate.lock().drain(resource, action)
    }

    fn drain_amount(&mut self, max_drain: i32, action: FluidAction) -> FluidStack {
        // The fluid is unknown until the delegate answers, so a fill-only cover
        // passes these through untested.
        if !self.mode().allows_drain() {
            return self.delegate.lock().drain_amount(max_drain, action);
        }

        let mut delegate = self.delegate.lock();
        let probe = delegate.drain_amount(max_drain, FluidAction::Simulate);
        if probe.is_empty() || probe.amount() <= 0 {
            return FluidStack::empty();
        }
        if !self.allows(&probe) {
            drop(delegate);
            self.rejected("drain", "filter mismatch", Some(&probe));
            return FluidStack::empty();
        }

        match action {
            FluidAction::Execute => delegate.drain_amount(max_drain, FluidAction::Execute),
            FluidAction::Simulate => probe,
        }
    }
}
