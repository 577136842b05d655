//! A single-tank fluid handler.

use super::{FluidAction, FluidHandler, FluidStack};

/// A fluid handler holding one fluid up to a fixed capacity.
#[derive(Debug, Clone)]
pub struct FluidTank {
    fluid: FluidStack,
    capacity: i32,
    validator: Option<fn(&FluidStack) -> bool>,
    changed: bool,
}

impl FluidTank {
    /// Creates an empty tank with the given capacity.
    #[must_use]
    pub fn new(capacity: i32) -> Self {
        Self {
            fluid: FluidStack::empty(),
            capacity: capacity.max(0),
            validator: None,
            changed: false,
        }
    }

    /// Creates a tank pre-filled with `fluid`, clamped to the capacity.
    #[must_use]
    pub fn with_fluid(capacity: i32, fluid: FluidStack) -> Self {
        let mut tank = Self::new(capacity);
        tank.fluid = fluid.with_amount(fluid.amount().min(tank.capacity));
        tank
    }

    /// Restricts which fluids the tank accepts.
    #[must_use]
    pub fn with_validator(mut self, validator: fn(&FluidStack) -> bool) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The current contents.
    #[must_use]
    pub fn fluid(&self) -> FluidStack {
        self.fluid
    }

    /// The stored amount.
    #[must_use]
    pub fn amount(&self) -> i32 {
        if self.fluid.is_empty() {
            0
        } else {
            self.fluid.amount()
        }
    }

    /// Free space left.
    #[must_use]
    pub fn space(&self) -> i32 {
        self.capacity - self.amount()
    }

    /// Returns whether the tank has been modified since the last check.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Clears the changed flag.
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    fn set_changed(&mut self) {
        self.changed = true;
    }

    fn is_valid(&self, stack: &FluidStack) -> bool {
        self.validator.is_none_or(|validator| validator(stack))
    }
}

impl FluidHandler for FluidTank {
    fn tanks(&self) -> usize {
        1
    }

    fn fluid_in_tank(&self, tank: usize) -> FluidStack {
        if tank == 0 {
            self.fluid
        } else {
            FluidStack::empty()
        }
    }

    fn tank_capacity(&self, tank: usize) -> i32 {
        if tank == 0 { self.capacity } else { 0 }
    }

    fn is_fluid_valid(&self, tank: usize, stack: &FluidStack) -> bool {
        tank == 0 && self.is_valid(stack)
    }

    fn fill(&mut self, resource: &FluidStack, action: FluidAction) -> i32 {
        if resource.is_empty() || !self.is_valid(resource) {
            return 0;
        }

        if self.fluid.is_empty() {
            let filled = resource.amount().min(self.capacity);
            if action.execute() && filled > 0 {
                self.fluid = resource.with_amount(filled);
                self.set_changed();
            }
            return filled;
        }

        if !self.fluid.is_same_fluid(resource) {
            return 0;
        }

        let filled = resource.amount().min(self.space());
        if action.execute() && filled > 0 {
            self.fluid = self.fluid.with_amount(self.fluid.amount() + filled);
            self.set_changed();
        }
        filled
    }

    fn drain(&mut self, resource: &FluidStack, action: FluidAction) -> FluidStack {
        if resource.is_empty() || !self.fluid.is_same_fluid(resource) {
            return FluidStack::empty();
        }
        self.drain_amount(resource.amount(), action)
    }

    fn drain_amount(&mut self, max_drain: i32, action: FluidAction) -> FluidStack {
        if self.fluid.is_empty() || max_drain <= 0 {
            return FluidStack::empty();
        }

        let drained = max_drain.min(self.fluid.amount());
        let result = self.fluid.with_amount(drained);
        if action.execute() {
            let remaining = self.fluid.amount() - drained;
            self.fluid = if remaining > 0 {
                self.fluid.with_amount(remaining)
            } else {
                FluidStack::empty()
            };
            self.set_changed();
        }
        result
    }
}
