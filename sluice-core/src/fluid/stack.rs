//! Fluid stacks: a fluid type plus an amount in millibuckets.

use std::fmt;

use sluice_registry::{FluidId, REGISTRY};

/// One bucket, in millibuckets.
pub const BUCKET_VOLUME: i32 = 1000;

/// An amount of a single fluid.
///
/// A stack whose fluid is empty or whose amount is not positive is the empty stack;
/// handlers return it where "nothing" is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FluidStack {
    fluid: FluidId,
    amount: i32,
}

impl FluidStack {
    /// Creates a stack. Negative amounts are stored as zero.
    #[must_use]
    pub const fn new(fluid: FluidId, amount: i32) -> Self {
        Self {
            fluid,
            amount: if amount < 0 { 0 } else { amount },
        }
    }

    /// The empty stack.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            fluid: FluidId::Empty,
            amount: 0,
        }
    }

    /// Returns true for the empty fluid or a non-positive amount.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fluid.is_empty() || self.amount <= 0
    }

    /// The fluid type. Empty stacks may still carry a fluid with amount 0.
    #[must_use]
    pub const fn fluid(&self) -> FluidId {
        self.fluid
    }

    /// The amount in millibuckets.
    #[must_use]
    pub const fn amount(&self) -> i32 {
        self.amount
    }

    /// Returns a copy of this stack holding `amount`.
    #[must_use]
    pub const fn with_amount(&self, amount: i32) -> Self {
        Self::new(self.fluid, amount)
    }

    /// Returns true if both stacks hold the same fluid, ignoring amounts.
    #[must_use]
    pub fn is_same_fluid(&self, other: &FluidStack) -> bool {
        self.fluid == other.fluid
    }

    /// Returns true if `other` is the same fluid and no larger than this stack.
    #[must_use]
    pub fn contains(&self, other: &FluidStack) -> bool {
        self.is_same_fluid(other) && self.amount >= other.amount
    }
}

impl Default for FluidStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FluidStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        match REGISTRY.fluids.get(self.fluid) {
            Some(entry) => write!(f, "{}mB {}", self.amount, entry.name),
            None => write!(f, "{}mB #{}", self.amount, self.fluid.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(FluidStack::empty().is_empty());
        assert!(FluidStack::new(FluidId::Water, 0).is_empty());
        assert!(FluidStack::new(FluidId::Empty, 100).is_empty());
        assert_eq!(FluidStack::new(FluidId::Water, -5).amount(), 0);
        assert!(!FluidStack::new(FluidId::Water, 1).is_empty());
    }

    #[test]
    fn display_uses_registry_names() {
        assert_eq!(
            FluidStack::new(FluidId::Lava, BUCKET_VOLUME).to_string(),
            "1000mB lava"
        );
        assert_eq!(FluidStack::empty().to_string(), "empty");
    }
}
