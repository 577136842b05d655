//! Fluid filters.
//!
//! A filter is a predicate over [`FluidStack`]s with an inversion flag. Filters are a
//! closed set of variants behind [`FluidFilter`]; each variant owns its persisted
//! contents and the widgets used to edit them.
//!
//! Persisted layout of a filter compound:
//!
//! ```text
//! Type:     "simple" | "tag"
//! Inverted: byte
//! Fluids:   [{Slot: byte, FluidName: string}, ...]   (simple)
//! Tag:      string                                    (tag)
//! ```

mod simple;
mod tag;

pub use simple::{MAX_SIMPLE_FILTER_SIZE, SimpleFluidFilter};
pub use tag::TagFluidFilter;

use enum_dispatch::enum_dispatch;
use simdnbt::owned::{NbtCompound, NbtTag};
use sluice_utils::nbt::{NbtReadError, read_bool, read_string};

use crate::config::SLUICE_CONFIG;
use crate::fluid::FluidStack;
use crate::ui::{Pos2d, Widget, WidgetValue};

/// Binding id of the inversion toggle.
pub const INVERTED_WIDGET: &str = "filter/inverted";

/// Horizontal gap between the filter contents and the inversion toggle.
const PANEL_SPACING: i32 = 8;

/// Behaviour shared by every filter variant.
#[enum_dispatch]
pub trait FluidPredicate {
    /// Tests the stack against the filter contents, ignoring inversion.
    fn test(&self, stack: &FluidStack) -> bool;

    /// Returns whether the match result is negated.
    fn is_inverted(&self) -> bool;

    /// Sets whether the match result is negated.
    fn set_inverted(&mut self, inverted: bool);

    /// The persisted `Type` value of this variant.
    fn filter_type(&self) -> &'static str;

    /// Empties the filter contents. Inversion is left alone.
    fn clear(&mut self);

    /// Writes the variant specific contents.
    fn write_contents(&self, nbt: &mut NbtCompound);

    /// Reads the variant specific contents. On error the filter is unchanged.
    fn read_contents(&mut self, nbt: &NbtCompound) -> Result<(), NbtReadError>;

    /// Widgets editing the contents, positioned relative to the filter panel.
    fn contents_ui(&self) -> Vec<Widget>;

    /// Applies an edit to the contents. Returns false if the id is not one of ours.
    fn handle_contents_widget(&mut self, id: &str, value: &WidgetValue) -> bool;
}

/// A fluid filter.
#[enum_dispatch(FluidPredicate)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FluidFilter {
    /// Matches a fixed list of fluids.
    Simple(SimpleFluidFilter),
    /// Matches every fluid in a fluid tag.
    Tag(TagFluidFilter),
}

impl FluidFilter {
    /// Tests a stack, applying inversion.
    #[must_use]
    pub fn matches(&self, stack: &FluidStack) -> bool {
        self.test(stack) != self.is_inverted()
    }

    /// Clears the contents and inverts, so every stack matches.
    pub fn reset_to_match_all(&mut self) {
        self.clear();
        self.set_inverted(true);
    }

    /// Writes the filter into `nbt`.
    pub fn write_nbt(&self, nbt: &mut NbtCompound) {
        nbt.insert("Type", NbtTag::String(self.filter_type().to_string().into()));
        nbt.insert("Inverted", NbtTag::Byte(i8::from(self.is_inverted())));
        self.write_contents(nbt);
    }

    /// Creates an empty filter of the variant persisted as `filter_type`.
    #[must_use]
    pub fn empty_of_type(filter_type: &str) -> Option<Self> {
        match filter_type {
            "simple" => Some(SimpleFluidFilter::from_config(&SLUICE_CONFIG).into()),
            "tag" => Some(TagFluidFilter::new(None).into()),
            _ => None,
        }
    }

    /// Reads the filter from `nbt`, switching variant if `Type` names another one.
    ///
    /// A missing `Type` keeps the current variant, for compounds written before
    /// filters had variants. On error the filter is left exactly as it was.
    pub fn read_nbt(&mut self, nbt: &NbtCompound) -> Result<(), NbtReadError> {
        let mut filter = match read_string(nbt, "Type")? {
            Some(filter_type) if filter_type != self.filter_type() => {
                match Self::empty_of_type(&filter_type) {
                    Some(filter) => filter,
                    None => {
                        return Err(NbtReadError::InvalidValue {
                            key: "Type",
                            value: filter_type,
                        });
                    }
                }
            }
            _ => self.clone(),
        };
        let inverted = read_bool(nbt, "Inverted")?.unwrap_or(false);

        filter.read_contents(nbt)?;
        filter.set_inverted(inverted);
        *self = filter;
        Ok(())
    }

    /// Builds the filter's editing panel.
    #[must_use]
    pub fn create_filter_ui(&self) -> Widget {
        let mut children = self.contents_ui();
        // The toggle goes to the right of whatever the variant laid out.
        let right = children.iter().map(Widget::right).max().unwrap_or(0);
        children.push(Widget::Toggle {
            id: INVERTED_WIDGET,
            key: "cover.filter.inverted",
            value: self.is_inverted(),
            pos: Pos2d::new(right + PANEL_SPACING, 0),
        });

        Widget::FilterPanel {
            children,
            pos: Pos2d::default(),
        }
    }

    /// Applies an edit made in the filter panel.
    pub fn handle_widget(&mut self, id: &str, value: &WidgetValue) -> bool {
        if id == INVERTED_WIDGET {
            return match value {
                WidgetValue::Bool(inverted) => {
                    self.set_inverted(*inverted);
                    true
                }
                _ => false,
            };
        }
        self.handle_contents_widget(id, value)
    }
}
