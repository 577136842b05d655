//! A filter matching a whole fluid tag.

use simdnbt::owned::{NbtCompound, NbtTag};
use sluice_registry::REGISTRY;
use sluice_utils::Identifier;
use sluice_utils::nbt::{NbtReadError, read_string};

use super::FluidPredicate;
use crate::fluid::FluidStack;
use crate::ui::{Pos2d, Size, Widget, WidgetValue};

const TAG_WIDGET: &str = "filter/tag";

/// Matches stacks whose fluid is in a fluid tag, e.g. `minecraft:water`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFluidFilter {
    tag: Option<Identifier>,
    inverted: bool,
}

impl TagFluidFilter {
    /// Creates a filter for `tag`. Without a tag nothing matches.
    #[must_use]
    pub fn new(tag: Option<Identifier>) -> Self {
        Self {
            tag,
            inverted: false,
        }
    }

    /// The configured tag.
    #[must_use]
    pub fn tag(&self) -> Option<&Identifier> {
        self.tag.as_ref()
    }

    /// Replaces the tag.
    pub fn set_tag(&mut self, tag: Option<Identifier>) {
        if let Some(tag) = &tag
            && !REGISTRY.fluids.has_tag(tag)
        {
            log::debug!("Fluid filter set to unknown tag {tag}");
        }
        self.tag = tag;
    }
}

impl FluidPredicate for TagFluidFilter {
    fn test(&self, stack: &FluidStack) -> bool {
        !stack.is_empty()
            && self
                .tag
                .as_ref()
                .is_some_and(|tag| REGISTRY.fluids.is_in_tag(stack.fluid(), tag))
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    fn filter_type(&self) -> &'static str {
        "tag"
    }

    fn clear(&mut self) {
        self.tag = None;
    }

    fn write_contents(&self, nbt: &mut NbtCompound) {
        if let Some(tag) = &self.tag {
            nbt.insert("Tag", NbtTag::String(tag.to_string().into()));
        }
    }

    fn read_contents(&mut self, nbt: &NbtCompound) -> Result<(), NbtReadError> {
        let tag = match read_string(nbt, "Tag")? {
            None => None,
            Some(value) => match value.parse::<Identifier>() {
                Ok(tag) => Some(tag),
                Err(_) => return Err(NbtReadError::InvalidValue { key: "Tag", value }),
            },
        };
        self.set_tag(tag);
        Ok(())
    }

    fn contents_ui(&self) -> Vec<Widget> {
        vec![Widget::TextField {
            id: TAG_WIDGET,
            value: self.tag.as_ref().map(ToString::to_string).unwrap_or_default(),
            pos: Pos2d::new(0, 0),
            size: Size::new(110, 18),
        }]
    }

    fn handle_contents_widget(&mut self, id: &str, value: &WidgetValue) -> bool {
        if id != TAG_WIDGET {
            return false;
        }
        let WidgetValue::Text(text) = value else {
            return false;
        };
        let text = text.trim();
        if text.is_empty() {
            self.set_tag(None);
            return true;
        }
        match text.parse::<Identifier>() {
            Ok(tag) => {
                self.set_tag(Some(tag));
                true
            }
            Err(_) => false,
        }
    }
}
