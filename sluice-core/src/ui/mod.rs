//! Widget descriptions for cover windows.
//!
//! Covers do not draw anything. They describe a window as a tree of widgets with
//! positions and bound values, and receive edits back through [`CoverWithUi::handle_widget`].
//! The host turns the description into whatever its GUI framework needs.

use sluice_registry::FluidId;

/// Standard slot size in pixels (for client rendering).
pub const SLOT_SIZE: i32 = 18;

/// Width of a standard cover window.
pub const WINDOW_WIDTH: i32 = 176;

/// Height of a standard cover window.
pub const WINDOW_HEIGHT: i32 = 166;

/// A position relative to the parent widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos2d {
    /// X offset in pixels.
    pub x: i32,
    /// Y offset in pixels.
    pub y: i32,
}

impl Pos2d {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A widget size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// One element of a cover window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// A translated label.
    Text {
        /// Translation key.
        key: String,
        /// Position.
        pos: Pos2d,
    },
    /// A button cycling through a fixed list of options.
    CycleButton {
        /// Binding id passed back to [`CoverWithUi::handle_widget`].
        id: &'static str,
        /// Translation keys of the options, in order.
        options: Vec<&'static str>,
        /// Index of the current option.
        selected: usize,
        /// Position.
        pos: Pos2d,
        /// Size.
        size: Size,
    },
    /// An on/off toggle.
    Toggle {
        /// Binding id.
        id: &'static str,
        /// Translation key of the label.
        key: &'static str,
        /// Current state.
        value: bool,
        /// Position.
        pos: Pos2d,
    },
    /// A phantom slot holding a fluid type.
    FluidSlot {
        /// Binding id.
        id: String,
        /// The fluid shown, if any.
        fluid: Option<FluidId>,
        /// Translation key of the fluid's name, shown as the slot tooltip.
        label: Option<&'static str>,
        /// Position.
        pos: Pos2d,
    },
    /// A single line text input.
    TextField {
        /// Binding id.
        id: &'static str,
        /// Current text.
        value: String,
        /// Position.
        pos: Pos2d,
        /// Size.
        size: Size,
    },
    /// A group of widgets supplied by a filter.
    FilterPanel {
        /// Child widgets, positioned relative to the panel.
        children: Vec<Widget>,
        /// Position.
        pos: Pos2d,
    },
}

impl Widget {
    /// Returns a copy of the widget moved to `pos`.
    #[must_use]
    pub fn at(mut self, new_pos: Pos2d) -> Self {
        match &mut self {
            Self::Text { pos, .. }
            | Self::CycleButton { pos, .. }
            | Self::Toggle { pos, .. }
            | Self::FluidSlot { pos, .. }
            | Self::TextField { pos, .. }
            | Self::FilterPanel { pos, .. } => *pos = new_pos,
        }
        self
    }

    /// Returns the widget's width in pixels. Labels are laid out by the client and count as 0.
    #[must_use]
    pub fn width(&self) -> i32 {
        match self {
            Self::Text { .. } => 0,
            Self::CycleButton { size, .. } | Self::TextField { size, .. } => size.width,
            Self::Toggle { .. } | Self::FluidSlot { .. } => SLOT_SIZE,
            Self::FilterPanel { children, .. } => {
                children.iter().map(Widget::right).max().unwrap_or(0)
            }
        }
    }

    /// Returns the x coordinate of the widget's right edge.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.pos().x + self.width()
    }

    /// Returns the widget's position.
    #[must_use]
    pub fn pos(&self) -> Pos2d {
        match self {
            Self::Text { pos, .. }
            | Self::CycleButton { pos, .. }
            | Self::Toggle { pos, .. }
            | Self::FluidSlot { pos, .. }
            | Self::TextField { pos, .. }
            | Self::FilterPanel { pos, .. } => *pos,
        }
    }
}

/// A value sent back from the client for a bound widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetValue {
    /// Selected option of a cycle button.
    Index(usize),
    /// New toggle state.
    Bool(bool),
    /// New content of a fluid slot.
    Fluid(Option<FluidId>),
    /// New text of a text field.
    Text(String),
}

/// A complete window description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverWindow {
    /// Window size.
    pub size: Size,
    /// Where the player inventory is drawn, if it is shown.
    pub player_inventory: Option<Pos2d>,
    /// Widgets in draw order.
    pub widgets: Vec<Widget>,
}

impl CoverWindow {
    /// Starts a window of the given size.
    #[must_use]
    pub fn builder(width: i32, height: i32) -> CoverWindowBuilder {
        CoverWindowBuilder {
            window: CoverWindow {
                size: Size::new(width, height),
                player_inventory: None,
                widgets: Vec::new(),
            },
        }
    }

    /// Finds a bound widget by id, searching filter panels too.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Widget> {
        fn search<'a>(widgets: &'a [Widget], id: &str) -> Option<&'a Widget> {
            widgets.iter().find_map(|widget| match widget {
                Widget::CycleButton { id: wid, .. }
                | Widget::Toggle { id: wid, .. }
                | Widget::TextField { id: wid, .. }
                    if *wid == id =>
                {
                    Some(widget)
                }
                Widget::FluidSlot { id: wid, .. } if wid == id => Some(widget),
                Widget::FilterPanel { children, .. } => search(children, id),
                _ => None,
            })
        }
        search(&self.widgets, id)
    }
}

/// Builder for [`CoverWindow`].
pub struct CoverWindowBuilder {
    window: CoverWindow,
}

impl CoverWindowBuilder {
    /// Shows the player inventory at `pos`.
    #[must_use]
    pub fn bind_player_inventory(mut self, pos: Pos2d) -> Self {
        self.window.player_inventory = Some(pos);
        self
    }

    /// Appends a widget.
    #[must_use]
    pub fn widget(mut self, widget: Widget) -> Self {
        self.window.widgets.push(widget);
        self
    }

    /// Finishes the window.
    #[must_use]
    pub fn build(self) -> CoverWindow {
        self.window
    }
}

/// A cover with a configuration window.
pub trait CoverWithUi {
    /// Describes the window for the cover's current state.
    fn create_window(&self) -> CoverWindow;

    /// Applies an edit made in the window.
    ///
    /// Returns false if the id is unknown or the value does not fit the widget.
    fn handle_widget(&mut self, id: &str, value: WidgetValue) -> bool;
}
