//! Quadrant bubble menu: an axis control that fans its items out along a
//! quarter circle and animates them back onto itself.
//!
//! The crate is host agnostic. A host measures the menu with
//! [`BubbleMenu::measure`], hands it bounds with [`BubbleMenu::layout`],
//! forwards taps and frame times, and paints [`BubbleMenu::axis`] and
//! [`BubbleMenu::items`]. Every call returns a [`MenuAction`] telling the
//! host whether to lay out or repaint again.

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod menu;
pub mod model;
pub mod quadrant;

pub use animation::{Continuation, Property, ToggleAnimator, Track, Transition, TransitionKind};
pub use error::MenuError;
pub use geometry::{ArcGeometry, MenuGeometryConfig, Offset, Point, Rect, Size};
pub use layout::{LayoutEngine, MenuLayout, Visual, Visuals};
pub use menu::{BubbleMenu, MenuAction, MenuOptions, MenuState};
pub use model::{AxisGlyph, Icon, ItemName, MenuItem, MenuModel};
pub use quadrant::{Orientation, Quadrant, ReadingDirection};
