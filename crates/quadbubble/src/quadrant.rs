use crate::error::MenuError;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Which quarter of a circle the fan of items forms.
///
/// `TopStart` fans the items up and towards the reading start, so the
/// axis control sits in the bottom corner on the reading end side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    #[default]
    #[strum(
        to_string = "top-start",
        serialize = "TopStart",
        serialize = "top_start",
        serialize = "ts",
        serialize = "0"
    )]
    TopStart,
    #[strum(
        to_string = "top-end",
        serialize = "TopEnd",
        serialize = "top_end",
        serialize = "te",
        serialize = "1"
    )]
    TopEnd,
    #[strum(
        to_string = "bottom-start",
        serialize = "BottomStart",
        serialize = "bottom_start",
        serialize = "bs",
        serialize = "2"
    )]
    BottomStart,
    #[strum(
        to_string = "bottom-end",
        serialize = "BottomEnd",
        serialize = "bottom_end",
        serialize = "be",
        serialize = "3"
    )]
    BottomEnd,
}

impl Quadrant {
    pub fn as_raw(&self) -> i32 {
        *self as i32
    }

    pub fn from_raw(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::iter().nth(idx))
    }
}

impl TryFrom<i32> for Quadrant {
    type Error = MenuError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_raw(code).ok_or(MenuError::InvalidQuadrant(code))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingDirection {
    #[default]
    #[strum(
        to_string = "left-to-right",
        serialize = "LeftToRight",
        serialize = "ltr"
    )]
    LeftToRight,
    #[strum(
        to_string = "right-to-left",
        serialize = "RightToLeft",
        serialize = "rtl"
    )]
    RightToLeft,
}

impl ReadingDirection {
    pub fn is_left_to_right(&self) -> bool {
        *self == Self::LeftToRight
    }
}

/// Directional flags the geometry and the animations read.
///
/// The names describe where the axis sits relative to the fan, so
/// `axis_below_items` is true when the items fan upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub axis_below_items: bool,
    pub axis_left_of_items: bool,
}

impl Orientation {
    pub fn resolve(quadrant: Quadrant, direction: ReadingDirection) -> Self {
        let axis_below_items = matches!(quadrant, Quadrant::TopStart | Quadrant::TopEnd);
        // mirrored for right-to-left readers
        let left_when_ltr = matches!(quadrant, Quadrant::TopEnd | Quadrant::BottomEnd);

        Self {
            axis_below_items,
            axis_left_of_items: left_when_ltr == direction.is_left_to_right(),
        }
    }
}
