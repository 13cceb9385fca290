use crate::error::MenuError;
use crate::quadrant::Orientation;
use std::f64::consts::FRAC_PI_2;

pub const DEFAULT_ITEM_RADIUS_DP: f64 = 20.0;
pub const DEFAULT_ITEM_SPACING_DP: f64 = 8.0;
pub const DEFAULT_MIN_AXIS_DISTANCE_DP: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn translate(self, offset: Offset) -> Self {
        Self::new(self.x + offset.dx, self.y + offset.dy)
    }
}

/// Transient translation of a visual relative to its laid out bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn centered(center: Point, radius: f64) -> Self {
        Self::new(
            Point::new(center.x - radius, center.y - radius),
            Size::square(2.0 * radius),
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }
}

/// Validated item geometry in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuGeometryConfig {
    item_radius: f64,
    item_spacing: f64,
    min_axis_distance: f64,
}

impl MenuGeometryConfig {
    pub fn new(
        item_radius: f64,
        item_spacing: f64,
        min_axis_distance: f64,
    ) -> Result<Self, MenuError> {
        if !item_radius.is_finite() || item_radius <= 0.0 {
            return Err(MenuError::InvalidGeometry {
                field: "item_radius",
                value: item_radius,
                expected: "a finite length greater than zero",
            });
        }
        for (field, value) in [
            ("item_spacing", item_spacing),
            ("min_axis_distance", min_axis_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MenuError::InvalidGeometry {
                    field,
                    value,
                    expected: "a finite non-negative length",
                });
            }
        }

        Ok(Self {
            item_radius,
            item_spacing,
            min_axis_distance,
        })
    }

    /// Converts density independent lengths to device pixels.
    pub fn from_dp(
        item_radius: f64,
        item_spacing: f64,
        min_axis_distance: f64,
        density: f64,
    ) -> Result<Self, MenuError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(MenuError::InvalidGeometry {
                field: "density",
                value: density,
                expected: "a finite scale factor greater than zero",
            });
        }
        Self::new(
            item_radius * density,
            item_spacing * density,
            min_axis_distance * density,
        )
    }

    pub fn with_density(density: f64) -> Result<Self, MenuError> {
        Self::from_dp(
            DEFAULT_ITEM_RADIUS_DP,
            DEFAULT_ITEM_SPACING_DP,
            DEFAULT_MIN_AXIS_DISTANCE_DP,
            density,
        )
    }

    pub fn item_radius(&self) -> f64 {
        self.item_radius
    }

    pub fn item_spacing(&self) -> f64 {
        self.item_spacing
    }

    pub fn min_axis_distance(&self) -> f64 {
        self.min_axis_distance
    }
}

impl Default for MenuGeometryConfig {
    fn default() -> Self {
        Self {
            item_radius: DEFAULT_ITEM_RADIUS_DP,
            item_spacing: DEFAULT_ITEM_SPACING_DP,
            min_axis_distance: DEFAULT_MIN_AXIS_DISTANCE_DP,
        }
    }
}

/// Quarter-circle fan math.
///
/// `item_count` arguments count the axis control, `real_count` arguments
/// count only the menu items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArcGeometry {
    config: MenuGeometryConfig,
}

impl ArcGeometry {
    pub fn new(config: MenuGeometryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MenuGeometryConfig {
        &self.config
    }

    pub fn item_radius(&self) -> f64 {
        self.config.item_radius
    }

    fn diameter(&self) -> f64 {
        2.0 * self.config.item_radius
    }

    /// Smallest side that keeps the nearest item clear of the axis.
    pub fn min_side(&self) -> f64 {
        2.0 * self.diameter() + self.config.min_axis_distance
    }

    /// Side of the square that holds the expanded fan.
    pub fn bounds(&self, item_count: usize) -> f64 {
        match item_count {
            0 | 1 => self.diameter(),
            2 => self.min_side(),
            n => {
                let theta = FRAC_PI_2 / (n - 2) as f64;
                let chord = self.diameter() + self.config.item_spacing;
                let arc_radius = chord / (2.0 * (theta / 2.0).sin());
                (arc_radius + self.diameter()).max(self.min_side())
            }
        }
    }

    /// Angle between two neighbouring items on the fan.
    pub fn sector_angle(real_count: usize) -> f64 {
        FRAC_PI_2 / (real_count.max(2) - 1) as f64
    }

    /// Center of item `index` when `real_count >= 2` items share a square
    /// container of `side`.
    pub fn item_center(
        &self,
        index: usize,
        real_count: usize,
        side: f64,
        orientation: Orientation,
    ) -> Point {
        let r = self.config.item_radius;
        let travel = side - self.diameter();
        let angle = Self::sector_angle(real_count) * index as f64;
        let (cos, sin) = (travel * angle.cos(), travel * angle.sin());

        let x = if orientation.axis_left_of_items {
            cos
        } else {
            travel - cos
        };
        let y = if orientation.axis_below_items {
            travel - sin
        } else {
            sin
        };
        Point::new(x + r, y + r)
    }

    /// Top-left corner of the axis control inside `container`.
    pub fn axis_origin(&self, container: Size, orientation: Orientation) -> Point {
        let x = if orientation.axis_left_of_items {
            0.0
        } else {
            container.width - self.diameter()
        };
        let y = if orientation.axis_below_items {
            container.height - self.diameter()
        } else {
            0.0
        };
        Point::new(x, y)
    }

    /// Translation that brings an expanded item back onto the axis.
    pub fn collapsed_offset(
        &self,
        index: usize,
        real_count: usize,
        container: Size,
        orientation: Orientation,
    ) -> Offset {
        match real_count {
            0 => Offset::ZERO,
            1 => {
                let travel = container.height - self.diameter();
                let dy = if orientation.axis_below_items {
                    travel
                } else {
                    -travel
                };
                Offset::new(0.0, dy)
            }
            _ => {
                let travel = container.width - self.diameter();
                let angle = Self::sector_angle(real_count) * index as f64;
                let (cos, sin) = (travel * angle.cos(), travel * angle.sin());
                let dx = if orientation.axis_left_of_items {
                    -cos
                } else {
                    cos
                };
                let dy = if orientation.axis_below_items {
                    sin
                } else {
                    -sin
                };
                Offset::new(dx, dy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrant::{Quadrant, ReadingDirection};
    use strum::IntoEnumIterator;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn arc() -> ArcGeometry {
        ArcGeometry::new(MenuGeometryConfig::new(20.0, 8.0, 16.0).unwrap())
    }

    fn orientations() -> Vec<Orientation> {
        Quadrant::iter()
            .flat_map(|q| {
                ReadingDirection::iter().map(move |d| Orientation::resolve(q, d))
            })
            .collect()
    }

    #[test]
    fn test_bounds_axis_only() {
        assert_close(arc().bounds(0), 40.0);
        assert_close(arc().bounds(1), 40.0);
    }

    #[test]
    fn test_bounds_single_item_is_linear() {
        assert_close(arc().bounds(2), 4.0 * 20.0 + 16.0);
    }

    #[test]
    fn test_bounds_arc_wins_for_three_items() {
        let expected = 48.0 / (2.0 * (std::f64::consts::PI / 8.0).sin()) + 40.0;
        let side = arc().bounds(4);
        assert_close(side, expected);
        assert_eq!(side.round(), 103.0);
        assert!(side > arc().min_side());
    }

    #[test]
    fn test_bounds_minimum_wins_for_two_items() {
        // chord 48 over a quarter turn gives ~73.9, below the 96 floor
        assert_close(arc().bounds(3), 96.0);
    }

    #[test]
    fn test_bounds_monotonic() {
        let arc = arc();
        for n in 3..40 {
            assert!(arc.bounds(n + 1) >= arc.bounds(n), "shrunk at {n}");
        }
    }

    #[test]
    fn test_end_items_on_arc_edges() {
        let arc = arc();
        for real_count in 2..8 {
            let side = arc.bounds(real_count + 1);
            for orientation in orientations() {
                let axis = Rect::new(
                    arc.axis_origin(Size::square(side), orientation),
                    Size::square(40.0),
                )
                .center();
                let first = arc.item_center(0, real_count, side, orientation);
                let last = arc.item_center(real_count - 1, real_count, side, orientation);

                for c in [first.x, first.y, last.x, last.y] {
                    assert!(
                        (c - 20.0).abs() < 1e-9 || (c - (side - 20.0)).abs() < 1e-9,
                        "{c} is off the edges for {orientation:?}"
                    );
                }
                // angle 0 shares the axis row, angle pi/2 shares the axis column
                assert_close(first.y, axis.y);
                assert_close(last.x, axis.x);
            }
        }
    }

    #[test]
    fn test_items_keep_arc_distance_from_axis() {
        let arc = arc();
        let side = arc.bounds(6);
        for orientation in orientations() {
            let axis = Rect::new(
                arc.axis_origin(Size::square(side), orientation),
                Size::square(40.0),
            )
            .center();
            for i in 0..5 {
                let center = arc.item_center(i, 5, side, orientation);
                assert_close(center.distance(axis), side - 40.0);
            }
        }
    }

    #[test]
    fn test_collapsed_offset_lands_on_axis() {
        let arc = arc();
        let side = arc.bounds(5);
        let container = Size::square(side);
        for orientation in orientations() {
            let axis = Rect::new(arc.axis_origin(container, orientation), Size::square(40.0))
                .center();
            for i in 0..4 {
                let center = arc.item_center(i, 4, side, orientation);
                let landed = center.translate(arc.collapsed_offset(i, 4, container, orientation));
                assert_close(landed.x, axis.x);
                assert_close(landed.y, axis.y);
            }
        }
    }

    #[test]
    fn test_collapsed_offset_single_item_is_vertical() {
        let arc = arc();
        let container = Size::new(40.0, 96.0);
        let below = Orientation::resolve(Quadrant::TopStart, ReadingDirection::LeftToRight);
        let above = Orientation::resolve(Quadrant::BottomStart, ReadingDirection::LeftToRight);

        assert_eq!(
            arc.collapsed_offset(0, 1, container, below),
            Offset::new(0.0, 56.0)
        );
        assert_eq!(
            arc.collapsed_offset(0, 1, container, above),
            Offset::new(0.0, -56.0)
        );
    }

    #[test]
    fn test_geometry_validation() {
        assert!(MenuGeometryConfig::new(0.0, 8.0, 16.0).is_err());
        assert!(MenuGeometryConfig::new(-1.0, 8.0, 16.0).is_err());
        assert!(MenuGeometryConfig::new(f64::NAN, 8.0, 16.0).is_err());
        assert!(MenuGeometryConfig::new(20.0, -0.5, 16.0).is_err());
        assert!(MenuGeometryConfig::new(20.0, 8.0, f64::INFINITY).is_err());
        assert!(MenuGeometryConfig::new(20.0, 0.0, 0.0).is_ok());
        assert!(MenuGeometryConfig::with_density(0.0).is_err());
    }

    #[test]
    fn test_density_scales_defaults() {
        let config = MenuGeometryConfig::with_density(2.0).unwrap();
        assert_close(config.item_radius(), 40.0);
        assert_close(config.item_spacing(), 16.0);
        assert_close(config.min_axis_distance(), 32.0);
    }
}
