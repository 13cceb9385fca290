use crate::geometry::{ArcGeometry, Offset, Point, Rect, Size};
use crate::quadrant::Orientation;

/// Host-facing handle of one circle: where the last layout pass put it and
/// how far the running animation currently moves it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Visual {
    pub bounds: Rect,
    pub translation: Offset,
}

impl Visual {
    /// Center as painted, including the transient translation.
    pub fn center(&self) -> Point {
        self.bounds.center().translate(self.translation)
    }

    /// Visuals are clipped to a circle, so only taps inside it count.
    pub fn hit(&self, point: Point) -> bool {
        let radius = self.bounds.size.width.min(self.bounds.size.height) / 2.0;
        radius > 0.0 && self.center().distance(point) <= radius
    }
}

#[derive(Debug, Clone, Default)]
pub struct Visuals {
    pub axis: Visual,
    pub items: Vec<Visual>,
}

/// Result of one layout pass, relative to the container's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub container: Size,
    pub axis: Rect,
    /// Empty while collapsed: hidden items keep their previous bounds.
    pub items: Vec<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutEngine {
    arc: ArcGeometry,
}

impl LayoutEngine {
    pub fn new(arc: ArcGeometry) -> Self {
        Self { arc }
    }

    pub fn arc(&self) -> &ArcGeometry {
        &self.arc
    }

    pub fn measure(&self, collapsed: bool, real_count: usize) -> Size {
        let diameter = 2.0 * self.arc.item_radius();
        if collapsed {
            return Size::square(diameter);
        }

        match real_count {
            0 => Size::square(diameter),
            1 => Size::new(diameter, self.arc.bounds(2)),
            n => Size::square(self.arc.bounds(n + 1)),
        }
    }

    pub fn layout(
        &self,
        collapsed: bool,
        real_count: usize,
        container: Size,
        orientation: Orientation,
    ) -> MenuLayout {
        let r = self.arc.item_radius();
        let item_size = Size::square(2.0 * r);
        let axis = Rect::new(self.arc.axis_origin(container, orientation), item_size);

        let items = if collapsed {
            Vec::new()
        } else if real_count == 1 {
            // straight above or below the axis, no arc
            let top = if orientation.axis_below_items {
                0.0
            } else {
                2.0 * r + self.arc.config().min_axis_distance()
            };
            vec![Rect::new(Point::new(0.0, top), item_size)]
        } else {
            (0..real_count)
                .map(|i| {
                    let center =
                        self.arc
                            .item_center(i, real_count, container.width, orientation);
                    Rect::centered(center, r)
                })
                .collect()
        };

        MenuLayout {
            container,
            axis,
            items,
        }
    }
}
