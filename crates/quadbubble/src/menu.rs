use crate::animation::{Continuation, Finished, ToggleAnimator, Transition, TransitionKind};
use crate::error::MenuError;
use crate::geometry::{ArcGeometry, MenuGeometryConfig, Point, Size};
use crate::layout::{LayoutEngine, MenuLayout, Visual, Visuals};
use crate::model::{AxisGlyph, MenuItem, MenuModel, default_placeholder};
use crate::quadrant::{Orientation, Quadrant, ReadingDirection};
use palette::Srgba;
use std::ops::{BitOr, BitOrAssign};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl MenuState {
    /// Only a finished collapse shrinks the container; a collapsing menu
    /// keeps its expanded size until the animation ends.
    pub fn is_collapsed(&self) -> bool {
        *self == Self::Collapsed
    }

    /// Whether the next toggle expands the menu.
    pub fn expands_next(&self) -> bool {
        matches!(self, Self::Collapsed | Self::Collapsing)
    }

    fn settled(kind: TransitionKind) -> Self {
        match kind {
            TransitionKind::Expand => Self::Expanded,
            TransitionKind::Collapse => Self::Collapsed,
        }
    }
}

/// What the host should request after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuAction {
    pub should_relayout: bool,
    pub should_redraw: bool,
}

impl MenuAction {
    pub fn new(should_relayout: bool, should_redraw: bool) -> Self {
        Self {
            should_relayout,
            should_redraw,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn relayout() -> Self {
        Self::new(true, true)
    }

    pub fn redraw() -> Self {
        Self::new(false, true)
    }
}

impl BitOr for MenuAction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::new(
            self.should_relayout || rhs.should_relayout,
            self.should_redraw || rhs.should_redraw,
        )
    }
}

impl BitOrAssign for MenuAction {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub geometry: MenuGeometryConfig,
    pub quadrant: Quadrant,
    pub reading_direction: ReadingDirection,
    pub axis_background: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            geometry: MenuGeometryConfig::default(),
            quadrant: Quadrant::default(),
            reading_direction: ReadingDirection::default(),
            axis_background: default_placeholder(),
            placeholder: default_placeholder(),
        }
    }
}

pub struct BubbleMenu {
    engine: LayoutEngine,
    model: MenuModel,
    visuals: Visuals,
    animator: ToggleAnimator,
    state: MenuState,
    glyph: AxisGlyph,
    quadrant: Quadrant,
    reading_direction: ReadingDirection,
    axis_background: Srgba<f64>,
    last_layout: Option<MenuLayout>,
}

impl BubbleMenu {
    pub fn new(geometry: MenuGeometryConfig) -> Self {
        Self::with_options(MenuOptions {
            geometry,
            ..MenuOptions::default()
        })
    }

    pub fn with_options(options: MenuOptions) -> Self {
        Self {
            engine: LayoutEngine::new(ArcGeometry::new(options.geometry)),
            model: MenuModel::new(options.placeholder),
            visuals: Visuals::default(),
            animator: ToggleAnimator::new(),
            state: MenuState::Collapsed,
            glyph: AxisGlyph::Collapsed,
            quadrant: options.quadrant,
            reading_direction: options.reading_direction,
            axis_background: options.axis_background,
            last_layout: None,
        }
    }

    /// Structural changes end a running transition first; its tracks were
    /// built for the old container.
    pub fn add_item(&mut self, item: MenuItem) -> MenuAction {
        let action = self.end_transition();
        let name = item.name().clone();
        let index = self.model.add_item(item);
        self.visuals.items.push(Visual::default());
        log::debug!("Added '{}' at index {}", name, index);
        action | MenuAction::relayout()
    }

    pub fn set_quadrant(&mut self, quadrant: Quadrant) -> MenuAction {
        let action = self.end_transition();
        log::debug!("Quadrant {} -> {}", self.quadrant, quadrant);
        self.quadrant = quadrant;
        action | MenuAction::relayout()
    }

    /// Accepts the numeric quadrant codes 0..=3; anything else leaves the
    /// menu untouched.
    pub fn set_quadrant_raw(&mut self, code: i32) -> Result<MenuAction, MenuError> {
        let quadrant = Quadrant::try_from(code).inspect_err(|e| log::warn!("{}", e))?;
        Ok(self.set_quadrant(quadrant))
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn set_reading_direction(&mut self, direction: ReadingDirection) -> MenuAction {
        let action = self.end_transition();
        self.reading_direction = direction;
        action | MenuAction::relayout()
    }

    pub fn reading_direction(&self) -> ReadingDirection {
        self.reading_direction
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::resolve(self.quadrant, self.reading_direction)
    }

    pub fn measure(&self) -> Size {
        self.engine
            .measure(self.state.is_collapsed(), self.model.len())
    }

    /// Places the axis and items inside a container of `size`. Reports a
    /// redraw only when some bounds actually changed.
    pub fn layout(&mut self, size: Size) -> MenuAction {
        let layout = self.engine.layout(
            self.state.is_collapsed(),
            self.model.len(),
            size,
            self.orientation(),
        );
        if self.last_layout.as_ref() == Some(&layout) {
            return MenuAction::none();
        }

        self.visuals.axis.bounds = layout.axis;
        for (visual, bounds) in self.visuals.items.iter_mut().zip(&layout.items) {
            visual.bounds = *bounds;
        }
        log::debug!(
            "Laid out {} items in {:.1}x{:.1}",
            layout.items.len(),
            size.width,
            size.height
        );
        self.last_layout = Some(layout);
        MenuAction::redraw()
    }

    /// Taps on the axis toggle the menu, taps on an expanded item run its
    /// handler.
    pub fn click(&mut self, point: Point, now: Instant) -> MenuAction {
        if self.visuals.axis.hit(point) {
            return self.toggle(now);
        }
        if let Some(item) = self.item_at(point).and_then(|i| self.model.get(i)) {
            log::debug!("Activating '{}'", item.name());
            item.activate();
        }
        MenuAction::none()
    }

    pub fn item_at(&self, point: Point) -> Option<usize> {
        if self.state != MenuState::Expanded {
            return None;
        }
        self.visuals.items.iter().position(|v| v.hit(point))
    }

    pub fn toggle(&mut self, now: Instant) -> MenuAction {
        if self.state.expands_next() {
            self.expand(now)
        } else {
            self.collapse(now)
        }
    }

    fn expand(&mut self, now: Instant) -> MenuAction {
        let mut action = self.end_transition();

        self.state = MenuState::Expanding;
        self.glyph = AxisGlyph::Expanded;
        let container = self.measure();
        let transition = Transition::expand(
            self.engine.arc(),
            self.model.len(),
            container,
            self.orientation(),
        );
        if let Some(done) = self.animator.start(transition, now, &mut self.visuals.items) {
            action |= self.finish(done);
        }
        log::debug!("{:?}", self.state);
        action | MenuAction::relayout()
    }

    fn collapse(&mut self, now: Instant) -> MenuAction {
        let mut action = self.end_transition();

        let container = self.engine.measure(false, self.model.len());
        let transition = Transition::collapse(
            self.engine.arc(),
            self.model.len(),
            container,
            self.orientation(),
            Continuation {
                glyph: AxisGlyph::Collapsed,
                relayout: true,
            },
        );
        self.state = MenuState::Collapsing;
        if let Some(done) = self.animator.start(transition, now, &mut self.visuals.items) {
            action |= self.finish(done);
        }
        log::debug!("{:?}", self.state);
        action | MenuAction::redraw()
    }

    /// Advances a running transition; call from the host's frame clock.
    pub fn tick(&mut self, now: Instant) -> MenuAction {
        if !self.animator.is_running() {
            return MenuAction::none();
        }
        match self.animator.tick(now, &mut self.visuals.items) {
            Some(done) => self.finish(done) | MenuAction::redraw(),
            None => MenuAction::redraw(),
        }
    }

    fn end_transition(&mut self) -> MenuAction {
        self.animator
            .end(&mut self.visuals.items)
            .map(|done| self.finish(done))
            .unwrap_or_default()
    }

    fn finish(&mut self, done: Finished) -> MenuAction {
        self.state = MenuState::settled(done.kind);
        log::debug!("{:?}", self.state);
        match done.continuation {
            Some(continuation) => {
                self.glyph = continuation.glyph;
                MenuAction::new(continuation.relayout, true)
            }
            None => MenuAction::redraw(),
        }
    }

    /// Ends any running transition before the host drops its visual tree.
    pub fn detach(&mut self) {
        if self.animator.is_running() {
            log::debug!("Detaching with a running transition");
            self.end_transition();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn glyph(&self) -> AxisGlyph {
        self.glyph
    }

    pub fn axis(&self) -> &Visual {
        &self.visuals.axis
    }

    pub fn items(&self) -> &[Visual] {
        &self.visuals.items
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    pub fn geometry(&self) -> &MenuGeometryConfig {
        self.engine.arc().config()
    }

    pub fn axis_background(&self) -> Srgba<f64> {
        self.axis_background
    }
}

impl Default for BubbleMenu {
    fn default() -> Self {
        Self::with_options(MenuOptions::default())
    }
}

impl Drop for BubbleMenu {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TRANSITION_DURATION;
    use crate::geometry::Offset;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn menu_with(count: usize) -> BubbleMenu {
        let mut menu = BubbleMenu::new(MenuGeometryConfig::new(20.0, 8.0, 16.0).unwrap());
        for i in 0..count {
            menu.add_item(MenuItem::new(format!("item {i}"), None));
        }
        let size = menu.measure();
        menu.layout(size);
        menu
    }

    /// Runs a host frame: relayout if asked.
    fn settle(menu: &mut BubbleMenu, action: MenuAction) {
        if action.should_relayout {
            let size = menu.measure();
            menu.layout(size);
        }
    }

    fn axis_center(menu: &BubbleMenu) -> Point {
        menu.axis().bounds.center()
    }

    #[test]
    fn test_axis_only_bounds() {
        let menu = menu_with(0);
        assert_eq!(menu.measure(), Size::square(40.0));
    }

    #[test]
    fn test_toggle_cycle() {
        let mut menu = menu_with(3);
        let start = Instant::now();

        let action = menu.toggle(start);
        assert!(action.should_relayout);
        assert_eq!(menu.state(), MenuState::Expanding);
        assert_eq!(menu.glyph(), AxisGlyph::Expanded);
        settle(&mut menu, action);
        assert_eq!(menu.measure(), Size::square(menu.engine.arc().bounds(4)));

        let action = menu.tick(start + TRANSITION_DURATION);
        assert_eq!(menu.state(), MenuState::Expanded);
        assert!(!action.should_relayout);
        assert!(!menu.is_animating());

        let later = start + Duration::from_secs(1);
        let action = menu.toggle(later);
        assert!(!action.should_relayout);
        assert_eq!(menu.state(), MenuState::Collapsing);
        // glyph and size only change when the collapse finishes
        assert_eq!(menu.glyph(), AxisGlyph::Expanded);
        assert_eq!(menu.measure(), Size::square(menu.engine.arc().bounds(4)));

        let action = menu.tick(later + TRANSITION_DURATION);
        assert!(action.should_relayout);
        assert_eq!(menu.state(), MenuState::Collapsed);
        assert_eq!(menu.glyph(), AxisGlyph::Collapsed);
        settle(&mut menu, action);
        assert_eq!(menu.measure(), Size::square(40.0));
    }

    #[test]
    fn test_expanded_items_rest_on_arc() {
        let mut menu = menu_with(4);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);

        // the first frame shows every item on the axis
        let axis = axis_center(&menu);
        for item in menu.items() {
            assert!(item.center().distance(axis) < 1e-9);
        }

        menu.tick(start + TRANSITION_DURATION);
        let travel = menu.measure().width - 40.0;
        for item in menu.items() {
            assert_eq!(item.translation, Offset::ZERO);
            assert!((item.center().distance(axis) - travel).abs() < 1e-9);
        }
    }

    #[test]
    fn test_toggle_during_collapse_finishes_expanded() {
        let mut menu = menu_with(3);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);
        menu.tick(start + TRANSITION_DURATION);

        let collapse_at = start + Duration::from_millis(400);
        menu.toggle(collapse_at);
        menu.tick(collapse_at + Duration::from_millis(120));
        assert!(menu.items().iter().any(|v| v.translation != Offset::ZERO));

        let expand_at = collapse_at + Duration::from_millis(130);
        let action = menu.toggle(expand_at);
        assert!(action.should_relayout);
        assert_eq!(menu.state(), MenuState::Expanding);
        assert_eq!(menu.glyph(), AxisGlyph::Expanded);
        settle(&mut menu, action);

        menu.tick(expand_at + TRANSITION_DURATION);
        assert_eq!(menu.state(), MenuState::Expanded);
        assert!(menu.items().iter().all(|v| v.translation == Offset::ZERO));
    }

    #[test]
    fn test_toggle_during_expand_collapses_from_rest() {
        let mut menu = menu_with(2);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);
        menu.tick(start + Duration::from_millis(60));

        menu.toggle(start + Duration::from_millis(70));
        assert_eq!(menu.state(), MenuState::Collapsing);
        // the interrupted expand was completed before the collapse began
        assert!(menu.items().iter().all(|v| v.translation == Offset::ZERO));
    }

    #[test]
    fn test_layout_reports_change_once() {
        let mut menu = menu_with(3);
        let start = Instant::now();
        menu.toggle(start);
        let size = menu.measure();

        assert_eq!(menu.layout(size), MenuAction::redraw());
        let first: Vec<_> = menu.items().iter().map(|v| v.bounds).collect();
        assert_eq!(menu.layout(size), MenuAction::none());
        let second: Vec<_> = menu.items().iter().map(|v| v.bounds).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_quadrant_change_moves_axis() {
        let mut menu = menu_with(3);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);
        assert_eq!(menu.quadrant(), Quadrant::TopStart);
        let before = menu.axis().bounds;

        let action = menu.set_quadrant(Quadrant::BottomEnd);
        assert!(action.should_relayout);
        settle(&mut menu, action);
        assert_eq!(menu.quadrant(), Quadrant::BottomEnd);
        assert_ne!(menu.axis().bounds, before);
        assert_eq!(menu.axis().bounds.origin, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_invalid_raw_quadrant_keeps_state() {
        let mut menu = menu_with(1);
        menu.set_quadrant(Quadrant::TopEnd);

        assert_eq!(menu.set_quadrant_raw(7), Err(MenuError::InvalidQuadrant(7)));
        assert_eq!(menu.quadrant(), Quadrant::TopEnd);
        assert!(menu.set_quadrant_raw(2).is_ok());
        assert_eq!(menu.quadrant(), Quadrant::BottomStart);
    }

    #[test]
    fn test_click_axis_toggles_and_item_activates() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut menu = BubbleMenu::default();
        menu.add_item(
            MenuItem::new("Only", None).on_activate(move |_| counter.set(counter.get() + 1)),
        );
        let size = menu.measure();
        menu.layout(size);

        let start = Instant::now();
        let action = menu.click(axis_center(&menu), start);
        assert_eq!(menu.state(), MenuState::Expanding);
        settle(&mut menu, action);

        // items do not take taps while moving
        let item = menu.items()[0].bounds.center();
        menu.click(item, start);
        assert_eq!(hits.get(), 0);

        menu.tick(start + TRANSITION_DURATION);
        assert_eq!(menu.click(item, start), MenuAction::none());
        assert_eq!(hits.get(), 1);
        assert_eq!(menu.state(), MenuState::Expanded);

        menu.click(Point::new(-50.0, -50.0), start);
        assert_eq!(menu.state(), MenuState::Expanded);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_detach_completes_running_transition() {
        let mut menu = menu_with(3);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);
        menu.tick(start + TRANSITION_DURATION);
        menu.toggle(start + Duration::from_secs(1));
        assert!(menu.is_animating());

        menu.detach();
        assert!(!menu.is_animating());
        assert_eq!(menu.state(), MenuState::Collapsed);
        assert_eq!(menu.glyph(), AxisGlyph::Collapsed);
        assert_eq!(menu.tick(start + Duration::from_secs(2)), MenuAction::none());
    }

    #[test]
    fn test_single_item_expand_is_vertical() {
        let mut menu = menu_with(1);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);

        assert_eq!(menu.measure(), Size::new(40.0, 96.0));
        assert_eq!(menu.items()[0].translation, Offset::new(0.0, 56.0));
        assert!(menu.items()[0].center().distance(axis_center(&menu)) < 1e-9);
    }

    #[test]
    fn test_add_item_during_expand_ends_transition() {
        let mut menu = menu_with(3);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);
        assert!(menu.is_animating());

        let action = menu.add_item(MenuItem::new("late", None));
        assert!(action.should_relayout);
        assert!(!menu.is_animating());
        assert_eq!(menu.state(), MenuState::Expanded);
        settle(&mut menu, action);

        assert_eq!(menu.items().len(), 4);
        assert!(menu.items().iter().all(|v| v.translation == Offset::ZERO));
        assert_eq!(menu.measure(), Size::square(menu.engine.arc().bounds(5)));
        assert_eq!(menu.tick(start + TRANSITION_DURATION), MenuAction::none());
    }

    #[test]
    fn test_orientation_change_during_collapse_ends_transition() {
        let mut menu = menu_with(3);
        let start = Instant::now();
        let action = menu.toggle(start);
        settle(&mut menu, action);
        menu.tick(start + TRANSITION_DURATION);
        menu.toggle(start + Duration::from_secs(1));
        assert_eq!(menu.state(), MenuState::Collapsing);

        let action = menu.set_reading_direction(ReadingDirection::RightToLeft);
        assert!(action.should_relayout);
        assert!(!menu.is_animating());
        assert_eq!(menu.state(), MenuState::Collapsed);
        assert_eq!(menu.glyph(), AxisGlyph::Collapsed);
        settle(&mut menu, action);
        assert_eq!(menu.measure(), Size::square(40.0));

        let action = menu.set_quadrant(Quadrant::BottomStart);
        assert!(!menu.is_animating());
        settle(&mut menu, action);
        assert_eq!(menu.quadrant(), Quadrant::BottomStart);
    }
}
