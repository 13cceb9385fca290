use crate::cli::{self, Cli};
use crate::gui::theme::ThemeColors;
use crate::gui::view::{self, IconCache};
use gtk::prelude::*;
use gtk4 as gtk;
use quadbubble::config::MenuConfig;
use quadbubble::{BubbleMenu, MenuAction, MenuOptions, Point, ReadingDirection, Size};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub menu: Rc<RefCell<BubbleMenu>>,
    pub icons: Rc<IconCache>,
    pub ticking: Rc<Cell<bool>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Click(Point),
    Collapse,
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (MenuConfig, Cli);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("QuadBubble"),
            set_default_size: (480, 480),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Collapse);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, cli) = init;

        let menu = Rc::new(RefCell::new(build_menu(&config, cli)));
        let icons = Rc::new(IconCache::load(menu.borrow().model()));

        let model = AppModel {
            menu: menu.clone(),
            icons: icons.clone(),
            ticking: Rc::new(Cell::new(false)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let area = Size::new(width as f64, height as f64);
                if let Err(e) = view::draw(cr, &menu.borrow(), &icons, &colors, area) {
                    log::error!("Drawing error: {}", e);
                }
            });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let action = match msg {
            AppMsg::Click(point) => {
                let area = Size::new(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                let mut menu = self.menu.borrow_mut();
                let point = view::to_menu_coords(point, area, &menu);
                menu.click(point, Instant::now())
            }
            AppMsg::Collapse => {
                let mut menu = self.menu.borrow_mut();
                if menu.state().expands_next() {
                    MenuAction::none()
                } else {
                    menu.toggle(Instant::now())
                }
            }
        };
        apply(&self.menu, &self.drawing_area, action);
        self.start_ticking();
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.menu.borrow_mut().detach();
    }
}

impl AppModel {
    /// Drives the running transition from the widget's frame clock until it
    /// ends.
    fn start_ticking(&self) {
        if self.ticking.get() || !self.menu.borrow().is_animating() {
            return;
        }
        self.ticking.set(true);

        let menu = self.menu.clone();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |area, _clock| {
            let action = menu.borrow_mut().tick(Instant::now());
            apply(&menu, area, action);
            if menu.borrow().is_animating() {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}

/// Command line values win over the config file.
fn build_menu(config: &MenuConfig, cli: Cli) -> BubbleMenu {
    let density = cli.density.unwrap_or(1.0);
    let direction = if gtk::Widget::default_direction() == gtk::TextDirection::Rtl {
        ReadingDirection::RightToLeft
    } else {
        ReadingDirection::LeftToRight
    };

    let mut options = config.options(density, direction).unwrap_or_else(|e| {
        log::error!("Invalid menu config, using defaults: {}", e);
        MenuOptions {
            reading_direction: direction,
            ..MenuOptions::default()
        }
    });
    if let Some(quadrant) = cli.quadrant {
        options.quadrant = quadrant;
    }
    if cli.rtl {
        options.reading_direction = ReadingDirection::RightToLeft;
    }
    log::info!(
        "Menu in {} quadrant, {}",
        options.quadrant,
        options.reading_direction
    );

    let mut menu = BubbleMenu::with_options(options);
    let items = if cli.items.is_empty() {
        cli::demo_items()
    } else {
        cli.items
    };
    for spec in items {
        menu.add_item(spec.into_item());
    }
    let size = menu.measure();
    menu.layout(size);
    menu
}

fn apply(menu: &RefCell<BubbleMenu>, area: &gtk::DrawingArea, action: MenuAction) {
    if action.should_relayout {
        let mut menu = menu.borrow_mut();
        let size = menu.measure();
        menu.layout(size);
    }
    if action.should_relayout || action.should_redraw {
        area.queue_draw();
    }
}
