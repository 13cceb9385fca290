use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use quadbubble::{
    AxisGlyph, BubbleMenu, Icon, MenuItem, MenuModel, MenuState, Orientation, Point, Size, Visual,
};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::iter::zip;
use std::path::{Path, PathBuf};

/// Gap between the window edge and the menu container.
pub const MARGIN: f64 = 24.0;
pub const ICON_SIZE: i32 = 256;

/// Decoded item images, keyed by path.
#[derive(Default)]
pub struct IconCache(HashMap<PathBuf, Pixbuf>);

impl IconCache {
    pub fn load(model: &MenuModel) -> Self {
        let icons = model
            .iter()
            .filter_map(|item| match item.icon() {
                Some(Icon::Image(path)) => Some(path),
                _ => None,
            })
            .filter_map(
                |path| match Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true) {
                    Ok(pixbuf) => Some((path.clone(), pixbuf)),
                    Err(e) => {
                        log::warn!("Failed to load icon {}: {}", path.display(), e);
                        None
                    }
                },
            )
            .collect();
        Self(icons)
    }

    pub fn get(&self, path: &Path) -> Option<&Pixbuf> {
        self.0.get(path)
    }
}

/// Top-left corner of the menu container, pinned to the window corner the
/// axis control occupies.
pub fn container_origin(area: Size, container: Size, orientation: Orientation) -> Point {
    let x = if orientation.axis_left_of_items {
        MARGIN
    } else {
        area.width - container.width - MARGIN
    };
    let y = if orientation.axis_below_items {
        area.height - container.height - MARGIN
    } else {
        MARGIN
    };
    Point::new(x, y)
}

pub fn to_menu_coords(point: Point, area: Size, menu: &BubbleMenu) -> Point {
    let origin = container_origin(area, menu.measure(), menu.orientation());
    Point::new(point.x - origin.x, point.y - origin.y)
}

struct BubbleRenderer<'a> {
    visual: &'a Visual,
}

impl<'a> BubbleRenderer<'a> {
    fn new(visual: &'a Visual) -> Self {
        Self { visual }
    }

    fn radius(&self) -> f64 {
        self.visual.bounds.size.width / 2.0
    }

    fn clip_to_circle(&self, cr: &Context) {
        let center = self.visual.center();
        cr.arc(center.x, center.y, self.radius(), 0.0, 2.0 * PI);
        cr.clip();
    }

    fn draw_item(
        &self,
        cr: &Context,
        item: &MenuItem,
        icons: &IconCache,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        cr.save()?;
        self.clip_to_circle(cr);
        match item.icon() {
            Some(Icon::Color(color)) => self.fill(cr, *color)?,
            Some(Icon::Image(path)) => match icons.get(path) {
                Some(pixbuf) => self.draw_icon(cr, pixbuf)?,
                None => {
                    self.fill(cr, colors.broken)?;
                    self.draw_text(cr, item.name(), colors.label)?;
                }
            },
            None => self.draw_text(cr, item.name(), colors.label)?,
        }
        cr.restore()
    }

    fn draw_axis(
        &self,
        cr: &Context,
        background: Srgba<f64>,
        glyph: AxisGlyph,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        cr.save()?;
        self.clip_to_circle(cr);
        self.fill(cr, background)?;
        self.draw_glyph(cr, glyph, colors.glyph)?;
        cr.restore()
    }

    fn fill(&self, cr: &Context, color: Srgba<f64>) -> Result<(), cairo::Error> {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.paint()
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        // cover the whole circle, the clip trims the corners
        let diameter = 2.0 * self.radius();
        let icon_scale = diameter / pixbuf.width().min(pixbuf.height()).max(1) as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );
        let center = self.visual.center();

        cr.save()?;
        cr.translate(center.x - iw / 2.0, center.y - ih / 2.0);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_text(&self, cr: &Context, text: &str, color: Srgba<f64>) -> Result<(), cairo::Error> {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.radius() * 0.5);
        let center = self.visual.center();
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
            cr.show_text(text)?;
        }
        Ok(())
    }

    /// `+` while collapsed, `x` while expanded.
    fn draw_glyph(
        &self,
        cr: &Context,
        glyph: AxisGlyph,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        let center = self.visual.center();
        let arm = self.radius() * 0.45;
        let rotation = match glyph {
            AxisGlyph::Collapsed => 0.0,
            AxisGlyph::Expanded => PI / 4.0,
        };

        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(self.radius() * 0.15);
        cr.set_line_cap(cairo::LineCap::Round);
        for angle in [rotation, rotation + PI / 2.0] {
            let (dx, dy) = (arm * angle.cos(), arm * angle.sin());
            cr.move_to(center.x - dx, center.y - dy);
            cr.line_to(center.x + dx, center.y + dy);
        }
        cr.stroke()
    }
}

pub fn draw(
    cr: &Context,
    menu: &BubbleMenu,
    icons: &IconCache,
    colors: &ThemeColors,
    area: Size,
) -> Result<(), cairo::Error> {
    let origin = container_origin(area, menu.measure(), menu.orientation());
    cr.save()?;
    cr.translate(origin.x, origin.y);

    // items hide under the axis once a collapse has finished
    if menu.state() != MenuState::Collapsed {
        for (item, visual) in zip(menu.model().iter(), menu.items()) {
            BubbleRenderer::new(visual).draw_item(cr, item, icons, colors)?;
        }
    }
    BubbleRenderer::new(menu.axis()).draw_axis(cr, menu.axis_background(), menu.glyph(), colors)?;

    cr.restore()
}
