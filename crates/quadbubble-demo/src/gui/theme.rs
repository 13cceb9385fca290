use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub glyph: Srgba<f64>,
    pub label: Srgba<f64>,
    pub broken: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let named = |name: &str| context.lookup_color(name).map(rgba_to_srgba);
        Self {
            glyph: named("theme_fg_color")
                .map(opaque)
                .unwrap_or(Srgba::new(0.2, 0.2, 0.2, 1.0)),
            label: named("theme_selected_fg_color").unwrap_or(Srgba::new(1.0, 1.0, 1.0, 1.0)),
            broken: named("error_bg_color")
                .map(|c| Srgba { alpha: 0.5, ..c })
                .unwrap_or(Srgba::new(0.8, 0.2, 0.2, 0.5)),
        }
    }
}

fn rgba_to_srgba(c: gtk::gdk::RGBA) -> Srgba<f64> {
    Srgba::new(c.red(), c.green(), c.blue(), c.alpha()).into_format()
}

fn opaque(c: Srgba<f64>) -> Srgba<f64> {
    Srgba { alpha: 1.0, ..c }
}
