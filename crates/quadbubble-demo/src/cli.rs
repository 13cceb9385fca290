use clap::Parser;
use palette::Srgba;
use quadbubble::config::{ConfigError, HexColor};
use quadbubble::{Icon, MenuItem, Quadrant};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "quadbubble-demo", version, about, long_about = None)]
pub struct Cli {
    /// Quadrant the items fan into (top-start, top-end, bottom-start, bottom-end)
    #[arg(short, long)]
    pub quadrant: Option<Quadrant>,

    /// Lay the menu out for right-to-left reading
    #[arg(long)]
    pub rtl: bool,

    /// Display density, multiplies every length of the config
    #[arg(short, long)]
    pub density: Option<f64>,

    /// Menu item as NAME, NAME=#rrggbb or NAME=/path/to/icon.png (repeatable)
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<ItemSpec>,

    /// Write the default config file and exit
    #[arg(long)]
    pub write_config: bool,
}

#[derive(Debug, Error)]
pub enum ItemSpecError {
    #[error("Item name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Color(#[from] ConfigError),
}

/// An item given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub name: String,
    pub icon: Option<Icon>,
}

impl ItemSpec {
    pub fn into_item(self) -> MenuItem {
        MenuItem::new(self.name, self.icon)
            .on_activate(|name| log::info!("Activated '{}'", name))
    }
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, icon) = match s.split_once('=') {
            Some((name, value)) if value.starts_with('#') => {
                (name, Some(Icon::Color(value.parse::<HexColor>()?.to_srgba())))
            }
            Some((name, value)) => (name, Some(Icon::Image(PathBuf::from(value)))),
            None => (s, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ItemSpecError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            icon,
        })
    }
}

/// Red, green, yellow and blue bubbles for a first look.
pub fn demo_items() -> Vec<ItemSpec> {
    [
        ("Red", Srgba::new(1.0, 0.133, 0.133, 1.0)),
        ("Green", Srgba::new(0.133, 1.0, 0.133, 1.0)),
        ("Yellow", Srgba::new(1.0, 1.0, 0.133, 1.0)),
        ("Blue", Srgba::new(0.133, 0.133, 1.0, 1.0)),
    ]
    .into_iter()
    .map(|(name, color)| ItemSpec {
        name: name.to_string(),
        icon: Some(Icon::Color(color)),
    })
    .collect()
}
