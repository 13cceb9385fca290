use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl From<&str> for ItemName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// What a circle shows. Images are decoded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Color(Srgba<f64>),
    Image(PathBuf),
}

/// Icon the axis control shows for the current steady state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisGlyph {
    #[default]
    Collapsed,
    Expanded,
}

pub type ActivateFn = Box<dyn Fn(&ItemName)>;

pub struct MenuItem {
    name: ItemName,
    icon: Option<Icon>,
    on_activate: Option<ActivateFn>,
}

impl MenuItem {
    pub fn new(name: impl Into<ItemName>, icon: Option<Icon>) -> Self {
        Self {
            name: name.into(),
            icon,
            on_activate: None,
        }
    }

    pub fn on_activate(mut self, f: impl Fn(&ItemName) + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// Runs the tap handler, returns whether there was one.
    pub fn activate(&self) -> bool {
        match &self.on_activate {
            Some(f) => {
                f(&self.name);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

pub fn default_placeholder() -> Srgba<f64> {
    Srgba::new(0.867, 0.867, 0.867, 1.0)
}

/// Append-only list of items in fan order.
#[derive(Debug)]
pub struct MenuModel {
    items: Vec<MenuItem>,
    placeholder: Srgba<f64>,
}

impl MenuModel {
    pub fn new(placeholder: Srgba<f64>) -> Self {
        Self {
            items: Vec::new(),
            placeholder,
        }
    }

    /// Items without an icon get the placeholder color.
    pub fn add_item(&mut self, mut item: MenuItem) -> usize {
        if item.icon.is_none() {
            item.icon = Some(Icon::Color(self.placeholder));
        }
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }
}

impl Default for MenuModel {
    fn default() -> Self {
        Self::new(default_placeholder())
    }
}
