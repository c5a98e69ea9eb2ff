use crate::*;

use zbus::zvariant::{OwnedObjectPath, Value};

/// The three icons an item can show. Each one is given either by theme name or by pixmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum IconSlot {
    Icon,
    OverlayIcon,
    AttentionIcon,
}

impl IconSlot {
    /// The signal that tells the host to re-fetch this slot.
    pub fn changed_signal(self) -> Signal {
        match self {
            IconSlot::Icon => Signal::NewIcon,
            IconSlot::OverlayIcon => Signal::NewOverlayIcon,
            IconSlot::AttentionIcon => Signal::NewAttentionIcon,
        }
    }
}

/// Contents of one [`IconSlot`]. An empty name means the slot isn't set by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconData {
    pub name: String,
    pub pixmaps: Vec<IconPixmap>,
}

/// Change notifications an item sends to hosts, named after the D-Bus signal they map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum Signal {
    NewTitle,
    NewStatus(Status),
    NewIcon,
    NewOverlayIcon,
    NewAttentionIcon,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Every property exported on `org.kde.StatusNotifierItem`, by its D-Bus name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
pub enum Property {
    Id,
    Category,
    Title,
    Status,
    WindowId,
    IconName,
    IconPixmap,
    OverlayIconName,
    OverlayIconPixmap,
    AttentionIconName,
    AttentionIconPixmap,
    ToolTip,
    ItemIsMenu,
    Menu,
    AttentionMovieName,
}

/// The property table of one item.
///
/// This holds no bus state: every mutator returns the [`Signal`] that has to be emitted for the
/// change, or `None` when nothing observable changed. [`Item`] applies the mutation on the served
/// interface and then emits the signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemProperties {
    id: String,
    category: Category,
    title: String,
    status: Status,
    window_id: i32,
    icon: IconData,
    overlay_icon: IconData,
    attention_icon: IconData,
    item_is_menu: bool,
    menu: OwnedObjectPath,
}

impl ItemProperties {
    pub fn new(config: &ItemConfig, window_id: i32) -> Self {
        Self {
            id: config.id.clone(),
            category: config.category,
            title: config.title.clone(),
            status: config.status,
            window_id,
            icon: IconData::default(),
            overlay_icon: IconData::default(),
            attention_icon: IconData::default(),
            item_is_menu: config.item_is_menu,
            menu: config.menu.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn window_id(&self) -> i32 {
        self.window_id
    }

    pub fn item_is_menu(&self) -> bool {
        self.item_is_menu
    }

    pub fn menu(&self) -> &OwnedObjectPath {
        &self.menu
    }

    pub fn icon(&self, slot: IconSlot) -> &IconData {
        match slot {
            IconSlot::Icon => &self.icon,
            IconSlot::OverlayIcon => &self.overlay_icon,
            IconSlot::AttentionIcon => &self.attention_icon,
        }
    }

    /// Items built with this crate have no tooltip.
    pub fn tool_tip(&self) -> ToolTip {
        ToolTip::default()
    }

    pub fn attention_movie_name(&self) -> &str {
        ""
    }

    fn icon_mut(&mut self, slot: IconSlot) -> &mut IconData {
        match slot {
            IconSlot::Icon => &mut self.icon,
            IconSlot::OverlayIcon => &mut self.overlay_icon,
            IconSlot::AttentionIcon => &mut self.attention_icon,
        }
    }

    /// Look up a property by name, in the form it is sent over the bus. The `#[zbus(property)]`
    /// getters of [`ItemInterface`] read the same accessors, so both agree.
    pub fn get(&self, property: Property) -> Value<'static> {
        match property {
            Property::Id => Value::from(self.id.clone()),
            Property::Category => Value::from(self.category.to_string()),
            Property::Title => Value::from(self.title.clone()),
            Property::Status => Value::from(self.status.to_string()),
            Property::WindowId => Value::from(self.window_id),
            Property::IconName => Value::from(self.icon(IconSlot::Icon).name.clone()),
            Property::IconPixmap => Value::from(self.icon(IconSlot::Icon).pixmaps.clone()),
            Property::OverlayIconName => Value::from(self.icon(IconSlot::OverlayIcon).name.clone()),
            Property::OverlayIconPixmap => Value::from(self.icon(IconSlot::OverlayIcon).pixmaps.clone()),
            Property::AttentionIconName => Value::from(self.icon(IconSlot::AttentionIcon).name.clone()),
            Property::AttentionIconPixmap => Value::from(self.icon(IconSlot::AttentionIcon).pixmaps.clone()),
            Property::ToolTip => Value::from(self.tool_tip()),
            Property::ItemIsMenu => Value::from(self.item_is_menu),
            Property::Menu => Value::from(self.menu.clone()),
            Property::AttentionMovieName => Value::from(self.attention_movie_name().to_owned()),
        }
    }

    /// The id has no change signal; hosts read it once when the item shows up.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Option<Signal> {
        let title = title.into();
        if self.title == title {
            return None;
        }
        self.title = title;
        Some(Signal::NewTitle)
    }

    pub fn set_status(&mut self, status: Status) -> Option<Signal> {
        if self.status == status {
            return None;
        }
        self.status = status;
        Some(Signal::NewStatus(status))
    }

    /// Set a slot by theme name. A changed name drops any pixmap the slot held.
    pub fn set_icon_name(&mut self, slot: IconSlot, name: impl Into<String>) -> Option<Signal> {
        let name = name.into();
        let icon = self.icon_mut(slot);
        if icon.name == name {
            return None;
        }
        icon.name = name;
        icon.pixmaps.clear();
        Some(slot.changed_signal())
    }

    /// Set a slot by pixmap, clearing its name.
    ///
    /// Unlike the other setters this always reports a change, even when the pixmap is identical
    /// to the current one.
    pub fn set_icon_pixmap(&mut self, slot: IconSlot, pixmap: IconPixmap) -> Signal {
        let icon = self.icon_mut(slot);
        icon.name.clear();
        icon.pixmaps = vec![pixmap];
        slot.changed_signal()
    }

    /// Drop out of `NeedsAttention` after the user interacted with the item. This does not produce
    /// a `NewStatus` signal.
    pub(crate) fn acknowledge_attention(&mut self) -> bool {
        if self.status == Status::NeedsAttention {
            self.status = Status::Active;
            true
        } else {
            false
        }
    }
}
