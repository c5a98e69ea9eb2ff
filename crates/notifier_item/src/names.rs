//! Bus names and object paths used by the StatusNotifierItem protocol, plus the per-process
//! allocation of item service names.

use std::sync::atomic::{AtomicU32, Ordering};

pub const WATCHER_BUS: &str = "org.kde.StatusNotifierWatcher";
pub const WATCHER_OBJECT: &str = "/StatusNotifierWatcher";

/// Prefix of the well-known name each item claims, completed with `-{pid}-{instance}`.
pub const ITEM_BUS_PREFIX: &str = "org.kde.StatusNotifierItem";
pub const ITEM_OBJECT: &str = "/StatusNotifierItem";

/// Menu path advertised by items that don't export a dbusmenu.
pub const NO_MENU_OBJECT: &str = "/NO_DMENU";

// Starts at zero when the process starts; the first item gets instance 1. Never decremented, so
// a name is never handed out twice even after its item is gone.
static INSTANCE_COUNTER: AtomicU32 = AtomicU32::new(0);

/// The well-known name of one item, together with the instance number it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemService {
    pub instance: u32,
    pub name: String,
}

/// Reserve the next item service name for this process.
pub fn allocate_item_service() -> ItemService {
    let instance = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    ItemService { instance, name: item_service_name(std::process::id(), instance) }
}

pub fn item_service_name(pid: u32, instance: u32) -> String {
    format!("{}-{}-{}", ITEM_BUS_PREFIX, pid, instance)
}
