//! A single [StatusNotifierItem] living on the session bus.
//!
//! [`Item`] owns a dedicated bus connection, serves [`ItemInterface`] at
//! [`names::ITEM_OBJECT`] and keeps itself registered with whichever StatusNotifierWatcher is
//! currently running. Interaction from the tray host arrives on the [`ItemEvents`] channel.
//!
//! [StatusNotifierItem]: https://freedesktop.org/wiki/Specifications/StatusNotifierItem/StatusNotifierItem/

pub mod dbus;
pub mod names;

mod error;
pub use error::*;

mod interface;
pub use interface::*;

mod item;
pub use item::*;

mod pixmap;
pub use pixmap::*;

mod properties;
pub use properties::*;

mod status;
pub use status::*;
