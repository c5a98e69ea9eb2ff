//! # DBus interface proxies
//!
//! Written the way [zbus-xmlgen](https://docs.rs/crate/zbus_xmlgen/latest) generates them from
//! the StatusNotifierWatcher interface XML. An item only ever talks to the watcher; hosts talk to
//! the item through [`crate::ItemInterface`].

mod dbus_status_notifier_watcher;
pub use dbus_status_notifier_watcher::*;
