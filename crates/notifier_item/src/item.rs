use crate::*;

use futures::StreamExt;
use smart_default::SmartDefault;
use tokio::sync::mpsc;
use zbus::zvariant::{ObjectPath, OwnedObjectPath};

/// Construction-time settings of an [`Item`].
#[derive(Debug, Clone, PartialEq, SmartDefault)]
pub struct ItemConfig {
    pub category: Category,
    pub item_is_menu: bool,
    /// Object path of the item's dbusmenu, on the item's own connection.
    #[default(ObjectPath::from_static_str_unchecked(names::NO_MENU_OBJECT).into())]
    pub menu: OwnedObjectPath,
    #[default("Test".to_owned())]
    pub title: String,
    pub status: Status,
    pub id: String,
}

impl ItemConfig {
    pub fn with_menu(mut self, path: &str) -> Result<Self> {
        self.menu = OwnedObjectPath::try_from(path).map_err(|_| Error::MenuPathError(path.to_owned()))?;
        Ok(self)
    }
}

/// A StatusNotifierItem on the session bus.
///
/// Each item has its own connection, since an object path can only be served once per connection
/// and every item lives at [`names::ITEM_OBJECT`]. The connection, the well-known name and the
/// registration with the StatusNotifierWatcher all last as long as the `Item`.
pub struct Item {
    con: zbus::Connection,
    service: names::ItemService,
    iface: zbus::object_server::InterfaceRef<ItemInterface>,

    // Dropping the set aborts the tasks, and with them their handles on the connection.
    tasks: tokio::task::JoinSet<()>,
}

impl Item {
    /// Put a new item on the session bus.
    ///
    /// Only failing to connect or to claim the service name is an error. Registration with the
    /// StatusNotifierWatcher happens in the background and is retried whenever a watcher appears.
    pub async fn new(config: ItemConfig) -> Result<(Self, ItemEvents)> {
        let service = names::allocate_item_service();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        // the window id is just our instance number
        let props = ItemProperties::new(&config, service.instance as i32);

        let con = zbus::connection::Builder::session()?
            .serve_at(names::ITEM_OBJECT, ItemInterface::new(props, events_tx))?
            .name(service.name.clone())?
            .build()
            .await?;
        log::info!("serving {} on {}", names::ITEM_OBJECT, service.name);

        let iface = con.object_server().interface::<_, ItemInterface>(names::ITEM_OBJECT).await?;

        let mut tasks = tokio::task::JoinSet::new();
        tasks.spawn({
            let con = con.clone();
            let service = service.name.clone();
            async move {
                if let Err(e) = maintain_registration(&con, &service).await {
                    log::error!("stopped watching for StatusNotifierWatcher: {}", e);
                }
            }
        });

        Ok((Self { con, service, iface, tasks }, events_rx))
    }

    /// The well-known name this item owns.
    pub fn service_name(&self) -> &str {
        &self.service.name
    }

    pub fn connection(&self) -> &zbus::Connection {
        &self.con
    }

    /// Snapshot of the current property table.
    pub async fn properties(&self) -> ItemProperties {
        self.iface.get().await.properties().clone()
    }

    pub async fn title(&self) -> String {
        self.iface.get().await.properties().title().to_owned()
    }

    pub async fn status(&self) -> Status {
        self.iface.get().await.properties().status()
    }

    pub async fn set_id(&self, id: impl Into<String>) {
        self.iface.get_mut().await.props.set_id(id);
    }

    pub async fn set_title(&self, title: impl Into<String>) {
        self.update(|props| props.set_title(title)).await
    }

    pub async fn set_status(&self, status: Status) {
        self.update(|props| props.set_status(status)).await
    }

    pub async fn set_icon_by_name(&self, name: impl Into<String>) {
        self.update(|props| props.set_icon_name(IconSlot::Icon, name)).await
    }

    pub async fn set_overlay_icon_by_name(&self, name: impl Into<String>) {
        self.update(|props| props.set_icon_name(IconSlot::OverlayIcon, name)).await
    }

    pub async fn set_attention_icon_by_name(&self, name: impl Into<String>) {
        self.update(|props| props.set_icon_name(IconSlot::AttentionIcon, name)).await
    }

    pub async fn set_icon_by_image(&self, image: &Image) {
        self.set_icon_by_pixmap(image.into()).await
    }

    pub async fn set_overlay_icon_by_image(&self, image: &Image) {
        self.set_overlay_icon_by_pixmap(image.into()).await
    }

    pub async fn set_attention_icon_by_image(&self, image: &Image) {
        self.set_attention_icon_by_pixmap(image.into()).await
    }

    pub async fn set_icon_by_pixmap(&self, pixmap: IconPixmap) {
        self.update(|props| Some(props.set_icon_pixmap(IconSlot::Icon, pixmap))).await
    }

    pub async fn set_overlay_icon_by_pixmap(&self, pixmap: IconPixmap) {
        self.update(|props| Some(props.set_icon_pixmap(IconSlot::OverlayIcon, pixmap))).await
    }

    pub async fn set_attention_icon_by_pixmap(&self, pixmap: IconPixmap) {
        self.update(|props| Some(props.set_icon_pixmap(IconSlot::AttentionIcon, pixmap))).await
    }

    async fn update(&self, f: impl FnOnce(&mut ItemProperties) -> Option<Signal>) {
        let signal = {
            let mut iface = self.iface.get_mut().await;
            f(&mut iface.props)
        };

        if let Some(signal) = signal {
            if let Err(e) = ItemInterface::emit(self.iface.signal_context(), signal).await {
                log::warn!("failed to emit {} for {}: {}", signal.name(), self.service.name, e);
            }
        }
    }

    /// Take the item off the bus: remove the object, release the name, stop the registration
    /// task, then close the connection.
    ///
    /// The connection is closed by dropping the last handle on it, which happens at the end of this
    /// function unless the caller kept a clone of [`Item::connection`]. Failures are logged and
    /// otherwise ignored.
    pub async fn shutdown(self) {
        let Self { con, service, iface, mut tasks } = self;

        match con.object_server().remove::<ItemInterface, _>(names::ITEM_OBJECT).await {
            Ok(true) => {}
            Ok(false) => log::warn!("{} was not being served on {}", names::ITEM_OBJECT, service.name),
            Err(e) => log::warn!("failed to remove {} from {}: {}", names::ITEM_OBJECT, service.name, e),
        }

        match con.release_name(service.name.as_str()).await {
            Ok(true) => {}
            Ok(false) => log::warn!("{} was not owned by this connection", service.name),
            Err(e) => log::warn!("failed to release {}: {}", service.name, e),
        }

        tasks.shutdown().await;

        // the signal context in `iface` holds a clone of the connection
        drop(iface);
        drop(con);
        log::info!("removed {}", service.name);
    }
}

/// Register with the current StatusNotifierWatcher, and again every time a new one takes over
/// its name.
async fn maintain_registration(con: &zbus::Connection, service: &str) -> zbus::fdo::Result<()> {
    let dbus = zbus::fdo::DBusProxy::new(con).await?;
    // subscribe first, so a watcher starting right after the initial attempt isn't missed
    let mut owner_changes = dbus.receive_name_owner_changed_with_args(&[(0, names::WATCHER_BUS)]).await?;

    register_with_watcher(con, service).await;

    while let Some(sig) = owner_changes.next().await {
        let args = sig.args()?;
        if args.new_owner().is_some() {
            log::info!("StatusNotifierWatcher appeared, registering {}", service);
            register_with_watcher(con, service).await;
        }
    }

    Ok(())
}

/// Send `RegisterStatusNotifierItem` for `service`. The call carries no-reply-expected, so a
/// watcher that never answers can't hold up the registration task.
async fn register_with_watcher(con: &zbus::Connection, service: &str) {
    let result = async {
        let snw = dbus::StatusNotifierWatcherProxy::builder(con)
            .cache_properties(zbus::proxy::CacheProperties::No)
            .build()
            .await?;
        snw.register_status_notifier_item(service).await
    }
    .await;

    match result {
        Ok(()) => log::info!("sent registration of {} to StatusNotifierWatcher", service),
        Err(e) => log::warn!("failed to register {} with StatusNotifierWatcher: {}", service, e),
    }
}
