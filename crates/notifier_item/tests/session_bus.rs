//! These need a running session bus, so they only run with `cargo test -- --ignored`. The
//! watcher tests claim `org.kde.StatusNotifierWatcher` themselves, so run them on a bus without a
//! real watcher, e.g. under `dbus-run-session`.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use futures::StreamExt;
use notifier_item::{dbus::StatusNotifierWatcherProxy, names, IconPixmap, Item, ItemConfig, Status};
use pretty_assertions::assert_eq;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn name_has_owner(con: &zbus::Connection, name: &str) -> bool {
    let dbus = zbus::fdo::DBusProxy::new(con).await.unwrap();
    dbus.name_has_owner(name.try_into().unwrap()).await.unwrap()
}

/// Poll `condition` until it holds, failing the test after [`TIMEOUT`].
async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(TIMEOUT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

/// A StatusNotifierWatcher that only records who registered.
#[derive(Debug, Default, Clone)]
struct RecordingWatcher {
    registered: Arc<Mutex<Vec<String>>>,
}

impl RecordingWatcher {
    fn registered(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }
}

#[zbus::interface(name = "org.kde.StatusNotifierWatcher")]
impl RecordingWatcher {
    fn register_status_notifier_item(&self, service: &str) {
        self.registered.lock().unwrap().push(service.to_owned());
    }
}

/// A StatusNotifierWatcher that accepts registrations and never answers them.
#[derive(Debug, Default, Clone)]
struct SilentWatcher {
    calls: Arc<AtomicUsize>,
}

#[zbus::interface(name = "org.kde.StatusNotifierWatcher")]
impl SilentWatcher {
    async fn register_status_notifier_item(&self, _service: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await
    }
}

async fn start_watcher<I: zbus::object_server::Interface>(watcher: I) -> zbus::Connection {
    zbus::connection::Builder::session()
        .unwrap()
        .serve_at(names::WATCHER_OBJECT, watcher)
        .unwrap()
        .name(names::WATCHER_BUS)
        .unwrap()
        .build()
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_items_get_distinct_names() {
    let (first, _first_events) = Item::new(ItemConfig::default()).await.unwrap();
    let (second, _second_events) = Item::new(ItemConfig::default()).await.unwrap();

    assert_ne!(first.service_name(), second.service_name());
    assert!(name_has_owner(first.connection(), second.service_name()).await);
    assert!(name_has_owner(second.connection(), first.service_name()).await);

    first.shutdown().await;
    second.shutdown().await;
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_shutdown_releases_name() {
    let observer = zbus::Connection::session().await.unwrap();
    let (item, _events) = Item::new(ItemConfig::default()).await.unwrap();
    let service = item.service_name().to_owned();
    let unique_name = item.connection().unique_name().unwrap().to_string();
    assert!(name_has_owner(&observer, &service).await);

    item.shutdown().await;
    assert!(!name_has_owner(&observer, &service).await);

    // the connection itself is closed too, so its unique name goes away
    tokio::time::timeout(TIMEOUT, async {
        while name_has_owner(&observer, &unique_name).await {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("connection still open after shutdown");
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_host_sees_properties() {
    let observer = zbus::Connection::session().await.unwrap();
    let (item, _events) = Item::new(ItemConfig { title: "Mail".to_owned(), ..ItemConfig::default() }).await.unwrap();
    item.set_status(Status::NeedsAttention).await;
    item.set_icon_by_name("mail-unread").await;

    let proxy = zbus::Proxy::new(&observer, item.service_name().to_owned(), names::ITEM_OBJECT, "org.kde.StatusNotifierItem")
        .await
        .unwrap();
    let title: String = proxy.get_property("Title").await.unwrap();
    let status: String = proxy.get_property("Status").await.unwrap();
    let icon_name: String = proxy.get_property("IconName").await.unwrap();
    assert_eq!(title, "Mail");
    assert_eq!(status, "NeedsAttention");
    assert_eq!(icon_name, "mail-unread");

    item.shutdown().await;
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_host_activation_reaches_owner() {
    let observer = zbus::Connection::session().await.unwrap();
    let (item, mut events) = Item::new(ItemConfig::default()).await.unwrap();
    item.set_status(Status::NeedsAttention).await;

    let proxy = zbus::Proxy::new(&observer, item.service_name().to_owned(), names::ITEM_OBJECT, "org.kde.StatusNotifierItem")
        .await
        .unwrap();
    let () = proxy.call("Activate", &(5i32, 7i32)).await.unwrap();

    assert_eq!(events.recv().await, Some(notifier_item::ItemEvent::Activate(notifier_item::Point { x: 5, y: 7 })));
    assert_eq!(item.status().await, Status::Active);

    item.shutdown().await;
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_reregisters_when_watcher_restarts() {
    let watcher = RecordingWatcher::default();
    let watcher_con = start_watcher(watcher.clone()).await;

    let (item, _events) = Item::new(ItemConfig::default()).await.unwrap();
    let service = item.service_name().to_owned();
    wait_until(|| watcher.registered().len() == 1).await;

    watcher_con.release_name(names::WATCHER_BUS).await.unwrap();
    drop(watcher_con);

    let _watcher_con = start_watcher(watcher.clone()).await;
    wait_until(|| watcher.registered().len() == 2).await;
    assert_eq!(watcher.registered(), vec![service.clone(), service]);

    item.shutdown().await;
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_registration_does_not_wait_for_reply() {
    let watcher = SilentWatcher::default();
    let _watcher_con = start_watcher(watcher.clone()).await;

    let (item, _events) = Item::new(ItemConfig::default()).await.unwrap();
    wait_until(|| watcher.calls.load(Ordering::SeqCst) == 1).await;

    // the watcher is sitting on the item's registration, sending another must still return
    let observer = zbus::Connection::session().await.unwrap();
    let snw = StatusNotifierWatcherProxy::builder(&observer)
        .cache_properties(zbus::proxy::CacheProperties::No)
        .build()
        .await
        .unwrap();
    let sent = tokio::time::timeout(TIMEOUT, snw.register_status_notifier_item(item.service_name())).await;
    assert!(matches!(sent, Ok(Ok(()))));

    tokio::time::timeout(TIMEOUT, item.set_title("Mail")).await.unwrap();
    tokio::time::timeout(TIMEOUT, item.shutdown()).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a session bus"]
async fn test_signals_follow_changes() {
    let observer = zbus::Connection::session().await.unwrap();
    let (item, _events) = Item::new(ItemConfig::default()).await.unwrap();
    let sender = item.connection().unique_name().unwrap().to_string();

    let rule = zbus::MatchRule::builder()
        .msg_type(zbus::message::Type::Signal)
        .sender(sender.as_str())
        .unwrap()
        .path(names::ITEM_OBJECT)
        .unwrap()
        .interface("org.kde.StatusNotifierItem")
        .unwrap()
        .build();
    let mut signals = zbus::MessageStream::for_match_rule(rule, &observer, None).await.unwrap();

    let pixmap = IconPixmap { width: 1, height: 1, bytes: vec![0xff, 0x20, 0x40, 0x60] };
    item.set_title("Test").await;
    item.set_title("Mail").await;
    item.set_title("Mail").await;
    item.set_status(Status::NeedsAttention).await;
    item.set_icon_by_pixmap(pixmap.clone()).await;
    item.set_icon_by_pixmap(pixmap).await;
    item.set_icon_by_name("mail-unread").await;
    // marks the end of the sequence
    item.set_title("Done").await;

    let mut received = Vec::new();
    let mut new_status = None;
    tokio::time::timeout(TIMEOUT, async {
        while received.len() < 6 {
            let msg = signals.next().await.unwrap().unwrap();
            let member = msg.header().member().unwrap().to_string();
            if member == "NewStatus" {
                new_status = Some(msg.body().deserialize::<String>().unwrap());
            }
            received.push(member);
        }
    })
    .await
    .expect("signals did not arrive in time");

    assert_eq!(received, vec!["NewTitle", "NewStatus", "NewIcon", "NewIcon", "NewIcon", "NewTitle"]);
    assert_eq!(new_status.as_deref(), Some("NeedsAttention"));

    item.shutdown().await;
}
