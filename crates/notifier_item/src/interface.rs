use crate::*;

use tokio::sync::mpsc;
use zbus::zvariant::OwnedObjectPath;

/// Requests from the tray host that the owner of an item has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    /// Primary activation, usually a left click.
    Activate(Point),
    /// Secondary activation, usually a middle click.
    SecondaryActivate(Point),
    Scroll { delta: i32, orientation: Orientation },
}

pub type ItemEvents = mpsc::UnboundedReceiver<ItemEvent>;

/// The object served at [`names::ITEM_OBJECT`].
#[derive(Debug)]
pub struct ItemInterface {
    pub(crate) props: ItemProperties,
    events: mpsc::UnboundedSender<ItemEvent>,
}

impl ItemInterface {
    pub fn new(props: ItemProperties, events: mpsc::UnboundedSender<ItemEvent>) -> Self {
        Self { props, events }
    }

    pub fn properties(&self) -> &ItemProperties {
        &self.props
    }

    fn send(&self, event: ItemEvent) {
        // nobody listening is fine
        let _ = self.events.send(event);
    }

    /// Emit the D-Bus signal corresponding to `signal`.
    pub async fn emit(ctxt: &zbus::object_server::SignalContext<'_>, signal: Signal) -> zbus::Result<()> {
        match signal {
            Signal::NewTitle => Self::new_title(ctxt).await,
            Signal::NewStatus(status) => Self::new_status(ctxt, status.into()).await,
            Signal::NewIcon => Self::new_icon(ctxt).await,
            Signal::NewOverlayIcon => Self::new_overlay_icon(ctxt).await,
            Signal::NewAttentionIcon => Self::new_attention_icon(ctxt).await,
        }
    }
}

/// Implementation of the `StatusNotifierItem` service.
///
/// Methods are called by the host on user interaction. Properties are read by the host after it
/// receives one of the signals.
#[zbus::interface(name = "org.kde.StatusNotifierItem")]
impl ItemInterface {
    /// Activate method
    fn activate(&mut self, x: i32, y: i32) {
        log::debug!("Activate({}, {})", x, y);
        self.props.acknowledge_attention();
        self.send(ItemEvent::Activate(Point { x, y }));
    }

    /// SecondaryActivate method
    fn secondary_activate(&mut self, x: i32, y: i32) {
        log::debug!("SecondaryActivate({}, {})", x, y);
        self.props.acknowledge_attention();
        self.send(ItemEvent::SecondaryActivate(Point { x, y }));
    }

    /// ContextMenu method. Hosts show the menu by reading the `Menu` property, so there's nothing
    /// to do here.
    fn context_menu(&self, x: i32, y: i32) {
        log::debug!("ContextMenu({}, {}) ignored", x, y);
    }

    /// Scroll method
    fn scroll(&self, delta: i32, orientation: &str) {
        log::debug!("Scroll({}, {:?})", delta, orientation);
        self.send(ItemEvent::Scroll { delta, orientation: Orientation::from_host_str(orientation) });
    }

    // ------------------------------------------------------------------------

    /// NewTitle signal
    #[zbus(signal)]
    async fn new_title(ctxt: &zbus::object_server::SignalContext<'_>) -> zbus::Result<()>;

    /// NewStatus signal
    #[zbus(signal)]
    async fn new_status(ctxt: &zbus::object_server::SignalContext<'_>, status: &str) -> zbus::Result<()>;

    /// NewIcon signal
    #[zbus(signal)]
    async fn new_icon(ctxt: &zbus::object_server::SignalContext<'_>) -> zbus::Result<()>;

    /// NewOverlayIcon signal
    #[zbus(signal)]
    async fn new_overlay_icon(ctxt: &zbus::object_server::SignalContext<'_>) -> zbus::Result<()>;

    /// NewAttentionIcon signal
    #[zbus(signal)]
    async fn new_attention_icon(ctxt: &zbus::object_server::SignalContext<'_>) -> zbus::Result<()>;

    // ------------------------------------------------------------------------

    #[zbus(property)]
    fn id(&self) -> String {
        self.props.id().to_owned()
    }

    #[zbus(property)]
    fn category(&self) -> String {
        self.props.category().to_string()
    }

    #[zbus(property)]
    fn title(&self) -> String {
        self.props.title().to_owned()
    }

    #[zbus(property)]
    fn status(&self) -> String {
        self.props.status().to_string()
    }

    #[zbus(property)]
    fn window_id(&self) -> i32 {
        self.props.window_id()
    }

    #[zbus(property)]
    fn icon_name(&self) -> String {
        self.props.icon(IconSlot::Icon).name.clone()
    }

    #[zbus(property)]
    fn icon_pixmap(&self) -> Vec<IconPixmap> {
        self.props.icon(IconSlot::Icon).pixmaps.clone()
    }

    #[zbus(property)]
    fn overlay_icon_name(&self) -> String {
        self.props.icon(IconSlot::OverlayIcon).name.clone()
    }

    #[zbus(property)]
    fn overlay_icon_pixmap(&self) -> Vec<IconPixmap> {
        self.props.icon(IconSlot::OverlayIcon).pixmaps.clone()
    }

    #[zbus(property)]
    fn attention_icon_name(&self) -> String {
        self.props.icon(IconSlot::AttentionIcon).name.clone()
    }

    #[zbus(property)]
    fn attention_icon_pixmap(&self) -> Vec<IconPixmap> {
        self.props.icon(IconSlot::AttentionIcon).pixmaps.clone()
    }

    #[zbus(property)]
    fn tool_tip(&self) -> ToolTip {
        self.props.tool_tip()
    }

    #[zbus(property)]
    fn item_is_menu(&self) -> bool {
        self.props.item_is_menu()
    }

    #[zbus(property)]
    fn menu(&self) -> OwnedObjectPath {
        self.props.menu().clone()
    }

    #[zbus(property)]
    fn attention_movie_name(&self) -> String {
        self.props.attention_movie_name().to_owned()
    }
}
