use anyhow::{Context, Result};
use clap::Parser;
use notifier_item::{Category, ItemConfig, Status};

/// Struct that gets generated from `RawOpt`.
#[derive(Debug, PartialEq)]
pub struct Opt {
    pub log_debug: bool,
    pub item: ItemConfig,
    pub icon_name: Option<String>,
    pub attention_icon_name: Option<String>,
}

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
struct RawOpt {
    /// Write out debug logs.
    #[arg(long = "debug")]
    log_debug: bool,

    /// Title the tray host may show next to or instead of the icon.
    #[arg(long, default_value = "Test")]
    title: String,

    /// Initial status: Passive, Active or NeedsAttention.
    #[arg(long, default_value_t = Status::Active)]
    status: Status,

    /// ApplicationStatus, Communications, SystemServices or Hardware.
    #[arg(long, default_value_t = Category::ApplicationStatus)]
    category: Category,

    /// Id of the item, as reported to the tray host.
    #[arg(long, default_value = "")]
    id: String,

    /// Theme icon shown normally.
    #[arg(long)]
    icon_name: Option<String>,

    /// Theme icon shown while the status is NeedsAttention.
    #[arg(long)]
    attention_icon_name: Option<String>,

    /// Ask the host to show the menu instead of sending Activate.
    #[arg(long)]
    item_is_menu: bool,

    /// Object path of a dbusmenu exported on the item's connection.
    #[arg(long)]
    menu: Option<String>,
}

impl Opt {
    pub fn from_env() -> Result<Self> {
        RawOpt::parse().try_into()
    }
}

impl TryFrom<RawOpt> for Opt {
    type Error = anyhow::Error;

    fn try_from(other: RawOpt) -> Result<Self> {
        let RawOpt { log_debug, title, status, category, id, icon_name, attention_icon_name, item_is_menu, menu } = other;

        let mut item = ItemConfig { category, item_is_menu, title, status, id, ..ItemConfig::default() };
        if let Some(menu) = menu {
            item = item.with_menu(&menu).context("Invalid --menu")?;
        }

        Ok(Opt { log_debug, item, icon_name, attention_icon_name })
    }
}
