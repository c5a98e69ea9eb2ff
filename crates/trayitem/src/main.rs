use anyhow::{Context, Result};
use notifier_item::{Item, ItemEvent, Status};

mod opts;

fn main() {
    let opts = match opts::Opt::from_env() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("{:?}", err);
            std::process::exit(1);
        }
    };

    let log_level_filter = if opts.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("trayitem"), log_level_filter)
            .filter(Some("notifier_item"), log_level_filter)
            .init();
    }

    if let Err(err) = run(opts) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(opts: opts::Opt) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().context("Failed to start tokio runtime")?;
    rt.block_on(serve(opts))
}

async fn serve(opts: opts::Opt) -> Result<()> {
    let (item, mut events) = Item::new(opts.item).await.context("Failed to put the item on the session bus")?;
    if let Some(name) = opts.icon_name {
        item.set_icon_by_name(name).await;
    }
    if let Some(name) = opts.attention_icon_name {
        item.set_attention_icon_by_name(name).await;
    }
    log::info!("{} is up, press Ctrl-C to remove it", item.service_name());

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                handle_event(&item, event).await;
            }
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    item.shutdown().await;
    Ok(())
}

async fn handle_event(item: &Item, event: ItemEvent) {
    match event {
        ItemEvent::Activate(pos) => log::info!("activated at {},{}", pos.x, pos.y),
        ItemEvent::SecondaryActivate(pos) => {
            // middle click asks for attention, so the host's attention handling can be tried out
            log::info!("secondary activation at {},{}", pos.x, pos.y);
            item.set_status(Status::NeedsAttention).await;
        }
        ItemEvent::Scroll { delta, orientation } => log::info!("scrolled {} {}", delta, orientation),
    }
}
