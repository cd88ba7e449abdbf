// SPDX-License-Identifier: MPL-2.0
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use aura_notify::config::{self, Config};
use aura_notify::diagnostics::DiagnosticsCollector;
use aura_notify::notice::{
    ClickModifiers, HeadlessOverlay, NoticeEvent, NoticeManager, NoticeOptions, PointerTarget,
    TokioScheduler,
};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
aura-notify-demo

USAGE:
  aura-notify-demo [OPTIONS]

OPTIONS:
  --config PATH          Read settings from PATH instead of the user config dir
  --auto-close-ms N      Default auto-close delay; 0 keeps notices until closed
  --no-animation         Disable entrance animations
  -h, --help             Print this help
";

/// How long the scripted notices run before everything is dismissed.
const DEMO_DURATION: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Args {
    config: Option<PathBuf>,
    auto_close_ms: Option<i64>,
    no_animation: bool,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        auto_close_ms: args.opt_value_from_str("--auto-close-ms")?,
        no_animation: args.contains("--no-animation"),
    };
    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unknown arguments");
    }
    Ok(Some(parsed))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aura_notify=info")),
        )
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(ms) = args.auto_close_ms {
        config.auto_close_ms = Some(ms);
    }
    if args.no_animation {
        config.animation = Some(false);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(config))
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let scheduler = Rc::new(TokioScheduler::new());
    let overlay = HeadlessOverlay::new(scheduler.clone(), config.overlay_timing());
    let manager = NoticeManager::with_defaults(
        overlay.clone(),
        scheduler.clone(),
        config.notice_defaults(),
    );
    let mut collector = DiagnosticsCollector::new(config.diagnostics_capacity());
    manager.set_diagnostics(collector.handle());

    manager.open(
        NoticeOptions::info("Connecting to the sync server")
            .title("Sync")
            .external_id("sync")
            .auto_close_ms(0),
    );
    let upload = manager.open(
        NoticeOptions::new("Uploading report.pdf")
            .title("Upload")
            .on_event(|event, handle| {
                tracing::info!(index = %handle.index(), event = event.as_str(), "upload notice event");
                if event == NoticeEvent::Click {
                    handle.set_message("Upload opened in the browser");
                }
            }),
    );
    manager.open(
        NoticeOptions::success("All files synchronised")
            .title("Sync")
            .external_id("sync")
            .auto_close_ms(1500),
    );
    manager.open(
        NoticeOptions::new("Shift-click any close button to dismiss every notice")
            .kind("tips")
            .auto_close_for_reading(),
    );

    print_overlay("opened", &overlay);
    overlay.click(upload, PointerTarget::Body, ClickModifiers::default());
    print_overlay("after click", &overlay);

    tokio::time::sleep(DEMO_DURATION).await;
    print_overlay("after the demo window", &overlay);

    if let Some(first) = overlay.elements().first() {
        overlay.click(first.index, PointerTarget::CloseButton, ClickModifiers { shift: true });
    }
    while !manager.is_empty() {
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    print_overlay("after dismissing", &overlay);

    collector.process_pending();
    println!("{}", collector.export_json()?);
    Ok(())
}

fn print_overlay(label: &str, overlay: &HeadlessOverlay) {
    println!("-- {label} ({} shown)", overlay.count());
    for element in overlay.elements() {
        println!("   #{} {element}", element.index);
    }
}
