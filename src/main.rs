use clap::Parser;
use shiptalk::core::config::{self, CliOverrides};
use shiptalk::core::feed::Tab;
use shiptalk::core::model::Category;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "shiptalk", about = "Shipping community forum in the terminal")]
struct Args {
    /// Open with the feed narrowed to one topic (e.g. "Eco-Packaging")
    #[arg(short, long)]
    category: Option<Category>,

    /// Start on this feed tab: all, hot, new or live
    #[arg(short, long)]
    tab: Option<Tab>,

    /// Never open the camera preview in live-call dialogs
    #[arg(long)]
    no_camera: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to shiptalk.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("shiptalk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; falling back to defaults", e);
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            tab: args.tab,
            category: args.category,
            no_camera: args.no_camera,
        },
    );

    log::info!(
        "ShipTalk starting up (tab: {:?}, category: {:?})",
        resolved.start_tab,
        resolved.start_category
    );

    shiptalk::tui::run(resolved)
}
