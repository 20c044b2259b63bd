use atlas::core::config::{self, AtlasConfig, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atlas", about = "Browse the world's countries and keep favorites")]
struct Args {
    /// Country list endpoint (overrides config and ATLAS_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Where favorites are stored
    #[arg(long)]
    favorites_file: Option<PathBuf>,

    /// Maximum number of countries shown
    #[arg(short, long)]
    limit: Option<u16>,

    /// Keep favorites in memory only
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            AtlasConfig::default()
        }
    };

    let overrides = CliOverrides {
        endpoint: args.endpoint,
        favorites_file: args.favorites_file,
        limit: args.limit,
        no_persist: args.no_persist,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!("Atlas starting up with endpoint: {}", resolved.endpoint);

    atlas::tui::run(resolved)
}
