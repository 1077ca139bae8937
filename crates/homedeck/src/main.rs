use anyhow::Context;
use clap::Parser;
use homedeck::config;
use homedeck::gui::app::AppModel;
use homedeck::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to load and watch (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the bundled default config to the config path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config_path = config::resolve_config_path(args.config)?;

    if args.init_config {
        let path = config::write_default_config(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);
    log::info!("Using config at {}", config_path.display());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    let app = RelmApp::new("org.homedeck.dashboard").with_args(Vec::new());

    app.run::<AppModel>((config, config_path, rx));

    Ok(())
}
