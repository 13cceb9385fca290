use clap::Parser;
use quadbubble::config;
use quadbubble_demo::cli::Cli;
use quadbubble_demo::gui::app::AppModel;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.write_config {
        let path = config::write_default_config()?;
        log::info!("Default config at {}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();

    // gtk must not see our own flags
    let app = RelmApp::new("org.ubux.quadbubble").with_args(Vec::new());
    app.run::<AppModel>((config, cli));
    Ok(())
}
