use prism_engine::logging::{init_logging, LoggingConfig};
use prism_ui::Application;

const DEFAULT_ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

fn main() {
    init_logging(LoggingConfig::default());
    log::info!("prism studio {}", env!("CARGO_PKG_VERSION"));

    let result = Application::new()
        .title("Prism Gallery")
        .size(1440.0, 960.0)
        .asset_dir(DEFAULT_ASSET_DIR)
        .env_overrides()
        .run();

    if let Err(err) = result {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
