use anyhow::Result;
use gcode_fields::app;
use gcode_fields::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;
    app::init_logging(&config.log_level);

    if let Some(path) = &config.config_file {
        log::debug!("Loaded config from {}", path.display());
    }

    app::run(config).await
}
