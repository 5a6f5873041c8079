//! The binary entry point for the orrery viewer.

use clap::Parser;

use orrery_config::{CliArgs, Config, default_config_dir};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|err| {
            eprintln!("Falling back to default config: {err}");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&config));

    if let Err(err) = config.validate() {
        // Malformed scene parameters are not fatal: the composer skips the
        // affected bodies each tick until the values are corrected.
        tracing::warn!("Configuration problem: {err}");
    }

    orrery_app::run_with_config(config);
}
