//! devsync - Entry Point
//!
//! Builds, deploys and live-syncs a project to the configured devices.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use devsync::app::args::CliArgs;
use devsync::app::run::{run, RunRequest};
use devsync::filesys::file::File;
use devsync::logs::{init_logging, LogOptions};
use devsync::storage::layout::StorageLayout;
use devsync::storage::settings::Settings;
use devsync::utils::version_info;

use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse(env::args());

    // Print version and exit
    if args.contains("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to render version: {e}"),
        }
        return ExitCode::SUCCESS;
    }

    let settings = match load_settings(&args).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        log_dir: settings.log_dir.clone(),
        json_format: settings.json_logs,
        ..Default::default()
    };
    let _log_guard = match init_logging(log_options).context("Failed to initialize logging") {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e:#}");
            None
        }
    };

    let request = match build_request(&args, &settings) {
        Ok(request) => request,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    info!("Running devsync with options: {:?}", request);
    let result = tokio::select! {
        result = run(&settings, request) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received, shutting down...");
            return ExitCode::from(130);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_guard_failure() => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            error!("{e}");
            error!("Run with RUST_LOG=debug for details");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn load_settings(args: &CliArgs) -> anyhow::Result<Settings> {
    let settings_file = args
        .settings_path()
        .map(File::new)
        .unwrap_or_else(|| StorageLayout::default().settings_file());

    Settings::load(&settings_file)
        .await
        .context("Unable to read settings file")
}

fn build_request(args: &CliArgs, settings: &Settings) -> anyhow::Result<RunRequest> {
    let mut options = settings.options.clone();
    args.apply(&mut options)
        .context("Invalid command line option")?;
    let platform = args.platform().context("Invalid --platform")?;

    Ok(RunRequest {
        options,
        platform,
        debug_map: args.debug_map(),
    })
}
