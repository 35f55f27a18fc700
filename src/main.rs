//! dalle-form - DALL-E image generation form for the terminal.

mod adapters;
mod app;
mod cassette;
mod cli;
mod config;
mod context;
mod coordinator;
mod error;
mod form;
mod labels;
mod output;
mod params;
mod ports;
mod secret;
mod session;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::app::{App, GenerateOutcome};
use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::ImageError;
use crate::form::FormInput;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when a one-shot generation did not produce an image.
async fn run(cli: Cli) -> Result<bool, ImageError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    let locale = cli.locale.unwrap_or(config.defaults.locale);
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| config.defaults.output_dir.clone());

    // Fill the form
    let mut form = FormInput::new(cli.aspect.unwrap_or(config.defaults.aspect));
    if let Some(size) = cli.size {
        form.set_size(size).map_err(|e| ImageError::InvalidArgument(e.to_string()))?;
    } else if let Some(size) = config.defaults.size {
        if form.set_size(size).is_err() {
            tracing::warn!(%size, aspect = %form.aspect(), "ignoring configured size for aspect");
        }
    }
    form.api_key = cli.api_key.clone().or_else(|| config.openai_key()).unwrap_or_default();
    if let Some(ref prompt) = cli.prompt {
        form.prompt.clone_from(prompt);
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("DALLE_FORM_REPLAY").ok();
    let is_recording = std::env::var("DALLE_FORM_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let mut app = App::new(form, ctx.into_coordinator(locale), locale, output_dir, std::io::stdout());

    let succeeded = if cli.prompt.is_some() {
        let outcome = app.generate().await?;
        app.render()?;
        if outcome == GenerateOutcome::Generated && !cli.no_download {
            app.download()?;
        }
        app.session().has_image()
    } else {
        app.run_interactive(std::io::stdin().lock()).await?;
        true
    };
    drop(app);

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => tracing::warn!(error = %e, "failed to save cassette"),
        }
    }

    Ok(succeeded)
}
