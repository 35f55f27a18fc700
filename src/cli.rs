//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::labels::Locale;
use crate::params::{AspectClass, ImageSize};

/// DALL-E image generation form. Without a prompt, starts an interactive session.
#[derive(Parser, Debug)]
#[command(name = "dalle-form", version, about)]
pub struct Cli {
    /// Image description. Generates once and exits when given.
    pub prompt: Option<String>,

    /// `OpenAI` API key.
    #[arg(short = 'k', long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Aspect class: square, wide, tall.
    #[arg(short, long)]
    pub aspect: Option<AspectClass>,

    /// Image size; must be offered for the aspect class.
    #[arg(short, long)]
    pub size: Option<ImageSize>,

    /// Directory the PNG download is written to.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing the PNG download in one-shot mode.
    #[arg(long)]
    pub no_download: bool,

    /// Language for labels and messages.
    #[arg(short, long, value_enum)]
    pub locale: Option<Locale>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose logging to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
