//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for snapquiz
#[derive(Parser, Debug)]
#[command(name = "snapquiz")]
#[command(author, version, about = "Answer multiple-choice questions from screenshots")]
#[command(long_about = r#"
snapquiz reads a quiz question from a screenshot (OCR), asks an LLM for the
answer and returns it as {choice, confidence, explanation}.

Configuration files are loaded from (in priority order):
1. SNAPQUIZ_* env vars    e.g. SNAPQUIZ_LLM__MODEL=gemini-2.5-flash
2. --config <path>        Explicit config file
3. ./snapquiz.toml        Project-level config
4. ~/.config/snapquiz/config.toml   Global config

Example:
  snapquiz serve --bind 127.0.0.1:8000
  snapquiz ask "Capital of France?" -o Berlin -o Paris -o Rome
  snapquiz solve screenshot.png --json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (`POST /upload`, `GET /`)
    Serve {
        /// Address to bind, overrides `server.bind`
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Answer a typed question
    Ask {
        /// The question text
        question: String,

        /// Answer option, labelled A, B, C... in order (repeatable)
        #[arg(short = 'o', long = "option", value_name = "TEXT")]
        options: Vec<String>,

        /// Model to ask, overrides `llm.model`
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer the question in an image file
    Solve {
        /// Screenshot to read (PNG, JPEG, ...)
        #[arg(value_name = "IMAGE_PATH")]
        image: PathBuf,

        /// Split lettered options out of the recognized text
        #[arg(long)]
        extract_options: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
