// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Studymap CLI - mind maps for study plans

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use studymap::commands::{self, export::ExportFormat};
use studymap::{config, MindMapRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studymap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "STUDYMAP_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// What to make a mind map of
#[derive(Args)]
struct RequestArgs {
    /// Main topic (the central node)
    #[arg(long)]
    topic: String,

    /// Description of the topic
    #[arg(long, default_value = "")]
    description: String,

    /// Study plan
    #[arg(long, default_value = "")]
    plan: String,

    /// Timeframe, e.g. "5 days"
    #[arg(long, default_value = "")]
    timeframe: String,
}

impl From<RequestArgs> for MindMapRequest {
    fn from(args: RequestArgs) -> Self {
        Self {
            topic: args.topic,
            description: args.description,
            study_plan: args.plan,
            timeframe: args.timeframe,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse mind-map text (file or stdin) into a graph
    Parse {
        /// Input file; stdin if omitted or "-"
        input: Option<std::path::PathBuf>,

        /// Output format (dot, json, toml, text, summary)
        #[arg(short, long, default_value = "dot")]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Ask the hosted model for a mind map and render it
    Generate {
        #[command(flatten)]
        request: RequestArgs,

        /// Output format (dot, json, toml, text, summary)
        #[arg(short, long, default_value = "dot")]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Also print the model's raw text to stderr
        #[arg(long)]
        show_text: bool,
    },

    /// Print the prompt that generate would send
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Get or set configuration
    Config {
        /// Configuration key, dotted (e.g. render.dpi)
        key: String,

        /// Value to set (omit to get)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_path);
    let cfg = config::load(Some(&config_path))?;

    // Initialize logging; flags win over RUST_LOG, which wins over config
    let filter = match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Parse { input, format, output } => {
            commands::parse::run(input, format, output, &cfg, color)
        }
        Commands::Generate { request, format, output, show_text } => {
            commands::generate::run(&request.into(), format, output, show_text, &cfg, color)
        }
        Commands::Prompt { request } => commands::prompt::run(&request.into()),
        Commands::Config { key, value } => commands::config::run(&key, value, &cfg, &config_path),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
