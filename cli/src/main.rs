//! CLI entrypoint for snapquiz
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use snapquiz_application::{
    ConversationLogger, NoConversationLogger, ResolveAnswerInput, ResolveAnswerUseCase,
    SolveScreenshotUseCase,
};
use snapquiz_domain::{Model, OptionSet, Question, split_question_and_options};
use snapquiz_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, GradioOcrClient, JsonlAnswerLogger,
};
use snapquiz_presentation::{AppState, Cli, Command, ConsoleFormatter, Spinner, start_server};
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(cli.verbose, config.logging.dir.as_deref());

    check_config(&config)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Serve { bind } => serve(&config, bind).await,
        Command::Ask {
            question,
            options,
            model,
            json,
        } => ask(&config, question, options, model, json).await,
        Command::Solve {
            image,
            extract_options,
            json,
        } => solve(&config, image, extract_options, json).await,
    }
}

// ==================== Logging ====================

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// Console logs on stderr (stdout carries answers), plus an optional
/// daily-rolling file under `log_dir`. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let mut guard = None;
    let file_layer = log_dir.and_then(|dir| {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("snapquiz")
            .filename_suffix("log")
            .build(dir);
        match appender {
            Ok(appender) => {
                let (writer, worker_guard) = tracing_appender::non_blocking(appender);
                guard = Some(worker_guard);
                Some(fmt::layer().with_writer(writer).with_ansi(false))
            }
            Err(e) => {
                eprintln!("Warning: file logging disabled ({}): {}", dir.display(), e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

// ==================== Configuration ====================

/// Log warnings, abort on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let mut errors = Vec::new();
    for issue in config.validate().into_iter().chain(config.credential_issues()) {
        if issue.is_error() {
            errors.push(issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }

    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

// ==================== Dependency Injection ====================

fn answer_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = &config.logging.answer_log else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlAnswerLogger::open(path) {
        Ok(logger) => {
            info!("Answer log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Answer log disabled, cannot open {}: {}", path.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

fn resolver(config: &FileConfig, logger: Arc<dyn ConversationLogger>) -> Result<ResolveAnswerUseCase> {
    let gateway = GeminiGateway::new(&config.llm.base_url, config.llm.resolve_api_key())?;
    Ok(ResolveAnswerUseCase::new(Arc::new(gateway)).with_conversation_logger(logger))
}

fn solver(config: &FileConfig, logger: Arc<dyn ConversationLogger>) -> Result<SolveScreenshotUseCase> {
    let ocr = GradioOcrClient::new(
        &config.ocr.base_url,
        &config.ocr.api_name,
        config.ocr.resolve_token(),
        Duration::from_secs(config.ocr.timeout_secs),
    )?;
    Ok(SolveScreenshotUseCase::new(Arc::new(ocr), resolver(config, logger.clone())?)
        .with_conversation_logger(logger))
}

fn show_spinner(json: bool) -> bool {
    !json && std::io::stderr().is_terminal()
}

// ==================== Commands ====================

async fn serve(config: &FileConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind))?;

    let logger = answer_logger(config);
    let state = AppState::new(solver(config, logger)?, config.to_solve_params());

    info!(
        model = %config.llm.model,
        ocr = %config.ocr.base_url,
        "Starting snapquiz server"
    );
    start_server(addr, state).await?;
    Ok(())
}

async fn ask(
    config: &FileConfig,
    question: String,
    options: Vec<String>,
    model: Option<String>,
    json: bool,
) -> Result<()> {
    let question = Question::try_from(question)?;
    let options = OptionSet::new(options)?;

    let mut params = config.to_solve_params();
    if let Some(model) = model {
        params = params.with_model(Model::from(model.trim()));
    }

    let use_case = resolver(config, answer_logger(config))?;
    let input = ResolveAnswerInput::from_params(question, options.clone(), &params);

    let spinner = Spinner::new(&format!("Asking {}...", params.model), show_spinner(json));
    let answer = match use_case.execute(input).await {
        Ok(answer) => {
            spinner.finish_ok();
            answer
        }
        Err(e) => {
            spinner.finish_err("failed");
            return Err(e.into());
        }
    };

    let output = if json {
        ConsoleFormatter::format_json(&answer)
    } else {
        ConsoleFormatter::format_answer(&answer, &options)
    };
    println!("{}", output);
    Ok(())
}

async fn solve(config: &FileConfig, image: PathBuf, extract_options: bool, json: bool) -> Result<()> {
    let bytes = tokio::fs::read(&image)
        .await
        .with_context(|| format!("Failed to read image {}", image.display()))?;

    let mut params = config.to_solve_params();
    if extract_options {
        params = params.with_extract_options(true);
    }

    let use_case = solver(config, answer_logger(config))?;

    let spinner = Spinner::new("Reading screenshot...", show_spinner(json));
    let solved = match use_case.execute(&bytes, &params).await {
        Ok(solved) => {
            spinner.finish_ok();
            solved
        }
        Err(e) => {
            spinner.finish_err("failed");
            return Err(e.into());
        }
    };

    let output = if json {
        ConsoleFormatter::format_json(&solved)
    } else {
        let options = if params.extract_options {
            split_question_and_options(&solved.question_text).options
        } else {
            OptionSet::empty()
        };
        ConsoleFormatter::format_solved(&solved, &options)
    };
    println!("{}", output);
    Ok(())
}
