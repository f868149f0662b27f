//! keyarb entrypoint: replay key-event traces through the arbiter, or render a
//! single status line.
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use core_config::load_from;
use core_render::StatusProjector;
use core_state::{DisplayStatus, ModeKind};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod replay;
mod trace;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "keyarb", version, about = "Keystroke arbitration trace tool")]
struct Args {
    /// Optional configuration file path (overrides discovery of `keyarb.toml`).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,
    /// Log file (filtered by `RUST_LOG`).
    #[arg(long = "log-file", global = true, default_value = "keyarb.log")]
    log_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a TOML key trace through a view processor and print each verdict.
    Replay {
        trace: PathBuf,
    },
    /// Render one status line the way the host would show it.
    Render {
        /// Engine mode (`normal`, `insert`, `command`, short forms accepted).
        #[arg(long, default_value = "normal")]
        mode: ModeKind,
        /// Caret offset in chars; clamped to the text length.
        #[arg(long)]
        caret: Option<usize>,
        text: String,
    },
}

fn configure_logging(log_file: &Path) -> Result<Option<WorkerGuard>> {
    let dir = match log_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Some(name) = log_file.file_name() else {
        bail!("log file path has no file name: {}", log_file.display());
    };
    let file_appender = tracing_appender::rolling::never(dir, name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Ok(Some(guard)),
        // Global subscriber already installed; drop guard so writer shuts down.
        Err(_err) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn run(args: Args) -> Result<()> {
    let config = load_from(args.config.clone())?;
    let source_str = config.source.as_ref().map(|p| p.display().to_string());
    info!(
        target: "runtime.startup",
        config_override = args.config.is_some(),
        config_source = source_str.as_deref(),
        caret_marker = %config.caret_marker(),
        reserve_insert_tab = config.reserve_insert_tab(),
        "config_ready"
    );

    match args.command {
        Command::Replay { trace: path } => {
            let trace = trace::Trace::load(&path)?;
            let reports = replay::replay(&trace, &config);
            for report in &reports {
                println!("{report}");
            }
            let mismatches = reports.iter().filter(|r| !r.matches_expectation()).count();
            info!(target: "runtime.replay", events = reports.len(), mismatches, "replay_done");
            if mismatches > 0 {
                bail!("{mismatches} event(s) did not match expect_handled");
            }
        }
        Command::Render { mode, caret, text } => {
            let status = match caret {
                Some(c) => DisplayStatus::new(text, c),
                None => DisplayStatus::at_end(text),
            };
            let projector = StatusProjector::new(config.caret_marker());
            println!("{}", projector.render(&status, mode));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_file)?;
    install_panic_hook();
    info!(target: "runtime", "startup");
    let result = run(args);
    if let Err(e) = &result {
        tracing::error!(target: "runtime", error = %e, "exit_with_error");
    }
    result
}
