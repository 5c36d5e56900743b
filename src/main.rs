// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use toastkit::config;
use toastkit::diagnostics::DiagnosticsCollector;
use toastkit::driver;
use toastkit::error::{Error, Result};
use toastkit::notifications::{
    Phase, ToastId, ToastOptions, ToastSnapshot, Toaster, TokioClock, Variant,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "\
Usage: toastkit [OPTIONS] MESSAGE...

Options:
  --config PATH        Read settings from PATH instead of the default location
  --duration MS        Auto-dismiss delay for these toasts, in milliseconds
  --variant KIND       success, error, warning or info (default: info)
  --persist            Keep toasts until Ctrl-C
  --diagnostics PATH   Write the lifecycle log as JSON to PATH on exit
  -h, --help           Print this help";

struct Flags {
    config: Option<PathBuf>,
    duration: Option<u64>,
    variant: Variant,
    persist: bool,
    diagnostics: Option<PathBuf>,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config: args.opt_value_from_str("--config")?,
        duration: args.opt_value_from_str("--duration")?,
        variant: args.opt_value_from_str("--variant")?.unwrap_or_default(),
        persist: args.contains("--persist"),
        diagnostics: args.opt_value_from_str("--diagnostics")?,
        messages: args
            .finish()
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
    };

    if flags.messages.is_empty() {
        return Err(Error::InvalidArgument("no message given".to_string()));
    }
    Ok(Some(flags))
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Lines describing what changed between two snapshots.
fn describe_changes(previous: &HashMap<ToastId, Phase>, current: &[ToastSnapshot]) -> Vec<String> {
    let mut lines = Vec::new();
    for toast in current {
        if previous.get(&toast.id) != Some(&toast.phase) {
            let title = toast
                .title
                .as_deref()
                .map(|t| format!("{t}: "))
                .unwrap_or_default();
            lines.push(format!(
                "{:<8} {} {}{}",
                phase_label(toast.phase),
                toast.variant.icon(),
                title,
                toast.message
            ));
        }
    }
    for id in previous.keys() {
        if !current.iter().any(|toast| &toast.id == id) {
            lines.push(format!("{:<8} {id}", "removed"));
        }
    }
    lines
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Entering => "entering",
        Phase::Visible => "visible",
        Phase::Exiting => "exiting",
    }
}

async fn run(flags: Flags) -> Result<()> {
    let settings = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let toaster = Toaster::new(settings.toaster_config(), TokioClock);
    let collector = Rc::new(RefCell::new(DiagnosticsCollector::new(
        settings.event_log_capacity(),
    )));
    toaster.set_diagnostics(collector.borrow().handle());

    let mut phases: HashMap<ToastId, Phase> = HashMap::new();
    let drain = Rc::clone(&collector);
    toaster.subscribe(move |toasts| {
        for line in describe_changes(&phases, toasts) {
            println!("{line}");
        }
        phases = toasts.iter().map(|t| (t.id.clone(), t.phase)).collect();
        drain.borrow_mut().process_pending();
    });

    for message in flags.messages {
        let mut options = ToastOptions::new()
            .variant(flags.variant)
            .prevent_auto_dismiss(flags.persist);
        if let Some(ms) = flags.duration {
            options = options.duration(Duration::from_millis(ms));
        }
        let id = toaster.show(message, options);
        debug!(%id, "queued from command line");
    }

    if flags.persist {
        tokio::select! {
            () = driver::run(&toaster) => {}
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("interrupted, dismissing toasts");
            }
        }
        toaster.dismiss_all();
        driver::run_until_idle(&toaster).await;
    } else {
        tokio::select! {
            () = driver::run_until_idle(&toaster) => {}
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("interrupted, clearing toasts");
                toaster.clear();
            }
        }
    }

    if let Some(path) = flags.diagnostics {
        let mut collector = collector.borrow_mut();
        collector.process_pending();
        std::fs::write(&path, collector.to_json()?)?;
        info!(path = %path.display(), "diagnostics written");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
