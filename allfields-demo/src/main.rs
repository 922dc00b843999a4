//! Fill in the all-fields form and log the submission.

use allfields::{FormBackend, FormError, FormSession, LogSink, SubmitOutcome};
use allfields_egui_form::EguiFormBackend;
use allfields_ratatui_form::RatatuiFormBackend;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Which surface renders the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Surface {
    /// Terminal form (ratatui)
    Tui,
    /// Desktop window (egui)
    Gui,
}

/// All Fields Form
#[derive(Parser)]
#[command(name = "allfields")]
#[command(about = "A form with every common input widget")]
#[command(version)]
struct Args {
    /// Rendering surface
    #[arg(short, long, value_enum, default_value_t = Surface::Tui)]
    backend: Surface,

    /// Title shown above the form
    #[arg(short, long, default_value = "All Fields Form")]
    title: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout belongs to the terminal form
    if json {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run<B: FormBackend>(backend: B, title: &str) -> anyhow::Result<()> {
    let mut session = FormSession::new(LogSink::new().with_target(title));

    match session.run(backend) {
        Ok(SubmitOutcome::Submitted) => {
            println!("Form submitted.");
            Ok(())
        }
        Ok(SubmitOutcome::Rejected { errors }) => {
            for (field, message) in session.errors().messages() {
                eprintln!("{}: {message}", field.label());
            }
            anyhow::bail!("form rejected with {errors} error(s)")
        }
        Err(FormError::Cancelled) => {
            info!("form cancelled");
            println!("Form cancelled.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.json_logs);
    info!(backend = ?args.backend, "starting form");

    match args.backend {
        Surface::Tui => run(RatatuiFormBackend::new().with_title(&args.title), &args.title),
        Surface::Gui => run(EguiFormBackend::new().with_title(&args.title), &args.title),
    }
}
