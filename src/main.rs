use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kuka_log_parser::cli::Cli;
use kuka_log_parser::file_dialog::get_log_path;
use kuka_log_parser::logging::{init_logging, log_system_info};
use kuka_log_parser::notify::Notifier;
use kuka_log_parser::viewer;
use kuka_log_parser::{Pipeline, RunOutcome};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logging = init_logging(&cli.logging_config()).context("Failed to initialize logging")?;
    log_system_info();

    let config = cli.parser_config().context("Failed to load configuration")?;

    let Some(input) = get_log_path(cli.input.clone()) else {
        info!("No file selected, nothing to do");
        return Ok(());
    };

    let mut table_viewer = viewer::build(cli.viewer, &config.viewer)
        .with_context(|| format!("Cannot open the {:?} viewer", cli.viewer))?;
    let notifier = notifier_for(cli.viewer);

    let outcome = Pipeline::new(&config, table_viewer.as_mut(), notifier.as_ref())
        .run(&input, cli.output.clone());

    match &outcome {
        RunOutcome::Saved(summary) => info!("Done: {}", summary.path.display()),
        RunOutcome::SaveFailed { path } => info!("Finished without saving {}", path.display()),
        RunOutcome::ParseFailed => info!("Finished without output"),
    }

    Ok(())
}

fn notifier_for(kind: viewer::ViewerKind) -> Box<dyn Notifier> {
    #[cfg(feature = "gui")]
    {
        if kind == viewer::ViewerKind::Gui {
            return Box::new(kuka_log_parser::notify::DialogNotifier);
        }
    }

    let _ = kind;
    Box::new(kuka_log_parser::notify::ConsoleNotifier::stderr())
}
