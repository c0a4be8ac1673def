use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;

mod controller;
mod domain;
mod entry;
mod logging;
mod model;
mod search_input;
mod sort;
mod source;
mod ui;

use controller::Controller;
use domain::{AppConfig, PledgeError};
use model::{Model, Status};
use source::Source;
use ui::TableUI;

#[derive(Parser)]
#[command(name = "pledge-table", version, about)]
struct Cli {
    /// CSV export URL of the published pledge spreadsheet
    #[arg(long, default_value = source::DEFAULT_SHEET_URL)]
    url: String,

    /// Load entries from a local CSV file instead of the remote sheet
    #[arg(long)]
    file: Option<String>,

    /// Write tracing output to this file (respects RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<(), PledgeError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let source = match &cli.file {
        Some(raw) => {
            let expanded = shellexpand::full(raw)
                .map_err(|e| PledgeError::LoadingFailed(e.to_string()))?;
            Source::File(PathBuf::from(expanded.as_ref()))
        }
        None => Source::Remote(cli.url.clone()),
    };

    let cfg = AppConfig {
        event_poll_time: cli.poll_ms,
    };
    let mut model = Model::new();
    let mut ui = TableUI::new();
    let controller = Controller::new(&cfg);

    // The single asynchronous operation: the initial load runs off the
    // event loop and reports back over the channel.
    let (tx, rx) = mpsc::channel();
    source::spawn_load(source, tx);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut model, &mut ui, &controller, &rx, &mut terminal);
    ratatui::restore();
    result
}

fn event_loop(
    model: &mut Model,
    ui: &mut TableUI,
    controller: &Controller,
    rx: &mpsc::Receiver<domain::Message>,
    terminal: &mut ratatui::DefaultTerminal,
) -> Result<(), PledgeError> {
    while model.status != Status::Quitting {
        // Render the current view
        terminal.draw(|f| ui.draw(model, f))?;

        // Drain the load result, if it arrived
        if let Ok(message) = rx.try_recv() {
            model.update(message);
        }

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(model)? {
            model.update(message);
        }
    }
    Ok(())
}
