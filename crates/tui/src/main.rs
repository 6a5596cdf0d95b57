//! Interactive demo grid for the selection state machine.
//!
//! Runs the full pipeline end to end: crossterm events are classified
//! through the keymap into selection inputs, the state manager decides the
//! transition, and the grid redraws only when a new state is committed.

mod app;
mod model;
mod ui;

use std::io::stdout;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use spangrid_core::state::SelectionMode;
use spangrid_keymap::Keymap;

use app::{GridApp, GUTTER_WIDTH, HEADER_LINES};
use model::{GridModel, SharedModel};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    None,
    SingleCell,
    MultiCell,
    SingleRow,
    MultiRow,
}

impl ModeArg {
    fn selection_mode(self) -> SelectionMode {
        match self {
            ModeArg::None => SelectionMode::None,
            ModeArg::SingleCell => SelectionMode::SingleCell,
            ModeArg::MultiCell => SelectionMode::MultiCell,
            ModeArg::SingleRow => SelectionMode::SingleRow,
            ModeArg::MultiRow => SelectionMode::MultiRow,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "spangrid", about = "Interactive selection demo grid")]
struct Args {
    /// Number of data rows
    #[arg(long, default_value_t = 40)]
    rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = 8)]
    cols: i32,

    /// Selection behavior
    #[arg(long, value_enum, default_value_t = ModeArg::MultiCell)]
    mode: ModeArg,

    /// Disable the demo row spans
    #[arg(long)]
    no_spans: bool,

    /// Hide the column header row
    #[arg(long)]
    hide_header: bool,

    /// Columns excluded from selection, comma separated
    #[arg(long, value_delimiter = ',')]
    disable_cols: Vec<i32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    if args.rows < 1 || args.cols < 1 {
        return Err("grid needs at least one row and one column".into());
    }

    let keymap = match Keymap::load() {
        Ok(keymap) => keymap,
        Err(e) => {
            log::warn!("using default keymap: {e}");
            Keymap::default()
        }
    };

    let model = GridModel::new(
        args.rows,
        args.cols,
        !args.no_spans,
        args.hide_header,
        args.disable_cols.clone(),
    );
    let app = GridApp::new(SharedModel::new(model), args.mode.selection_mode(), keymap);

    run_app(app)
}

fn run_app(mut app: GridApp) -> Result<(), String> {
    terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;
    stdout()
        .execute(EnableMouseCapture)
        .map_err(|e| format!("failed to enable mouse capture: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        let size = terminal.size().map_err(|e| format!("size error: {}", e))?;
        let chrome = HEADER_LINES + 1;
        let visible_rows = size.height.saturating_sub(chrome) as i32;
        let visible_cols = (size.width.saturating_sub(GUTTER_WIDTH) / app::CELL_WIDTH) as i32;
        app.ensure_visible(visible_rows, visible_cols);

        terminal
            .draw(|frame| ui::draw(&app, frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("event poll error: {}", e))?
        {
            match event::read().map_err(|e| format!("event read error: {}", e))? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
