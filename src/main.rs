//! quickcalc - Engineering Quick Calculators
//!
//! Terminal front end for the calculator table: an interactive page where
//! every keystroke recomputes the selected calculator, plus `list`, `eval`
//! and `batch` subcommands for scripting.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use quickcalc::application::{App, AppMode};
use quickcalc::domain::{find_calculator, DomainError, EvalReport, CALCULATORS};
use quickcalc::infrastructure::{BatchFiles, Config};
use quickcalc::presentation::{render_ui, InputHandler};

#[derive(Parser, Debug)]
#[command(name = "quickcalc", version, about = "Engineering quick calculators")]
struct Cli {
    /// Path to the config file (default: ~/.config/quickcalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive calculator page (default)
    Tui,
    /// List calculators with their input and output field ids
    List,
    /// Evaluate one calculator from its defaults and id=value overrides
    Eval {
        /// Calculator key, e.g. divider or ntc
        calculator: String,
        /// Field overrides such as vin=12 r2=4.7k
        assignments: Vec<String>,
        /// Print a JSON report instead of text lines
        #[arg(long)]
        json: bool,
    },
    /// Evaluate every row of a CSV file whose header names input ids
    Batch {
        calculator: String,
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Entry point for quickcalc.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, if a subcommand names an
/// unknown calculator or field, or if terminal setup fails.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(&config),
        Command::List => {
            for calculator in CALCULATORS {
                let inputs: Vec<&str> = calculator.inputs.iter().map(|f| f.id).collect();
                let outputs: Vec<&str> = calculator.outputs.iter().map(|f| f.id).collect();
                println!("{:<8} {}", calculator.key, calculator.title);
                println!("         inputs:  {}", inputs.join(", "));
                println!("         outputs: {}", outputs.join(", "));
            }
            Ok(())
        }
        Command::Eval { calculator, assignments, json } => {
            let report = EvalReport::build(&config.build_page(), &calculator, assignments.as_slice())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.title);
                for line in report.lines() {
                    println!("  {line}");
                }
            }
            Ok(())
        }
        Command::Batch { calculator, input, output } => {
            let calc = find_calculator(&calculator)
                .ok_or_else(|| DomainError::UnknownCalculator(calculator.clone()))?;
            BatchFiles::run(calc, &input, output.as_deref())
                .with_context(|| format!("Batch evaluation of {} failed", input.display()))?;
            Ok(())
        }
    }
}

/// Sets up the terminal, runs the page until the user quits and restores
/// the terminal afterwards.
fn run_tui(config: &Config) -> Result<()> {
    let mut app = App::new(config.build_page(), config.start_index());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("Terminal event loop failed")
}

/// Main application event loop.
///
/// Renders the page and feeds key presses to the input handler until the
/// user presses 'q' in normal mode or Ctrl+C.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
