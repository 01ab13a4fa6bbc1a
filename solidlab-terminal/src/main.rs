/// SolidLab terminal front end
///
/// Opens the home menu (or the route given as the first argument), shows
/// solids in an interactive ASCII viewer, and keeps learning progress under
/// `SOLIDLAB_DATA_DIR`.
///
/// Viewer controls:
///   - WASD / Arrow Keys / mouse drag: Rotate the solid
///   - E/R: Roll rotation
///   - +/- / scroll wheel: Zoom
///   - Space: Toggle auto-rotate, G: Toggle grid
///   - 0 / double click: Reset the view
///   - Tab, [ ]: Pick and resize a parameter
///   - Q/ESC: Back to the menu
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use solidlab_core::store::current_export_file_name;
use solidlab_core::{FileBackend, ProgressStore, Route, ShapeKind, ViewState};
use solidlab_terminal::cli::{Command, USAGE};
use solidlab_terminal::views::{self, MenuChoice};
use solidlab_terminal::{logging, Settings, TerminalApp};
use tracing::{debug, error, info, warn};

type Store = ProgressStore<FileBackend>;

fn main() -> ExitCode {
    let settings = Settings::from_env();
    let _log_guard = logging::init_tracing(&settings.log_level, &settings.data_dir);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let mut store = ProgressStore::new(FileBackend::new(&settings.data_dir));
    match run(command, &mut store, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("solidlab: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, store: &mut Store, settings: &Settings) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| current_export_file_name().into());
            fs::write(&path, store.export_json()?)?;
            info!(path = %path.display(), "exported learning data");
            println!("Exported learning data to {}", path.display());
        }
        Command::Import(path) => {
            let json = fs::read_to_string(&path)?;
            let document = store.import_json(&json)?;
            info!(path = %path.display(), "imported learning data");
            println!(
                "Imported {} shape records and {} practice answers from {}",
                document.progress.len(),
                document.records.len(),
                path.display()
            );
        }
        Command::Reset => {
            store.clear_all()?;
            println!(
                "All learning data in {} deleted.",
                store.backend().dir().display()
            );
        }
        Command::Open(route) => navigate(route, store, settings)?,
    }
    Ok(())
}

/// Read one line; `None` at end of input
fn prompt(message: &str) -> io::Result<Option<String>> {
    let mut out = io::stdout();
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn navigate(start: Route, store: &mut Store, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut route = start;
    let mut out = io::stdout();

    loop {
        debug!(route = %route, "showing page");
        let next = match route {
            Route::Home => {
                views::render_home(&mut out, store)?;
                match prompt("> ")? {
                    None => None,
                    Some(line) => match views::parse_menu_choice(&line) {
                        MenuChoice::Go(next) => Some(next),
                        MenuChoice::Quit => None,
                        MenuChoice::Invalid => {
                            writeln!(out, "Unknown choice: {}", line.trim())?;
                            Some(Route::Home)
                        }
                    },
                }
            }
            Route::Viewer(kind) => {
                open_viewer(kind, store, settings)?;
                Some(Route::Home)
            }
            Route::Learn(kind) => {
                views::run_learning(&mut io::stdin().lock(), &mut out, store, kind)?;
                Some(Route::Home)
            }
            Route::Progress => {
                views::render_progress(&mut out, store)?;
                prompt("\nPress Enter to return.")?.map(|_| Route::Home)
            }
            Route::ShapeNotFound(ref path) => {
                views::render_shape_not_found(&mut out, path)?;
                Some(Route::Home)
            }
            Route::NotFound(ref path) => {
                views::render_not_found(&mut out, path)?;
                Some(Route::Home)
            }
        };

        match next {
            Some(next) => route = next,
            None => return Ok(()),
        }
    }
}

fn open_viewer(kind: ShapeKind, store: &mut Store, settings: &Settings) -> Result<(), Box<dyn Error>> {
    if let Err(e) = store.record_visit(kind) {
        warn!(shape = %kind, error = %e, "failed to record visit");
    }
    if let Err(e) = store.set_current_geometry(kind) {
        warn!(shape = %kind, error = %e, "failed to remember current shape");
    }

    let view = ViewState::new(kind, &store.app_config())?;
    let mut app = TerminalApp::new(view, settings.fps)?;
    app.run()?;
    Ok(())
}
