/// Example: Render one solid with custom parameters in the terminal
///
/// Usage: cargo run --example render_solid -- <shape> [name=value ...]
/// e.g.   cargo run --example render_solid -- torus radius=2.5 tube=0.6

use std::env;
use std::io;
use solidlab_core::{catalog, AppConfig, ParamField, ShapeKind, ViewState};
use solidlab_terminal::TerminalApp;

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let kind: ShapeKind = match args.get(1) {
        Some(name) => name.parse().map_err(|e| invalid(format!("{e}")))?,
        None => {
            eprintln!("Usage: {} <shape> [name=value ...]", args[0]);
            eprintln!("\nNo shape provided, using the cube...");
            ShapeKind::Cube
        }
    };

    let mut view = ViewState::new(kind, &AppConfig::default()).map_err(|e| invalid(e.to_string()))?;
    for arg in args.iter().skip(2) {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| invalid(format!("expected name=value, got {arg}")))?;
        let field = ParamField::from_name(name)
            .ok_or_else(|| invalid(format!("unknown parameter {name}")))?;
        let value: f64 = value
            .parse()
            .map_err(|_| invalid(format!("{name} needs a number, got {value}")))?;
        view.set_param(field, value).map_err(|e| invalid(e.to_string()))?;
    }

    let properties = view.properties();
    println!(
        "{}: surface area {:.2}, volume {:.2} ({} triangles)",
        catalog::config(kind).name,
        properties.surface_area,
        properties.volume,
        view.mesh().triangles.len()
    );
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(view, 30)?;
    app.run()?;

    Ok(())
}
