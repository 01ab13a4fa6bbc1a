/// Command line arguments of the `solidlab` binary
use std::path::PathBuf;

use solidlab_core::Route;

pub const USAGE: &str = "\
Usage:
  solidlab [ROUTE]        open a page: /, /geometry/<shape>, /learn/<shape>, /progress
  solidlab export [FILE]  write all learning data as JSON (default: dated file name)
  solidlab import FILE    replace learning data with an exported file
  solidlab reset          delete all learning data
  solidlab help           show this message";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(Route),
    Export(Option<PathBuf>),
    Import(PathBuf),
    Reset,
    Help,
}

impl Command {
    /// Parse the arguments after the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, String> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            [] => Ok(Command::Open(Route::Home)),
            ["help" | "-h" | "--help"] => Ok(Command::Help),
            ["export"] => Ok(Command::Export(None)),
            ["export", file] => Ok(Command::Export(Some(PathBuf::from(file)))),
            ["import", file] => Ok(Command::Import(PathBuf::from(file))),
            ["import"] => Err("import needs a file to read".to_string()),
            ["reset"] => Ok(Command::Reset),
            [path] if path.starts_with('/') => Ok(Command::Open(Route::parse(path))),
            _ => Err(format!("unrecognised arguments: {}", args.join(" "))),
        }
    }
}
