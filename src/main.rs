//! `mannequin [OPTIONS.toml] [--print-schema]`
//!
//! Opens the viewer, optionally starting from a TOML options preset.
//! `--print-schema` writes the options JSON schema to stdout and exits.

use std::path::Path;
use std::process::ExitCode;

use mannequin::{options::Options, Viewer};

fn main() -> ExitCode {
    env_logger::init();

    let mut options_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--print-schema" => return print_schema(),
            "-h" | "--help" => {
                println!("usage: mannequin [OPTIONS.toml] [--print-schema]");
                return ExitCode::SUCCESS;
            }
            _ => options_path = Some(arg),
        }
    }

    let options = match options_path {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    match Viewer::builder().with_options(options).build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_schema() -> ExitCode {
    match serde_json::to_string_pretty(&Options::json_schema()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("schema serialization failed: {e}");
            ExitCode::FAILURE
        }
    }
}
