// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use clap::error::ErrorKind;
use clap::{arg, crate_version, value_parser, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if the arguments are invalid, if the configuration file
/// cannot be read or parsed, or if the simulation fails verification.
/// # Panics
/// Panics if the arguments cannot be read.
pub fn main<I, T>(args: Option<I>) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cmd = Command::new("shor-runner")
        .args(&[
            arg!(-f --file [PATH] "Path to the configuration file holding `base modulus qubits`")
                .value_parser(value_parser!(PathBuf))
                .default_value("input.txt"),
        ])
        .version(crate_version!());
    let matches = match args {
        Some(args) => cmd.try_get_matches_from(args),
        None => cmd.try_get_matches(),
    };
    match matches {
        Err(e) => {
            let msg = e.to_string();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    eprint!("{msg}");
                    Ok(())
                }
                _ => Err(msg),
            }
        }
        Ok(matches) => crate::run_file(
            matches
                .get_one::<PathBuf>("file")
                .expect("File path has a default value"),
            &mut std::io::stdout(),
        ),
    }
}
