// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

use std::ffi::OsString;

fn main() -> Result<(), String> {
    shor_runner::main(None::<Vec<OsString>>)
}
