// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

//! Command-line driver for the quantum order-finding simulation. Reads a
//! three-field configuration (`base modulus qubits`), refuses non-coprime
//! inputs after a GCD precheck, runs the modular-exponentiation circuit, and
//! writes a verification report comparing every control value's most probable
//! target against the classically computed `base^x mod modulus`.

mod cli;
pub use cli::main;

use bitvec::prelude::*;
use quantum_dense_sim::order_finding::{ModularExponentiation, MAX_CONTROL_QUBITS, MODULUS_LIMIT};
use quantum_dense_sim::StateVector;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::SplitWhitespace;

/// The three validated integers every simulation run starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Base of the exponentiation.
    pub base: usize,
    /// Modulus the powers are reduced by.
    pub modulus: usize,
    /// Width of the control (exponent) register.
    pub control_qubits: usize,
}

/// Parses the whitespace-separated `base modulus qubits` configuration.
///
/// # Errors
/// Returns an error if a field is missing or non-numeric, if any value is
/// zero, if the qubit count exceeds the supported maximum, or if the modulus
/// is too large.
pub fn parse_config(contents: &str) -> Result<Config, String> {
    let mut fields = contents.split_whitespace();
    let base = next_field(&mut fields, "base")?;
    let modulus = next_field(&mut fields, "modulus")?;
    let control_qubits = next_field(&mut fields, "qubits")?;

    if base == 0 || modulus == 0 || control_qubits == 0 {
        return Err("all configuration values must be positive".to_string());
    }
    if control_qubits > MAX_CONTROL_QUBITS {
        return Err(format!(
            "number of qubits cannot exceed {MAX_CONTROL_QUBITS}"
        ));
    }
    if modulus >= MODULUS_LIMIT {
        return Err(format!("modulus must be less than {MODULUS_LIMIT}"));
    }
    Ok(Config {
        base,
        modulus,
        control_qubits,
    })
}

fn next_field(fields: &mut SplitWhitespace<'_>, name: &str) -> Result<usize, String> {
    let token = fields
        .next()
        .ok_or_else(|| format!("missing '{name}' field in configuration"))?;
    token
        .parse()
        .map_err(|_| format!("invalid '{name}' value '{token}'"))
}

/// Reads the configuration from the given path and runs the simulation,
/// writing the report to `output_writer`.
///
/// # Errors
/// Returns an error if the file cannot be read, the configuration is
/// invalid, the inputs are not coprime, or verification fails.
/// # Panics
/// Panics if writing to `output_writer` fails.
pub fn run_file(path: impl AsRef<Path>, output_writer: &mut impl Write) -> Result<(), String> {
    let contents = fs::read_to_string(&path).map_err(|e| {
        format!(
            "cannot open configuration file '{}': {e}",
            path.as_ref().display()
        )
    })?;
    let config = parse_config(&contents)?;
    run_config(&config, output_writer)
}

/// Runs the order-finding simulation for the given configuration.
///
/// # Errors
/// Returns an error if `base` and `modulus` are not coprime (reporting the
/// non-trivial factor found instead of building a non-unitary circuit), or if
/// any control value fails verification.
/// # Panics
/// Panics if writing to `output_writer` fails.
pub fn run_config(config: &Config, output_writer: &mut impl Write) -> Result<(), String> {
    writeln!(output_writer, "Configuration loaded:").expect("Failed to write output");
    writeln!(output_writer, "  base: {}", config.base).expect("Failed to write output");
    writeln!(output_writer, "  modulus: {}", config.modulus).expect("Failed to write output");
    writeln!(output_writer, "  qubits: {}", config.control_qubits)
        .expect("Failed to write output");

    let factor = gcd(config.base, config.modulus);
    if factor != 1 {
        writeln!(
            output_writer,
            "gcd({}, {}) = {factor} != 1",
            config.base, config.modulus
        )
        .expect("Failed to write output");
        writeln!(
            output_writer,
            "The controlled modular multiplication gate would not be reversible."
        )
        .expect("Failed to write output");
        writeln!(
            output_writer,
            "Non-trivial factor of {} already found: {factor}",
            config.modulus
        )
        .expect("Failed to write output");
        return Err(format!(
            "base {} and modulus {} are not coprime",
            config.base, config.modulus
        ));
    }
    writeln!(
        output_writer,
        "  gcd({}, {}) = 1 (reversible)",
        config.base, config.modulus
    )
    .expect("Failed to write output");

    let circuit = ModularExponentiation::new(config.base, config.modulus, config.control_qubits)
        .map_err(|e| e.to_string())?;
    writeln!(
        output_writer,
        "Target register size: {} qubits ({} total)",
        circuit.target_qubits(),
        circuit.total_qubits()
    )
    .expect("Failed to write output");

    writeln!(
        output_writer,
        "Precomputed powers of {} mod {}:",
        config.base, config.modulus
    )
    .expect("Failed to write output");
    for (i, power) in circuit.powers().iter().enumerate() {
        writeln!(
            output_writer,
            "  {}^(2^{i}) mod {} = {power}",
            config.base, config.modulus
        )
        .expect("Failed to write output");
    }

    let state = circuit.execute().map_err(|e| e.to_string())?;
    writeln!(output_writer, "{}", state.dump()).expect("Failed to write output");

    verify(config, &circuit, &state, output_writer)
}

/// Checks every control value against the classical computation: the most
/// probable target must be `base^x mod modulus`, with probability within 1%
/// relative error of the uniform `1/2^qubits`.
#[allow(clippy::cast_precision_loss)] // reason="Basis state counts are at most 2^10."
fn verify(
    config: &Config,
    circuit: &ModularExponentiation,
    state: &StateVector,
    output_writer: &mut impl Write,
) -> Result<(), String> {
    let control = circuit.control_register();
    let target = circuit.target_register();
    let control_count = 1_usize << control.len();
    let uniform = 1.0 / control_count as f64;

    writeln!(output_writer, "Verification of {control_count} control values:")
        .expect("Failed to write output");

    let mut passed = bitvec![0; control_count];
    for x in 0..control_count {
        let mut max_prob = 0.0;
        let mut best = 0;
        for y in 0..1_usize << target.len() {
            let index = target.embed(control.embed(0, x), y);
            let prob = state.probability(index).map_err(|e| e.to_string())?;
            if prob > max_prob {
                max_prob = prob;
                best = y;
            }
        }

        let expected = mod_pow(config.base, x, config.modulus);
        let relative_error = ((max_prob - uniform) / uniform).abs();
        let ok = best == expected && relative_error < 0.01;
        passed.set(x, ok);
        writeln!(
            output_writer,
            "  control {x}: target {best} (expected {expected}) P = {max_prob:.6} {}",
            if ok { "ok" } else { "MISMATCH" }
        )
        .expect("Failed to write output");
    }

    let passed_count = passed.count_ones();
    writeln!(
        output_writer,
        "Summary: {passed_count}/{control_count} control values verified"
    )
    .expect("Failed to write output");

    if passed_count == control_count {
        Ok(())
    } else {
        Err(format!(
            "verification failed for {}/{control_count} control values",
            control_count - passed_count
        ))
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn mod_pow(base: usize, mut exponent: usize, modulus: usize) -> usize {
    let mut result = 1;
    let mut power = base % modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * power % modulus;
        }
        power = power * power % modulus;
        exponent >>= 1;
    }
    result
}
