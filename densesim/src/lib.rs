// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

//! # Dense State Quantum Simulator
//! This library implements full state-vector simulation of small quantum
//! circuits: one complex amplitude is tracked per basis state of an n-qubit
//! system, and unitary gates rewrite the amplitude vector in place. On top of
//! the primitive gates it provides composite arithmetic circuits (a
//! ripple-carry adder and an equality comparator) and the
//! modular-exponentiation circuit used for quantum order finding.

pub mod arithmetic;
mod error;
pub mod gates;
mod nearly_zero;
pub mod order_finding;

// Additional test infrastructure is available in matrix_testing that allows comparing the transformations
// implemented here with direct matrix application to the state vector.
#[cfg(test)]
mod matrix_testing;

pub use error::Error;

use crate::nearly_zero::NearlyZero;
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt::Write;

/// Tolerance used when checking that total probability sums to one.
const NORMALIZATION_TOLERANCE: f64 = 1e-10;

/// Largest supported qubit count for a single state. The dense representation
/// stores `2^n` amplitudes at 16 bytes each, so 24 qubits already commits
/// 256 MiB per allocated state.
pub const MAX_QUBITS: usize = 24;

/// The full state vector of an n-qubit system: an ordered sequence of `2^n`
/// complex amplitudes, one per basis state. Bit `k` of a basis-state index
/// encodes the classical value of qubit `k`, with qubit 0 as the
/// least-significant bit.
///
/// Every instance is exclusively owned by whichever component currently
/// drives the simulation; gates receive a mutable reference for the duration
/// of one application and never retain it.
pub struct StateVector {
    pub(crate) amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the state of `num_qubits` qubits initialized to the all-zero
    /// basis state `|0…0⟩`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `num_qubits` is zero or exceeds
    /// [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self, Error> {
        if num_qubits == 0 {
            return Err(Error::invalid("number of qubits must be positive"));
        }
        if num_qubits > MAX_QUBITS {
            return Err(Error::invalid(format!(
                "number of qubits {num_qubits} exceeds the supported maximum of {MAX_QUBITS}"
            )));
        }

        let mut amplitudes = vec![Complex64::zero(); 1 << num_qubits];
        amplitudes[0] = Complex64::one();
        Ok(StateVector {
            amplitudes,
            num_qubits,
        })
    }

    /// The number of qubits tracked by this state.
    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The number of basis states, `2^n`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitude of the basis state with the given index.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `index` is not in `[0, 2^n)`.
    pub fn amplitude(&self, index: usize) -> Result<Complex64, Error> {
        self.amplitudes
            .get(index)
            .copied()
            .ok_or(Error::OutOfRange {
                index,
                size: self.amplitudes.len(),
            })
    }

    /// Overwrites the amplitude of the basis state with the given index.
    /// Intended for staging initial states; arbitrary writes can leave the
    /// state unnormalized.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `index` is not in `[0, 2^n)`.
    pub fn set_amplitude(&mut self, index: usize, value: Complex64) -> Result<(), Error> {
        let size = self.amplitudes.len();
        let entry = self
            .amplitudes
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, size })?;
        *entry = value;
        Ok(())
    }

    /// The probability of observing the basis state with the given index,
    /// `|amplitude|²`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if `index` is not in `[0, 2^n)`.
    pub fn probability(&self, index: usize) -> Result<f64, Error> {
        Ok(self.amplitude(index)?.norm_sqr())
    }

    /// The sum of `|amplitude|²` over every basis state.
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// True iff total probability is within tolerance of 1. Holds after any
    /// sequence of gate applications starting from a normalized state, since
    /// every gate is unitary.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (self.total_probability() - 1.0).abs() < NORMALIZATION_TOLERANCE
    }

    /// A read-only view of all amplitudes, ordered by basis-state index.
    #[must_use]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// The memory committed to amplitude storage, in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.amplitudes.len() * std::mem::size_of::<Complex64>()
    }

    /// Renders the basis states with non-negligible amplitude for inspection,
    /// with integer labels for the states.
    #[allow(clippy::missing_panics_doc)] // reason="Writing to a String cannot fail."
    #[must_use]
    pub fn dump(&self) -> String {
        let mut output = String::new();
        output
            .write_str("STATE: [ ")
            .expect("Failed to write output");
        for (index, amplitude) in self.amplitudes.iter().enumerate() {
            if !amplitude.is_nearly_zero() {
                output
                    .write_str(&format!("|{index}\u{27e9}: {amplitude}, "))
                    .expect("Failed to write output");
            }
        }
        output.write_str("]").expect("Failed to write output");
        output
    }
}

/// A named contiguous span of qubit indices inside one shared [`StateVector`],
/// treated as an unsigned integer field with its least-significant bit at
/// `start`. A register is a view, not an owner: several registers (operands,
/// carries, control and target fields) coexist in the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub(crate) start: usize,
    pub(crate) len: usize,
}

impl Register {
    /// Creates the register spanning qubits `[start, start + len)`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `len` is zero or if the span
    /// reaches past the qubits of any representable state.
    pub fn new(start: usize, len: usize) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::invalid("register width must be positive"));
        }
        if start.saturating_add(len) > MAX_QUBITS {
            return Err(Error::invalid(format!(
                "register [{start}, {}) exceeds the supported maximum of {MAX_QUBITS} qubits",
                start.saturating_add(len)
            )));
        }
        Ok(Register { start, len })
    }

    /// Index of the first (least-significant) qubit in the span.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Width of the span in qubits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; registers are at least one qubit wide by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last qubit in the span.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// True iff the given qubit index falls inside the span.
    #[must_use]
    pub fn contains(&self, qubit: usize) -> bool {
        qubit >= self.start && qubit < self.end()
    }

    /// The basis-state index bits covered by the span.
    #[must_use]
    pub fn mask(&self) -> usize {
        ((1 << self.len) - 1) << self.start
    }

    /// Reads the field value out of a basis-state index.
    #[must_use]
    pub fn extract(&self, index: usize) -> usize {
        (index >> self.start) & ((1 << self.len) - 1)
    }

    /// Replaces the field bits of a basis-state index with `value`, leaving
    /// all bits outside the span unchanged.
    #[must_use]
    pub fn embed(&self, index: usize, value: usize) -> usize {
        (index & !self.mask()) | ((value << self.start) & self.mask())
    }
}
