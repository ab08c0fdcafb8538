// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Assembly of the modular-exponentiation circuit whose measurement
//! statistics reveal the multiplicative order of a base modulo a modulus,
//! the period-finding subroutine of Shor's algorithm. This is kept separate
//! from the state and gate machinery: it only sequences the primitives.

use crate::{gates::Gate, Error, Register, StateVector};
use num_complex::Complex64;
use num_traits::{One, Zero};

/// Highest allowed control-register width. The control register enumerates
/// `2^n` exponents, and together with the target register it must stay within
/// what the dense representation can hold.
pub const MAX_CONTROL_QUBITS: usize = 10;

/// Exclusive upper bound on the modulus.
pub const MODULUS_LIMIT: usize = 1024;

/// A validated description of one modular-exponentiation run: entangles every
/// control-register exponent `x` with `base^x mod modulus` in the target
/// register.
#[derive(Debug, Clone, Copy)]
pub struct ModularExponentiation {
    base: usize,
    modulus: usize,
    control_qubits: usize,
}

impl ModularExponentiation {
    /// Validates the circuit parameters.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `base` or `modulus` is zero, if
    /// `modulus` reaches [`MODULUS_LIMIT`], if `control_qubits` is zero or
    /// exceeds [`MAX_CONTROL_QUBITS`], or if `base` and `modulus` are not
    /// coprime — in that case the controlled modular multiplication would
    /// not be unitary, so no circuit is built at all.
    pub fn new(base: usize, modulus: usize, control_qubits: usize) -> Result<Self, Error> {
        if base == 0 || modulus == 0 {
            return Err(Error::invalid("base and modulus must be positive"));
        }
        if modulus >= MODULUS_LIMIT {
            return Err(Error::invalid(format!(
                "modulus {modulus} must be less than {MODULUS_LIMIT}"
            )));
        }
        if control_qubits == 0 || control_qubits > MAX_CONTROL_QUBITS {
            return Err(Error::invalid(format!(
                "number of control qubits {control_qubits} must be between 1 and {MAX_CONTROL_QUBITS}"
            )));
        }
        if gcd(base, modulus) != 1 {
            return Err(Error::invalid(format!(
                "base {base} and modulus {modulus} must be coprime for the modular multiplication to be unitary"
            )));
        }
        Ok(ModularExponentiation {
            base,
            modulus,
            control_qubits,
        })
    }

    /// Width of the target register: enough qubits to represent every residue
    /// `0..modulus`, and at least one.
    #[must_use]
    pub fn target_qubits(&self) -> usize {
        let mut bits = 0;
        let mut value = self.modulus - 1;
        while value > 0 {
            value >>= 1;
            bits += 1;
        }
        bits.max(1)
    }

    /// Combined width of the control and target registers.
    #[must_use]
    pub fn total_qubits(&self) -> usize {
        self.control_qubits + self.target_qubits()
    }

    /// The exponent register, in the low qubits.
    #[must_use]
    pub fn control_register(&self) -> Register {
        Register {
            start: 0,
            len: self.control_qubits,
        }
    }

    /// The residue register, in the qubits above the control register.
    #[must_use]
    pub fn target_register(&self) -> Register {
        Register {
            start: self.control_qubits,
            len: self.target_qubits(),
        }
    }

    /// The successive squarings `base^(2^i) mod modulus` for each control
    /// qubit `i`, computed classically by repeated squaring.
    #[must_use]
    pub fn powers(&self) -> Vec<usize> {
        let mut powers = Vec::with_capacity(self.control_qubits);
        let mut current = self.base % self.modulus;
        for _ in 0..self.control_qubits {
            powers.push(current);
            current = (current * current) % self.modulus;
        }
        powers
    }

    /// Builds and runs the circuit, returning the populated state.
    ///
    /// The target register is initialized to the integer 1 (`base^0`), the
    /// control register is placed into a uniform superposition of all
    /// exponents by one Hadamard per control qubit, and one controlled
    /// modular multiplication by `base^(2^i)` is applied per control qubit
    /// `i` in increasing order. Afterwards each control value `x` is
    /// entangled with target value `base^x mod modulus`, carrying probability
    /// `1/2^control_qubits`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if a precomputed multiplier is zero,
    /// which only happens for the degenerate modulus 1 where every residue
    /// collapses to zero.
    pub fn execute(&self) -> Result<StateVector, Error> {
        let mut state = StateVector::new(self.total_qubits())?;

        // Target register to |1⟩, control register stays |0⟩.
        state.set_amplitude(0, Complex64::zero())?;
        state.set_amplitude(1 << self.control_qubits, Complex64::one())?;

        for qubit in 0..self.control_qubits {
            Gate::hadamard(qubit).apply(&mut state)?;
        }

        let target = self.target_register();
        for (qubit, multiplier) in self.powers().into_iter().enumerate() {
            Gate::controlled_mod_mul(qubit, target.start(), target.len(), multiplier, self.modulus)?
                .apply(&mut state)?;
        }
        Ok(state)
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
