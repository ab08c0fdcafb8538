// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Primitive unitary gates over a dense [`StateVector`].
//!
//! Each gate is an immutable descriptor of the qubit indices it touches plus
//! any scalar parameter. Descriptors are validated on construction where the
//! constraints are statically known (distinct qubit roles, nonzero
//! parameters) and again on application against the actual qubit count of the
//! target state, since a descriptor may in principle be reused against
//! different states.
//!
//! Application follows a snapshot/compute/commit shape: the prior amplitude
//! vector is copied, the post-gate assignment is computed from the copy, and
//! the result replaces the state wholesale. Several gates read from indices
//! they also write, so the snapshot must not be optimized into in-place pair
//! swaps.

use crate::{Error, Register, StateVector};
use num_complex::Complex64;
use rustc_hash::FxHashSet;
use std::f64::consts::FRAC_1_SQRT_2;

/// The closed set of primitive gate descriptors. Variants should be built
/// through the validating constructors; hand-assembled descriptors are still
/// checked at application time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Sends `|0⟩` to `(|0⟩+|1⟩)/√2` and `|1⟩` to `(|0⟩-|1⟩)/√2` on the
    /// target qubit.
    Hadamard {
        /// Qubit placed into (or out of) superposition.
        target: usize,
    },
    /// Flips the target qubit.
    PauliX {
        /// Qubit whose value is inverted.
        target: usize,
    },
    /// Flips `target` on every basis state where `control` is 1.
    ControlledNot {
        /// Qubit gating the flip.
        control: usize,
        /// Qubit flipped when the control is set.
        target: usize,
    },
    /// Exchanges the values of two qubits.
    Swap {
        /// One qubit of the exchanged pair.
        first: usize,
        /// The other qubit of the exchanged pair.
        second: usize,
    },
    /// Flips `target` on every basis state where both controls are 1.
    Toffoli {
        /// First qubit gating the flip.
        control1: usize,
        /// Second qubit gating the flip.
        control2: usize,
        /// Qubit flipped when both controls are set.
        target: usize,
    },
    /// Multiplies the amplitude of every basis state where `target` is 1 by
    /// `e^{i·angle}`.
    PhaseShift {
        /// Qubit whose set states acquire the phase.
        target: usize,
        /// Rotation angle in radians.
        angle: f64,
    },
    /// On every basis state where `control` is 1, reinterprets the target
    /// field as an unsigned value `y` and replaces it with
    /// `(multiplier·y) mod modulus`.
    ///
    /// The mapping is a bijection on `{0, …, modulus-1}`, and therefore
    /// unitary, only when `gcd(multiplier, modulus) = 1`; callers must
    /// enforce that before construction. Field values in
    /// `[modulus, 2^len)` are reduced mod `modulus` as well, which is not a
    /// bijection on that larger domain.
    ControlledModMul {
        /// Qubit gating the multiplication.
        control: usize,
        /// The field holding the multiplied value.
        target: Register,
        /// Factor applied to the field value.
        multiplier: usize,
        /// Modulus the product is reduced by.
        modulus: usize,
    },
}

impl Gate {
    /// Hadamard gate on the given qubit.
    #[must_use]
    pub fn hadamard(target: usize) -> Self {
        Gate::Hadamard { target }
    }

    /// Pauli-X (NOT) gate on the given qubit.
    #[must_use]
    pub fn pauli_x(target: usize) -> Self {
        Gate::PauliX { target }
    }

    /// Phase shift by an arbitrary angle on the given qubit.
    #[must_use]
    pub fn phase_shift(target: usize, angle: f64) -> Self {
        Gate::PhaseShift { target, angle }
    }

    /// The S gate, a phase shift by π/2.
    #[must_use]
    pub fn s(target: usize) -> Self {
        Gate::phase_shift(target, std::f64::consts::FRAC_PI_2)
    }

    /// The T gate, a phase shift by π/4.
    #[must_use]
    pub fn t(target: usize) -> Self {
        Gate::phase_shift(target, std::f64::consts::FRAC_PI_4)
    }

    /// The Z gate, a phase shift by π (a sign flip on set target states).
    #[must_use]
    pub fn z(target: usize) -> Self {
        Gate::phase_shift(target, std::f64::consts::PI)
    }

    /// Controlled-NOT gate.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `control` and `target` coincide.
    pub fn controlled_not(control: usize, target: usize) -> Result<Self, Error> {
        check_distinct(&[control, target])?;
        Ok(Gate::ControlledNot { control, target })
    }

    /// SWAP gate.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if the two qubits coincide.
    pub fn swap(first: usize, second: usize) -> Result<Self, Error> {
        check_distinct(&[first, second])?;
        Ok(Gate::Swap { first, second })
    }

    /// Toffoli (doubly-controlled NOT) gate.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if any two of the three qubits
    /// coincide.
    pub fn toffoli(control1: usize, control2: usize, target: usize) -> Result<Self, Error> {
        check_distinct(&[control1, control2, target])?;
        Ok(Gate::Toffoli {
            control1,
            control2,
            target,
        })
    }

    /// Controlled modular multiplication over the field of `target_count`
    /// qubits starting at `target_start`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `multiplier` or `modulus` is zero,
    /// if `target_count` is zero, or if `control` falls inside the target
    /// field.
    pub fn controlled_mod_mul(
        control: usize,
        target_start: usize,
        target_count: usize,
        multiplier: usize,
        modulus: usize,
    ) -> Result<Self, Error> {
        if multiplier == 0 || modulus == 0 {
            return Err(Error::invalid("multiplier and modulus must be positive"));
        }
        let target = Register::new(target_start, target_count)?;
        if target.contains(control) {
            return Err(Error::invalid(format!(
                "control qubit {control} must not fall inside the target register"
            )));
        }
        Ok(Gate::ControlledModMul {
            control,
            target,
            multiplier,
            modulus,
        })
    }

    /// Applies the gate to the given state, transforming it to the post-gate
    /// assignment. The state is either fully transformed or, on a validation
    /// failure, left untouched.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if any qubit index or register extent
    /// exceeds the state's qubit count, or if construction-time constraints
    /// are violated on a hand-assembled descriptor.
    pub fn apply(&self, state: &mut StateVector) -> Result<(), Error> {
        self.validate(state.num_qubits())?;
        state.amplitudes = self.transformed(&state.amplitudes);
        Ok(())
    }

    /// Re-checks the construction constraints and bounds every qubit index
    /// against the actual qubit count of the target state.
    fn validate(&self, num_qubits: usize) -> Result<(), Error> {
        match *self {
            Gate::Hadamard { target }
            | Gate::PauliX { target }
            | Gate::PhaseShift { target, .. } => check_qubit(target, num_qubits),
            Gate::ControlledNot { control, target } => {
                check_distinct(&[control, target])?;
                check_qubit(control, num_qubits)?;
                check_qubit(target, num_qubits)
            }
            Gate::Swap { first, second } => {
                check_distinct(&[first, second])?;
                check_qubit(first, num_qubits)?;
                check_qubit(second, num_qubits)
            }
            Gate::Toffoli {
                control1,
                control2,
                target,
            } => {
                check_distinct(&[control1, control2, target])?;
                check_qubit(control1, num_qubits)?;
                check_qubit(control2, num_qubits)?;
                check_qubit(target, num_qubits)
            }
            Gate::ControlledModMul {
                control,
                target,
                multiplier,
                modulus,
            } => {
                if multiplier == 0 || modulus == 0 {
                    return Err(Error::invalid("multiplier and modulus must be positive"));
                }
                if target.contains(control) {
                    return Err(Error::invalid(format!(
                        "control qubit {control} must not fall inside the target register"
                    )));
                }
                check_qubit(control, num_qubits)?;
                if target.end() > num_qubits {
                    return Err(Error::invalid(format!(
                        "target register [{}, {}) exceeds qubit count {num_qubits}",
                        target.start(),
                        target.end()
                    )));
                }
                Ok(())
            }
        }
    }

    /// Computes the post-gate amplitude assignment from a snapshot of the
    /// prior one. Validation has already run, so every index is in range.
    fn transformed(&self, old: &[Complex64]) -> Vec<Complex64> {
        match *self {
            Gate::Hadamard { target } => hadamard(old, target),
            Gate::PauliX { target } => pauli_x(old, target),
            Gate::ControlledNot { control, target } => controlled_not(old, control, target),
            Gate::Swap { first, second } => swap(old, first, second),
            Gate::Toffoli {
                control1,
                control2,
                target,
            } => toffoli(old, control1, control2, target),
            Gate::PhaseShift { target, angle } => phase_shift(old, target, angle),
            Gate::ControlledModMul {
                control,
                target,
                multiplier,
                modulus,
            } => controlled_mod_mul(old, control, target, multiplier, modulus),
        }
    }
}

fn check_qubit(qubit: usize, num_qubits: usize) -> Result<(), Error> {
    if qubit >= num_qubits {
        return Err(Error::invalid(format!(
            "qubit index {qubit} exceeds qubit count {num_qubits}"
        )));
    }
    Ok(())
}

fn check_distinct(qubits: &[usize]) -> Result<(), Error> {
    let mut unique = FxHashSet::default();
    for &qubit in qubits {
        if !unique.insert(qubit) {
            return Err(Error::invalid(format!(
                "duplicate qubit index {qubit} in gate application"
            )));
        }
    }
    Ok(())
}

fn hadamard(old: &[Complex64], target: usize) -> Vec<Complex64> {
    let mask = 1_usize << target;
    let mut new = vec![Complex64::new(0.0, 0.0); old.len()];
    for index in 0..old.len() {
        // Each index pair differing only in the target bit is processed once,
        // from its zero-bit member.
        if index & mask == 0 {
            let flipped = index | mask;
            new[index] = (old[index] + old[flipped]) * FRAC_1_SQRT_2;
            new[flipped] = (old[index] - old[flipped]) * FRAC_1_SQRT_2;
        }
    }
    new
}

fn pauli_x(old: &[Complex64], target: usize) -> Vec<Complex64> {
    let mask = 1_usize << target;
    let mut new = old.to_vec();
    for index in 0..old.len() {
        if index & mask == 0 {
            let flipped = index | mask;
            new[index] = old[flipped];
            new[flipped] = old[index];
        }
    }
    new
}

fn controlled_not(old: &[Complex64], control: usize, target: usize) -> Vec<Complex64> {
    let control_mask = 1_usize << control;
    let target_mask = 1_usize << target;
    let mut new = old.to_vec();
    for index in 0..old.len() {
        if index & control_mask != 0 {
            new[index ^ target_mask] = old[index];
        }
    }
    new
}

fn swap(old: &[Complex64], first: usize, second: usize) -> Vec<Complex64> {
    let first_mask = 1_usize << first;
    let second_mask = 1_usize << second;
    let mut new = old.to_vec();
    for index in 0..old.len() {
        // Indices where the two bits agree are fixed points of the exchange.
        if (index & first_mask != 0) != (index & second_mask != 0) {
            new[index] = old[index ^ first_mask ^ second_mask];
        }
    }
    new
}

fn toffoli(old: &[Complex64], control1: usize, control2: usize, target: usize) -> Vec<Complex64> {
    let control1_mask = 1_usize << control1;
    let control2_mask = 1_usize << control2;
    let target_mask = 1_usize << target;
    let mut new = old.to_vec();
    for index in 0..old.len() {
        if index & control1_mask != 0 && index & control2_mask != 0 {
            new[index ^ target_mask] = old[index];
        }
    }
    new
}

fn phase_shift(old: &[Complex64], target: usize, angle: f64) -> Vec<Complex64> {
    let mask = 1_usize << target;
    let factor = Complex64::exp(Complex64::new(0.0, angle));
    let mut new = old.to_vec();
    for (index, amplitude) in new.iter_mut().enumerate() {
        if index & mask != 0 {
            *amplitude *= factor;
        }
    }
    new
}

#[allow(clippy::cast_possible_truncation)] // reason="The product is reduced mod `modulus`, which fits usize."
fn controlled_mod_mul(
    old: &[Complex64],
    control: usize,
    target: Register,
    multiplier: usize,
    modulus: usize,
) -> Vec<Complex64> {
    let control_mask = 1_usize << control;
    let mut new = old.to_vec();
    for index in 0..old.len() {
        if index & control_mask != 0 {
            let value = target.extract(index);
            let reduced = ((multiplier as u128 * value as u128) % modulus as u128) as usize;
            new[target.embed(index, reduced)] = old[index];
        }
    }
    new
}
