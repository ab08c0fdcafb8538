// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Composite arithmetic circuits assembled from the primitive gates: a
//! ripple-carry adder and an equality comparator. Both operate on registers
//! inside one shared state; overlap between the registers handed to the same
//! circuit is a caller error that is not defended against beyond bounds
//! checks.

use crate::{gates::Gate, Error, Register, StateVector};

/// Ripple-carry addition of two registers:
/// `|A⟩|B⟩|0⟩ → |A⟩|(A+B) mod 2^n⟩|carry chain⟩`.
///
/// Register A is read-only throughout; B accumulates the sum; the carry
/// register is scratch of width `num_bits + 1` that must start at zero, and
/// its final qubit holds the arithmetic carry-out after application.
#[derive(Debug, Clone, Copy)]
pub struct RippleCarryAdder {
    a: Register,
    b: Register,
    carry: Register,
}

impl RippleCarryAdder {
    /// Builds the adder over `num_bits`-wide operand registers starting at
    /// `a_start` and `b_start` and a `num_bits + 1`-wide carry register
    /// starting at `carry_start`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `num_bits` is zero.
    pub fn new(
        a_start: usize,
        b_start: usize,
        carry_start: usize,
        num_bits: usize,
    ) -> Result<Self, Error> {
        Ok(RippleCarryAdder {
            a: Register::new(a_start, num_bits)?,
            b: Register::new(b_start, num_bits)?,
            carry: Register::new(carry_start, num_bits + 1)?,
        })
    }

    /// The read-only operand register.
    #[must_use]
    pub fn a(&self) -> Register {
        self.a
    }

    /// The operand register that receives the sum.
    #[must_use]
    pub fn b(&self) -> Register {
        self.b
    }

    /// The carry scratch register; its last qubit is the carry-out.
    #[must_use]
    pub fn carry(&self) -> Register {
        self.carry
    }

    /// Runs the addition on the given state.
    ///
    /// Per bit position, least-significant first: three Toffoli gates
    /// accumulate the majority of `A_i`, `B_i`, and the incoming carry into
    /// the outgoing carry qubit (each Toffoli flips it again when its pair of
    /// inputs is set, so the parity of flips is the 3-input majority), then
    /// two controlled-NOT gates fold `A_i` and the incoming carry into `B_i`
    /// to form the sum bit.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if any register extent exceeds the
    /// state's qubit count.
    pub fn apply(&self, state: &mut StateVector) -> Result<(), Error> {
        check_extent(self.a, state)?;
        check_extent(self.b, state)?;
        check_extent(self.carry, state)?;

        for i in 0..self.a.len() {
            let a = self.a.start() + i;
            let b = self.b.start() + i;
            let carry_in = self.carry.start() + i;
            let carry_out = self.carry.start() + i + 1;

            Gate::toffoli(a, b, carry_out)?.apply(state)?;
            Gate::toffoli(a, carry_in, carry_out)?.apply(state)?;
            Gate::toffoli(b, carry_in, carry_out)?.apply(state)?;

            Gate::controlled_not(a, b)?.apply(state)?;
            Gate::controlled_not(carry_in, b)?.apply(state)?;
        }
        Ok(())
    }
}

/// Equality comparison of two registers, leaving a 1 in the final qubit of
/// the result chain iff `A == B`.
///
/// The result chain is `num_bits + 1` qubits starting at all-zero; qubit
/// `i + 1` of the chain records "all bit positions up to `i` matched". The
/// comparison destructively overwrites register B (each `B_i` ends up holding
/// whether `A_i == B_i`) and leaves the intermediate chain qubits set, so the
/// circuit is not reversible or reusable without an uncomputation pass.
#[derive(Debug, Clone, Copy)]
pub struct EqualityComparator {
    a: Register,
    b: Register,
    result: Register,
}

impl EqualityComparator {
    /// Builds the comparator over `num_bits`-wide operand registers and a
    /// `num_bits + 1`-wide result chain starting at `result_start`.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if `num_bits` is zero.
    pub fn new(
        a_start: usize,
        b_start: usize,
        result_start: usize,
        num_bits: usize,
    ) -> Result<Self, Error> {
        Ok(EqualityComparator {
            a: Register::new(a_start, num_bits)?,
            b: Register::new(b_start, num_bits)?,
            result: Register::new(result_start, num_bits + 1)?,
        })
    }

    /// The untouched operand register.
    #[must_use]
    pub fn a(&self) -> Register {
        self.a
    }

    /// The operand register consumed as workspace.
    #[must_use]
    pub fn b(&self) -> Register {
        self.b
    }

    /// The result chain; its last qubit carries the equality verdict.
    #[must_use]
    pub fn result(&self) -> Register {
        self.result
    }

    /// Runs the comparison on the given state.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if any register extent exceeds the
    /// state's qubit count.
    pub fn apply(&self, state: &mut StateVector) -> Result<(), Error> {
        check_extent(self.a, state)?;
        check_extent(self.b, state)?;
        check_extent(self.result, state)?;

        // Seed the chain: zero bit positions compared so far, trivially equal.
        Gate::pauli_x(self.result.start()).apply(state)?;

        for i in 0..self.a.len() {
            let a = self.a.start() + i;
            let b = self.b.start() + i;
            let matched_so_far = self.result.start() + i;
            let matched_through = self.result.start() + i + 1;

            // B_i becomes 1 iff A_i == B_i, consuming B's original content.
            Gate::controlled_not(a, b)?.apply(state)?;
            Gate::pauli_x(b).apply(state)?;

            // Propagate the chained AND one position forward.
            Gate::toffoli(b, matched_so_far, matched_through)?.apply(state)?;
        }
        Ok(())
    }
}

fn check_extent(register: Register, state: &StateVector) -> Result<(), Error> {
    if register.end() > state.num_qubits() {
        return Err(Error::invalid(format!(
            "register [{}, {}) exceeds qubit count {}",
            register.start(),
            register.end(),
            state.num_qubits()
        )));
    }
    Ok(())
}
