// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use ndarray::linalg::kron;
use ndarray::{array, Array1, Array2};
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

use crate::{gates::Gate, StateVector};

/// Returns a unitary matrix representing the single-qubit Hadamard
/// transformation.
#[must_use]
pub fn h() -> Array2<Complex64> {
    array![
        [Complex64::one(), Complex64::one()],
        [Complex64::one(), -Complex64::one()]
    ] * FRAC_1_SQRT_2
}

/// Returns a unitary matrix representing the `X` operation.
#[must_use]
pub fn x() -> Array2<Complex64> {
    array![
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()]
    ]
}

/// Returns a unitary matrix representing the phase shift by the given angle.
#[must_use]
pub fn phase(angle: f64) -> Array2<Complex64> {
    array![
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::exp(Complex64::new(0.0, angle))]
    ]
}

/// Transforms the given matrix into its adjoint using the transpose of the
/// complex conjugate.
#[must_use]
pub fn adjoint(u: &Array2<Complex64>) -> Array2<Complex64> {
    u.t().map(Complex64::conj)
}

/// Extends a single-qubit matrix to the full state space of `num_qubits`
/// qubits with the operation acting on `target`. Qubit 0 is the
/// least-significant index bit, so the target sits between identities on the
/// lower and upper qubits.
#[must_use]
pub fn embed_single(u: &Array2<Complex64>, target: usize, num_qubits: usize) -> Array2<Complex64> {
    let below = Array2::<Complex64>::eye(1 << target);
    let above = Array2::<Complex64>::eye(1 << (num_qubits - 1 - target));
    kron(&above, &kron(u, &below))
}

/// Builds the full-state matrix of a classical reversible operation from its
/// action on basis-state indices.
#[must_use]
pub fn permutation(size: usize, map: impl Fn(usize) -> usize) -> Array2<Complex64> {
    let mut matrix = Array2::<Complex64>::zeros((size, size));
    for source in 0..size {
        matrix[[map(source), source]] = Complex64::one();
    }
    matrix
}

/// Applies a full-state matrix to the amplitude vector directly.
#[must_use]
pub fn apply_matrix(u: &Array2<Complex64>, state: &StateVector) -> Vec<Complex64> {
    let amplitudes = Array1::from(state.amplitudes().to_vec());
    u.dot(&amplitudes).to_vec()
}

mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn are_equal_to_precision(actual: Array2<Complex64>, expected: Array2<Complex64>) -> bool {
        // If we use assert_eq here, we'll get bitten by finite precision.
        (actual - expected).map(|entry| entry.norm()).sum() <= 1e-10
    }

    fn assert_states_close(actual: &[Complex64], expected: &[Complex64]) {
        assert_eq!(actual.len(), expected.len());
        let distance: f64 = actual
            .iter()
            .zip(expected)
            .map(|(a, e)| (a - e).norm())
            .sum();
        assert!(distance <= 1e-10, "states differ by {distance}");
    }

    fn is_self_adjoint(arr: &Array2<Complex64>) -> bool {
        arr == &adjoint(arr)
    }

    /// An entangled superposition state to compare transformations on; a
    /// basis state would leave most matrix entries unexercised.
    fn prepared_state(num_qubits: usize) -> StateVector {
        let mut state = StateVector::new(num_qubits).expect("state allocation should succeed");
        for qubit in 0..num_qubits {
            Gate::hadamard(qubit)
                .apply(&mut state)
                .expect("gate application should succeed");
        }
        Gate::phase_shift(0, 0.3)
            .apply(&mut state)
            .expect("gate application should succeed");
        if num_qubits > 1 {
            Gate::controlled_not(0, 1)
                .expect("gate should be valid")
                .apply(&mut state)
                .expect("gate application should succeed");
        }
        state
    }

    #[test]
    fn h_is_self_adjoint() {
        assert!(is_self_adjoint(&h()));
    }

    #[test]
    fn h_squares_to_identity() {
        assert!(are_equal_to_precision(
            h().dot(&h()),
            Array2::<Complex64>::eye(2)
        ));
    }

    #[test]
    fn x_is_self_adjoint() {
        assert!(is_self_adjoint(&x()));
    }

    #[test]
    fn phase_pi_is_a_sign_flip() {
        let z = array![
            [Complex64::one(), Complex64::zero()],
            [Complex64::zero(), -Complex64::one()]
        ];
        assert!(are_equal_to_precision(phase(PI), z));
    }

    #[test]
    fn phase_quarter_squares_to_half() {
        assert!(are_equal_to_precision(
            phase(PI / 4.0).dot(&phase(PI / 4.0)),
            phase(PI / 2.0)
        ));
    }

    #[test]
    fn phase_adjoint_negates_the_angle() {
        assert!(are_equal_to_precision(
            adjoint(&phase(PI / 7.0)),
            phase(-PI / 7.0)
        ));
    }

    #[test]
    fn controlled_extension_of_x_is_cnot() {
        // CNOT with control on bit 0 and target on bit 1: identity on the
        // control's zero subspace, X on its one subspace.
        let zero_projector = array![
            [Complex64::one(), Complex64::zero()],
            [Complex64::zero(), Complex64::zero()]
        ];
        let one_projector = array![
            [Complex64::zero(), Complex64::zero()],
            [Complex64::zero(), Complex64::one()]
        ];
        let expected =
            kron(&Array2::<Complex64>::eye(2), &zero_projector) + kron(&x(), &one_projector);
        let cnot = permutation(4, |index| if index & 1 == 1 { index ^ 2 } else { index });
        assert!(are_equal_to_precision(cnot, expected));
    }

    #[test]
    fn test_hadamard_matches_matrix() {
        for target in 0..3 {
            let mut state = prepared_state(3);
            let expected = apply_matrix(&embed_single(&h(), target, 3), &state);
            Gate::hadamard(target)
                .apply(&mut state)
                .expect("gate application should succeed");
            assert_states_close(state.amplitudes(), &expected);
        }
    }

    #[test]
    fn test_pauli_x_matches_matrix() {
        for target in 0..3 {
            let mut state = prepared_state(3);
            let expected = apply_matrix(&embed_single(&x(), target, 3), &state);
            Gate::pauli_x(target)
                .apply(&mut state)
                .expect("gate application should succeed");
            assert_states_close(state.amplitudes(), &expected);
        }
    }

    #[test]
    fn test_phase_shift_matches_matrix() {
        for target in 0..3 {
            let mut state = prepared_state(3);
            let expected = apply_matrix(&embed_single(&phase(PI / 7.0), target, 3), &state);
            Gate::phase_shift(target, PI / 7.0)
                .apply(&mut state)
                .expect("gate application should succeed");
            assert_states_close(state.amplitudes(), &expected);
        }
    }

    #[test]
    fn test_controlled_not_matches_permutation() {
        let mut state = prepared_state(3);
        let matrix = permutation(8, |index| if index & 1 == 1 { index ^ 0b100 } else { index });
        let expected = apply_matrix(&matrix, &state);
        Gate::controlled_not(0, 2)
            .expect("gate should be valid")
            .apply(&mut state)
            .expect("gate application should succeed");
        assert_states_close(state.amplitudes(), &expected);
    }

    #[test]
    fn test_swap_matches_permutation() {
        let mut state = prepared_state(3);
        let matrix = permutation(8, |index| {
            let low = index & 1;
            let high = (index >> 2) & 1;
            (index & 0b010) | (low << 2) | high
        });
        let expected = apply_matrix(&matrix, &state);
        Gate::swap(0, 2)
            .expect("gate should be valid")
            .apply(&mut state)
            .expect("gate application should succeed");
        assert_states_close(state.amplitudes(), &expected);
    }

    #[test]
    fn test_toffoli_matches_permutation() {
        let mut state = prepared_state(3);
        let matrix = permutation(8, |index| {
            if index & 0b011 == 0b011 {
                index ^ 0b100
            } else {
                index
            }
        });
        let expected = apply_matrix(&matrix, &state);
        Gate::toffoli(0, 1, 2)
            .expect("gate should be valid")
            .apply(&mut state)
            .expect("gate application should succeed");
        assert_states_close(state.amplitudes(), &expected);
    }

    #[test]
    fn test_mod_mul_matches_permutation() {
        let mut state = prepared_state(5);
        // Control on bit 0, a 4-bit field on bits 1-4, multiplication by 7
        // mod 16 written out with explicit shifts and masks. The modulus
        // covers the whole field so the map is a permutation everywhere the
        // prepared superposition has weight.
        let matrix = permutation(32, |index| {
            if index & 1 == 1 {
                let value = (index >> 1) & 0b1111;
                let reduced = 7 * value % 16;
                (index & !0b11110) | (reduced << 1)
            } else {
                index
            }
        });
        let expected = apply_matrix(&matrix, &state);
        Gate::controlled_mod_mul(0, 1, 4, 7, 16)
            .expect("gate should be valid")
            .apply(&mut state)
            .expect("gate application should succeed");
        assert_states_close(state.amplitudes(), &expected);
    }
}
