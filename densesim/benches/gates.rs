// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use criterion::{criterion_group, criterion_main, Criterion};
use quantum_dense_sim::gates::Gate;
use quantum_dense_sim::StateVector;

const BENCH_QUBITS: usize = 12;

fn superposed_state() -> StateVector {
    let mut state = StateVector::new(BENCH_QUBITS).expect("state allocation failed");
    for qubit in 0..BENCH_QUBITS {
        Gate::hadamard(qubit)
            .apply(&mut state)
            .expect("gate application failed");
    }
    state
}

macro_rules! bench_gate {
    ($c:ident, $desc:expr, $gate:expr) => {
        let gate = $gate;
        let mut state = superposed_state();
        $c.bench_function($desc, |b| {
            b.iter(|| gate.apply(&mut state).expect("gate application failed"))
        });
    };
}

pub fn hadamard_gate(c: &mut Criterion) {
    bench_gate!(c, "Hadamard Gate", Gate::hadamard(5));
}

pub fn pauli_x_gate(c: &mut Criterion) {
    bench_gate!(c, "Pauli-X Gate", Gate::pauli_x(5));
}

pub fn controlled_not_gate(c: &mut Criterion) {
    bench_gate!(
        c,
        "Controlled-NOT Gate",
        Gate::controlled_not(0, 5).expect("gate construction failed")
    );
}

pub fn swap_gate(c: &mut Criterion) {
    bench_gate!(
        c,
        "SWAP Gate",
        Gate::swap(0, 11).expect("gate construction failed")
    );
}

pub fn toffoli_gate(c: &mut Criterion) {
    bench_gate!(
        c,
        "Toffoli Gate",
        Gate::toffoli(0, 1, 5).expect("gate construction failed")
    );
}

pub fn phase_shift_gate(c: &mut Criterion) {
    bench_gate!(
        c,
        "Phase Shift Gate",
        Gate::phase_shift(5, std::f64::consts::PI / 7.0)
    );
}

pub fn controlled_mod_mul_gate(c: &mut Criterion) {
    bench_gate!(
        c,
        "Controlled Modular Multiply Gate",
        Gate::controlled_mod_mul(0, 2, 10, 7, 1009).expect("gate construction failed")
    );
}

criterion_group!(
    benches,
    hadamard_gate,
    pauli_x_gate,
    controlled_not_gate,
    swap_gate,
    toffoli_gate,
    phase_shift_gate,
    controlled_mod_mul_gate
);
criterion_main!(benches);
