// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// Failures raised by state allocation, gate construction, and gate or
/// circuit application. All of these indicate caller errors: the current
/// circuit construction or simulation run should be abandoned, not retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A gate, register, or circuit was built or applied with arguments that
    /// violate its contract: a duplicate qubit role, a zero width or modulus,
    /// or a qubit index beyond the state's qubit count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An amplitude index fell outside `[0, 2^n)` for the state it was
    /// applied to.
    #[error("index {index} is out of range for a state of {size} basis states")]
    OutOfRange {
        /// The rejected amplitude index.
        index: usize,
        /// The number of basis states in the target state.
        size: usize,
    },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
