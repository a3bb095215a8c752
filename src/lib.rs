//! Nine-qubit Shor-code trial harness.
//!
//! One trial encodes a logical qubit into nine physical qubits (three
//! bit-flip groups under an outer phase-flip code), injects a structured
//! random Pauli fault, extracts a four-channel ancilla syndrome, and checks
//! the syndrome read out of the simulated state against the one predicted
//! from the fault's ground-truth label:
//!
//! ```text
//! sample_fault ──> (label, noise gate)
//!                        │
//! encoder ─ noise ─ syndrome extraction ──> final state vector
//!                        │                        │
//! Syndrome::expected(label)          extract_significant_amplitudes
//!                        │                        │
//!                        └──── SyndromeReport ────┘
//! ```
//!
//! [`model`] holds the simulator substrate (qubits, the statevector
//! register and its gates); [`core`] holds the code-specific pieces: the
//! amplitude codec, the gate vocabulary, circuit assembly, the register
//! layout and circuit builders, the fault injector, and the syndrome
//! decoder.

pub mod core;
pub mod model;
