//! Assembly and execution of gate sequences.

use num_traits::{ConstOne, ConstZero, FloatConst, Signed};
use tracing::debug;

use crate::core::gate::Gate;
use crate::model::register::Register;

/// An ordered gate sequence over a fixed number of wires.
///
/// A `Circuit` is just data; [`run`](Circuit::run) interprets it against a
/// [`Register`], producing the final amplitude vector. Circuits compose by
/// appending, so a trial is built stage by stage (encode, fault, syndrome
/// extraction, recovery).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circuit {
    qubit_count: u8,
    gates: Vec<Gate>,
}

impl Circuit {
    /// An empty circuit over `qubit_count` wires.
    #[must_use]
    pub const fn new(qubit_count: u8) -> Self {
        Self {
            qubit_count,
            gates: Vec::new(),
        }
    }

    #[must_use]
    pub const fn qubit_count(&self) -> u8 {
        self.qubit_count
    }

    #[must_use]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Appends one gate.
    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Appends every gate of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the circuits are over different wire counts.
    pub fn append(&mut self, other: Self) {
        assert_eq!(
            self.qubit_count, other.qubit_count,
            "Circuits must span the same number of qubits"
        );
        self.gates.extend(other.gates);
    }

    /// Builder-style [`append`](Circuit::append).
    #[must_use]
    pub fn then(mut self, other: Self) -> Self {
        self.append(other);
        self
    }

    /// Executes the circuit, consuming the initial state and returning the
    /// final one.
    ///
    /// # Panics
    ///
    /// Panics if the register width does not match the circuit width.
    #[must_use]
    pub fn run<T>(&self, mut register: Register<T>) -> Register<T>
    where
        T: Clone + Signed + FloatConst + ConstOne + ConstZero,
    {
        assert_eq!(
            register.num_qubits(),
            self.qubit_count as usize,
            "Register width must match circuit width"
        );
        debug!(qubits = self.qubit_count, gates = self.gates.len(), "executing circuit");

        for gate in &self.gates {
            gate.apply(&mut register);
        }
        register
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn run_applies_gates_in_order() {
        let mut circuit = Circuit::new(2);
        circuit.push(Gate::H { target: 0 });
        circuit.push(Gate::Cnot {
            control: 0,
            target: 1,
        });

        let state = circuit.run(Register::<f64>::from_basis_state(2, 0, 0.0));

        // Bell pair: amplitude 1/sqrt(2) on |00> and |11>.
        let amplitudes = state.amplitudes();
        assert_abs_diff_eq!(amplitudes[0b00].re, std::f64::consts::FRAC_1_SQRT_2);
        assert_abs_diff_eq!(amplitudes[0b11].re, std::f64::consts::FRAC_1_SQRT_2);
        assert_abs_diff_eq!(amplitudes[0b01].norm_sqr(), 0.0);
    }

    #[test]
    fn append_concatenates_stages() {
        let mut first = Circuit::new(2);
        first.push(Gate::H { target: 0 });
        let mut second = Circuit::new(2);
        second.push(Gate::H { target: 0 });

        let combined = first.then(second);
        assert_eq!(combined.gates().len(), 2);

        // H then H is the identity.
        let state = combined.run(Register::<f64>::from_basis_state(2, 1, 0.0));
        assert_abs_diff_eq!(state.amplitudes()[1].re, 1.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "same number of qubits")]
    fn append_rejects_width_mismatch() {
        Circuit::new(2).append(Circuit::new(3));
    }
}
