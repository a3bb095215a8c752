//! Register layout and circuit builders for the nine-qubit code.
//!
//! The register interleaves data and ancilla wires so that each group's two
//! bit-flip ancillas sit directly after the group's three data wires:
//!
//! ```text
//! wire  0  1  2 |  3  4 |  5  6  7 |  8  9 | 10 11 12 | 13 14 | 15 16
//!       d0 d1 d2  a0 a1   d3 d4 d5  a2 a3   d6 d7 d8   a4 a5   z0 z1
//! ```
//!
//! Read least-significant-wire first, the final bit-string therefore carries
//! the group-0 ancilla pair at characters 3–4, group 1 at 8–9, group 2 at
//! 13–14, and the phase pair as the last two characters. That placement is
//! the contract the syndrome decoder's window offsets are built on.

use crate::core::circuit::Circuit;
use crate::core::gate::Gate;
use crate::model::pauli::{CODE_QUBITS, GROUP_COUNT, GROUP_SIZE};

/// Wires per group block: three data qubits plus two ancillas.
const GROUP_STRIDE: usize = GROUP_SIZE + 2;

/// Total register width: nine data, six bit-flip ancillas, two phase
/// ancillas.
pub const REGISTER_WIDTH: u8 = 17;

/// The two phase-parity ancilla wires.
pub const PHASE_ANCILLA_WIRES: (usize, usize) = (15, 16);

/// The register wire carrying data qubit `qubit`.
///
/// # Panics
///
/// Panics if `qubit` is not in `[0, 9)`.
#[must_use]
pub const fn data_wire(qubit: usize) -> usize {
    assert!(qubit < CODE_QUBITS, "Data qubit index out of range");
    (qubit / GROUP_SIZE) * GROUP_STRIDE + qubit % GROUP_SIZE
}

/// The bit-flip ancilla pair attached to `group`.
///
/// # Panics
///
/// Panics if `group` is not in `[0, 3)`.
#[must_use]
pub const fn bit_ancilla_wires(group: usize) -> (usize, usize) {
    assert!(group < GROUP_COUNT, "Group index out of range");
    (group * GROUP_STRIDE + GROUP_SIZE, group * GROUP_STRIDE + GROUP_SIZE + 1)
}

/// The six data wires of two adjacent groups, used by the phase-parity
/// readout.
const fn group_pair_wires(first_group: usize) -> [usize; 6] {
    let a = first_group * GROUP_STRIDE;
    let b = (first_group + 1) * GROUP_STRIDE;
    [a, a + 1, a + 2, b, b + 1, b + 2]
}

/// Spreads the logical qubit on data wire 0 across all nine data qubits.
///
/// ```text
/// |ψ⟩ → α (|000⟩+|111⟩)(|000⟩+|111⟩)(|000⟩+|111⟩) / √8
///     + β (|000⟩−|111⟩)(|000⟩−|111⟩)(|000⟩−|111⟩) / √8
/// ```
#[must_use]
pub fn encoder() -> Circuit {
    let mut circuit = Circuit::new(REGISTER_WIDTH);

    // Outer phase-flip code: copy onto the group heads, then rotate each
    // head into the sign basis.
    circuit.push(Gate::CnotNot {
        control: data_wire(0),
        targets: [data_wire(3), data_wire(6)],
    });
    for group in 0..GROUP_COUNT {
        circuit.push(Gate::H {
            target: data_wire(group * GROUP_SIZE),
        });
    }

    // Inner bit-flip code: fan each head out over its group.
    for group in 0..GROUP_COUNT {
        let head = group * GROUP_SIZE;
        circuit.push(Gate::CnotNot {
            control: data_wire(head),
            targets: [data_wire(head + 1), data_wire(head + 2)],
        });
    }
    circuit
}

/// Un-encodes: returns the logical qubit to data wire 0 and every other
/// data wire to `|0⟩`. Every encoding stage is self-inverse, so this is the
/// encoder's gates in reverse order.
#[must_use]
pub fn encoder_inverse() -> Circuit {
    let mut circuit = Circuit::new(REGISTER_WIDTH);

    for group in 0..GROUP_COUNT {
        let head = group * GROUP_SIZE;
        circuit.push(Gate::CnotNot {
            control: data_wire(head),
            targets: [data_wire(head + 1), data_wire(head + 2)],
        });
    }
    for group in 0..GROUP_COUNT {
        circuit.push(Gate::H {
            target: data_wire(group * GROUP_SIZE),
        });
    }
    circuit.push(Gate::CnotNot {
        control: data_wire(0),
        targets: [data_wire(3), data_wire(6)],
    });
    circuit
}

/// Writes the four syndrome channels onto the ancilla wires.
///
/// Per group, the ancilla pair picks up the two adjacent-qubit parities
/// `d₀⊕d₁` and `d₁⊕d₂`, which localise a bit flip within the group. The
/// phase pair reads the six-fold X parities of groups 0∪1 and 1∪2 through
/// Hadamard-conjugated fan-outs, which localise a phase flip to a group.
#[must_use]
pub fn syndrome_extraction() -> Circuit {
    let mut circuit = Circuit::new(REGISTER_WIDTH);

    for group in 0..GROUP_COUNT {
        let head = group * GROUP_SIZE;
        let (first, second) = bit_ancilla_wires(group);

        circuit.push(Gate::Cnot {
            control: data_wire(head),
            target: first,
        });
        // The middle qubit contributes to both parities.
        circuit.push(Gate::CnotNot {
            control: data_wire(head + 1),
            targets: [first, second],
        });
        circuit.push(Gate::Cnot {
            control: data_wire(head + 2),
            target: second,
        });
    }

    let (z_first, z_second) = PHASE_ANCILLA_WIRES;
    for (ancilla, first_group) in [(z_first, 0), (z_second, 1)] {
        circuit.push(Gate::H { target: ancilla });
        circuit.push(Gate::C6x {
            control: ancilla,
            targets: group_pair_wires(first_group),
        });
        circuit.push(Gate::H { target: ancilla });
    }
    circuit
}

/// Undoes the located fault, conditioned on the ancilla wires.
///
/// Each group's ancilla pattern selects one of its three data wires for an
/// X; the phase pattern selects a group, and a single Z on that group's
/// head qubit flips the block sign back.
#[must_use]
pub fn correction() -> Circuit {
    let mut circuit = Circuit::new(REGISTER_WIDTH);

    for group in 0..GROUP_COUNT {
        let head = group * GROUP_SIZE;
        let (first, second) = bit_ancilla_wires(group);

        circuit.push(Gate::InvCcnot {
            control_on: first,
            control_off: second,
            target: data_wire(head),
        });
        circuit.push(Gate::Ccnot {
            controls: [first, second],
            target: data_wire(head + 1),
        });
        circuit.push(Gate::InvCcnot {
            control_on: second,
            control_off: first,
            target: data_wire(head + 2),
        });
    }

    let (z_first, z_second) = PHASE_ANCILLA_WIRES;
    circuit.push(Gate::InvCcz {
        control_on: z_first,
        control_off: z_second,
        target: data_wire(0),
    });
    circuit.push(Gate::Ccz {
        controls: [z_first, z_second],
        target: data_wire(3),
    });
    circuit.push(Gate::InvCcz {
        control_on: z_second,
        control_off: z_first,
        target: data_wire(6),
    });
    circuit
}

/// Encode, fault, extract: the circuit whose final state the decoder reads.
#[must_use]
pub fn trial(noise: Gate) -> Circuit {
    let mut circuit = encoder();
    circuit.push(noise);
    circuit.then(syndrome_extraction())
}

/// [`trial`] extended with the recovery stages: correction conditioned on
/// the ancillas, then un-encoding. The ancilla wires keep their syndrome
/// values, so the decoder can still read the same final state.
#[must_use]
pub fn trial_with_recovery(noise: Gate) -> Circuit {
    trial(noise).then(correction()).then(encoder_inverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pauli::ErrorLabel;
    use crate::model::register::Register;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wire_layout_interleaves_groups_and_ancillas() {
        assert_eq!(data_wire(0), 0);
        assert_eq!(data_wire(2), 2);
        assert_eq!(data_wire(3), 5);
        assert_eq!(data_wire(8), 12);
        assert_eq!(bit_ancilla_wires(0), (3, 4));
        assert_eq!(bit_ancilla_wires(2), (13, 14));
    }

    #[test]
    fn encoding_ket_zero_spreads_over_eight_branches() {
        let state = encoder().run(Register::<f64>::from_basis_state(REGISTER_WIDTH, 0, 0.0));

        let expected = 1.0 / 8.0_f64.sqrt();
        let survivors: Vec<usize> = state
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm_sqr() > 1e-12)
            .map(|(i, _)| i)
            .collect();

        assert_eq!(survivors.len(), 8);
        for index in survivors {
            assert_abs_diff_eq!(state.amplitudes()[index].re, expected, epsilon = 1e-12);
            // Each group is |000> or |111>, never mixed.
            for group in 0..GROUP_COUNT {
                let bits: Vec<usize> = (0..GROUP_SIZE)
                    .map(|p| (index >> data_wire(group * GROUP_SIZE + p)) & 1)
                    .collect();
                assert!(bits.iter().all(|&b| b == bits[0]));
            }
        }
    }

    #[test]
    fn encode_then_inverse_is_identity() {
        let initial = Register::<f64>::from_basis_state(REGISTER_WIDTH, 1, 0.0);
        let state = encoder().then(encoder_inverse()).run(initial);
        assert_abs_diff_eq!(state.amplitudes()[1].re, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn clean_trial_leaves_all_ancillas_clear() {
        let noise = Gate::Noise {
            label: ErrorLabel::identity(),
            revealed: false,
        };
        let state = trial(noise).run(Register::<f64>::from_basis_state(REGISTER_WIDTH, 0, 0.0));

        let ancilla_mask: usize = [3, 4, 8, 9, 13, 14, 15, 16]
            .iter()
            .map(|w| 1_usize << w)
            .sum();
        for (index, amplitude) in state.amplitudes().iter().enumerate() {
            if amplitude.norm_sqr() > 1e-12 {
                assert_eq!(index & ancilla_mask, 0);
            }
        }
    }
}
