//! The gate vocabulary the code circuits are assembled from.
//!
//! Every operation is a flat, `Copy` value carrying explicit wire indices;
//! [`Circuit`](crate::core::circuit::Circuit) interprets them against a
//! [`Register`]. The composite variants (`CnotNot`, `Czz`, `C6x`, the
//! inverted-control gates) are unitary circuits treated as atomic building
//! blocks; `Noise` is the sampled fault, applied as one Pauli per data
//! qubit.

use std::fmt::{Display, Formatter};

use num_traits::{ConstOne, ConstZero, FloatConst, Signed};

use crate::core::shor;
use crate::model::pauli::{ErrorLabel, Pauli};
use crate::model::register::Register;

/// One atomic operation of a code circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Hadamard on a single wire.
    H { target: usize },
    /// Controlled-NOT.
    Cnot { control: usize, target: usize },
    /// Toffoli: NOT on the target when both controls read 1.
    Ccnot { controls: [usize; 2], target: usize },
    /// One control fanning out X onto two targets.
    CnotNot { control: usize, targets: [usize; 2] },
    /// One control applying Z to two targets.
    Czz { control: usize, targets: [usize; 2] },
    /// One control fanning out X onto six targets; conjugated with
    /// Hadamards on the control this reads out a six-fold X parity.
    C6x { control: usize, targets: [usize; 6] },
    /// Toffoli with `control_off` inverted (fires on the `10` pattern).
    InvCcnot {
        control_on: usize,
        control_off: usize,
        target: usize,
    },
    /// Doubly-controlled Z.
    Ccz { controls: [usize; 2], target: usize },
    /// Doubly-controlled Z with `control_off` inverted.
    InvCcz {
        control_on: usize,
        control_off: usize,
        target: usize,
    },
    /// The injected fault: the label's Pauli on each data wire. The label
    /// only shows up in the rendered form when `revealed` is set.
    Noise { label: ErrorLabel, revealed: bool },
}

impl Gate {
    /// Applies this operation to `register`, mutating it in place.
    pub fn apply<T>(&self, register: &mut Register<T>)
    where
        T: Clone + Signed + FloatConst + ConstOne + ConstZero,
    {
        match *self {
            Self::H { target } => register.h(target),
            Self::Cnot { control, target } => register.cnot(control, target),
            Self::Ccnot { controls, target } => register.ccnot(controls[0], controls[1], target),
            Self::CnotNot { control, targets } => {
                register.cnot(control, targets[0]);
                register.cnot(control, targets[1]);
            }
            Self::Czz { control, targets } => {
                register.cz(control, targets[0]);
                register.cz(control, targets[1]);
            }
            Self::C6x { control, targets } => {
                for target in targets {
                    register.cnot(control, target);
                }
            }
            Self::InvCcnot {
                control_on,
                control_off,
                target,
            } => register.ccnot_inverted(control_on, control_off, target),
            Self::Ccz { controls, target } => register.ccz(controls[0], controls[1], target),
            Self::InvCcz {
                control_on,
                control_off,
                target,
            } => register.ccz_inverted(control_on, control_off, target),
            Self::Noise { label, .. } => {
                for (qubit, pauli) in label.iter() {
                    let wire = shor::data_wire(qubit);
                    match pauli {
                        Pauli::I => {}
                        Pauli::X => register.x(wire),
                        Pauli::Y => register.y(wire),
                        Pauli::Z => register.z(wire),
                    }
                }
            }
        }
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::H { target } => write!(f, "h q{target}"),
            Self::Cnot { control, target } => write!(f, "cnot q{control} -> q{target}"),
            Self::Ccnot { controls, target } => {
                write!(f, "ccx q{}, q{} -> q{target}", controls[0], controls[1])
            }
            Self::CnotNot { control, targets } => {
                write!(f, "cnotnot q{control} -> q{}, q{}", targets[0], targets[1])
            }
            Self::Czz { control, targets } => {
                write!(f, "czz q{control} -> q{}, q{}", targets[0], targets[1])
            }
            Self::C6x { control, targets } => {
                write!(f, "c6x q{control} ->")?;
                for (i, target) in targets.iter().enumerate() {
                    write!(f, "{} q{target}", if i == 0 { "" } else { "," })?;
                }
                Ok(())
            }
            Self::InvCcnot {
                control_on,
                control_off,
                target,
            } => write!(f, "ccx q{control_on}, !q{control_off} -> q{target}"),
            Self::Ccz { controls, target } => {
                write!(f, "ccz q{}, q{} -> q{target}", controls[0], controls[1])
            }
            Self::InvCcz {
                control_on,
                control_off,
                target,
            } => write!(f, "ccz q{control_on}, !q{control_off} -> q{target}"),
            Self::Noise { label, revealed } => {
                if revealed {
                    write!(f, "noise [{label}]")
                } else {
                    write!(f, "noise")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn basis(num_qubits: u8, index: usize) -> Register<f64> {
        Register::from_basis_state(num_qubits, index, 0.0)
    }

    fn dominant(register: &Register<f64>) -> usize {
        register
            .amplitudes()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm_sqr().total_cmp(&b.norm_sqr()))
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn cnotnot_fans_out_to_both_targets() {
        let mut register = basis(3, 0b001);
        Gate::CnotNot {
            control: 0,
            targets: [1, 2],
        }
        .apply(&mut register);
        assert_eq!(dominant(&register), 0b111);
    }

    #[test]
    fn czz_flips_sign_once_per_set_target() {
        let mut register = basis(3, 0b011);
        Gate::Czz {
            control: 0,
            targets: [1, 2],
        }
        .apply(&mut register);
        // Only target wire 1 is set: exactly one sign flip.
        assert_abs_diff_eq!(register.amplitudes()[0b011].re, -1.0);

        let mut register = basis(3, 0b111);
        Gate::Czz {
            control: 0,
            targets: [1, 2],
        }
        .apply(&mut register);
        // Both targets set: the two flips cancel.
        assert_abs_diff_eq!(register.amplitudes()[0b111].re, 1.0);
    }

    #[test]
    fn c6x_flips_all_six_targets() {
        let mut register = basis(7, 0b0000001);
        Gate::C6x {
            control: 0,
            targets: [1, 2, 3, 4, 5, 6],
        }
        .apply(&mut register);
        assert_eq!(dominant(&register), 0b1111111);
    }

    #[test]
    fn inverted_control_gates_fire_only_on_mixed_patterns() {
        let gate = Gate::InvCcnot {
            control_on: 0,
            control_off: 1,
            target: 2,
        };

        let mut register = basis(3, 0b001);
        gate.apply(&mut register);
        assert_eq!(dominant(&register), 0b101);

        let mut register = basis(3, 0b011);
        gate.apply(&mut register);
        assert_eq!(dominant(&register), 0b011);
    }

    #[test]
    fn noise_applies_label_paulis_on_data_wires() {
        let label: ErrorLabel = "XIIIIIIII".parse().unwrap();
        let mut register = basis(shor::REGISTER_WIDTH, 0);
        Gate::Noise {
            label,
            revealed: false,
        }
        .apply(&mut register);
        assert_eq!(dominant(&register), 1 << shor::data_wire(0));
    }

    #[test]
    fn noise_display_respects_reveal_flag() {
        let label: ErrorLabel = "IIIZIIIII".parse().unwrap();
        let hidden = Gate::Noise {
            label,
            revealed: false,
        };
        let shown = Gate::Noise {
            label,
            revealed: true,
        };
        assert_eq!(hidden.to_string(), "noise");
        assert_eq!(shown.to_string(), "noise [IIIZIIIII]");
    }
}
