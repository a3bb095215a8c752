//! The structured fault injector.
//!
//! Each trial carries at most one bit-flip-type fault and at most one
//! phase-flip-type fault, never two faults in the same qubit group: the
//! strongest noise a distance-3 code still pins down unambiguously. The
//! sampler enforces that by construction rather than by rejection:
//! whole groups leave the qubit pool once hit, and the error-type pool
//! shrinks according to what was already injected.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::core::gate::Gate;
use crate::model::pauli::{CODE_QUBITS, ErrorLabel, GROUP_SIZE, Pauli};

/// A sampled fault: the circuit component that applies it, plus the
/// ground-truth label the decoder's prediction is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub label: ErrorLabel,
    pub gate: Gate,
}

/// Samples a random structured fault.
///
/// Draws `k ∈ {0, 1, 2}` fault rounds. Each round picks a qubit uniformly
/// from the qubits whose groups are still untouched and an error type
/// uniformly from the types still admissible:
///
/// - **Y** ends the loop immediately, since a combined bit-and-phase fault
///   leaves no room for any further distinguishable fault.
/// - **X** removes X and Y from the pool; only a later Z remains possible.
/// - **Z** removes Y and Z; only a later X remains possible.
///
/// `k = 0` is a valid trial: the all-identity label, which must decode to
/// four clean syndrome channels.
///
/// With `reveal`, the returned gate's rendered form shows the label;
/// otherwise the gate prints as an anonymous `noise` block.
pub fn sample_fault<R: Rng + ?Sized>(rng: &mut R, reveal: bool) -> Fault {
    let rounds = rng.random_range(0..=2);

    let mut live_qubits: Vec<usize> = (0..CODE_QUBITS).collect();
    let mut live_types = vec![Pauli::X, Pauli::Y, Pauli::Z];
    let mut label = ErrorLabel::identity();

    for round in 0..rounds {
        // Both pools are non-empty for any reachable round; the let-else
        // arms are the graceful way out should that ever change.
        let Some(&qubit) = live_qubits.choose(rng) else {
            break;
        };
        let Some(&pauli) = live_types.choose(rng) else {
            break;
        };

        label.set(qubit, pauli);
        debug!(round, qubit, pauli = %pauli, "sampled fault");

        // A second fault in the same group would be indistinguishable from
        // a single fault elsewhere; retire the whole group.
        let group = qubit / GROUP_SIZE;
        live_qubits.retain(|q| q / GROUP_SIZE != group);

        match pauli {
            Pauli::Y => break,
            Pauli::X => live_types.retain(|p| !matches!(p, Pauli::X | Pauli::Y)),
            Pauli::Z => live_types.retain(|p| !matches!(p, Pauli::Y | Pauli::Z)),
            Pauli::I => {}
        }
    }

    debug!(%label, "fault injection complete");
    Fault {
        label,
        gate: Gate::Noise {
            label,
            revealed: reveal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pauli::GROUP_COUNT;
    use rand::{SeedableRng, rngs::SmallRng};

    fn sampled_labels(trials: u64) -> Vec<ErrorLabel> {
        (0..trials)
            .map(|seed| {
                let mut rng = SmallRng::seed_from_u64(seed);
                sample_fault(&mut rng, false).label
            })
            .collect()
    }

    #[test]
    fn never_two_faults_in_one_group() {
        for label in sampled_labels(2000) {
            for group in 0..GROUP_COUNT {
                let hits = (0..GROUP_SIZE)
                    .filter(|p| label.get(group * GROUP_SIZE + p) != Pauli::I)
                    .count();
                assert!(hits <= 1, "group {group} hit twice in {label}");
            }
        }
    }

    #[test]
    fn y_is_always_the_only_fault() {
        let mut saw_y = false;
        for label in sampled_labels(2000) {
            if label.iter().any(|(_, p)| p == Pauli::Y) {
                saw_y = true;
                assert_eq!(label.weight(), 1, "Y must terminate injection: {label}");
            }
        }
        assert!(saw_y, "2000 seeds should produce at least one Y fault");
    }

    #[test]
    fn double_faults_pair_one_bit_flip_with_one_phase_flip() {
        let mut saw_double = false;
        for label in sampled_labels(2000) {
            assert!(label.weight() <= 2);
            if label.weight() == 2 {
                saw_double = true;
                let x_count = label.iter().filter(|&(_, p)| p == Pauli::X).count();
                let z_count = label.iter().filter(|&(_, p)| p == Pauli::Z).count();
                assert_eq!((x_count, z_count), (1, 1), "double fault must be X+Z: {label}");
            }
        }
        assert!(saw_double, "2000 seeds should produce at least one double fault");
    }

    #[test]
    fn no_fault_trials_produce_the_identity_label() {
        let identity_seen = sampled_labels(2000)
            .iter()
            .any(|label| *label == ErrorLabel::identity());
        assert!(identity_seen, "k = 0 should occur within 2000 seeds");
    }

    #[test]
    fn gate_reveals_label_only_when_asked() {
        let mut rng = SmallRng::seed_from_u64(1);
        let hidden = sample_fault(&mut rng, false);
        assert_eq!(hidden.gate.to_string(), "noise");

        let mut rng = SmallRng::seed_from_u64(1);
        let revealed = sample_fault(&mut rng, true);
        assert_eq!(revealed.label, hidden.label);
        assert_eq!(
            revealed.gate.to_string(),
            format!("noise [{}]", revealed.label)
        );
    }

    #[test]
    fn same_seed_reproduces_the_same_fault() {
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);
        assert_eq!(sample_fault(&mut a, false), sample_fault(&mut b, false));
    }
}
