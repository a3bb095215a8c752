use std::fmt::{Display, Formatter};

use num_complex::Complex;
use num_traits::{ConstOne, ConstZero, Float, FloatConst, Num, Signed};

/// Represents a single qubit.
///
/// A qubit is the quantum analogue of a classical bit. While a classical bit
/// can only exist in the state 0 or 1, a qubit can exist in a superposition
/// of both, written `|ψ⟩ = α|0⟩ + β|1⟩` for complex amplitudes `α` and `β`.
/// The **normalization condition** requires `|α|² + |β|² = 1`.
///
/// Here a `Qubit` is the logical input that gets spread across the nine
/// physical code qubits; the encoded system itself is a
/// [`Register`](crate::model::register::Register).
pub struct Qubit<T>(Complex<T>, Complex<T>);

impl<T> Qubit<T> {
    pub fn into_alpha_beta(self) -> (Complex<T>, Complex<T>) {
        (self.0, self.1)
    }
}

impl<T: ConstOne + ConstZero> Qubit<T> {
    /// The canonical basis state `|0>`, representing a classical 0.
    pub const KET_0: Self = Self(Complex::ONE, Complex::ZERO);
    /// The canonical basis state `|1>`, representing a classical 1.
    pub const KET_1: Self = Self(Complex::ZERO, Complex::ONE);
}

impl<T: Clone + Signed + Float> Qubit<T> {
    /// Constructs a new `Qubit` from two complex amplitudes, returning
    /// `None` if the normalization condition `|α|² + |β|² = 1` fails.
    pub fn new(alpha: Complex<T>, beta: Complex<T>) -> Option<Self> {
        let total_prob = alpha.norm_sqr() + beta.norm_sqr();
        ((total_prob - T::one()).abs() < T::epsilon()).then_some(Self(alpha, beta))
    }
}

impl<T> Qubit<T> {
    /// Constructs a new `Qubit` from two complex amplitudes without checking
    /// the normalization condition.
    ///
    /// # Safety
    /// This function is unsafe because it does not validate that
    /// `|α|² + |β|²` equals 1. Using an unnormalised qubit state can lead to
    /// incorrect probabilities and invalid quantum operations.
    pub const unsafe fn new_unchecked(alpha: Complex<T>, beta: Complex<T>) -> Self {
        Self(alpha, beta)
    }
}

impl<T> Qubit<T> {
    /// The Pauli-X gate.
    ///
    /// This gate, also known as the bit-flip gate, swaps the amplitudes of
    /// the `|0>` and `|1>` states:
    ///
    /// ```text
    /// [ 0  1 ]
    /// [ 1  0 ]
    /// ```
    #[must_use]
    pub fn pauli_x(self) -> Self {
        // SAFETY: as addition is commutative,
        // alpha^2 + beta^2 == beta^2 + alpha^2, so they will still
        // abide by the normalisation condition, thus this is safe.
        unsafe { Self::new_unchecked(self.1, self.0) }
    }
}

impl<T: Num + Clone + ConstOne + ConstZero + Signed> Qubit<T> {
    /// The Pauli-Y gate: a combined bit flip and phase flip.
    ///
    /// ```text
    /// [ 0  -i ]
    /// [ i   0 ]
    /// ```
    #[must_use]
    pub fn pauli_y(self) -> Self {
        // SAFETY: multiplying an amplitude by ±i leaves its norm unchanged,
        // so the normalisation condition still holds.
        unsafe { Self::new_unchecked(self.1 * -Complex::I, self.0 * Complex::I) }
    }
}

impl<T: Clone + Num + Signed> Qubit<T> {
    /// The Pauli-Z gate: flips the sign of the `|1>` amplitude.
    ///
    /// ```text
    /// [ 1  0 ]
    /// [ 0 -1 ]
    /// ```
    #[must_use]
    pub fn pauli_z(self) -> Self {
        // SAFETY: as beta is only negated, its norm will stay
        // unchanged, so the normalisation condition still holds.
        unsafe { Self::new_unchecked(self.0, -self.1) }
    }
}

impl<T: Clone + Num + FloatConst> Qubit<T> {
    /// The Hadamard gate: `|0> ↦ (|0> + |1>)/√2`, `|1> ↦ (|0> − |1>)/√2`.
    ///
    /// ```text
    /// [ 1/√2  1/√2 ]
    /// [ 1/√2 -1/√2 ]
    /// ```
    #[must_use]
    pub fn hadamard(self) -> Self {
        let alpha = (self.0.clone() + self.1.clone()) * T::FRAC_1_SQRT_2();
        let beta = (self.0 - self.1) * T::FRAC_1_SQRT_2();

        // SAFETY: the Hadamard matrix is unitary, so applying it to a
        // normalised amplitude pair yields a normalised amplitude pair.
        unsafe { Self::new_unchecked(alpha, beta) }
    }
}

impl<T: Display + Num + Clone + PartialOrd> Display for Qubit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2})|0⟩ + ({:.2})|1⟩", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn pauli_x_swaps_basis_states() {
        let (alpha, beta) = Qubit::<f64>::KET_0.pauli_x().into_alpha_beta();
        assert_abs_diff_eq!(alpha.re, 0.0);
        assert_abs_diff_eq!(beta.re, 1.0);
    }

    #[test]
    fn pauli_z_negates_ket_one() {
        let (_, beta) = Qubit::<f64>::KET_1.pauli_z().into_alpha_beta();
        assert_abs_diff_eq!(beta.re, -1.0);
    }

    #[test]
    fn pauli_y_is_bit_and_phase_flip() {
        // Y|0> = i|1>
        let (alpha, beta) = Qubit::<f64>::KET_0.pauli_y().into_alpha_beta();
        assert_abs_diff_eq!(alpha.norm_sqr(), 0.0);
        assert_abs_diff_eq!(beta.im, 1.0);
    }

    #[test]
    fn hadamard_builds_equal_superposition() {
        let (alpha, beta) = Qubit::<f64>::KET_0.hadamard().into_alpha_beta();
        assert_abs_diff_eq!(alpha.re, FRAC_1_SQRT_2);
        assert_abs_diff_eq!(beta.re, FRAC_1_SQRT_2);
    }

    #[test]
    fn new_rejects_unnormalised_amplitudes() {
        assert!(Qubit::new(Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)).is_none());
    }
}
