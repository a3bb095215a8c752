use std::{
    fmt::{Debug, Display, Formatter},
    ops::AddAssign,
    slice::Iter,
    vec::IntoIter,
};

use num_complex::Complex;
use num_traits::{ConstOne, ConstZero, Float, FloatConst, Num, Signed, Zero};
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use crate::model::qubit::Qubit;

/// Represents the quantum state of a system.
///
/// A `Register` holds a vector of complex amplitudes, where each amplitude
/// corresponds to a basis state of the quantum system. Wire `w` of the
/// register is bit `w` of the basis-state index (the least significant bit
/// is wire 0). The vector of amplitudes is normalised, meaning the sum of
/// the squared magnitudes of the amplitudes must equal one.
///
/// The type parameter `T` represents the underlying floating-point type for
/// the complex numbers, such as `f32` or `f64`.
///
/// # Invariants
///
/// The sum of the squared magnitudes of all amplitudes must be approximately
/// 1. Specifically, `(sum(x.norm_sqr()) - 1.0).abs() < T::epsilon()`.
pub struct Register<T>(Box<[Complex<T>]>);

impl<T> Register<T> {
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of wires in the register (`log2` of the amplitude count).
    #[inline]
    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.0.len().ilog2() as usize
    }

    #[inline]
    pub fn iter(&'_ self) -> Iter<'_, Complex<T>> {
        self.0.iter()
    }

    /// The raw amplitude vector, indexed by computational basis state.
    #[inline]
    #[must_use]
    pub fn amplitudes(&self) -> &[Complex<T>] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> IntoIterator for Register<T> {
    type Item = Complex<T>;

    type IntoIter = IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Register<T> {
    type Item = &'a Complex<T>;
    type IntoIter = std::slice::Iter<'a, Complex<T>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + Signed + Float + AddAssign + Debug> Register<T> {
    /// Creates a new `Register` from an iterator of complex amplitudes,
    /// returning `None` if the amplitudes are not normalised.
    ///
    /// # Examples
    ///
    /// ```
    /// use num_complex::Complex;
    /// use shor_code::model::register::Register;
    ///
    /// // A valid quantum state
    /// let amplitudes = vec![
    ///     Complex::new(1.0 / 2.0_f64.sqrt(), 0.0),
    ///     Complex::new(1.0 / 2.0_f64.sqrt(), 0.0),
    /// ];
    /// let register = Register::new(amplitudes).unwrap();
    ///
    /// // An invalid quantum state
    /// let amplitudes = vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)];
    /// assert!(Register::new(amplitudes).is_none());
    /// ```
    pub fn new(amplitudes: impl IntoIterator<Item = Complex<T>>) -> Option<Self> {
        // 2ϵ is more appropriately forgiving than ϵ
        let epsilon = T::epsilon() + T::epsilon();
        let mut total_prob = T::zero();
        let res = amplitudes
            .into_iter()
            .inspect(|x| total_prob += x.norm_sqr())
            .collect();
        ((total_prob - T::one()).abs() < epsilon).then_some(Self(res))
    }
}

impl<T: Float> Register<T> {
    /// Constructs a `Register` representing a single basis state.
    ///
    /// The function creates a quantum state with an amplitude of magnitude 1
    /// at a specified `index`, and an amplitude of 0 for all other indices.
    /// The phase of the complex amplitude at the given index can be set
    /// using the `angle` parameter.
    ///
    /// # Panics
    ///
    /// Panics if the `index` is out of bounds for the specified number of
    /// qubits.
    pub fn from_basis_state(num_qubits: u8, index: usize, angle: T) -> Self {
        let size = 1_usize << num_qubits;
        assert!(index < size, "Basis state index is out of bounds");

        let mut amplitudes = vec![Complex::zero(); size];
        amplitudes[index] = Complex::from_polar(T::one(), angle);

        // SAFETY: only a single amplitude is non-zero and has a magnitude of
        // 1, so the sum of squared magnitudes is exactly 1.
        unsafe { Self::new_unchecked(amplitudes) }
    }
}

impl<T: Clone + Num + ConstZero> Register<T> {
    /// Embeds a single qubit at wire 0 of a `num_qubits`-wire register, with
    /// every other wire in `|0⟩`.
    ///
    /// This is how the logical input enters the code circuit: the encoder
    /// expects the state `|0…0⟩ ⊗ |ψ⟩` with `|ψ⟩` on the first data wire.
    ///
    /// # Panics
    ///
    /// Panics if `num_qubits` is 0.
    #[must_use]
    pub fn from_qubit(qubit: Qubit<T>, num_qubits: u8) -> Self {
        assert!(num_qubits > 0, "Register must have at least one qubit");
        let size = 1_usize << num_qubits;

        let mut amplitudes = vec![Complex::ZERO; size];
        let (alpha, beta) = qubit.into_alpha_beta();
        amplitudes[0] = alpha;
        amplitudes[1] = beta;

        // SAFETY: the qubit's amplitudes satisfy |α|² + |β|² = 1 and every
        // other amplitude is zero, so the register invariant holds.
        unsafe { Self::new_unchecked(amplitudes) }
    }
}

impl<T> Register<T> {
    /// Creates a new `Register` from an iterator of complex amplitudes
    /// without checking the normalization condition.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it assumes that the sum of the
    /// squared magnitudes of the provided `amplitudes` is approximately 1.
    /// If this condition is not met, it can lead to an invalid quantum
    /// state, violating the fundamental laws of quantum mechanics and
    /// potentially causing unpredictable behavior in subsequent operations.
    pub unsafe fn new_unchecked(amplitudes: impl IntoIterator<Item = Complex<T>>) -> Self {
        Self(amplitudes.into_iter().collect())
    }
}

impl<T: Clone + Num> Register<T> {
    /// Applies a **Pauli-X gate** (bit flip) to one wire.
    ///
    /// # Panics
    ///
    /// Panics if `target` is out of range.
    pub fn x(&mut self, target: usize) {
        let n = self.num_qubits();
        assert!(target < n, "Qubit index out of range");

        let mask = 1 << target;
        for i in 0..self.len() {
            let j = i ^ mask;
            if j > i {
                self.0.swap(i, j);
            }
        }
    }
}

impl<T: Signed + ConstOne + ConstZero + Clone> Register<T> {
    /// Applies a **Pauli-Y gate** to one wire.
    ///
    /// For each pair of basis states differing only in the target bit, the
    /// amplitudes `a` (target = 0) and `b` (target = 1) are updated as
    /// `a → -i·b`, `b → i·a`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is out of range.
    pub fn y(&mut self, target: usize) {
        let n = self.num_qubits();
        assert!(target < n, "Qubit index out of range");

        let mask = 1 << target;
        for i in 0..self.len() {
            if i & mask == 0 {
                let j = i | mask;

                let amp_i = self.0[i].clone();
                let amp_j = self.0[j].clone();

                self.0[i] = Complex::<T>::I * -amp_j;
                self.0[j] = Complex::<T>::I * amp_i;
            }
        }
    }
}

impl<T: Clone + Signed> Register<T> {
    /// Applies a **Pauli-Z gate** (phase flip) to one wire: every basis
    /// state with the target bit set has its amplitude negated.
    ///
    /// # Panics
    ///
    /// Panics if `target` is out of range.
    pub fn z(&mut self, target: usize) {
        let n = self.num_qubits();
        assert!(target < n, "Qubit index out of range");

        let mask = 1 << target;
        for i in 0..self.len() {
            if i & mask != 0 {
                self.0[i] = -self.0[i].clone();
            }
        }
    }
}

impl<T: Clone + Num + FloatConst> Register<T> {
    /// Applies a **Hadamard gate** to one wire.
    ///
    /// For each pair of basis states differing only in the target bit, the
    /// amplitudes `a` (target = 0) and `b` (target = 1) are updated as
    /// `a → (a + b)/√2`, `b → (a − b)/√2`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is out of range.
    pub fn h(&mut self, target: usize) {
        let n = self.num_qubits();
        assert!(target < n, "Qubit index out of range");

        let mask = 1 << target;
        for i in 0..self.len() {
            if i & mask == 0 {
                let j = i | mask;

                let amp_i = self.0[i].clone();
                let amp_j = self.0[j].clone();

                self.0[i] = (amp_i.clone() + amp_j.clone()) * T::FRAC_1_SQRT_2();
                self.0[j] = (amp_i - amp_j) * T::FRAC_1_SQRT_2();
            }
        }
    }
}

impl<T: Clone + Num> Register<T> {
    /// Applies a **CNOT gate** (controlled-NOT) to the register.
    ///
    /// - `control`: The index of the control qubit (0 = least significant bit).
    /// - `target`: The index of the target qubit (must be different from control).
    ///
    /// # Panics
    ///
    /// Panics if `control == target` or if either index is out of range.
    pub fn cnot(&mut self, control: usize, target: usize) {
        assert!(control != target, "Control and target must be different");
        let n = self.num_qubits();
        assert!(control < n && target < n, "Qubit index out of range");

        let mask_control = 1 << control;
        let mask_target = 1 << target;

        for i in 0..self.len() {
            if i & mask_control != 0 {
                let j = i ^ mask_target; // Flip target bit
                if j > i {
                    self.0.swap(i, j);
                }
            }
        }
    }
}

impl<T: Clone + Signed> Register<T> {
    /// Applies a **CZ gate** (controlled-Z) to the register.
    ///
    /// This is equivalent to flipping the sign of the amplitude for any
    /// basis state where both the control and target qubits are 1.
    ///
    /// # Panics
    ///
    /// Panics if `control == target` or if either index is out of range.
    pub fn cz(&mut self, control: usize, target: usize) {
        assert!(control != target, "Control and target must be different");
        let n = self.num_qubits();
        assert!(control < n && target < n, "Qubit index out of range");

        let combined_mask = (1 << control) | (1 << target);

        for i in 0..self.len() {
            // Check if both the control and target bits are set in the state index 'i'.
            if (i & combined_mask) == combined_mask {
                self.0[i] = -self.0[i].clone();
            }
        }
    }
}

impl<T: Clone + Num> Register<T> {
    /// Applies a **CCNOT gate** (Toffoli gate) to the register.
    ///
    /// The CCNOT gate applies a NOT gate to the target qubit if and only if
    /// both control qubits are in the |1⟩ state.
    ///
    /// # Panics
    ///
    /// Panics if any of the qubit indices are the same, or if any index is
    /// out of range.
    pub fn ccnot(&mut self, control1: usize, control2: usize, target: usize) {
        assert!(
            control1 != control2 && control1 != target && control2 != target,
            "Control and target qubits must be unique"
        );
        let n = self.num_qubits();
        assert!(
            control1 < n && control2 < n && target < n,
            "Qubit index out of range"
        );

        let control_mask = (1 << control1) | (1 << control2);
        let target_mask = 1 << target;

        for i in 0..self.len() {
            if (i & control_mask) == control_mask {
                let j = i ^ target_mask;

                // To avoid swapping each pair twice, we only perform the swap
                // for the smaller index of the pair.
                if j > i {
                    self.0.swap(i, j);
                }
            }
        }
    }

    /// Applies a **CCNOT with one inverted controller**: the target is
    /// flipped when `control_on` reads 1 *and* `control_off` reads 0.
    ///
    /// The syndrome-conditioned recovery stage is built from these, since
    /// two ancilla bits select one of three positions and the mixed
    /// patterns `10` and `01` each need one inverted control.
    ///
    /// # Panics
    ///
    /// Panics if any of the qubit indices are the same, or if any index is
    /// out of range.
    pub fn ccnot_inverted(&mut self, control_on: usize, control_off: usize, target: usize) {
        assert!(
            control_on != control_off && control_on != target && control_off != target,
            "Control and target qubits must be unique"
        );
        let n = self.num_qubits();
        assert!(
            control_on < n && control_off < n && target < n,
            "Qubit index out of range"
        );

        let on_mask = 1 << control_on;
        let off_mask = 1 << control_off;
        let target_mask = 1 << target;

        for i in 0..self.len() {
            if (i & on_mask) != 0 && (i & off_mask) == 0 {
                let j = i ^ target_mask;
                if j > i {
                    self.0.swap(i, j);
                }
            }
        }
    }
}

impl<T: Clone + Signed> Register<T> {
    /// Applies a **CCZ gate** (doubly-controlled Z): the amplitude is
    /// negated when both controls and the target are 1.
    ///
    /// # Panics
    ///
    /// Panics if any of the qubit indices are the same, or if any index is
    /// out of range.
    pub fn ccz(&mut self, control1: usize, control2: usize, target: usize) {
        assert!(
            control1 != control2 && control1 != target && control2 != target,
            "Control and target qubits must be unique"
        );
        let n = self.num_qubits();
        assert!(
            control1 < n && control2 < n && target < n,
            "Qubit index out of range"
        );

        let full_mask = (1 << control1) | (1 << control2) | (1 << target);

        for i in 0..self.len() {
            if (i & full_mask) == full_mask {
                self.0[i] = -self.0[i].clone();
            }
        }
    }

    /// Applies a **CCZ with one inverted controller**: the amplitude is
    /// negated when `control_on` reads 1, `control_off` reads 0, and the
    /// target is 1.
    ///
    /// # Panics
    ///
    /// Panics if any of the qubit indices are the same, or if any index is
    /// out of range.
    pub fn ccz_inverted(&mut self, control_on: usize, control_off: usize, target: usize) {
        assert!(
            control_on != control_off && control_on != target && control_off != target,
            "Control and target qubits must be unique"
        );
        let n = self.num_qubits();
        assert!(
            control_on < n && control_off < n && target < n,
            "Qubit index out of range"
        );

        let on_mask = 1 << control_on;
        let off_mask = 1 << control_off;
        let target_mask = 1 << target;

        for i in 0..self.len() {
            if (i & on_mask) != 0 && (i & off_mask) == 0 && (i & target_mask) != 0 {
                self.0[i] = -self.0[i].clone();
            }
        }
    }
}

impl<T: Clone + Num + PartialOrd + Zero + AddAssign> Register<T>
where
    StandardUniform: Distribution<T>,
{
    /// Measures the entire quantum register, collapsing the state.
    ///
    /// Performs a probabilistic measurement over the supplied random source
    /// and returns the classical state (as a `usize` index) that was
    /// measured. After measurement, the register collapses to the measured
    /// basis state.
    ///
    /// The random source is an explicit argument so that trials can be made
    /// deterministic with a seeded generator.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        // Cumulative distribution over basis-state probabilities.
        let mut cumulative_probs = Vec::with_capacity(self.len());
        let mut sum = T::zero();
        for amplitude in self.0.iter() {
            sum += amplitude.norm_sqr();
            cumulative_probs.push(sum.clone());
        }

        let random_number = rng.random::<T>();

        let mut measured_index = 0;
        for (i, prob) in cumulative_probs.iter().enumerate() {
            if random_number <= *prob {
                measured_index = i;
                break;
            }
        }

        // Collapse the state to the measured index.
        let zero = Complex::zero();
        let one = Complex::new(T::one(), T::zero());
        for (i, amplitude) in self.0.iter_mut().enumerate() {
            *amplitude = if i == measured_index {
                one.clone()
            } else {
                zero.clone()
            };
        }

        measured_index
    }
}

impl<T: Clone + Signed + Float + Display> Display for Register<T> {
    /// Prints only the basis states with non-negligible amplitude; a
    /// 17-wire register has 131072 entries, nearly all of them zero.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let num_qubits = self.num_qubits();

        let mut first = true;
        for (i, amplitude) in self.0.iter().enumerate() {
            if amplitude.norm_sqr() < T::epsilon() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            let bit_string = format!("{i:0num_qubits$b}");
            write!(f, "({amplitude:.2})|{bit_string}⟩")?;
        }
        if first {
            write!(f, "(0)")?;
        }
        Ok(())
    }
}
