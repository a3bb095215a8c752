use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

/// Number of physical qubits carrying the encoded logical qubit.
pub const CODE_QUBITS: usize = 9;

/// Number of qubits per bit-flip group.
pub const GROUP_SIZE: usize = 3;

/// Number of bit-flip groups.
pub const GROUP_COUNT: usize = CODE_QUBITS / GROUP_SIZE;

/// A single-qubit Pauli operator.
///
/// `I` is the identity ("nothing happened to this qubit"), `X` a bit flip,
/// `Z` a phase flip, and `Y` the combined bit-and-phase flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// The canonical one-character form used in fault labels.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Parses the canonical one-character form.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Whether this operator flips the computational-basis value.
    #[must_use]
    pub const fn flips_bit(self) -> bool {
        matches!(self, Self::X | Self::Y)
    }

    /// Whether this operator flips the relative phase.
    #[must_use]
    pub const fn flips_phase(self) -> bool {
        matches!(self, Self::Z | Self::Y)
    }
}

impl Display for Pauli {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Failure to parse a fault label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// The label did not have one character per code qubit.
    #[error("fault label must have exactly {CODE_QUBITS} characters, got {found}")]
    Length { found: usize },

    /// A character outside the {I, X, Y, Z} alphabet.
    #[error("invalid Pauli symbol {character:?} at position {position}")]
    Symbol { character: char, position: usize },
}

/// The ground truth of an injected fault: one Pauli per code qubit.
///
/// Position `q` in the label is qubit `q`; qubits are grouped in threes
/// (`q / 3` is the group, `q % 3` the position within it). A label is
/// produced once per injection (or parsed explicitly for tests) and never
/// mutated afterwards.
///
/// # Examples
///
/// ```
/// use shor_code::model::pauli::{ErrorLabel, Pauli};
///
/// let label: ErrorLabel = "XIIIIIIII".parse().unwrap();
/// assert_eq!(label.get(0), Pauli::X);
/// assert_eq!(label.to_string(), "XIIIIIIII");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorLabel([Pauli; CODE_QUBITS]);

impl ErrorLabel {
    /// The all-identity label: a valid "no fault" trial.
    #[must_use]
    pub const fn identity() -> Self {
        Self([Pauli::I; CODE_QUBITS])
    }

    /// The operator recorded for `qubit`.
    ///
    /// # Panics
    ///
    /// Panics if `qubit` is not in `[0, 9)`.
    #[must_use]
    pub fn get(&self, qubit: usize) -> Pauli {
        self.0[qubit]
    }

    /// Records `pauli` at `qubit`. Only the injector writes labels.
    ///
    /// # Panics
    ///
    /// Panics if `qubit` is not in `[0, 9)`.
    pub fn set(&mut self, qubit: usize, pauli: Pauli) {
        self.0[qubit] = pauli;
    }

    /// Iterates `(qubit, operator)` pairs in qubit order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Pauli)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// The bit-flip group containing `qubit`.
    #[must_use]
    pub const fn group_of(qubit: usize) -> usize {
        qubit / GROUP_SIZE
    }

    /// The position of `qubit` within its group.
    #[must_use]
    pub const fn position_of(qubit: usize) -> usize {
        qubit % GROUP_SIZE
    }

    /// Number of non-identity entries.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|p| !matches!(p, Pauli::I)).count()
    }
}

impl Default for ErrorLabel {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for ErrorLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for pauli in self.0 {
            write!(f, "{pauli}")?;
        }
        Ok(())
    }
}

impl FromStr for ErrorLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != CODE_QUBITS {
            return Err(LabelError::Length { found });
        }
        let mut label = Self::identity();
        for (position, character) in s.chars().enumerate() {
            let pauli = Pauli::from_char(character)
                .ok_or(LabelError::Symbol { character, position })?;
            label.set(position, pauli);
        }
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("IIIIIIIII", 0)]
    #[case("XIIIIIIII", 1)]
    #[case("IYIIIZIII", 2)]
    fn parse_display_round_trip(#[case] text: &str, #[case] weight: usize) {
        let label: ErrorLabel = text.parse().unwrap();
        assert_eq!(label.to_string(), text);
        assert_eq!(label.weight(), weight);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            "XII".parse::<ErrorLabel>(),
            Err(LabelError::Length { found: 3 })
        );
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert_eq!(
            "IIIIQIIII".parse::<ErrorLabel>(),
            Err(LabelError::Symbol {
                character: 'Q',
                position: 4
            })
        );
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(4, 1, 1)]
    #[case(8, 2, 2)]
    fn group_arithmetic(#[case] qubit: usize, #[case] group: usize, #[case] position: usize) {
        assert_eq!(ErrorLabel::group_of(qubit), group);
        assert_eq!(ErrorLabel::position_of(qubit), position);
    }

    #[test]
    fn pauli_char_round_trip() {
        for pauli in [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z] {
            assert_eq!(Pauli::from_char(pauli.as_char()), Some(pauli));
        }
        assert_eq!(Pauli::from_char('q'), None);
    }
}
