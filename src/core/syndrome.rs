//! Syndrome derivation and comparison.
//!
//! Two routes produce a [`Syndrome`]: prediction from a fault label
//! ([`Syndrome::expected`]) and extraction from the final state's
//! bit-string ([`Syndrome::observed`]). A trial is judged by comparing the
//! two channel by channel.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::model::pauli::{ErrorLabel, GROUP_COUNT, Pauli};

/// One two-bit syndrome outcome.
///
/// `Clean` means nothing was detected on that channel; the other three
/// codes each select one slot: a position within a group on the bit-flip
/// channels, a group on the phase channel. The slot encoding is shared by
/// all four channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyndromeCode {
    Clean,
    First,
    Second,
    Third,
}

impl SyndromeCode {
    /// The two-character outcome as the ancilla pair reads it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "00",
            Self::First => "10",
            Self::Second => "11",
            Self::Third => "01",
        }
    }

    /// The code that flags slot 0, 1, or 2.
    ///
    /// Slots are adjacent-parity readings: slot 0 trips only the first
    /// parity, slot 1 trips both, slot 2 only the second.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not in `[0, 3)`.
    #[must_use]
    pub const fn for_slot(slot: usize) -> Self {
        match slot {
            0 => Self::First,
            1 => Self::Second,
            2 => Self::Third,
            _ => panic!("Syndrome slot out of range"),
        }
    }

    const fn from_bits(first: bool, second: bool) -> Self {
        match (first, second) {
            (false, false) => Self::Clean,
            (true, false) => Self::First,
            (true, true) => Self::Second,
            (false, true) => Self::Third,
        }
    }
}

impl Display for SyndromeCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Character offsets of the four two-character ancilla windows within a
/// state bit-string.
///
/// The defaults match the standard 17-wire register of
/// [`shor`](crate::core::shor); a different data/ancilla interleaving only
/// needs a different layout value, not a different decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncillaLayout {
    pub bit_flip: [usize; GROUP_COUNT],
    pub phase_flip: usize,
}

impl Default for AncillaLayout {
    fn default() -> Self {
        Self {
            bit_flip: [3, 8, 13],
            phase_flip: 15,
        }
    }
}

/// Failure to read a syndrome out of a state bit-string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A configured window does not fit in the bit-string.
    #[error("syndrome window at offset {offset} does not fit in a {length}-character bit-string")]
    Window { offset: usize, length: usize },

    /// The bit-string held something other than 0 or 1 inside a window.
    #[error("non-binary character {character:?} at position {position} of the state bit-string")]
    NonBinary { character: char, position: usize },
}

/// The four-channel syndrome of one trial: one bit-flip channel per group,
/// one global phase channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syndrome {
    pub bit_flip: [SyndromeCode; GROUP_COUNT],
    pub phase_flip: SyndromeCode,
}

impl Syndrome {
    /// The syndrome a given fault label must produce.
    ///
    /// An X at group `g`, position `p` flags `bit_flip[g]` with the code
    /// for slot `p`; a Z flags the phase channel with the code for slot
    /// `g`; a Y is both faults at once and flags both channels. Channels
    /// no fault touches stay clean, including all of them for the
    /// all-identity label.
    #[must_use]
    pub fn expected(label: &ErrorLabel) -> Self {
        let mut bit_flip = [SyndromeCode::Clean; GROUP_COUNT];
        let mut phase_flip = SyndromeCode::Clean;

        for (qubit, pauli) in label.iter() {
            let group = ErrorLabel::group_of(qubit);
            let position = ErrorLabel::position_of(qubit);

            match pauli {
                Pauli::I => {}
                Pauli::X => bit_flip[group] = SyndromeCode::for_slot(position),
                Pauli::Z => phase_flip = SyndromeCode::for_slot(group),
                Pauli::Y => {
                    bit_flip[group] = SyndromeCode::for_slot(position);
                    phase_flip = SyndromeCode::for_slot(group);
                }
            }
        }

        Self {
            bit_flip,
            phase_flip,
        }
    }

    /// The syndrome actually present in a state bit-string, read from the
    /// ancilla windows the layout points at.
    ///
    /// The bit-string is expected in wire order (least significant wire
    /// first), as produced by
    /// [`extract_significant_amplitudes`](crate::core::codec::extract_significant_amplitudes).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if a window falls outside the string or
    /// covers a non-binary character.
    pub fn observed(bits: &str, layout: &AncillaLayout) -> Result<Self, DecodeError> {
        let characters: Vec<char> = bits.chars().collect();

        let mut bit_flip = [SyndromeCode::Clean; GROUP_COUNT];
        for (group, &offset) in layout.bit_flip.iter().enumerate() {
            bit_flip[group] = read_window(&characters, offset)?;
        }
        let phase_flip = read_window(&characters, layout.phase_flip)?;

        Ok(Self {
            bit_flip,
            phase_flip,
        })
    }

    /// Whether every channel reads "no error detected".
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.bit_flip
            .iter()
            .chain(std::iter::once(&self.phase_flip))
            .all(|code| matches!(code, SyndromeCode::Clean))
    }
}

fn read_window(characters: &[char], offset: usize) -> Result<SyndromeCode, DecodeError> {
    if offset + 2 > characters.len() {
        return Err(DecodeError::Window {
            offset,
            length: characters.len(),
        });
    }

    let mut bits = [false; 2];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = match characters[offset + i] {
            '0' => false,
            '1' => true,
            character => {
                return Err(DecodeError::NonBinary {
                    character,
                    position: offset + i,
                });
            }
        };
    }
    Ok(SyndromeCode::from_bits(bits[0], bits[1]))
}

/// One channel of a [`SyndromeReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRow {
    pub channel: &'static str,
    pub expected: SyndromeCode,
    pub observed: SyndromeCode,
}

impl ReportRow {
    #[must_use]
    pub fn matches(&self) -> bool {
        self.expected == self.observed
    }
}

/// Channel-by-channel comparison of a predicted and a measured syndrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyndromeReport {
    pub rows: [ReportRow; GROUP_COUNT + 1],
}

impl SyndromeReport {
    const CHANNELS: [&'static str; GROUP_COUNT + 1] = ["X0", "X1", "X2", "Z"];

    #[must_use]
    pub fn compare(expected: &Syndrome, observed: &Syndrome) -> Self {
        let pair = |channel| match channel {
            3 => (expected.phase_flip, observed.phase_flip),
            g => (expected.bit_flip[g], observed.bit_flip[g]),
        };

        let rows = std::array::from_fn(|channel| {
            let (expected, observed) = pair(channel);
            ReportRow {
                channel: Self::CHANNELS[channel],
                expected,
                observed,
            }
        });
        Self { rows }
    }

    /// Whether the measured syndrome agrees with the prediction on every
    /// channel.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.rows.iter().all(ReportRow::matches)
    }
}

impl Display for SyndromeReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "channel  expected  observed  match")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<7}  {:<8}  {:<8}  {}",
                row.channel,
                row.expected.as_str(),
                row.observed.as_str(),
                if row.matches() { "yes" } else { "NO" }
            )?;
        }
        Ok(())
    }
}
