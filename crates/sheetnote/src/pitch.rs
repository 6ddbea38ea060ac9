//! Pitch value types and the vertical-position → pitch mapping.
//!
//! A staff position counts half-spacing steps downward from the top staff
//! line: lines and spaces alternate at that granularity, so position 0 is
//! the top line, 1 the space below it, 2 the second line, and so on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::staff::StaffInfo;

/// Natural note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    /// All letters in ascending order within an octave.
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
        NoteLetter::A,
        NoteLetter::B,
    ];

    /// Semitones above C within the same octave.
    pub fn semitone_offset(self) -> u8 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for NoteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    /// Display symbol used in labels.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Sharp => "#",
            Self::Flat => "♭",
            Self::Natural => "♮",
        }
    }
}

/// A spelled pitch: letter, octave and optional accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub letter: NoteLetter,
    pub octave: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,
}

impl Pitch {
    pub const fn natural(letter: NoteLetter, octave: i64) -> Self {
        Self {
            letter,
            octave,
            accidental: None,
        }
    }

    /// Compact label for overlays: the octave is only shown outside the
    /// common range (octave <= 2 or >= 6).
    pub fn short_label(&self) -> String {
        let mut label = String::from(self.letter.as_str());
        if let Some(acc) = self.accidental {
            label.push_str(acc.symbol());
        }
        if self.octave <= 2 || self.octave >= 6 {
            label.push_str(&self.octave.to_string());
        }
        label
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter.as_str())?;
        if let Some(acc) = self.accidental {
            f.write_str(acc.symbol())?;
        }
        write!(f, "{}", self.octave)
    }
}

/// Clef selecting the pitch-to-line mapping of a staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clef {
    #[default]
    Treble,
    Bass,
}

/// Letter and octave at positions 0..=6, descending from the top line.
const TREBLE_TABLE: [(NoteLetter, i64); 7] = [
    (NoteLetter::F, 5),
    (NoteLetter::E, 5),
    (NoteLetter::D, 5),
    (NoteLetter::C, 5),
    (NoteLetter::B, 4),
    (NoteLetter::A, 4),
    (NoteLetter::G, 4),
];

const BASS_TABLE: [(NoteLetter, i64); 7] = [
    (NoteLetter::A, 3),
    (NoteLetter::G, 3),
    (NoteLetter::F, 3),
    (NoteLetter::E, 3),
    (NoteLetter::D, 3),
    (NoteLetter::C, 3),
    (NoteLetter::B, 2),
];

impl Clef {
    /// Pitch the clef symbol fixes: G4 on the second line from the bottom
    /// for treble, F3 on the fourth line for bass.
    pub fn reference_pitch(self) -> Pitch {
        match self {
            Self::Treble => Pitch::natural(NoteLetter::G, 4),
            Self::Bass => Pitch::natural(NoteLetter::F, 3),
        }
    }

    /// Descending pitch cycle starting at the top staff line.
    fn position_table(self) -> &'static [(NoteLetter, i64); 7] {
        match self {
            Self::Treble => &TREBLE_TABLE,
            Self::Bass => &BASS_TABLE,
        }
    }

    /// Pitch at a staff position (0 = top line, increasing downward).
    ///
    /// Uses truncating remainder/division: positions above the staff reuse
    /// `|position| % 7` as the table index and only step the octave once
    /// `position <= -7`. Octave arithmetic is done in `i64`, so no finite
    /// position wraps.
    pub fn pitch_at_position(self, position: i64) -> Pitch {
        let index = (position % 7).unsigned_abs() as usize;
        let (letter, octave) = self.position_table()[index];
        Pitch::natural(letter, octave - position / 7)
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treble => f.write_str("treble"),
            Self::Bass => f.write_str("bass"),
        }
    }
}

/// Quantize `y` to a staff position (half-spacing steps from the top line,
/// rounded half away from zero).
///
/// Positions beyond the `i64` range saturate at `i64::MIN`/`i64::MAX`; a NaN
/// `y` maps to the top line.
pub fn staff_position(y: f64, staff: &StaffInfo) -> i64 {
    let relative_y = y - staff.top_y();
    let line_space_position = relative_y / (staff.spacing() / 2.0);
    // float-to-int `as` saturates
    line_space_position.round() as i64
}

/// Map a vertical image coordinate to a pitch on `staff`.
pub fn map_pitch(y: f64, staff: &StaffInfo) -> Pitch {
    staff.clef().pitch_at_position(staff_position(y, staff))
}
