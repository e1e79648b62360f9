//! Per-voice detection of missing phoneme tiers.
//!
//! A voice bank may lack whole groups of source phonemes. Each group (tier)
//! is probed lazily on every resolution and, once found missing, stays
//! flagged until [`Session::reset`]. Flags are owned by the session, so two
//! voices resolved side by side never share detection results.

use crate::oracle::AliasOracle;
use crate::syllable::Tone;
use crate::tables::{MISSING_CONSONANTS, MISSING_VOWELS, TIMIT_SYMBOLS};
use tracing::debug;

/// Which substitution tiers are active for the current voice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingTiers {
    /// Extended vowels are missing
    pub vowels: bool,
    /// Custom consonants are missing
    pub consonants: bool,
    /// TIMIT closure symbols are missing
    pub timit: bool,
}

impl MissingTiers {
    /// No tier flagged
    pub const NONE: Self = Self {
        vowels: false,
        consonants: false,
        timit: false,
    };

    /// Every tier flagged
    pub const ALL: Self = Self {
        vowels: true,
        consonants: true,
        timit: true,
    };

    /// Check whether any tier is flagged
    #[must_use]
    pub const fn any(self) -> bool {
        self.vowels || self.consonants || self.timit
    }
}

/// Sticky detection state for one voice
#[derive(Debug, Clone, Default)]
pub struct Session {
    tiers: MissingTiers,
}

impl Session {
    /// Fresh session with no tier flagged
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flags
    #[must_use]
    pub const fn tiers(&self) -> MissingTiers {
        self.tiers
    }

    /// Probe every tier not yet flagged and return the updated flags.
    /// Flags only ever go from clear to set.
    pub fn detect<O: AliasOracle + ?Sized>(&mut self, oracle: &O, tone: Tone) -> MissingTiers {
        if !self.tiers.vowels
            && MISSING_VOWELS
                .iter()
                .any(|(key, _)| !oracle.exists(key, tone))
        {
            debug!("Voice lacks extended vowels, enabling vowel substitutions");
            self.tiers.vowels = true;
        }

        if !self.tiers.consonants && Self::tier_missing(oracle, MISSING_CONSONANTS, tone) {
            debug!("Voice lacks custom consonants, enabling consonant substitutions");
            self.tiers.consonants = true;
        }

        if !self.tiers.timit && Self::tier_missing(oracle, TIMIT_SYMBOLS, tone) {
            debug!("Voice lacks TIMIT symbols, enabling TIMIT substitutions");
            self.tiers.timit = true;
        }

        self.tiers
    }

    fn tier_missing<O: AliasOracle + ?Sized>(
        oracle: &O,
        table: &[(&str, &str)],
        tone: Tone,
    ) -> bool {
        table
            .iter()
            .any(|(key, value)| !oracle.exists(key, tone) && !oracle.exists(value, tone))
    }

    /// Clear every flag, for reuse with another voice
    pub fn reset(&mut self) {
        self.tiers = MissingTiers::NONE;
    }
}
