//! HardMediumSoftScore - Three-level score with hard, medium, and soft levels

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use super::traits::{Score, ScoreParseError};
use super::ScoreLevel;

/// A score with hard, medium, and soft levels.
///
/// Hard levels carry feasibility rules, medium levels carry coverage and soft
/// levels carry preferences. Comparison order: hard > medium > soft.
///
/// # Examples
///
/// ```
/// use rosterforge_core::HardMediumSoftScore;
///
/// let uncovered = HardMediumSoftScore::of(0, -10_000, 80_000);
/// let covered = HardMediumSoftScore::of(0, 0, -5_000);
///
/// // Better medium score wins even with worse soft score
/// assert!(covered > uncovered);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardMediumSoftScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    /// The zero score.
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore::of(0, 0, 0);

    /// One hard point.
    pub const ONE_HARD: HardMediumSoftScore = HardMediumSoftScore::of(1, 0, 0);

    /// One medium point.
    pub const ONE_MEDIUM: HardMediumSoftScore = HardMediumSoftScore::of(0, 1, 0);

    /// One soft point.
    pub const ONE_SOFT: HardMediumSoftScore = HardMediumSoftScore::of(0, 0, 1);

    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore { hard, medium, soft }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        Self::of(hard, 0, 0)
    }

    #[inline]
    pub const fn of_medium(medium: i64) -> Self {
        Self::of(0, medium, 0)
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        Self::of(0, 0, soft)
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardMediumSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardMediumSoftScore::ZERO
    }

    #[inline]
    fn levels_count() -> usize {
        3
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.medium, self.soft]
    }

    fn of_level(level: ScoreLevel, value: i64) -> Self {
        match level {
            ScoreLevel::Hard => Self::of_hard(value),
            ScoreLevel::Medium => Self::of_medium(value),
            ScoreLevel::Soft => Self::of_soft(value),
        }
    }

    #[inline]
    fn scaled(&self, factor: i64) -> Self {
        Self::of(self.hard * factor, self.medium * factor, self.soft * factor)
    }

    fn level_label(index: usize) -> ScoreLevel {
        match index {
            0 => ScoreLevel::Hard,
            1 => ScoreLevel::Medium,
            2 => ScoreLevel::Soft,
            _ => panic!("HardMediumSoftScore has 3 levels, got index {}", index),
        }
    }
}

impl Ord for HardMediumSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then(self.medium.cmp(&other.medium))
            .then(self.soft.cmp(&other.soft))
    }
}

impl PartialOrd for HardMediumSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardMediumSoftScore {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::of(
            self.hard + other.hard,
            self.medium + other.medium,
            self.soft + other.soft,
        )
    }
}

impl Sub for HardMediumSoftScore {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::of(
            self.hard - other.hard,
            self.medium - other.medium,
            self.soft - other.soft,
        )
    }
}

impl Neg for HardMediumSoftScore {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::of(-self.hard, -self.medium, -self.soft)
    }
}

impl fmt::Debug for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardMediumSoftScore({}, {}, {})",
            self.hard, self.medium, self.soft
        )
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}

/// Parses `"0hard/-5medium/10soft"`. Any subset of levels may be given in
/// any order (`"10000hard"`, `"-20soft/3medium"`); missing levels are zero.
impl FromStr for HardMediumSoftScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScoreParseError::new("empty score"));
        }

        let mut score = HardMediumSoftScore::ZERO;
        let mut seen = [false; 3];
        for part in trimmed.split('/') {
            let part = part.trim();
            let (number, level) = if let Some(n) = part.strip_suffix("hard") {
                (n, ScoreLevel::Hard)
            } else if let Some(n) = part.strip_suffix("medium") {
                (n, ScoreLevel::Medium)
            } else if let Some(n) = part.strip_suffix("soft") {
                (n, ScoreLevel::Soft)
            } else {
                return Err(ScoreParseError::new(format!(
                    "'{}' has no hard/medium/soft suffix",
                    part
                )));
            };

            let slot = level as usize;
            if seen[slot] {
                return Err(ScoreParseError::new(format!(
                    "level {:?} given twice in '{}'",
                    level, s
                )));
            }
            seen[slot] = true;

            let value: i64 = number
                .trim()
                .parse()
                .map_err(|_| ScoreParseError::new(format!("invalid number in '{}'", part)))?;
            score = score + Self::of_level(level, value);
        }
        Ok(score)
    }
}
