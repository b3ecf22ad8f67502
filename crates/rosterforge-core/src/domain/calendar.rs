//! Half-day periods, need categories and closing tiers.

use std::fmt;

/// Half-day period of a requirement.
///
/// `FullDay` spans both half-days of its date and overlaps either of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Period {
    Morning,
    Afternoon,
    FullDay,
}

impl Period {
    /// The two half-days, in chronological order.
    pub const HALVES: [Period; 2] = [Period::Morning, Period::Afternoon];

    /// Numeric id used by external data: 1 = morning, 2 = afternoon, 0 = full day.
    pub fn id(self) -> u8 {
        match self {
            Period::Morning => 1,
            Period::Afternoon => 2,
            Period::FullDay => 0,
        }
    }

    pub fn from_id(id: u8) -> Option<Period> {
        match id {
            1 => Some(Period::Morning),
            2 => Some(Period::Afternoon),
            0 => Some(Period::FullDay),
            _ => None,
        }
    }

    /// Returns true if both periods occupy at least one common half-day.
    #[inline]
    pub fn overlaps(self, other: Period) -> bool {
        self == other || self == Period::FullDay || other == Period::FullDay
    }

    /// Returns true if this period occupies the given half-day.
    #[inline]
    pub fn covers(self, half: Period) -> bool {
        self == half || self == Period::FullDay
    }

    /// Half-days occupied by this period.
    pub fn halves(self) -> &'static [Period] {
        match self {
            Period::Morning => &Self::HALVES[..1],
            Period::Afternoon => &Self::HALVES[1..],
            Period::FullDay => &Self::HALVES,
        }
    }

    /// Sort rank used by construction ordering: morning before afternoon.
    pub fn rank(self) -> u8 {
        match self {
            Period::FullDay => 0,
            Period::Morning => 1,
            Period::Afternoon => 2,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Morning => "AM",
            Period::Afternoon => "PM",
            Period::FullDay => "DAY",
        })
    }
}

/// Category of a coverage requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeedType {
    Consultation,
    Surgical,
    Admin,
    Rest,
}

impl NeedType {
    /// Administrative and rest requirements are fallbacks, not clinical work.
    #[inline]
    pub fn is_fallback(self) -> bool {
        matches!(self, NeedType::Admin | NeedType::Rest)
    }
}

/// Rank of a closing responsibility; `First` is the heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClosingTier {
    First,
    Second,
    Third,
}

impl ClosingTier {
    pub const ALL: [ClosingTier; 3] = [ClosingTier::First, ClosingTier::Second, ClosingTier::Third];

    /// Short label used in rosters ("1R", "2F", "3F").
    pub fn label(self) -> &'static str {
        match self {
            ClosingTier::First => "1R",
            ClosingTier::Second => "2F",
            ClosingTier::Third => "3F",
        }
    }

    /// Workload points charged to the holder of this tier.
    pub fn load(self) -> i64 {
        match self {
            ClosingTier::First => 10,
            ClosingTier::Second => 13,
            ClosingTier::Third => 0,
        }
    }
}

impl fmt::Display for ClosingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
