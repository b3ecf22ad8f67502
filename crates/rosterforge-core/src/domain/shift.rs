//! Coverage requirements and the reference facts they point to.

use chrono::NaiveDate;
use uuid::Uuid;

use super::{NeedType, Period};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    pub id: Uuid,
    pub name: String,
}

impl Site {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub site: Uuid,
}

impl Location {
    pub fn new(id: Uuid, name: impl Into<String>, site: Uuid) -> Self {
        Self {
            id,
            name: name.into(),
            site,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

impl Skill {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// End-of-day responsibilities a requirement asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosingFlags {
    pub has_closing: bool,
    pub needs_first: bool,
    pub needs_second: bool,
    pub needs_third: bool,
}

impl ClosingFlags {
    /// Closing with the first and second tiers, the common configuration.
    pub fn standard() -> Self {
        Self {
            has_closing: true,
            needs_first: true,
            needs_second: true,
            needs_third: false,
        }
    }
}

/// A coverage requirement ("shift"): `quantity` units of coverage for one
/// date and period.
///
/// `location`, `site` and `skill` are `None` when the requirement places no
/// restriction on that dimension. Fallback requirements (admin, rest) never
/// restrict skill or site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub id: Uuid,
    pub date: NaiveDate,
    pub period: Period,
    pub need: NeedType,
    pub location: Option<Uuid>,
    pub site: Option<Uuid>,
    pub skill: Option<Uuid>,
    pub quantity: i32,
    pub physicians: Vec<Uuid>,
    pub closing: ClosingFlags,
    /// Index of the only staff member allowed on a 1:1 administrative slot.
    pub designated_staff: Option<usize>,
}

impl Shift {
    pub fn new(id: Uuid, date: NaiveDate, period: Period, need: NeedType) -> Self {
        Self {
            id,
            date,
            period,
            need,
            location: None,
            site: None,
            skill: None,
            quantity: 1,
            physicians: Vec::new(),
            closing: ClosingFlags::default(),
            designated_staff: None,
        }
    }

    pub fn at(mut self, location: Uuid, site: Uuid) -> Self {
        self.location = Some(location);
        self.site = Some(site);
        self
    }

    pub fn with_skill(mut self, skill: Uuid) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_physician(mut self, physician: Uuid) -> Self {
        self.physicians.push(physician);
        self
    }

    pub fn with_closing(mut self, closing: ClosingFlags) -> Self {
        self.closing = closing;
        self
    }

    pub fn designated(mut self, staff: usize) -> Self {
        self.designated_staff = Some(staff);
        self
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.need.is_fallback()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.need == NeedType::Admin
    }

    #[inline]
    pub fn is_rest(&self) -> bool {
        self.need == NeedType::Rest
    }
}
