//! Staff members and their absences.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

use super::Period;

/// A recorded absence. `period == None` means the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Absence {
    pub date: NaiveDate,
    pub period: Option<Period>,
}

impl Absence {
    pub fn new(date: NaiveDate, period: Option<Period>) -> Self {
        Self { date, period }
    }

    /// Returns true if this absence blocks work on `date` during `period`.
    pub fn covers(&self, date: NaiveDate, period: Period) -> bool {
        self.date == date && self.period.map_or(true, |p| p.overlaps(period))
    }
}

/// A staff member (problem fact).
///
/// Preference maps go from id to priority; priority 1 is always the best.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub flexible: bool,
    /// Target work days per week, only meaningful for flexible staff.
    pub days_per_week: Option<u32>,
    pub skill_priorities: HashMap<Uuid, u8>,
    pub site_priorities: HashMap<Uuid, u8>,
    pub physician_priorities: HashMap<Uuid, u8>,
    /// Weekly availability as (weekday, half-day) pairs.
    pub availability: HashSet<(Weekday, Period)>,
    pub absences: Vec<Absence>,
}

impl Staff {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            flexible: false,
            days_per_week: None,
            skill_priorities: HashMap::new(),
            site_priorities: HashMap::new(),
            physician_priorities: HashMap::new(),
            availability: HashSet::new(),
            absences: Vec::new(),
        }
    }

    /// Marks this staff member as flexible with a weekly day target.
    pub fn flexible(mut self, days_per_week: u32) -> Self {
        self.flexible = true;
        self.days_per_week = Some(days_per_week);
        self
    }

    pub fn with_skill(mut self, skill: Uuid, priority: u8) -> Self {
        self.skill_priorities.insert(skill, priority);
        self
    }

    pub fn with_site(mut self, site: Uuid, priority: u8) -> Self {
        self.site_priorities.insert(site, priority);
        self
    }

    pub fn with_physician(mut self, physician: Uuid, priority: u8) -> Self {
        self.physician_priorities.insert(physician, priority);
        self
    }

    /// Adds availability for `period` on `weekday`; full day adds both halves.
    pub fn available(mut self, weekday: Weekday, period: Period) -> Self {
        for half in period.halves() {
            self.availability.insert((weekday, *half));
        }
        self
    }

    /// Adds full-day availability Monday through Friday.
    pub fn available_weekdays(self) -> Self {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .fold(self, |staff, day| staff.available(day, Period::FullDay))
    }

    pub fn with_absence(mut self, date: NaiveDate, period: Option<Period>) -> Self {
        self.absences.push(Absence::new(date, period));
        self
    }

    /// Weekly availability; a full-day request needs both halves.
    pub fn is_available(&self, weekday: Weekday, period: Period) -> bool {
        period
            .halves()
            .iter()
            .all(|half| self.availability.contains(&(weekday, *half)))
    }

    /// Weekly availability on a concrete date, net of recorded absences.
    pub fn is_available_on(&self, date: NaiveDate, period: Period) -> bool {
        self.is_available(date.weekday(), period)
            && !self.absences.iter().any(|a| a.covers(date, period))
    }

    #[inline]
    pub fn has_skill(&self, skill: &Uuid) -> bool {
        self.skill_priorities.contains_key(skill)
    }

    #[inline]
    pub fn can_work_at_site(&self, site: &Uuid) -> bool {
        self.site_priorities.contains_key(site)
    }

    pub fn skill_priority(&self, skill: &Uuid) -> Option<u8> {
        self.skill_priorities.get(skill).copied()
    }

    pub fn site_priority(&self, site: &Uuid) -> Option<u8> {
        self.site_priorities.get(site).copied()
    }

    pub fn physician_priority(&self, physician: &Uuid) -> Option<u8> {
        self.physician_priorities.get(physician).copied()
    }

    /// Best (lowest) priority among the given physicians, if any is preferred.
    pub fn best_physician_priority<'a, I>(&self, physicians: I) -> Option<u8>
    where
        I: IntoIterator<Item = &'a Uuid>,
    {
        physicians
            .into_iter()
            .filter_map(|p| self.physician_priority(p))
            .min()
    }
}
