//! The planning solution.

use chrono::NaiveDate;
use uuid::Uuid;

use super::materialize;
use super::{ClosingResponsibility, Location, Shift, ShiftSlot, Site, Skill, Staff};
use crate::error::Result;
use crate::score::HardMediumSoftScore;

/// Addresses one planning entity.
///
/// The descriptor index distinguishes the two entity classes in the
/// incremental scoring protocol: 0 for slots, 1 for closing responsibilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityTarget {
    Slot(usize),
    Closing(usize),
}

impl EntityTarget {
    pub const SLOT_DESCRIPTOR: usize = 0;
    pub const CLOSING_DESCRIPTOR: usize = 1;

    #[inline]
    pub fn descriptor_index(self) -> usize {
        match self {
            EntityTarget::Slot(_) => Self::SLOT_DESCRIPTOR,
            EntityTarget::Closing(_) => Self::CLOSING_DESCRIPTOR,
        }
    }

    #[inline]
    pub fn entity_index(self) -> usize {
        match self {
            EntityTarget::Slot(i) | EntityTarget::Closing(i) => i,
        }
    }

    pub fn from_descriptor(descriptor_index: usize, entity_index: usize) -> Option<Self> {
        match descriptor_index {
            Self::SLOT_DESCRIPTOR => Some(EntityTarget::Slot(entity_index)),
            Self::CLOSING_DESCRIPTOR => Some(EntityTarget::Closing(entity_index)),
            _ => None,
        }
    }
}

/// Facts plus planning entities for one planning run.
///
/// Staff are referenced by their index in `staff` throughout the entities.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub sites: Vec<Site>,
    pub locations: Vec<Location>,
    pub skills: Vec<Skill>,
    pub staff: Vec<Staff>,
    pub shifts: Vec<Shift>,
    pub slots: Vec<ShiftSlot>,
    pub closings: Vec<ClosingResponsibility>,
    /// Site whose repeated staffing counts toward workload fairness.
    pub high_demand_site: Option<Uuid>,
    pub score: Option<HardMediumSoftScore>,
}

impl Schedule {
    /// Creates a schedule with one unassigned slot per unit of coverage and
    /// no closing responsibilities.
    pub fn new(
        sites: Vec<Site>,
        locations: Vec<Location>,
        skills: Vec<Skill>,
        staff: Vec<Staff>,
        shifts: Vec<Shift>,
    ) -> Self {
        let slots = materialize::expand_slots(&shifts);
        Self {
            sites,
            locations,
            skills,
            staff,
            shifts,
            slots,
            closings: Vec::new(),
            high_demand_site: None,
            score: None,
        }
    }

    /// Creates a schedule, derives its closing responsibilities from the
    /// requirements' closing flags, and validates the fact set.
    pub fn build(
        sites: Vec<Site>,
        locations: Vec<Location>,
        skills: Vec<Skill>,
        staff: Vec<Staff>,
        shifts: Vec<Shift>,
    ) -> Result<Self> {
        let closings = materialize::closing_responsibilities(&shifts, &locations);
        let schedule = Self::new(sites, locations, skills, staff, shifts).with_closings(closings);
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn with_closings(mut self, closings: Vec<ClosingResponsibility>) -> Self {
        self.closings = closings;
        self
    }

    pub fn with_high_demand_site(mut self, site: Option<Uuid>) -> Self {
        self.high_demand_site = site;
        self
    }

    /// Requirement behind a slot.
    #[inline]
    pub fn shift_of(&self, slot: usize) -> &Shift {
        &self.shifts[self.slots[slot].shift]
    }

    #[inline]
    pub fn assigned(&self, target: EntityTarget) -> Option<usize> {
        match target {
            EntityTarget::Slot(i) => self.slots[i].staff,
            EntityTarget::Closing(i) => self.closings[i].staff,
        }
    }

    /// Writes the planning variable only. Callers that keep a score in sync
    /// must go through the score director instead.
    #[inline]
    pub fn set_assigned(&mut self, target: EntityTarget, staff: Option<usize>) {
        match target {
            EntityTarget::Slot(i) => self.slots[i].staff = staff,
            EntityTarget::Closing(i) => self.closings[i].staff = staff,
        }
    }

    pub fn date_of(&self, target: EntityTarget) -> NaiveDate {
        match target {
            EntityTarget::Slot(i) => self.shift_of(i).date,
            EntityTarget::Closing(i) => self.closings[i].date,
        }
    }

    /// All entities, slots first.
    pub fn entity_targets(&self) -> impl Iterator<Item = EntityTarget> + '_ {
        (0..self.slots.len())
            .map(EntityTarget::Slot)
            .chain((0..self.closings.len()).map(EntityTarget::Closing))
    }

    #[inline]
    pub fn entity_count(&self) -> usize {
        self.slots.len() + self.closings.len()
    }

    pub fn staff_index(&self, id: &Uuid) -> Option<usize> {
        self.staff.iter().position(|s| &s.id == id)
    }

    pub fn location(&self, id: &Uuid) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    pub fn site_name(&self, id: &Uuid) -> Option<&str> {
        self.sites
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.name.as_str())
    }

    /// Clears every planning variable and derived attribute.
    pub fn unassign_all(&mut self) {
        for slot in &mut self.slots {
            slot.staff = None;
            slot.work_day_count = 0;
            slot.full_day_worked = false;
        }
        for closing in &mut self.closings {
            closing.staff = None;
        }
        self.score = None;
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_assigned()).count()
            + self.closings.iter().filter(|c| c.staff.is_some()).count()
    }
}
