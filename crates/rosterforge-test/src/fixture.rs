//! Incremental schedule builder.
//!
//! # Example
//!
//! ```
//! use rosterforge_core::{NeedType, Period, Shift, Staff};
//! use rosterforge_test::{day, id, RosterFixture};
//!
//! let mut fx = RosterFixture::new();
//! let site = fx.site("North");
//! let room = fx.location("Room 1", site);
//! fx.staff(Staff::new(id(100), "Ada").available_weekdays().with_site(site, 1));
//! fx.shift(Shift::new(id(200), day(0), Period::Morning, NeedType::Consultation).at(room, site));
//!
//! let schedule = fx.schedule();
//! assert_eq!(schedule.slots.len(), 1);
//! ```

use uuid::Uuid;

use rosterforge_core::domain::materialize;
use rosterforge_core::{Location, Schedule, Shift, Site, Skill, Staff};

use crate::calendar::id;

// Ids handed out by the fixture start here; tests use lower numbers freely.
const FIRST_ID: u128 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct RosterFixture {
    sites: Vec<Site>,
    locations: Vec<Location>,
    skills: Vec<Skill>,
    staff: Vec<Staff>,
    shifts: Vec<Shift>,
    high_demand_site: Option<Uuid>,
    next_id: u128,
}

impl RosterFixture {
    pub fn new() -> Self {
        Self {
            next_id: FIRST_ID,
            ..Self::default()
        }
    }

    fn fresh_id(&mut self) -> Uuid {
        self.next_id += 1;
        id(self.next_id)
    }

    pub fn site(&mut self, name: &str) -> Uuid {
        let site = self.fresh_id();
        self.sites.push(Site::new(site, name));
        site
    }

    pub fn location(&mut self, name: &str, site: Uuid) -> Uuid {
        let location = self.fresh_id();
        self.locations.push(Location::new(location, name, site));
        location
    }

    pub fn skill(&mut self, name: &str) -> Uuid {
        let skill = self.fresh_id();
        self.skills.push(Skill::new(skill, name));
        skill
    }

    /// Adds a staff member and returns its index.
    pub fn staff(&mut self, staff: Staff) -> usize {
        self.staff.push(staff);
        self.staff.len() - 1
    }

    /// Adds a requirement and returns its index.
    pub fn shift(&mut self, shift: Shift) -> usize {
        self.shifts.push(shift);
        self.shifts.len() - 1
    }

    pub fn high_demand(&mut self, site: Uuid) {
        self.high_demand_site = Some(site);
    }

    /// Materializes slots and closing responsibilities without validation.
    pub fn schedule(self) -> Schedule {
        let closings = materialize::closing_responsibilities(&self.shifts, &self.locations);
        Schedule::new(
            self.sites,
            self.locations,
            self.skills,
            self.staff,
            self.shifts,
        )
        .with_closings(closings)
        .with_high_demand_site(self.high_demand_site)
    }
}
