//! A one-day handover puzzle.
//!
//! Ana and Ben both hold the consultation skill, Ana at a better rank. A
//! full-day consultation is open to both; a morning endoscopy consultation
//! needs a skill only Ana has. Both get administrative fallback slots.
//!
//! Greedy placement gives Ana the full day, which leaves the endoscopy
//! morning uncovered. Covering everything means handing the full day to
//! Ben and moving Ana to the morning, with her afternoon and Ben's day on
//! the administrative slots following along.

use rosterforge_core::domain::materialize;
use rosterforge_core::{NeedType, Period, Schedule, Shift, Staff};

use crate::calendar::{day, id};
use crate::fixture::RosterFixture;

/// Slot indices of [`handover_day`].
pub mod slots {
    pub const FULL_DAY: usize = 0;
    pub const ENDOSCOPY: usize = 1;
    pub const ANA_MORNING_ADMIN: usize = 2;
    pub const BEN_MORNING_ADMIN: usize = 3;
    pub const ANA_AFTERNOON_ADMIN: usize = 4;
    pub const BEN_AFTERNOON_ADMIN: usize = 5;
}

/// Staff indices of [`handover_day`].
pub const ANA: usize = 0;
pub const BEN: usize = 1;

/// Builds the handover day with every slot unassigned.
pub fn handover_day() -> Schedule {
    let mut fx = RosterFixture::new();
    let site = fx.site("Main");
    let room = fx.location("Consultation", site);
    let endoscopy_room = fx.location("Endoscopy", site);
    let consultation = fx.skill("Consultation");
    let endoscopy = fx.skill("Endoscopy");

    let staff = vec![
        Staff::new(id(1), "Ana")
            .available_weekdays()
            .with_skill(consultation, 2)
            .with_skill(endoscopy, 1)
            .with_site(site, 1),
        Staff::new(id(2), "Ben")
            .available_weekdays()
            .with_skill(consultation, 3)
            .with_site(site, 1),
    ];
    for member in &staff {
        fx.staff(member.clone());
    }

    fx.shift(
        Shift::new(id(200), day(0), Period::FullDay, NeedType::Consultation)
            .at(room, site)
            .with_skill(consultation),
    );
    fx.shift(
        Shift::new(id(201), day(0), Period::Morning, NeedType::Consultation)
            .at(endoscopy_room, site)
            .with_skill(endoscopy),
    );
    for (n, mut admin) in materialize::admin_shifts(&staff, day(0), day(0))
        .into_iter()
        .enumerate()
    {
        admin.id = id(210 + n as u128);
        fx.shift(admin);
    }
    fx.schedule()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handover_layout() {
        let schedule = handover_day();
        assert_eq!(schedule.slots.len(), 6);
        let designated = |slot: usize| schedule.shift_of(slot).designated_staff;
        assert_eq!(designated(slots::ANA_MORNING_ADMIN), Some(ANA));
        assert_eq!(designated(slots::BEN_MORNING_ADMIN), Some(BEN));
        assert_eq!(designated(slots::ANA_AFTERNOON_ADMIN), Some(ANA));
        assert_eq!(designated(slots::BEN_AFTERNOON_ADMIN), Some(BEN));
        assert_eq!(schedule.shift_of(slots::ANA_AFTERNOON_ADMIN).period, Period::Afternoon);
        assert!(schedule.closings.is_empty());
        assert!(schedule.validate().is_ok());
    }
}
