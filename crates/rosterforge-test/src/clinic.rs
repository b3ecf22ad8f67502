//! A small clinic week.
//!
//! Two sites, three locations and two skills. Five staff members work
//! Monday to Friday; one of them is flexible with a three-day target. Every
//! weekday has a two-person surgical requirement and two consultation
//! requirements in both halves, the operating room carries closing flags,
//! and each non-flexible staff member gets administrative fallback slots.

use uuid::Uuid;

use rosterforge_core::domain::materialize;
use rosterforge_core::{ClosingFlags, NeedType, Period, Schedule, Shift, Staff};

use crate::calendar::{day, id};
use crate::fixture::RosterFixture;

/// Ids of the clinic's facts, for tests that need to address them.
#[derive(Debug, Clone, Copy)]
pub struct Clinic {
    pub main_site: Uuid,
    pub annex_site: Uuid,
    pub operating_room: Uuid,
    pub consult_room: Uuid,
    pub annex_room: Uuid,
    pub anesthesia: Uuid,
    pub nursing: Uuid,
    pub physician: Uuid,
}

/// Builds the clinic week with every entity unassigned.
pub fn small_clinic() -> (Schedule, Clinic) {
    let mut fx = RosterFixture::new();
    let main_site = fx.site("Main");
    let annex_site = fx.site("Annex");
    let operating_room = fx.location("Operating room", main_site);
    let consult_room = fx.location("Consultation", main_site);
    let annex_room = fx.location("Annex consultation", annex_site);
    let anesthesia = fx.skill("Anesthesia");
    let nursing = fx.skill("Nursing");
    let physician = id(900);

    let staff = vec![
        Staff::new(id(1), "Alba")
            .available_weekdays()
            .with_skill(anesthesia, 1)
            .with_skill(nursing, 3)
            .with_site(main_site, 1)
            .with_physician(physician, 1),
        Staff::new(id(2), "Bruno")
            .available_weekdays()
            .with_skill(anesthesia, 2)
            .with_site(main_site, 1)
            .with_site(annex_site, 2),
        Staff::new(id(3), "Chloe")
            .available_weekdays()
            .with_skill(nursing, 1)
            .with_site(main_site, 2)
            .with_site(annex_site, 1),
        Staff::new(id(4), "Dario")
            .available_weekdays()
            .with_skill(nursing, 2)
            .with_skill(anesthesia, 4)
            .with_site(annex_site, 1),
        Staff::new(id(5), "Elena")
            .flexible(3)
            .available_weekdays()
            .with_skill(nursing, 1)
            .with_skill(anesthesia, 3)
            .with_site(main_site, 2)
            .with_site(annex_site, 2),
    ];
    for member in &staff {
        fx.staff(member.clone());
    }

    let mut n = 100;
    let mut next = || {
        n += 1;
        id(n)
    };
    for offset in 0..5 {
        let date = day(offset);
        for period in Period::HALVES {
            fx.shift(
                Shift::new(next(), date, period, NeedType::Surgical)
                    .at(operating_room, main_site)
                    .with_skill(anesthesia)
                    .with_quantity(2)
                    .with_physician(physician)
                    .with_closing(ClosingFlags::standard()),
            );
            fx.shift(
                Shift::new(next(), date, period, NeedType::Consultation)
                    .at(consult_room, main_site)
                    .with_skill(nursing),
            );
            fx.shift(
                Shift::new(next(), date, period, NeedType::Consultation)
                    .at(annex_room, annex_site)
                    .with_skill(nursing),
            );
        }
    }
    for mut admin in materialize::admin_shifts(&staff, day(0), day(4)) {
        // stable ids keep fixtures deterministic
        admin.id = next();
        fx.shift(admin);
    }
    fx.high_demand(main_site);

    let clinic = Clinic {
        main_site,
        annex_site,
        operating_room,
        consult_room,
        annex_room,
        anesthesia,
        nursing,
        physician,
    };
    (fx.schedule(), clinic)
}
