//! Tests for the domain model.

use chrono::{NaiveDate, Weekday};
use uuid::Uuid;

use super::materialize::{admin_shifts, closing_responsibilities, expand_slots};
use super::*;
use crate::error::RosterForgeError;

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

#[test]
fn test_period_overlap() {
    assert!(Period::Morning.overlaps(Period::Morning));
    assert!(!Period::Morning.overlaps(Period::Afternoon));
    assert!(Period::FullDay.overlaps(Period::Afternoon));
    assert!(Period::Morning.overlaps(Period::FullDay));
    assert_eq!(Period::FullDay.halves(), &[Period::Morning, Period::Afternoon]);
    assert_eq!(Period::Afternoon.halves(), &[Period::Afternoon]);
    assert_eq!(Period::from_id(0), Some(Period::FullDay));
    assert_eq!(Period::from_id(3), None);
}

#[test]
fn test_absence_covers() {
    let whole = Absence::new(monday(), None);
    let morning = Absence::new(monday(), Some(Period::Morning));

    assert!(whole.covers(monday(), Period::Afternoon));
    assert!(morning.covers(monday(), Period::Morning));
    assert!(morning.covers(monday(), Period::FullDay));
    assert!(!morning.covers(monday(), Period::Afternoon));
    assert!(!whole.covers(monday().succ_opt().unwrap(), Period::Morning));
}

#[test]
fn test_staff_availability() {
    let staff = Staff::new(id(1), "Ana")
        .available(Weekday::Mon, Period::Morning)
        .with_absence(monday() + chrono::Days::new(7), None);

    assert!(staff.is_available(Weekday::Mon, Period::Morning));
    assert!(!staff.is_available(Weekday::Mon, Period::FullDay));
    assert!(staff.is_available_on(monday(), Period::Morning));
    assert!(!staff.is_available_on(monday() + chrono::Days::new(7), Period::Morning));
    assert!(!staff.is_available_on(monday(), Period::Afternoon));
}

#[test]
fn test_staff_preferences() {
    let staff = Staff::new(id(1), "Ana")
        .with_skill(id(10), 2)
        .with_site(id(20), 1)
        .with_physician(id(30), 3)
        .with_physician(id(31), 1);

    assert!(staff.has_skill(&id(10)));
    assert!(!staff.has_skill(&id(11)));
    assert!(staff.can_work_at_site(&id(20)));
    assert_eq!(staff.skill_priority(&id(10)), Some(2));
    assert_eq!(staff.best_physician_priority(&[id(30), id(31)]), Some(1));
    assert_eq!(staff.best_physician_priority(&[id(32)]), None);
}

#[test]
fn test_expand_slots() {
    let shifts = vec![
        Shift::new(id(1), monday(), Period::Morning, NeedType::Consultation).with_quantity(3),
        Shift::new(id(2), monday(), Period::Morning, NeedType::Admin).with_quantity(999),
    ];
    let slots = expand_slots(&shifts);

    assert_eq!(slots.len(), 4);
    assert_eq!(slots[2].shift, 0);
    assert_eq!(slots[2].index, 2);
    assert_eq!(slots[3].shift, 1);
    assert!(slots.iter().all(|s| s.staff.is_none()));
}

#[test]
fn test_admin_shifts_skip_flexible_weekend_and_unavailable() {
    let staff = vec![
        Staff::new(id(1), "Fixed")
            .available(Weekday::Mon, Period::FullDay)
            .available(Weekday::Sat, Period::FullDay),
        Staff::new(id(2), "Flex").flexible(3).available_weekdays(),
        Staff::new(id(3), "Morning only").available(Weekday::Mon, Period::Morning),
    ];
    let saturday = monday() + chrono::Days::new(5);
    let shifts = admin_shifts(&staff, monday(), saturday);

    assert_eq!(shifts.len(), 3);
    assert!(shifts.iter().all(|s| s.is_admin() && s.date == monday()));
    assert_eq!(
        shifts.iter().filter(|s| s.designated_staff == Some(0)).count(),
        2
    );
    assert_eq!(
        shifts.iter().filter(|s| s.designated_staff == Some(2)).count(),
        1
    );
}

#[test]
fn test_closing_responsibilities() {
    let site = id(100);
    let location = id(200);
    let quiet = id(201);
    let locations = vec![
        Location::new(location, "Cardiology", site),
        Location::new(quiet, "Quiet", site),
    ];
    let shifts = vec![
        Shift::new(id(1), monday(), Period::Morning, NeedType::Consultation)
            .at(location, site)
            .with_quantity(2)
            .with_closing(ClosingFlags::standard()),
        Shift::new(id(2), monday(), Period::Afternoon, NeedType::Consultation)
            .at(location, site)
            .with_closing(ClosingFlags::standard()),
        // single person per half-day: no closing needed
        Shift::new(id(3), monday(), Period::Morning, NeedType::Consultation)
            .at(quiet, site)
            .with_closing(ClosingFlags::standard()),
        Shift::new(id(4), monday(), Period::Afternoon, NeedType::Consultation)
            .at(quiet, site)
            .with_closing(ClosingFlags::standard()),
    ];

    let closings = closing_responsibilities(&shifts, &locations);

    assert_eq!(closings.len(), 2);
    assert!(closings.iter().all(|c| c.location == location));
    assert_eq!(closings[0].tier, ClosingTier::First);
    assert_eq!(closings[1].tier, ClosingTier::Second);
    assert_eq!(closings[0].site, Some(site));
}

#[test]
fn test_closing_needs_both_half_days() {
    let site = id(100);
    let location = id(200);
    let locations = vec![Location::new(location, "Cardiology", site)];
    let shifts = vec![Shift::new(id(1), monday(), Period::Morning, NeedType::Surgical)
        .at(location, site)
        .with_quantity(3)
        .with_closing(ClosingFlags::standard())];

    assert!(closing_responsibilities(&shifts, &locations).is_empty());
}

fn small_facts() -> (Vec<Site>, Vec<Location>, Vec<Skill>, Vec<Staff>) {
    let sites = vec![Site::new(id(100), "North")];
    let locations = vec![Location::new(id(200), "Clinic", id(100))];
    let skills = vec![Skill::new(id(300), "Echo")];
    let staff = vec![Staff::new(id(1), "Ana")
        .with_skill(id(300), 1)
        .with_site(id(100), 1)
        .available_weekdays()];
    (sites, locations, skills, staff)
}

#[test]
fn test_build_valid_schedule() {
    let (sites, locations, skills, staff) = small_facts();
    let shifts = vec![Shift::new(id(1), monday(), Period::Morning, NeedType::Consultation)
        .at(id(200), id(100))
        .with_skill(id(300))
        .with_quantity(2)];

    let schedule = Schedule::build(sites, locations, skills, staff, shifts).unwrap();
    assert_eq!(schedule.slots.len(), 2);
    assert_eq!(schedule.entity_count(), 2);
    assert_eq!(schedule.staff_index(&id(1)), Some(0));
    assert_eq!(schedule.site_name(&id(100)), Some("North"));
}

#[test]
fn test_validation_rejects_zero_quantity() {
    let (sites, locations, skills, staff) = small_facts();
    let shifts = vec![
        Shift::new(id(1), monday(), Period::Morning, NeedType::Consultation).with_quantity(0),
    ];

    let err = Schedule::build(sites, locations, skills, staff, shifts).unwrap_err();
    assert!(matches!(err, RosterForgeError::Config(_)));
}

#[test]
fn test_validation_rejects_unknown_skill_on_staff() {
    let (sites, locations, skills, mut staff) = small_facts();
    staff[0] = staff[0].clone().with_skill(id(999), 2);

    let result = Schedule::build(sites, locations, skills, staff, Vec::new());
    assert!(result.is_err());
}

#[test]
fn test_validation_rejects_bad_priority_and_site() {
    let (sites, locations, skills, mut staff) = small_facts();
    staff[0] = staff[0].clone().with_physician(id(50), 4);
    assert!(Schedule::build(sites.clone(), locations.clone(), skills.clone(), staff, Vec::new()).is_err());

    let (_, _, _, staff) = small_facts();
    let shifts = vec![Shift::new(id(1), monday(), Period::Morning, NeedType::Consultation)
        .at(id(200), id(101))];
    assert!(Schedule::build(sites, locations, skills, staff, shifts).is_err());
}

#[test]
fn test_entity_targets_and_assignment() {
    let (sites, locations, skills, staff) = small_facts();
    let shifts = vec![Shift::new(id(1), monday(), Period::Morning, NeedType::Consultation)];
    let closing = ClosingResponsibility::new(id(200), Some(id(100)), monday(), ClosingTier::First);
    let mut schedule =
        Schedule::new(sites, locations, skills, staff, shifts).with_closings(vec![closing]);

    let targets: Vec<_> = schedule.entity_targets().collect();
    assert_eq!(targets, vec![EntityTarget::Slot(0), EntityTarget::Closing(0)]);
    assert_eq!(EntityTarget::Closing(0).descriptor_index(), 1);
    assert_eq!(
        EntityTarget::from_descriptor(0, 0),
        Some(EntityTarget::Slot(0))
    );

    schedule.set_assigned(EntityTarget::Closing(0), Some(0));
    assert_eq!(schedule.assigned(EntityTarget::Closing(0)), Some(0));
    assert_eq!(schedule.assigned_count(), 1);

    schedule.unassign_all();
    assert_eq!(schedule.assigned_count(), 0);
}
