use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rosterforge_core::{EntityTarget, HardMediumSoftScore, NeedType, Period, Schedule, Shift, Staff};
use rosterforge_scoring::ScheduleDirector;
use rosterforge_test::{day, id, small_clinic, RosterFixture};

use super::*;
use crate::heuristic::CandidateRanges;
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::TimeTermination;

fn scope_for(schedule: Schedule) -> SolverScope {
    let mut scope = SolverScope::with_seed(ScheduleDirector::with_default_rules(schedule), 0);
    scope.start_solving();
    scope
}

// Two nurses and a flexible surgeon.
fn nurses() -> Schedule {
    let mut fx = RosterFixture::new();
    let site = fx.site("Main");
    let room = fx.location("Room", site);
    let nursing = fx.skill("Nursing");
    let surgery = fx.skill("Surgery");
    fx.staff(
        Staff::new(id(1), "Ines")
            .available_weekdays()
            .with_skill(nursing, 1)
            .with_site(site, 1),
    );
    fx.staff(
        Staff::new(id(2), "Joan")
            .available_weekdays()
            .with_skill(nursing, 1)
            .with_site(site, 1),
    );
    fx.staff(
        Staff::new(id(3), "Kai")
            .flexible(1)
            .available_weekdays()
            .with_skill(surgery, 1)
            .with_site(site, 1),
    );
    // 0: Monday nursing, two candidates
    fx.shift(
        Shift::new(id(10), day(0), Period::Morning, NeedType::Consultation)
            .at(room, site)
            .with_skill(nursing),
    );
    // 1: Monday surgery, flexible candidate only
    fx.shift(
        Shift::new(id(11), day(0), Period::Morning, NeedType::Surgical)
            .at(room, site)
            .with_skill(surgery),
    );
    // 2: Tuesday nursing
    fx.shift(
        Shift::new(id(12), day(1), Period::Afternoon, NeedType::Consultation)
            .at(room, site)
            .with_skill(nursing),
    );
    // 3: Monday afternoon, nobody has the skill
    let cardiology = fx.skill("Cardiology");
    fx.shift(
        Shift::new(id(13), day(0), Period::Afternoon, NeedType::Consultation)
            .at(room, site)
            .with_skill(cardiology),
    );
    fx.schedule()
}

#[test]
fn test_order_puts_flexible_candidates_last() {
    let schedule = nurses();
    let ranges = CandidateRanges::build(&schedule);
    let order = construction_order(&schedule, &ranges);

    // the surgery goes last despite being on Monday morning: its only
    // candidate is flexible
    assert_eq!(
        order,
        vec![
            EntityTarget::Slot(0),
            EntityTarget::Slot(3),
            EntityTarget::Slot(2),
            EntityTarget::Slot(1),
        ]
    );
}

#[test]
fn test_order_classes_and_keys_sorted() {
    let (schedule, _) = small_clinic();
    let ranges = CandidateRanges::build(&schedule);
    let order = construction_order(&schedule, &ranges);
    assert_eq!(order.len(), schedule.entity_count());

    let keys: Vec<DifficultyKey> = order
        .iter()
        .map(|&t| difficulty_key(&schedule, &ranges, t))
        .collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));

    let first_fallback = keys
        .iter()
        .position(|k| k.class == EntityClass::Fallback)
        .unwrap();
    let first_closing = keys
        .iter()
        .position(|k| k.class == EntityClass::Closing)
        .unwrap();
    assert_eq!(first_fallback, 40);
    assert_eq!(first_closing, 80);
}

#[test]
fn test_order_skips_assigned_entities() {
    let (mut schedule, _) = small_clinic();
    schedule.slots[0].staff = Some(0);
    let ranges = CandidateRanges::build(&schedule);
    let order = construction_order(&schedule, &ranges);

    assert_eq!(order.len(), schedule.entity_count() - 1);
    assert!(!order.contains(&EntityTarget::Slot(0)));
}

#[test]
fn test_unstaffable_slot_stays_unassigned() {
    let schedule = nurses();
    let ranges = CandidateRanges::build(&schedule);
    let mut scope = scope_for(schedule);
    ConstructionPhase::new(&ranges).solve(&mut scope);

    let solution = scope.working_solution();
    assert_eq!(solution.slots[3].staff, None);
    assert_eq!(solution.slots[1].staff, Some(2));
    assert!(solution.slots[0].staff.is_some());
    assert!(solution.slots[2].staff.is_some());
    assert_eq!(scope.calculate_score().hard(), 0);
    assert_eq!(scope.calculate_score().medium(), -10_000);
}

#[test]
fn test_ties_keep_lowest_staff_index() {
    let mut fx = RosterFixture::new();
    let site = fx.site("Main");
    let room = fx.location("Room", site);
    for n in 1..=2 {
        fx.staff(Staff::new(id(n), format!("Twin {n}")).available_weekdays().with_site(site, 1));
    }
    fx.shift(Shift::new(id(10), day(0), Period::Morning, NeedType::Consultation).at(room, site));
    let schedule = fx.schedule();
    let ranges = CandidateRanges::build(&schedule);
    let mut scope = scope_for(schedule);

    ConstructionPhase::new(&ranges).solve(&mut scope);

    assert_eq!(scope.working_solution().slots[0].staff, Some(0));
    assert_eq!(scope.best_score(), Some(HardMediumSoftScore::ZERO));
}

#[test]
fn test_clinic_construction_is_feasible() {
    let (schedule, _) = small_clinic();
    let ranges = CandidateRanges::build(&schedule);
    let mut scope = scope_for(schedule);
    scope.set_full_assert(true);

    let mut phase = ConstructionPhase::new(&ranges);
    phase.solve(&mut scope);

    let score = scope.calculate_score();
    assert_eq!(score.hard(), 0);
    assert_eq!(scope.best_score(), Some(score));
    assert_eq!(phase.phase_type_name(), "Construction");
    // every surgical slot can be staffed from anesthesia holders
    let solution = scope.working_solution();
    assert!(solution
        .slots
        .iter()
        .enumerate()
        .filter(|(i, _)| solution.shift_of(*i).need == NeedType::Surgical)
        .all(|(_, s)| s.staff.is_some()));
    scope.director().assert_consistent();
}

#[test]
fn test_terminate_early_leaves_entities_unassigned() {
    let (schedule, _) = small_clinic();
    let ranges = CandidateRanges::build(&schedule);
    let mut scope = scope_for(schedule);
    scope.set_terminate_early_flag(Arc::new(AtomicBool::new(true)));

    ConstructionPhase::new(&ranges).solve(&mut scope);

    assert_eq!(scope.working_solution().assigned_count(), 0);
    assert!(scope.best_score().is_some());
}

#[test]
fn test_spent_time_budget_stops_placement() {
    let (schedule, _) = small_clinic();
    let ranges = CandidateRanges::build(&schedule);
    let mut scope = scope_for(schedule);

    let mut phase = ConstructionPhase::new(&ranges).with_termination(TimeTermination::millis(0));
    phase.solve(&mut scope);

    assert_eq!(scope.working_solution().assigned_count(), 0);
    assert!(scope.best_score().is_some());
    assert!(format!("{:?}", phase).contains("TimeTermination"));
}

#[test]
fn test_open_time_budget_places_everything() {
    let schedule = nurses();
    let ranges = CandidateRanges::build(&schedule);
    let mut scope = scope_for(schedule);

    ConstructionPhase::new(&ranges)
        .with_termination(TimeTermination::seconds(60))
        .solve(&mut scope);

    // only the unstaffable slot is left open
    let solution = scope.working_solution();
    assert_eq!(solution.slots[3].staff, None);
    assert_eq!(solution.assigned_count(), solution.entity_count() - 1);
}
