use rosterforge_core::domain::materialize;
use rosterforge_core::{
    ClosingFlags, EntityTarget, HardMediumSoftScore, NeedType, Period, Schedule, Shift, Staff,
};
use rosterforge_test::{day, id, small_clinic, RosterFixture};

use super::shadow;
use super::ScheduleDirector;

// Deterministic walk over (target, staff) changes.
fn changes(schedule: &Schedule, count: usize) -> Vec<(EntityTarget, Option<usize>)> {
    let targets: Vec<EntityTarget> = schedule.entity_targets().collect();
    let staff = schedule.staff.len() as u64;
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let target = targets[(state >> 33) as usize % targets.len()];
            let pick = (state >> 17) % (staff + 1);
            let value = (pick < staff).then_some(pick as usize);
            (target, value)
        })
        .collect()
}

// A step of the mixed walk: one change, or a swap of two slots' staff.
#[derive(Debug, Clone, Copy)]
enum Step {
    Change(EntityTarget, Option<usize>),
    Swap(usize, usize),
}

// Like `changes`, but one step in four swaps two slots.
fn steps(schedule: &Schedule, count: usize) -> Vec<Step> {
    let targets: Vec<EntityTarget> = schedule.entity_targets().collect();
    let slots = schedule.slots.len() as u64;
    let staff = schedule.staff.len() as u64;
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        state >> 17
    };
    (0..count)
        .map(|_| {
            if next() % 4 == 0 {
                Step::Swap((next() % slots) as usize, (next() % slots) as usize)
            } else {
                let target = targets[(next() % targets.len() as u64) as usize];
                let pick = next() % (staff + 1);
                Step::Change(target, (pick < staff).then_some(pick as usize))
            }
        })
        .collect()
}

// Four days with full-day surgery under closing flags, split consultations,
// an afternoon of rest, a flexible surgeon, an absence, administrative
// fallbacks and a high-demand site.
fn mixed_week() -> Schedule {
    let mut fx = RosterFixture::new();
    let main = fx.site("Main");
    let annex = fx.site("Annex");
    let theatre = fx.location("Theatre", main);
    let clinic = fx.location("Clinic", main);
    let annex_room = fx.location("Annex room", annex);
    let anesthesia = fx.skill("Anesthesia");
    let nursing = fx.skill("Nursing");
    let physician = id(950);

    let staff = vec![
        Staff::new(id(1), "Ana")
            .available_weekdays()
            .with_skill(anesthesia, 1)
            .with_skill(nursing, 2)
            .with_site(main, 1)
            .with_site(annex, 2)
            .with_physician(physician, 1),
        Staff::new(id(2), "Ben")
            .available_weekdays()
            .with_skill(nursing, 1)
            .with_site(annex, 1)
            .with_absence(day(1), Some(Period::Morning)),
        Staff::new(id(3), "Cleo")
            .flexible(2)
            .available_weekdays()
            .with_skill(anesthesia, 2)
            .with_site(main, 2),
        Staff::new(id(4), "Dev")
            .available_weekdays()
            .with_skill(nursing, 3)
            .with_skill(anesthesia, 4)
            .with_site(main, 1)
            .with_site(annex, 1),
    ];
    for member in &staff {
        fx.staff(member.clone());
    }

    let mut n = 300;
    let mut next = || {
        n += 1;
        id(n)
    };
    for offset in 0..4 {
        let date = day(offset);
        fx.shift(
            Shift::new(next(), date, Period::FullDay, NeedType::Surgical)
                .at(theatre, main)
                .with_skill(anesthesia)
                .with_quantity(2)
                .with_physician(physician)
                .with_closing(ClosingFlags::standard()),
        );
        fx.shift(
            Shift::new(next(), date, Period::Morning, NeedType::Consultation)
                .at(clinic, main)
                .with_skill(nursing),
        );
        fx.shift(
            Shift::new(next(), date, Period::Afternoon, NeedType::Consultation)
                .at(annex_room, annex)
                .with_skill(nursing),
        );
        fx.shift(Shift::new(next(), date, Period::Afternoon, NeedType::Rest));
    }
    for mut admin in materialize::admin_shifts(&staff, day(0), day(3)) {
        admin.id = next();
        fx.shift(admin);
    }
    fx.high_demand(main);
    fx.schedule()
}

fn apply(director: &mut ScheduleDirector, step: Step, n: usize) {
    match step {
        Step::Change(target, staff) => {
            let score = director.change(target, staff);
            assert_eq!(score, director.full_score(), "after change {}", n);
        }
        Step::Swap(a, b) => {
            let (left, right) = {
                let slots = &director.working_solution().slots;
                (slots[a].staff, slots[b].staff)
            };
            let half = director.change(EntityTarget::Slot(a), right);
            assert_eq!(half, director.full_score(), "halfway through swap {}", n);
            let score = director.change(EntityTarget::Slot(b), left);
            assert_eq!(score, director.full_score(), "after swap {}", n);
        }
    }
}

fn assert_work_days_exact(schedule: &Schedule) {
    let by_staff = shadow::slots_by_staff(schedule);
    for (i, slot) in schedule.slots.iter().enumerate() {
        let expected = match slot.staff {
            Some(s) => shadow::work_day_count(schedule, &by_staff[s]),
            None => 0,
        };
        assert_eq!(slot.work_day_count, expected, "slot {}", i);
    }
}

#[test]
fn test_initialization_derives_attributes() {
    let mut fx = RosterFixture::new();
    fx.staff(Staff::new(id(1), "Ana").available_weekdays());
    fx.shift(Shift::new(id(10), day(0), Period::Morning, NeedType::Consultation));
    fx.shift(Shift::new(id(11), day(0), Period::Afternoon, NeedType::Consultation));
    fx.shift(Shift::new(id(12), day(1), Period::Morning, NeedType::Consultation));
    let mut schedule = fx.schedule();
    for slot in &mut schedule.slots {
        slot.staff = Some(0);
    }

    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.calculate_score();
    let slots = &director.working_solution().slots;
    assert!(slots.iter().all(|s| s.work_day_count == 2));
    assert!(slots[0].full_day_worked);
    assert!(slots[1].full_day_worked);
    assert!(!slots[2].full_day_worked);
    director.assert_consistent();
}

#[test]
fn test_change_updates_other_slots_of_both_staff() {
    let mut fx = RosterFixture::new();
    fx.staff(Staff::new(id(1), "Ana").available_weekdays());
    fx.staff(Staff::new(id(2), "Ben").available_weekdays());
    fx.shift(Shift::new(id(10), day(0), Period::Morning, NeedType::Consultation));
    fx.shift(Shift::new(id(11), day(1), Period::Morning, NeedType::Consultation));
    let mut schedule = fx.schedule();
    schedule.slots[0].staff = Some(0);
    schedule.slots[1].staff = Some(0);

    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.calculate_score();
    assert_eq!(director.working_solution().slots[0].work_day_count, 2);

    director.change(EntityTarget::Slot(1), Some(1));
    let slots = &director.working_solution().slots;
    assert_eq!(slots[0].work_day_count, 1);
    assert_eq!(slots[1].work_day_count, 1);

    director.change(EntityTarget::Slot(1), None);
    let slots = &director.working_solution().slots;
    assert_eq!(slots[1].work_day_count, 0);
    assert!(!slots[1].full_day_worked);
    director.assert_consistent();
}

#[test]
fn test_incremental_score_matches_full_score() {
    let (schedule, _) = small_clinic();
    let walk = changes(&schedule, 400);
    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.calculate_score();

    for (n, (target, staff)) in walk.into_iter().enumerate() {
        let score = director.change(target, staff);
        assert_eq!(score, director.full_score(), "after change {}", n);
    }
    assert_work_days_exact(director.working_solution());
    director.assert_consistent();
}

#[test]
fn test_mixed_periods_walk_with_swaps_matches_full_score() {
    let schedule = mixed_week();
    assert!(!schedule.closings.is_empty());
    let kind_count = |pred: &dyn Fn(&Shift) -> bool| {
        (0..schedule.slots.len())
            .filter(|&i| pred(schedule.shift_of(i)))
            .count()
    };
    assert_eq!(kind_count(&|s: &Shift| s.period == Period::FullDay), 8);
    assert_eq!(kind_count(&|s: &Shift| s.is_rest()), 4);

    let walk = steps(&schedule, 800);
    let touched = |pred: &dyn Fn(&Shift) -> bool| {
        walk.iter().any(|step| match *step {
            Step::Change(EntityTarget::Slot(i), Some(_)) => pred(schedule.shift_of(i)),
            Step::Swap(a, b) => pred(schedule.shift_of(a)) || pred(schedule.shift_of(b)),
            _ => false,
        })
    };
    assert!(touched(&|s: &Shift| s.period == Period::FullDay));
    assert!(touched(&|s: &Shift| s.is_rest()));
    assert!(walk.iter().filter(|s| matches!(s, Step::Swap(..))).count() > 100);

    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.calculate_score();
    for (n, step) in walk.into_iter().enumerate() {
        apply(&mut director, step, n);
    }
    assert_work_days_exact(director.working_solution());
    director.assert_consistent();
}

#[test]
fn test_swap_and_swap_back_restores_score() {
    let (mut schedule, _) = small_clinic();
    // give every clinical slot someone so the swap has effect
    for (i, slot) in schedule.slots.iter_mut().enumerate().take(40) {
        slot.staff = Some(i % 5);
    }
    let mut director = ScheduleDirector::with_default_rules(schedule);
    let start = director.calculate_score();

    let a = EntityTarget::Slot(3);
    let b = EntityTarget::Slot(17);
    let (sa, sb) = {
        let s = director.working_solution();
        (s.assigned(a), s.assigned(b))
    };
    director.change(a, sb);
    let swapped = director.change(b, sa);
    assert_eq!(swapped, director.full_score());

    director.change(a, sa);
    let restored = director.change(b, sb);
    assert_eq!(restored, start);
    director.assert_consistent();
}

#[test]
fn test_reassigning_same_value_is_idempotent() {
    let (schedule, _) = small_clinic();
    let mut director = ScheduleDirector::with_default_rules(schedule);
    let first = director.change(EntityTarget::Slot(0), Some(0));
    let writes = director.shadow_writes();
    let second = director.change(EntityTarget::Slot(0), Some(0));

    assert_eq!(first, second);
    assert_eq!(director.shadow_writes(), writes);
}

#[test]
fn test_closing_change_is_scored() {
    let (schedule, _) = small_clinic();
    let mut director = ScheduleDirector::with_default_rules(schedule);
    let before = director.calculate_score();
    let after = director.change(EntityTarget::Closing(0), Some(0));

    // one uncovered closing less, one closing without presence more
    assert_eq!(after.medium() - before.medium(), 10_000);
    assert!(after.hard() < before.hard());
    director.assert_consistent();
}

#[test]
fn test_solution_carries_score() {
    let (schedule, _) = small_clinic();
    let mut director = ScheduleDirector::with_default_rules(schedule);
    assert!(director.clone_working_solution().score.is_none());

    let score = director.calculate_score();
    assert_eq!(director.clone_working_solution().score, Some(score));
    assert_eq!(director.take_solution().score, Some(score));
}

#[test]
fn test_replace_solution_rescores() {
    let (schedule, _) = small_clinic();
    let mut assigned = schedule.clone();
    assigned.slots[0].staff = Some(0);

    let mut director = ScheduleDirector::with_default_rules(schedule);
    let empty = director.calculate_score();
    let replaced = director.replace_solution(assigned);
    assert_ne!(replaced, empty);
    assert_eq!(director.staff_slots(0), &[0]);
    director.assert_consistent();
}

#[test]
fn test_reset_clears_incremental_state() {
    let (schedule, _) = small_clinic();
    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.change(EntityTarget::Slot(0), Some(0));
    director.reset();

    assert!(!director.is_initialized());
    assert_eq!(director.get_score(), HardMediumSoftScore::ZERO);
    assert!(director.staff_slots(0).is_empty());
}

#[test]
fn test_breakdown_sums_to_score() {
    let (schedule, _) = small_clinic();
    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.change(EntityTarget::Slot(0), Some(0));
    let total = director
        .constraint_results()
        .iter()
        .fold(HardMediumSoftScore::ZERO, |acc, r| acc + r.score);
    assert_eq!(total, director.get_score());
    assert_eq!(director.explain().score, director.get_score());
}
