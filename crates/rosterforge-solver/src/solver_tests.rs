use rosterforge_config::{EnvironmentMode, SolverConfig};
use rosterforge_core::{HardMediumSoftScore, NeedType, Period, RosterForgeError, Shift, Staff};
use rosterforge_scoring::ScheduleDirector;
use rosterforge_test::handover::{slots, ANA, BEN};
use rosterforge_test::{day, handover_day, id, small_clinic, RosterFixture};

use super::*;

fn quick(steps: u64) -> SolverConfig {
    SolverConfig::new()
        .with_random_seed(11)
        .with_step_count_limit(steps)
}

#[test]
fn test_solve_clinic_is_feasible() {
    let (schedule, _) = small_clinic();
    let mut solver = Solver::new(quick(1_000));
    assert_eq!(solver.state(), SolverPhase::Uninitialized);

    let result = solver.solve(schedule).unwrap();

    assert_eq!(solver.state(), SolverPhase::Terminated);
    assert_eq!(result.state, SolverPhase::Terminated);
    assert_eq!(result.steps, 1_000);
    assert!(result.is_feasible());
    assert_eq!(result.score.hard(), 0);
    assert_eq!(result.schedule.score, Some(result.score));

    // the returned schedule really has the reported score
    let rescored = ScheduleDirector::with_default_rules(result.schedule.clone()).full_score();
    assert_eq!(rescored, result.score);
}

#[test]
fn test_local_search_never_loses_to_construction() {
    let (schedule, _) = small_clinic();
    let constructed = Solver::new(quick(0)).solve(schedule.clone()).unwrap();
    let searched = Solver::new(quick(2_000)).solve(schedule).unwrap();

    assert_eq!(constructed.steps, 0);
    assert!(searched.score >= constructed.score);
}

#[test]
fn test_local_search_hands_a_full_day_over() {
    let constructed = Solver::new(quick(0)).solve(handover_day()).unwrap();
    let greedy = &constructed.schedule.slots;
    assert_eq!(greedy[slots::FULL_DAY].staff, Some(ANA));
    assert_eq!(greedy[slots::ENDOSCOPY].staff, None);
    assert_eq!(constructed.score.hard(), 0);
    assert_eq!(constructed.score.medium(), -10_000);

    let searched = Solver::new(quick(2_000)).solve(handover_day()).unwrap();
    assert_eq!(searched.score.hard(), 0);
    assert_eq!(searched.score.medium(), 0);
    assert!(searched.score > constructed.score);

    let staff_of = |slot: usize| searched.schedule.slots[slot].staff;
    assert_eq!(staff_of(slots::FULL_DAY), Some(BEN));
    assert_eq!(staff_of(slots::ENDOSCOPY), Some(ANA));
    // Ana's free afternoon falls back to her administrative slot
    assert_eq!(staff_of(slots::ANA_MORNING_ADMIN), None);
    assert_eq!(staff_of(slots::ANA_AFTERNOON_ADMIN), Some(ANA));
    assert_eq!(staff_of(slots::BEN_MORNING_ADMIN), None);
    assert_eq!(staff_of(slots::BEN_AFTERNOON_ADMIN), None);

    let rescored = ScheduleDirector::with_default_rules(searched.schedule.clone()).full_score();
    assert_eq!(rescored, searched.score);
}

#[test]
fn test_same_seed_same_result() {
    let (schedule, _) = small_clinic();
    let a = Solver::new(quick(300)).solve(schedule.clone()).unwrap();
    let b = Solver::new(quick(300)).solve(schedule).unwrap();

    assert_eq!(a.score, b.score);
    let staff = |r: &SolveResult| r.schedule.slots.iter().map(|s| s.staff).collect::<Vec<_>>();
    assert_eq!(staff(&a), staff(&b));
}

#[test]
fn test_full_assert_mode() {
    let (schedule, _) = small_clinic();
    let config = quick(300).with_environment_mode(EnvironmentMode::FullAssert);
    let result = Solver::new(config).solve(schedule).unwrap();
    assert_eq!(result.score.hard(), 0);
}

#[test]
fn test_without_construction() {
    let (schedule, _) = small_clinic();
    let mut config = quick(50);
    config.construction.enabled = false;
    let result = Solver::new(config).solve(schedule).unwrap();
    assert_eq!(result.steps, 50);
}

#[test]
fn test_unstaffable_slot_is_reported_in_medium_tier() {
    let mut fx = RosterFixture::new();
    let site = fx.site("Main");
    let room = fx.location("Room", site);
    let skill = fx.skill("Radiology");
    fx.staff(Staff::new(id(1), "Lea").flexible(5).available_weekdays().with_site(site, 1));
    fx.shift(
        Shift::new(id(10), day(0), Period::Morning, NeedType::Consultation)
            .at(room, site)
            .with_skill(skill),
    );

    let result = Solver::new(quick(100)).solve(fx.schedule()).unwrap();

    assert_eq!(result.schedule.slots[0].staff, None);
    assert_eq!(result.score, HardMediumSoftScore::of_medium(-10_000));
}

#[test]
fn test_weight_overrides_apply() {
    let (schedule, _) = small_clinic();
    let config = quick(0).with_weight("Site change", "0soft");
    let result = Solver::new(config).solve(schedule).unwrap();
    let mut director = ScheduleDirector::new(
        result.schedule.clone(),
        create_rules(&ConstraintWeightOverrides::from_pairs([(
            "Site change",
            HardMediumSoftScore::ZERO,
        )])),
    );
    assert_eq!(director.calculate_score(), result.score);
    assert_eq!(director.explain().get("Site change").unwrap().score, HardMediumSoftScore::ZERO);
}

#[test]
fn test_unknown_rule_is_a_config_error() {
    let (schedule, _) = small_clinic();
    let config = quick(10).with_weight("Coffee breaks", "1soft");
    let err = Solver::new(config).solve(schedule).unwrap_err();
    assert!(matches!(err, RosterForgeError::Config(_)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (schedule, _) = small_clinic();
    let mut config = quick(10);
    config.local_search.late_acceptance_size = 0;
    let mut solver = Solver::new(config);
    let err = solver.solve(schedule).unwrap_err();
    assert!(matches!(err, RosterForgeError::Config(_)));
    assert_eq!(solver.state(), SolverPhase::Uninitialized);
}

#[test]
fn test_invalid_schedule_is_rejected() {
    let (mut schedule, _) = small_clinic();
    schedule.shifts[0].quantity = 0;
    assert!(Solver::new(quick(10)).solve(schedule).is_err());
}

#[test]
fn test_terminate_early_when_idle() {
    let solver = Solver::new(SolverConfig::default());
    assert!(!solver.is_solving());
    assert!(!solver.terminate_early());
    assert!(!solver.handle().terminate_early());
}

#[test]
fn test_phase_display() {
    assert_eq!(SolverPhase::LocalSearching.to_string(), "local_searching");
    assert_eq!(SolverPhase::default(), SolverPhase::Uninitialized);
}
