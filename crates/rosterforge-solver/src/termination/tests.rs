use std::thread;
use std::time::Duration;

use rosterforge_config::TerminationConfig;
use rosterforge_scoring::ScheduleDirector;
use rosterforge_test::small_clinic;

use super::*;

fn scope() -> SolverScope {
    let (schedule, _) = small_clinic();
    SolverScope::with_seed(ScheduleDirector::with_default_rules(schedule), 7)
}

#[test]
fn test_nothing_fires_before_solving_starts() {
    let scope = scope();
    assert!(!TimeTermination::millis(0).is_terminated(&scope));
    assert!(!UnimprovedTimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_time_termination() {
    let mut scope = scope();
    scope.start_solving();
    assert!(TimeTermination::millis(0).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_step_count_termination() {
    let mut scope = scope();
    scope.start_solving();
    let term = StepCountTermination::new(3);
    for _ in 0..3 {
        assert!(!term.is_terminated(&scope));
        scope.increment_step_count();
    }
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_unimproved_time_resets_on_new_best() {
    let mut scope = scope();
    scope.start_solving();
    thread::sleep(Duration::from_millis(20));
    let term = UnimprovedTimeTermination::millis(15);
    assert!(term.is_terminated(&scope));

    assert!(scope.update_best_solution());
    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_option_and_or() {
    let mut scope = scope();
    scope.start_solving();

    let none: Option<StepCountTermination> = None;
    assert!(!none.is_terminated(&scope));
    assert!(Some(StepCountTermination::new(0)).is_terminated(&scope));

    let or = OrTermination((
        TimeTermination::seconds(3600),
        StepCountTermination::new(1),
    ));
    assert!(!or.is_terminated(&scope));
    scope.increment_step_count();
    assert!(or.is_terminated(&scope));
}

#[test]
fn test_from_config() {
    let mut scope = scope();
    scope.start_solving();

    let config = TerminationConfig {
        seconds_spent_limit: None,
        minutes_spent_limit: None,
        unimproved_seconds_spent_limit: None,
        step_count_limit: Some(2),
    };
    let term = from_config(&config);
    assert!((term.0).0.is_none());
    assert!((term.0).1.is_none());
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));

    let defaults = from_config(&TerminationConfig::default());
    assert!((defaults.0).0.is_some());
    assert!((defaults.0).1.is_some());
    assert!((defaults.0).2.is_none());
}
