//! Tests for score types.

use super::*;

#[test]
fn test_creation() {
    let score = HardMediumSoftScore::of(-1, -20, 300);
    assert_eq!(score.hard(), -1);
    assert_eq!(score.medium(), -20);
    assert_eq!(score.soft(), 300);
}

#[test]
fn test_feasibility() {
    assert!(HardMediumSoftScore::of(0, -100, -100).is_feasible());
    assert!(!HardMediumSoftScore::of(-1, 0, 0).is_feasible());
}

#[test]
fn test_lexicographic_comparison() {
    let hard_violation = HardMediumSoftScore::of(-1, 0, 1_000_000);
    let uncovered = HardMediumSoftScore::of(0, -10_000, 500_000);
    let covered = HardMediumSoftScore::of(0, 0, -5_000);

    assert!(covered > uncovered);
    assert!(uncovered > hard_violation);
    assert!(HardMediumSoftScore::of(0, 0, 2) > HardMediumSoftScore::of(0, 0, 1));
    assert!(covered.is_better_than(&uncovered));
    assert!(hard_violation.is_worse_than(&covered));
}

#[test]
fn test_arithmetic() {
    let a = HardMediumSoftScore::of(-100, 0, 50);
    let b = HardMediumSoftScore::of(0, -15_000, 20);

    assert_eq!(a + b, HardMediumSoftScore::of(-100, -15_000, 70));
    assert_eq!(a - b, HardMediumSoftScore::of(-100, 15_000, 30));
    assert_eq!(-a, HardMediumSoftScore::of(100, 0, -50));
    assert_eq!(b.scaled(3), HardMediumSoftScore::of(0, -45_000, 60));
}

#[test]
fn test_of_level() {
    assert_eq!(
        HardMediumSoftScore::of_level(ScoreLevel::Medium, 5),
        HardMediumSoftScore::of_medium(5)
    );
    assert_eq!(HardMediumSoftScore::level_label(0), ScoreLevel::Hard);
    assert_eq!(HardMediumSoftScore::level_label(2), ScoreLevel::Soft);
}

#[test]
fn test_display() {
    let score = HardMediumSoftScore::of(-100, -15_000, 2_000);
    assert_eq!(format!("{}", score), "-100hard/-15000medium/2000soft");
}

#[test]
fn test_parse_full_and_partial() {
    assert_eq!(
        "0hard/-5medium/10soft".parse::<HardMediumSoftScore>(),
        Ok(HardMediumSoftScore::of(0, -5, 10))
    );
    assert_eq!(
        "10000hard".parse::<HardMediumSoftScore>(),
        Ok(HardMediumSoftScore::of_hard(10_000))
    );
    assert_eq!(
        "-20soft/3medium".parse::<HardMediumSoftScore>(),
        Ok(HardMediumSoftScore::of(0, 3, -20))
    );
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("".parse::<HardMediumSoftScore>().is_err());
    assert!("12".parse::<HardMediumSoftScore>().is_err());
    assert!("xhard".parse::<HardMediumSoftScore>().is_err());
    assert!("1hard/2hard".parse::<HardMediumSoftScore>().is_err());
}
