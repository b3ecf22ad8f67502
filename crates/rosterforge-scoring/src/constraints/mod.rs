//! Staff scheduling rule table.
//!
//! Rules are listed hard first, then medium, then soft. Each rule's weight is
//! the score of one unit of match; rules whose strength depends on a rank or
//! a load report that strength as a number of units.

mod hard;
mod medium;
mod soft;


use chrono::NaiveDate;
use smallvec::SmallVec;

use rosterforge_core::HardMediumSoftScore;

use crate::api::weight_overrides::{ConstraintWeightOverrides, WeightProvider};
use crate::rule::{EntityRule, Rule, RuleTable, StaffRule};

/// Stable rule names, used as breakdown keys and weight override keys.
pub mod names {
    pub const NO_DOUBLE_BOOKING: &str = "No double booking";
    pub const AVAILABILITY: &str = "Availability";
    pub const SKILL_ELIGIBILITY: &str = "Skill eligibility";
    pub const SITE_ELIGIBILITY: &str = "Site eligibility";
    pub const DISTINCT_CLOSING_TIERS: &str = "Distinct closing tiers";
    pub const CLOSING_FULL_DAY: &str = "Closing full-day presence";
    pub const FALLBACK_COVERAGE: &str = "Fallback coverage";
    pub const FLEXIBLE_EXACT_DAYS: &str = "Flexible exact work days";
    pub const UNCOVERED_SURGICAL: &str = "Uncovered surgical slot";
    pub const UNCOVERED_CONSULTATION: &str = "Uncovered consultation slot";
    pub const UNCOVERED_CLOSING: &str = "Uncovered closing responsibility";
    pub const PHYSICIAN_PREFERENCE: &str = "Physician preference";
    pub const SKILL_PREFERENCE: &str = "Skill preference";
    pub const LOCATION_CONTINUITY: &str = "Location continuity";
    pub const SITE_CHANGE: &str = "Site change";
    pub const FLEXIBLE_INCENTIVE: &str = "Flexible work-day incentive";
    pub const WORKLOAD_FAIRNESS: &str = "Workload fairness";

    /// All rule names in table order.
    pub const ALL: [&str; 17] = [
        NO_DOUBLE_BOOKING,
        AVAILABILITY,
        SKILL_ELIGIBILITY,
        SITE_ELIGIBILITY,
        DISTINCT_CLOSING_TIERS,
        CLOSING_FULL_DAY,
        FALLBACK_COVERAGE,
        FLEXIBLE_EXACT_DAYS,
        UNCOVERED_SURGICAL,
        UNCOVERED_CONSULTATION,
        UNCOVERED_CLOSING,
        PHYSICIAN_PREFERENCE,
        SKILL_PREFERENCE,
        LOCATION_CONTINUITY,
        SITE_CHANGE,
        FLEXIBLE_INCENTIVE,
        WORKLOAD_FAIRNESS,
    ];
}

/// Default weights per unit of match.
pub mod weights {
    use rosterforge_core::HardMediumSoftScore;

    pub const DOUBLE_BOOKING: HardMediumSoftScore = HardMediumSoftScore::of_hard(100);
    pub const ELIGIBILITY: HardMediumSoftScore = HardMediumSoftScore::of_hard(10_000);
    pub const CLOSING: HardMediumSoftScore = HardMediumSoftScore::of_hard(10_000);
    pub const FALLBACK_COVERAGE: HardMediumSoftScore = HardMediumSoftScore::of_hard(1_000);
    pub const FLEXIBLE_EXACT_DAYS: HardMediumSoftScore = HardMediumSoftScore::of_medium(5_000);
    pub const UNCOVERED_SURGICAL: HardMediumSoftScore = HardMediumSoftScore::of_medium(15_000);
    pub const UNCOVERED_CONSULTATION: HardMediumSoftScore = HardMediumSoftScore::of_medium(10_000);
    pub const UNCOVERED_CLOSING: HardMediumSoftScore = HardMediumSoftScore::of_medium(10_000);
    pub const LOCATION_CONTINUITY: HardMediumSoftScore = HardMediumSoftScore::of_soft(5_000);
    pub const SITE_CHANGE: HardMediumSoftScore = HardMediumSoftScore::of_soft(5_000);
    pub const FLEXIBLE_INCENTIVE: HardMediumSoftScore = HardMediumSoftScore::of_soft(2_000);

    /// Physician preference points for rank 1, 2 and 3.
    pub const PHYSICIAN_RANK_POINTS: [i64; 3] = [100_000, 60_000, 30_000];
    /// Skill preference points for rank 1 through 4.
    pub const SKILL_RANK_POINTS: [i64; 4] = [80_000, 60_000, 40_000, 20_000];
    /// Workload penalty is `load * load / WORKLOAD_DAMPING`.
    pub const WORKLOAD_DAMPING: i64 = 10;
    /// Load per day beyond the first at the high-demand site.
    pub const HIGH_DEMAND_EXTRA_DAY_LOAD: i64 = 10;
}

/// Builds the rule table, taking any weight found in `overrides` instead of
/// the default.
pub fn create_rules<W: WeightProvider<HardMediumSoftScore>>(overrides: &W) -> RuleTable {
    use names::*;
    let one_soft = HardMediumSoftScore::ONE_SOFT;

    let rules: Vec<Rule> = vec![
        StaffRule::penalize(NO_DOUBLE_BOOKING, weights::DOUBLE_BOOKING, hard::double_booking).into(),
        EntityRule::penalize(AVAILABILITY, weights::ELIGIBILITY, hard::unavailable).into(),
        EntityRule::penalize(SKILL_ELIGIBILITY, weights::ELIGIBILITY, hard::missing_skill).into(),
        EntityRule::penalize(SITE_ELIGIBILITY, weights::ELIGIBILITY, hard::forbidden_site).into(),
        StaffRule::penalize(DISTINCT_CLOSING_TIERS, weights::CLOSING, hard::first_and_second_tier).into(),
        StaffRule::penalize(CLOSING_FULL_DAY, weights::CLOSING, hard::closing_without_presence).into(),
        StaffRule::penalize(FALLBACK_COVERAGE, weights::FALLBACK_COVERAGE, hard::idle_without_fallback).into(),
        StaffRule::penalize(FLEXIBLE_EXACT_DAYS, weights::FLEXIBLE_EXACT_DAYS, medium::flexible_day_gap).into(),
        EntityRule::penalize(UNCOVERED_SURGICAL, weights::UNCOVERED_SURGICAL, medium::uncovered_surgical).into(),
        EntityRule::penalize(UNCOVERED_CONSULTATION, weights::UNCOVERED_CONSULTATION, medium::uncovered_consultation).into(),
        EntityRule::penalize(UNCOVERED_CLOSING, weights::UNCOVERED_CLOSING, medium::uncovered_closing).into(),
        EntityRule::reward(PHYSICIAN_PREFERENCE, one_soft, soft::physician_preference).into(),
        EntityRule::reward(SKILL_PREFERENCE, one_soft, soft::skill_preference).into(),
        StaffRule::reward(LOCATION_CONTINUITY, weights::LOCATION_CONTINUITY, soft::same_location_days).into(),
        StaffRule::penalize(SITE_CHANGE, weights::SITE_CHANGE, soft::site_change_days).into(),
        StaffRule::reward(FLEXIBLE_INCENTIVE, weights::FLEXIBLE_INCENTIVE, soft::flexible_work_days).into(),
        StaffRule::penalize(WORKLOAD_FAIRNESS, one_soft, soft::workload).into(),
    ];

    let mut table = RuleTable::new(rules);
    for name in ALL {
        if let Some(weight) = overrides.weight(name) {
            if let Some(rule) = table.get_mut(name) {
                rule.set_weight(weight);
            }
        }
    }
    table
}

/// Rule table with default weights.
pub fn default_rules() -> RuleTable {
    create_rules(&ConstraintWeightOverrides::new())
}

/// Number of distinct dates in `dates`.
pub(crate) fn distinct_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> usize {
    let mut seen: SmallVec<[NaiveDate; 8]> = dates.into_iter().collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
