//! Fact-set validation, run before any search starts.

use std::collections::HashSet;

use uuid::Uuid;

use super::Schedule;
use crate::error::{Result, RosterForgeError};

const MAX_SKILL_PRIORITY: u8 = 4;
const MAX_SITE_PRIORITY: u8 = 4;
const MAX_PHYSICIAN_PRIORITY: u8 = 3;

fn invalid(message: String) -> RosterForgeError {
    RosterForgeError::Config(message)
}

fn check_priority(owner: &str, what: &str, priority: u8, max: u8) -> Result<()> {
    if (1..=max).contains(&priority) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{}: {} priority {} is outside 1..={}",
            owner, what, priority, max
        )))
    }
}

impl Schedule {
    /// Rejects fact sets the solver cannot interpret faithfully.
    ///
    /// Nothing is coerced: every problem is reported as
    /// `RosterForgeError::Config` naming the offending fact.
    pub fn validate(&self) -> Result<()> {
        let site_ids: HashSet<Uuid> = self.sites.iter().map(|s| s.id).collect();
        let skill_ids: HashSet<Uuid> = self.skills.iter().map(|s| s.id).collect();
        let location_ids: HashSet<Uuid> = self.locations.iter().map(|l| l.id).collect();

        for location in &self.locations {
            if !site_ids.contains(&location.site) {
                return Err(invalid(format!(
                    "location '{}' references unknown site {}",
                    location.name, location.site
                )));
            }
        }

        let mut staff_ids = HashSet::new();
        for member in &self.staff {
            if !staff_ids.insert(member.id) {
                return Err(invalid(format!("duplicate staff id {}", member.id)));
            }
            if let Some(days) = member.days_per_week {
                if days > 7 {
                    return Err(invalid(format!(
                        "staff '{}' targets {} days per week",
                        member.name, days
                    )));
                }
            }
            for (skill, priority) in &member.skill_priorities {
                if !skill_ids.contains(skill) {
                    return Err(invalid(format!(
                        "staff '{}' references unknown skill {}",
                        member.name, skill
                    )));
                }
                check_priority(&member.name, "skill", *priority, MAX_SKILL_PRIORITY)?;
            }
            for (site, priority) in &member.site_priorities {
                if !site_ids.contains(site) {
                    return Err(invalid(format!(
                        "staff '{}' references unknown site {}",
                        member.name, site
                    )));
                }
                check_priority(&member.name, "site", *priority, MAX_SITE_PRIORITY)?;
            }
            for priority in member.physician_priorities.values() {
                check_priority(&member.name, "physician", *priority, MAX_PHYSICIAN_PRIORITY)?;
            }
        }

        for shift in &self.shifts {
            if shift.quantity <= 0 {
                return Err(invalid(format!(
                    "shift {} on {} needs {} staff",
                    shift.id, shift.date, shift.quantity
                )));
            }
            if let Some(skill) = &shift.skill {
                if !skill_ids.contains(skill) {
                    return Err(invalid(format!(
                        "shift {} references unknown skill {}",
                        shift.id, skill
                    )));
                }
            }
            if let Some(site) = &shift.site {
                if !site_ids.contains(site) {
                    return Err(invalid(format!(
                        "shift {} references unknown site {}",
                        shift.id, site
                    )));
                }
            }
            if let Some(location) = &shift.location {
                if !location_ids.contains(location) {
                    return Err(invalid(format!(
                        "shift {} references unknown location {}",
                        shift.id, location
                    )));
                }
            }
            if let Some(designated) = shift.designated_staff {
                if designated >= self.staff.len() {
                    return Err(invalid(format!(
                        "shift {} designates staff index {} but only {} staff exist",
                        shift.id,
                        designated,
                        self.staff.len()
                    )));
                }
            }
        }

        if let Some(site) = &self.high_demand_site {
            if !site_ids.contains(site) {
                return Err(invalid(format!("high-demand site {} is unknown", site)));
            }
        }

        let assigned_out_of_range = self
            .entity_targets()
            .filter_map(|t| self.assigned(t))
            .any(|staff| staff >= self.staff.len());
        if assigned_out_of_range {
            return Err(invalid("an entity is assigned to an unknown staff index".into()));
        }

        Ok(())
    }
}
