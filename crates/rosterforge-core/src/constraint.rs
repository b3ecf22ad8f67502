//! Scoring rule identification.

/// Reference to a scoring rule.
///
/// # Example
///
/// ```
/// use rosterforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("roster", "Availability");
/// assert_eq!(cr.full_name(), "roster/Availability");
///
/// let bare = ConstraintRef::new("", "Availability");
/// assert_eq!(bare.full_name(), "Availability");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    /// Package/module containing the rule.
    pub package: String,
    /// Name of the rule.
    pub name: String,
}

impl ConstraintRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// Direction in which a rule moves the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Subtract from score.
    Penalty,
    /// Add to score.
    Reward,
}

impl ImpactType {
    /// Applies the sign of this impact to a non-negative magnitude.
    #[inline]
    pub fn signed(self, magnitude: i64) -> i64 {
        match self {
            ImpactType::Penalty => -magnitude,
            ImpactType::Reward => magnitude,
        }
    }
}
