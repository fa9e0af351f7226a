//! Unit-load and passing-grade policy

use crate::core::models::DEFAULT_PASSING_GRADE;

/// A GPA bracket with its own unit cap: students whose GPA is strictly below
/// `gpa_below` may take at most `max_units`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTier {
    /// Exclusive GPA upper bound of the bracket
    pub gpa_below: f64,
    /// Unit cap inside the bracket
    pub max_units: u32,
}

/// Thresholds the validator applies
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentPolicy {
    /// Grade at or above which an attempt counts as passed
    pub passing_grade: f64,
    /// GPA brackets; every bracket the GPA falls in applies
    pub tiers: Vec<UnitTier>,
    /// Cap applied regardless of GPA
    pub absolute_max_units: u32,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            passing_grade: DEFAULT_PASSING_GRADE,
            tiers: vec![
                UnitTier {
                    gpa_below: 12.0,
                    max_units: 14,
                },
                UnitTier {
                    gpa_below: 16.0,
                    max_units: 16,
                },
            ],
            absolute_max_units: 20,
        }
    }
}

impl EnrollmentPolicy {
    /// Largest unit load allowed for a GPA.
    ///
    /// Brackets are independent: the result is the smallest cap among the
    /// absolute cap and every bracket whose bound lies above the GPA. A
    /// student without a GPA (empty transcript) falls in no bracket.
    #[must_use]
    pub fn max_units(&self, gpa: Option<f64>) -> u32 {
        let Some(gpa) = gpa else {
            return self.absolute_max_units;
        };
        self.tiers
            .iter()
            .filter(|tier| gpa < tier.gpa_below)
            .map(|tier| tier.max_units)
            .fold(self.absolute_max_units, u32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brackets() {
        let policy = EnrollmentPolicy::default();
        assert_eq!(policy.max_units(Some(0.0)), 14);
        assert_eq!(policy.max_units(Some(11.99)), 14);
        assert_eq!(policy.max_units(Some(12.0)), 16);
        assert_eq!(policy.max_units(Some(15.99)), 16);
        assert_eq!(policy.max_units(Some(16.0)), 20);
        assert_eq!(policy.max_units(Some(20.0)), 20);
    }

    #[test]
    fn test_no_gpa_gets_absolute_cap() {
        let policy = EnrollmentPolicy::default();
        assert_eq!(policy.max_units(None), 20);
    }

    #[test]
    fn test_tier_above_absolute_cap_is_ignored() {
        let policy = EnrollmentPolicy {
            passing_grade: 10.0,
            tiers: vec![UnitTier {
                gpa_below: 12.0,
                max_units: 30,
            }],
            absolute_max_units: 20,
        };
        assert_eq!(policy.max_units(Some(5.0)), 20);
    }
}
