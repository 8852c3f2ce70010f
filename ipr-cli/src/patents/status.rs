//! Free-text status classification

use colored::{ColoredString, Colorize};

/// Broad bucket a free-text status falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Granted,
    UnderExamination,
    /// Filed or published, not yet examined
    Filed,
    /// Abandoned, ceased, withdrawn or expired
    Inactive,
    RenewalDue,
    Other,
}

impl StatusCategory {
    /// Classify a status string. Earlier buckets win when several match.
    pub fn classify(status: &str) -> Self {
        let s = status.to_lowercase();

        if s.contains("granted") {
            StatusCategory::Granted
        } else if s.contains("examination") || s.contains("ae") {
            StatusCategory::UnderExamination
        } else if s.contains("filed") || s.contains("published") {
            StatusCategory::Filed
        } else if ["abandoned", "ceased", "withdrawn", "expired"]
            .iter()
            .any(|k| s.contains(k))
        {
            StatusCategory::Inactive
        } else if s.contains("renewal") {
            StatusCategory::RenewalDue
        } else {
            StatusCategory::Other
        }
    }

    /// Paint a status label in this category's colour
    pub fn paint(self, label: &str) -> ColoredString {
        match self {
            StatusCategory::Granted => label.green().bold(),
            StatusCategory::UnderExamination => label.blue(),
            StatusCategory::Filed => label.cyan(),
            StatusCategory::Inactive => label.red(),
            StatusCategory::RenewalDue => label.yellow(),
            StatusCategory::Other => label.dimmed(),
        }
    }
}

/// Dashboard "granted" counter predicate
pub fn is_granted(status: &str) -> bool {
    status.to_lowercase().contains("granted")
}

/// Dashboard "under examination" counter predicate
pub fn is_under_examination(status: &str) -> bool {
    let s = status.to_lowercase();
    s.contains("examination") || s.contains("ae")
}

/// Dashboard "abandoned" counter predicate (withdrawn is not counted here)
pub fn is_abandoned(status: &str) -> bool {
    let s = status.to_lowercase();
    s.contains("abandoned") || s.contains("ceased") || s.contains("expired")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(StatusCategory::classify("Granted"), StatusCategory::Granted);
        assert_eq!(StatusCategory::classify("AE"), StatusCategory::UnderExamination);
        assert_eq!(
            StatusCategory::classify("Under Examination"),
            StatusCategory::UnderExamination
        );
        assert_eq!(StatusCategory::classify("Filed"), StatusCategory::Filed);
        assert_eq!(StatusCategory::classify("Published"), StatusCategory::Filed);
        assert_eq!(StatusCategory::classify("Withdrawn"), StatusCategory::Inactive);
        assert_eq!(StatusCategory::classify("Renewal pending"), StatusCategory::RenewalDue);
        assert_eq!(StatusCategory::classify("Hearing"), StatusCategory::Other);
    }

    #[test]
    fn test_granted_wins_over_examination() {
        assert_eq!(
            StatusCategory::classify("Granted after examination"),
            StatusCategory::Granted
        );
    }

    #[test]
    fn test_dashboard_predicates() {
        assert!(is_granted("granted"));
        assert!(is_under_examination("FER issued - AE"));
        assert!(is_abandoned("Ceased"));
        assert!(!is_abandoned("Withdrawn"));
    }
}
