//! Risk record model - one entry in the risk register

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on insert
pub type RiskId = i64;

/// A risk register entry
///
/// Every field defaults to its zero value when missing from a JSON body, so
/// partial payloads are accepted the same way a full one is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRecord {
    /// Server-assigned; ignored on create, never changed by update
    pub id: RiskId,
    pub item_name: String,
    /// User-supplied risk code (not unique)
    pub risk_id: String,
    pub risk_description: String,
    pub likelihood: i64,
    pub impact: i64,
    /// Independent of likelihood x impact
    pub risk_score: i64,
    pub mitigation_actions: String,
    pub responsible_person: String,
    pub responsible_department: String,
    /// Free text, not parsed as a date
    pub target_completion_date: String,
    pub status: String,
    pub stakeholders: String,
}

impl RiskRecord {
    /// Return a copy carrying the given id
    pub fn with_id(mut self, id: RiskId) -> Self {
        self.id = id;
        self
    }

    /// True if every field except `id` matches `other`
    #[cfg(test)]
    pub(crate) fn same_content(&self, other: &RiskRecord) -> bool {
        self.clone().with_id(0) == other.clone().with_id(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let record: RiskRecord =
            serde_json::from_str(r#"{"item_name": "Server", "likelihood": 3}"#).unwrap();

        assert_eq!(record.item_name, "Server");
        assert_eq!(record.likelihood, 3);
        assert_eq!(record.impact, 0);
        assert_eq!(record.status, "");
        assert_eq!(record.id, 0);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record: RiskRecord =
            serde_json::from_str(r#"{"risk_id": "R7", "owner_email": "x@example.com"}"#).unwrap();
        assert_eq!(record.risk_id, "R7");
    }

    #[test]
    fn test_non_integer_score_is_rejected() {
        let result = serde_json::from_str::<RiskRecord>(r#"{"likelihood": "high"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_snake_case_keys() {
        let record = RiskRecord {
            id: 4,
            responsible_department: "IT".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], 4);
        assert_eq!(value["responsible_department"], "IT");
        assert!(value.get("target_completion_date").is_some());
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = RiskRecord {
            item_name: "Laptop".to_string(),
            ..Default::default()
        };
        let b = a.clone().with_id(12);
        assert!(a.same_content(&b));
        assert_ne!(a, b);
    }
}
