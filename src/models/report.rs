use super::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted analysis owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(user_id: impl Into<String>, user_email: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            user_email: user_email.into(),
            result,
            created_at: Utc::now(),
        }
    }

    #[cfg(test)]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SuitabilityEngine;
    use crate::models::SoilSample;

    #[test]
    fn report_serializes_flat_with_id() {
        let result = SuitabilityEngine::new().analyze(&SoilSample::default());
        let report = Report::new("u1", "a@b.c", result);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["_id"], report.id.as_str());
        assert_eq!(value["user_email"], "a@b.c");
        assert!(value["classification"].is_string());
        assert!(value["parameters"].is_object());
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn report_ids_are_unique() {
        let result = SuitabilityEngine::new().analyze(&SoilSample::default());
        let a = Report::new("u1", "a@b.c", result.clone());
        let b = Report::new("u1", "a@b.c", result);
        assert_ne!(a.id, b.id);
    }
}
