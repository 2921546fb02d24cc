//! Routine model and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workout routine owned by the gym member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    /// Unique identifier, also used as the URL slug
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the routine was last performed
    pub last_done: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    /// Create a routine stamped with the current time.
    pub fn new(id: String, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            last_done: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, update: UpdateRoutineRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /routines`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateRoutineRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PATCH /routines/:slug`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRoutineRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_wire_format_is_camel_case() {
        let routine = Routine::new("1".to_string(), "Leg Day".to_string(), None);
        let json = serde_json::to_value(&routine).unwrap();

        assert!(json.get("lastDone").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut routine = Routine::new(
            "1".to_string(),
            "Leg Day".to_string(),
            Some("Squats".to_string()),
        );
        routine.apply(UpdateRoutineRequest { name: Some("Legs".to_string()), description: None });

        assert_eq!(routine.name, "Legs");
        assert_eq!(routine.description.as_deref(), Some("Squats"));
        assert!(routine.updated_at >= routine.created_at);
    }
}
