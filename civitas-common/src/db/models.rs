//! Database models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// Persisted incident report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub severity: String,
    pub status: String,
    pub user_id: i64,
    pub ai_summary: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields supplied when filing a report locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    pub user_id: i64,
}

impl NewReport {
    /// Title, description and location must not be blank
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("location", &self.location)
    }
}

/// Persisted alert with its assist-enhanced variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub alert_type: String,
    pub severity: String,
    pub created_by: i64,
    pub created_at: String,
    pub rewritten_message: Option<String>,
    /// Language code → translated message
    pub translated_messages: BTreeMap<String, String>,
}

impl Alert {
    /// Message to send to the public: the rewritten form when available
    pub fn broadcast_message(&self) -> &str {
        self.rewritten_message.as_deref().unwrap_or(&self.message)
    }
}

/// Fields supplied when issuing an alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    pub title: String,
    pub message: String,
    #[serde(default = "default_alert_type")]
    pub alert_type: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    pub created_by: i64,
}

impl NewAlert {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("message", &self.message)
    }
}

/// Persisted field mission with its generated strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mission {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<i64>,
    pub created_by: i64,
    pub ai_strategy: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

/// Fields supplied when creating a mission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMission {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default = "default_severity")]
    pub priority: String,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    pub created_by: i64,
    /// Strategy template family; rescue when absent
    #[serde(default = "default_task_type")]
    pub task_type: String,
}

impl NewMission {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("location", &self.location)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("'{}' must not be empty", field)));
    }
    Ok(())
}

fn default_severity() -> String {
    "medium".to_string()
}

fn default_alert_type() -> String {
    "general".to_string()
}

fn default_task_type() -> String {
    "rescue".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_report_fields_are_invalid_input() {
        let report = NewReport {
            title: "Flooding".to_string(),
            description: "  ".to_string(),
            location: "Main St".to_string(),
            severity: default_severity(),
            user_id: 1,
        };

        match report.validate() {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("description")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_new_mission_defaults() {
        let mission: NewMission = serde_json::from_str(
            r#"{"title":"Search","description":"Collapsed school","location":"North","created_by":2}"#,
        )
        .unwrap();

        assert_eq!(mission.priority, "medium");
        assert_eq!(mission.task_type, "rescue");
        assert!(mission.assigned_to.is_none());
        assert!(mission.validate().is_ok());
    }
}
