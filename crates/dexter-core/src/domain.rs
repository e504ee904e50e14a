//! Domain records served by the dashboard API
//!
//! Field names follow the API's JSON, which mixes camelCase with a few
//! snake_case foreign keys (`actor_ids`, `narrative_id`, `actor_id`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NarrativeStatus {
    Active,
    Inactive,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// Shared three-level scale used for narrative impact and alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "HIGH",
            Level::Medium => "MEDIUM",
            Level::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActorStatus {
    Active,
    Inactive,
    Watch,
}

impl ActorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorStatus::Active => "ACTIVE",
            ActorStatus::Inactive => "INACTIVE",
            ActorStatus::Watch => "WATCH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    New,
    Investigating,
    Resolved,
    Dismissed,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::New => "NEW",
            AlertStatus::Investigating => "INVESTIGATING",
            AlertStatus::Resolved => "RESOLVED",
            AlertStatus::Dismissed => "DISMISSED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub confidence: f64,
    pub content_count: u64,
    pub first_detected: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub keywords: Vec<String>,
    pub hashtags: Vec<String>,
    pub description: String,
    pub status: NarrativeStatus,
    #[serde(rename = "actor_ids")]
    pub actor_ids: Vec<u64>,
    pub region: String,
    pub trend: Trend,
    pub impact: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub influence: u32,
    pub platform: String,
    pub followers: u64,
    pub narratives: Vec<u64>,
    pub status: ActorStatus,
    pub first_seen: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Level,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    #[serde(rename = "narrative_id", default, skip_serializing_if = "Option::is_none")]
    pub narrative_id: Option<u64>,
    #[serde(rename = "actor_id", default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<u64>,
    pub status: AlertStatus,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date_generated: DateTime<Utc>,
    pub author: String,
    pub status: String,
    pub narratives: Vec<u64>,
    pub actors: Vec<u64>,
    pub timespan: Timespan,
    pub region: String,
}

/// Headline counter shown on the dashboard landing view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStat {
    pub title: String,
    pub value: String,
    pub icon: String,
}

/// Authenticated principal, as persisted in local storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: String,
    pub role: String,
    pub regions: Vec<String>,
    pub is_active: bool,
    pub last_login: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alert_uses_snake_case_foreign_keys() {
        let alert: Alert = serde_json::from_value(json!({
            "id": 1,
            "title": "Spike",
            "type": "NARRATIVE_SURGE",
            "severity": "HIGH",
            "timestamp": "2025-05-16T08:30:00Z",
            "source": "Social Media Monitor",
            "narrative_id": 1,
            "status": "NEW",
            "region": "Lagos"
        }))
        .unwrap();

        assert_eq!(alert.narrative_id, Some(1));
        assert_eq!(alert.actor_id, None);
        assert_eq!(alert.kind, "NARRATIVE_SURGE");

        let value = serde_json::to_value(&alert).unwrap();
        assert!(value.get("actor_id").is_none());
        assert_eq!(value["narrative_id"], json!(1));
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: "user-123".to_string(),
            name: "Demo User".to_string(),
            email: "a@b.com".to_string(),
            organization: "Election Watch".to_string(),
            role: "RESEARCHER".to_string(),
            regions: vec!["Lagos".to_string()],
            is_active: true,
            last_login: "2025-05-16T08:30:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["isActive"], json!(true));
        assert_eq!(value["lastLogin"], json!("2025-05-16T08:30:00Z"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: serde_json::Result<AlertStatus> = serde_json::from_value(json!("OPEN"));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_strings_match_wire_names() {
        for status in [
            AlertStatus::New,
            AlertStatus::Investigating,
            AlertStatus::Resolved,
            AlertStatus::Dismissed,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        assert_eq!(serde_json::to_value(Level::Medium).unwrap(), json!(Level::Medium.as_str()));
    }
}
