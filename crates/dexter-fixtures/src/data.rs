//! Static fixture records

use chrono::{DateTime, Utc};
use dexter_core::domain::{
    Actor, ActorStatus, Alert, AlertStatus, DashboardStat, Level, Narrative, NarrativeStatus,
    Report, Timespan, Trend,
};
use once_cell::sync::Lazy;

static FIXTURES: Lazy<Fixtures> = Lazy::new(Fixtures::seed);

/// The shared fixture set
pub fn fixtures() -> &'static Fixtures {
    &FIXTURES
}

/// Every record the fixture backend can serve
#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    pub narratives: Vec<Narrative>,
    pub actors: Vec<Actor>,
    pub alerts: Vec<Alert>,
    pub reports: Vec<Report>,
    pub dashboard_stats: Vec<DashboardStat>,
}

fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Fixtures {
    fn seed() -> Self {
        Self {
            narratives: vec![
                Narrative {
                    id: 1,
                    title: "Vote Rigging Claims in Lagos".to_string(),
                    category: "ELECTION_INTEGRITY".to_string(),
                    confidence: 0.89,
                    content_count: 342,
                    first_detected: at("2025-05-15T14:30:00Z"),
                    last_updated: at("2025-05-16T08:45:00Z"),
                    keywords: strings(&["rigging", "vote stuffing", "ballot box", "lagos"]),
                    hashtags: strings(&["#LagosDecides", "#Election2025", "#VoterFraud"]),
                    description: "Reports of systematic vote rigging attempts in various polling \
                                  units across Lagos State."
                        .to_string(),
                    status: NarrativeStatus::Active,
                    actor_ids: vec![1, 2, 3],
                    region: "Lagos".to_string(),
                    trend: Trend::Rising,
                    impact: Level::High,
                },
                Narrative {
                    id: 2,
                    title: "Voter Intimidation Reports".to_string(),
                    category: "VOTER_SUPPRESSION".to_string(),
                    confidence: 0.76,
                    content_count: 156,
                    first_detected: at("2025-05-14T09:15:00Z"),
                    last_updated: at("2025-05-15T16:30:00Z"),
                    keywords: strings(&["intimidation", "threats", "polling units", "violence"]),
                    hashtags: strings(&[
                        "#VoterSuppression",
                        "#ElectionViolence",
                        "#NigeriaDecides",
                    ]),
                    description: "Multiple reports of voter intimidation tactics being employed \
                                  at polling stations."
                        .to_string(),
                    status: NarrativeStatus::Active,
                    actor_ids: vec![4, 5],
                    region: "Abuja".to_string(),
                    trend: Trend::Stable,
                    impact: Level::Medium,
                },
            ],
            actors: vec![
                Actor {
                    id: 1,
                    name: "Political Organization A".to_string(),
                    kind: "ORGANIZATION".to_string(),
                    influence: 85,
                    platform: "Twitter".to_string(),
                    followers: 50_000,
                    narratives: vec![1, 2],
                    status: ActorStatus::Active,
                    first_seen: at("2025-01-15T00:00:00Z"),
                    last_active: at("2025-05-16T12:30:00Z"),
                    region: "Lagos".to_string(),
                },
                Actor {
                    id: 2,
                    name: "Influencer Network B".to_string(),
                    kind: "NETWORK".to_string(),
                    influence: 72,
                    platform: "Facebook".to_string(),
                    followers: 35_000,
                    narratives: vec![1],
                    status: ActorStatus::Watch,
                    first_seen: at("2025-02-01T00:00:00Z"),
                    last_active: at("2025-05-16T10:15:00Z"),
                    region: "Abuja".to_string(),
                },
            ],
            alerts: vec![
                Alert {
                    id: 1,
                    title: "Sudden spike in vote rigging narrative".to_string(),
                    kind: "NARRATIVE_SURGE".to_string(),
                    severity: Level::High,
                    timestamp: at("2025-05-16T08:30:00Z"),
                    source: "Social Media Monitor".to_string(),
                    narrative_id: Some(1),
                    actor_id: None,
                    status: AlertStatus::New,
                    region: "Lagos".to_string(),
                },
                Alert {
                    id: 2,
                    title: "New influential actor detected".to_string(),
                    kind: "ACTOR_DETECTED".to_string(),
                    severity: Level::Medium,
                    timestamp: at("2025-05-15T14:45:00Z"),
                    source: "Network Analysis".to_string(),
                    narrative_id: None,
                    actor_id: Some(2),
                    status: AlertStatus::Investigating,
                    region: "Abuja".to_string(),
                },
            ],
            reports: vec![
                Report {
                    id: 1,
                    title: "Weekly Narrative Analysis Report".to_string(),
                    kind: "NARRATIVE_ANALYSIS".to_string(),
                    date_generated: at("2025-05-16T00:00:00Z"),
                    author: "System".to_string(),
                    status: "PUBLISHED".to_string(),
                    narratives: vec![1, 2],
                    actors: vec![1, 2],
                    timespan: Timespan {
                        start: at("2025-05-09T00:00:00Z"),
                        end: at("2025-05-16T00:00:00Z"),
                    },
                    region: "National".to_string(),
                },
                Report {
                    id: 2,
                    title: "Actor Network Analysis".to_string(),
                    kind: "ACTOR_ANALYSIS".to_string(),
                    date_generated: at("2025-05-15T00:00:00Z"),
                    author: "System".to_string(),
                    status: "DRAFT".to_string(),
                    narratives: vec![1],
                    actors: vec![1, 2],
                    timespan: Timespan {
                        start: at("2025-05-01T00:00:00Z"),
                        end: at("2025-05-15T00:00:00Z"),
                    },
                    region: "Lagos".to_string(),
                },
            ],
            dashboard_stats: vec![
                stat("Active Narratives", "28", "narratives"),
                stat("Flagged Actors", "47", "actors"),
                stat("Open Alerts", "12", "alerts"),
                stat("Generated Reports", "89", "reports"),
            ],
        }
    }
}

fn stat(title: &str, value: &str, icon: &str) -> DashboardStat {
    DashboardStat {
        title: title.to_string(),
        value: value.to_string(),
        icon: icon.to_string(),
    }
}
