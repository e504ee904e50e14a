//! Typed calls for the dashboard's resource families
//!
//! Each view of the dashboard (actors, alerts, reports, ...) needs a small set
//! of calls with a fixed query shape. `DashboardApi` builds those requests on
//! top of `Api` so callers never assemble endpoint strings by hand.

use crate::{
    client::Api,
    domain::{Actor, ActorStatus, Alert, AlertStatus, Level, Narrative, Report},
    envelope::ApiResponse,
    error::Error,
    request::{QueryValue, RequestOptions},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::str::FromStr;

/// Page and page size sent with every alerts query
pub const ALERTS_PAGE: u32 = 1;
pub const ALERTS_PAGE_SIZE: u32 = 20;

const DATE_FORMAT: &str = "%Y-%m-%d";

type Params = Vec<(String, QueryValue)>;

fn push_text(params: &mut Params, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key.to_string(), QueryValue::from(value)));
    }
}

fn push_joined<'a>(params: &mut Params, key: &str, values: impl IntoIterator<Item = &'a str>) {
    let joined = values.into_iter().collect::<Vec<_>>().join(",");
    if !joined.is_empty() {
        params.push((key.to_string(), QueryValue::Text(joined)));
    }
}

fn push_date(params: &mut Params, key: &str, value: Option<NaiveDate>) {
    if let Some(date) = value {
        params.push((key.to_string(), QueryValue::Text(date.format(DATE_FORMAT).to_string())));
    }
}

/// Filters for the actors view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorFilter {
    pub kind: Option<String>,
    pub status: Option<ActorStatus>,
    pub influence: Option<String>,
    pub query: Option<String>,
}

impl ActorFilter {
    pub fn to_params(&self) -> Vec<(String, QueryValue)> {
        let mut params = Vec::new();
        push_text(&mut params, "type", self.kind.as_deref());
        push_text(&mut params, "status", self.status.as_ref().map(ActorStatus::as_str));
        push_text(&mut params, "influence", self.influence.as_deref());
        push_text(&mut params, "q", self.query.as_deref());
        params
    }
}

/// Filters for the alerts view. Multi-valued filters are sent comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub severity: Vec<Level>,
    pub status: Vec<AlertStatus>,
    pub kind: Vec<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl AlertFilter {
    pub fn to_params(&self) -> Vec<(String, QueryValue)> {
        let mut params = vec![
            ("page".to_string(), QueryValue::from(ALERTS_PAGE)),
            ("limit".to_string(), QueryValue::from(ALERTS_PAGE_SIZE)),
        ];
        push_joined(&mut params, "severity", self.severity.iter().map(Level::as_str));
        push_joined(&mut params, "status", self.status.iter().map(AlertStatus::as_str));
        push_joined(&mut params, "type", self.kind.iter().map(String::as_str));
        push_date(&mut params, "dateRange.start", self.start);
        push_date(&mut params, "dateRange.end", self.end);
        params
    }
}

/// Filters for the reports view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub kind: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub status: Option<String>,
    pub query: Option<String>,
}

impl ReportFilter {
    pub fn to_params(&self) -> Vec<(String, QueryValue)> {
        let mut params = Vec::new();
        push_text(&mut params, "type", self.kind.as_deref());
        push_date(&mut params, "startDate", self.start);
        push_date(&mut params, "endDate", self.end);
        push_text(&mut params, "status", self.status.as_deref());
        push_text(&mut params, "q", self.query.as_deref());
        params
    }
}

/// Triage action an analyst can take on an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Investigate,
    Resolve,
    Dismiss,
}

impl AlertAction {
    /// Status the alert moves to after this action
    pub fn target_status(&self) -> AlertStatus {
        match self {
            AlertAction::Investigate => AlertStatus::Investigating,
            AlertAction::Resolve => AlertStatus::Resolved,
            AlertAction::Dismiss => AlertStatus::Dismissed,
        }
    }
}

impl FromStr for AlertAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "investigate" => Ok(AlertAction::Investigate),
            "resolve" => Ok(AlertAction::Resolve),
            "dismiss" => Ok(AlertAction::Dismiss),
            other => Err(Error::InvalidRequest(format!("unknown alert action '{}'", other))),
        }
    }
}

/// Resource-level calls used by the dashboard views
#[derive(Debug, Clone)]
pub struct DashboardApi {
    api: Api,
}

impl DashboardApi {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub async fn narratives(&self) -> ApiResponse<Vec<Narrative>> {
        self.api.get("/narratives", RequestOptions::default()).await
    }

    pub async fn actors(&self, filter: &ActorFilter) -> ApiResponse<Vec<Actor>> {
        let options = RequestOptions::default().with_params(filter.to_params());
        self.api.get("/actors", options).await
    }

    pub async fn alerts(&self, filter: &AlertFilter) -> ApiResponse<Vec<Alert>> {
        let options = RequestOptions::default().with_params(filter.to_params());
        self.api.get("/alerts", options).await
    }

    /// Move an alert to the status implied by `action`
    pub async fn update_alert(&self, alert_id: u64, action: AlertAction) -> ApiResponse<Alert> {
        let body = json!({ "status": action.target_status() });
        self.api
            .patch(&format!("/alerts/{}", alert_id), &body, RequestOptions::default())
            .await
    }

    pub async fn reports(&self, filter: &ReportFilter) -> ApiResponse<Vec<Report>> {
        let options = RequestOptions::default().with_params(filter.to_params());
        self.api.get("/reports", options).await
    }

    pub async fn export_report(&self, report_id: u64) -> ApiResponse<Value> {
        self.api
            .get(&format!("/reports/{}/export", report_id), RequestOptions::default())
            .await
    }

    pub async fn delete_report(&self, report_id: u64) -> ApiResponse<Value> {
        self.api
            .delete(&format!("/reports/{}", report_id), RequestOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDataClient;
    use crate::request::Method;

    fn keys_and_values(params: &[(String, QueryValue)]) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_alert_filter_always_sends_paging() {
        let params = keys_and_values(&AlertFilter::default().to_params());
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_alert_filter_joins_multi_values() {
        let filter = AlertFilter {
            severity: vec![Level::High, Level::Low],
            status: vec![AlertStatus::New],
            kind: vec!["NARRATIVE_SURGE".to_string()],
            start: Some(date("2025-05-01")),
            end: Some(date("2025-05-16")),
        };

        let params = keys_and_values(&filter.to_params());
        assert!(params.contains(&("severity".to_string(), "HIGH,LOW".to_string())));
        assert!(params.contains(&("status".to_string(), "NEW".to_string())));
        assert!(params.contains(&("type".to_string(), "NARRATIVE_SURGE".to_string())));
        assert!(params.contains(&("dateRange.start".to_string(), "2025-05-01".to_string())));
        assert!(params.contains(&("dateRange.end".to_string(), "2025-05-16".to_string())));
    }

    #[test]
    fn test_empty_text_filters_are_omitted() {
        let filter = ActorFilter {
            kind: Some(String::new()),
            status: Some(ActorStatus::Watch),
            influence: None,
            query: Some("network".to_string()),
        };

        let params = keys_and_values(&filter.to_params());
        assert_eq!(
            params,
            vec![
                ("status".to_string(), "WATCH".to_string()),
                ("q".to_string(), "network".to_string()),
            ]
        );
    }

    #[test]
    fn test_report_filter_param_names() {
        let filter = ReportFilter {
            kind: Some("ACTOR_ANALYSIS".to_string()),
            start: Some(date("2025-05-01")),
            end: None,
            status: Some("DRAFT".to_string()),
            query: None,
        };

        let keys: Vec<String> = filter.to_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "startDate", "status"]);
    }

    #[test]
    fn test_alert_action_mapping() {
        assert_eq!(AlertAction::Investigate.target_status(), AlertStatus::Investigating);
        assert_eq!(AlertAction::Resolve.target_status(), AlertStatus::Resolved);
        assert_eq!(AlertAction::Dismiss.target_status(), AlertStatus::Dismissed);
        assert_eq!("Dismiss".parse::<AlertAction>().unwrap(), AlertAction::Dismiss);
        assert!("escalate".parse::<AlertAction>().is_err());
    }

    #[tokio::test]
    async fn test_update_alert_patches_status() {
        let mut mock = MockDataClient::new();
        mock.expect_name().return_const("mock");
        mock.expect_call()
            .withf(|endpoint, options| {
                endpoint.to_string() == "/alerts/2"
                    && options.method == Method::Patch
                    && options.body == Some(json!({"status": "DISMISSED"}))
            })
            .times(1)
            .returning(|_, _| ApiResponse::empty());

        let dashboard = DashboardApi::new(Api::from_client(mock));
        let response = dashboard.update_alert(2, AlertAction::Dismiss).await;

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_report_endpoints() {
        let mut mock = MockDataClient::new();
        mock.expect_name().return_const("mock");
        mock.expect_call()
            .withf(|endpoint, options| {
                endpoint.to_string() == "/reports/7/export" && options.method == Method::Get
            })
            .times(1)
            .returning(|_, _| ApiResponse::ok(json!({"url": "/files/7.pdf"})));
        mock.expect_call()
            .withf(|endpoint, options| {
                endpoint.to_string() == "/reports/7" && options.method == Method::Delete
            })
            .times(1)
            .returning(|_, _| ApiResponse::empty());

        let dashboard = DashboardApi::new(Api::from_client(mock));

        let exported = dashboard.export_report(7).await;
        assert_eq!(exported.data(), Some(&json!({"url": "/files/7.pdf"})));

        let deleted = dashboard.delete_report(7).await;
        assert!(deleted.is_success());
    }

    #[tokio::test]
    async fn test_alerts_sends_filter_params() {
        let mut mock = MockDataClient::new();
        mock.expect_name().return_const("mock");
        mock.expect_call()
            .withf(|endpoint, options| {
                endpoint.to_string() == "/alerts"
                    && options
                        .params
                        .iter()
                        .any(|(k, v)| k == "severity" && v.to_string() == "HIGH")
            })
            .times(1)
            .returning(|_, _| ApiResponse::ok(json!([])));

        let dashboard = DashboardApi::new(Api::from_client(mock));
        let filter = AlertFilter {
            severity: vec![Level::High],
            ..AlertFilter::default()
        };

        let response = dashboard.alerts(&filter).await;
        assert_eq!(response.data().map(Vec::len), Some(0));
    }
}
