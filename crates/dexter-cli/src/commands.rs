//! Command execution
//!
//! Every command prints one JSON document on the writer and reports whether
//! it succeeded; the binary maps that to the exit status.

use crate::bootstrap;
use crate::cli::{Commands, RawRequest};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use dexter_core::request::{Method, RequestOptions};
use dexter_core::resources::DashboardApi;
use dexter_core::{Api, ApiResponse, Error};
use dexter_fixtures::fixtures;
use dexter_session::{SessionState, SessionStore};
use serde::Serialize;
use serde_json::{Value, json};
use std::io::Write;
use std::time::Duration;

/// Run `command`, writing its result to `out`. Returns `false` when the
/// result is a failure.
pub async fn run<W: Write>(command: Commands, config: &AppConfig, out: &mut W) -> Result<bool> {
    match command {
        Commands::Login { email, password } => {
            let session = bootstrap::open_session(config).await?;
            let outcome = session.login(&email, &password).await;
            emit(out, &outcome)?;
            Ok(outcome.success)
        }
        Commands::Logout => {
            let session = bootstrap::open_session(config).await?;
            session.logout().await;
            emit(out, &json!({ "success": true }))?;
            Ok(true)
        }
        Commands::Whoami => {
            let session = bootstrap::open_session(config).await?;
            emit(out, &session_view(&session))?;
            Ok(true)
        }
        Commands::Refresh => {
            let session = bootstrap::open_session(config).await?;
            session.refresh_user().await;
            emit(out, &session_view(&session))?;
            Ok(true)
        }
        Commands::Stats => {
            emit(out, &ApiResponse::ok(&fixtures().dashboard_stats))?;
            Ok(true)
        }
        data => {
            let api = bootstrap::build_api(config)?;
            run_data(data, api, out).await
        }
    }
}

/// Data-access commands against an already built `Api`
pub async fn run_data<W: Write>(command: Commands, api: Api, out: &mut W) -> Result<bool> {
    let dashboard = DashboardApi::new(api);

    let response: ApiResponse<Value> = match command {
        Commands::Get(request) => raw(dashboard.api(), Method::Get, request).await?,
        Commands::Post(request) => raw(dashboard.api(), Method::Post, request).await?,
        Commands::Put(request) => raw(dashboard.api(), Method::Put, request).await?,
        Commands::Patch(request) => raw(dashboard.api(), Method::Patch, request).await?,
        Commands::Delete(request) => raw(dashboard.api(), Method::Delete, request).await?,
        Commands::Narratives => to_value(dashboard.narratives().await),
        Commands::Actors(args) => to_value(dashboard.actors(&args.into()).await),
        Commands::Alerts(args) => to_value(dashboard.alerts(&args.into()).await),
        Commands::UpdateAlert { id, action } => to_value(dashboard.update_alert(id, action).await),
        Commands::Reports(args) => to_value(dashboard.reports(&args.into()).await),
        Commands::ExportReport { id } => dashboard.export_report(id).await,
        Commands::DeleteReport { id } => dashboard.delete_report(id).await,
        other => anyhow::bail!("{:?} is not a data-access command", other),
    };

    emit(out, &response)?;
    Ok(response.is_success())
}

async fn raw(api: &Api, method: Method, request: RawRequest) -> Result<ApiResponse<Value>> {
    let mut options = RequestOptions::new(method);
    if let Some(body) = &request.body {
        let body: Value = serde_json::from_str(body).context("--body is not valid JSON")?;
        options = options.with_body(body);
    }
    for (key, value) in request.params {
        options = options.with_param(key, value);
    }
    for (name, value) in request.headers {
        options = options.with_header(name, value);
    }
    if let Some(ms) = request.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    Ok(api.request(&request.endpoint, options).await)
}

fn to_value<T: Serialize>(response: ApiResponse<T>) -> ApiResponse<Value> {
    match response {
        ApiResponse::Success { data: Some(data), meta } => match serde_json::to_value(data) {
            Ok(data) => ApiResponse::Success {
                data: Some(data),
                meta,
            },
            Err(e) => Error::Serialization(e).into(),
        },
        ApiResponse::Success { data: None, meta } => ApiResponse::Success { data: None, meta },
        ApiResponse::Failure { error } => ApiResponse::Failure { error },
    }
}

fn session_view(session: &SessionStore) -> Value {
    match session.state() {
        SessionState::Authenticated(user) => json!({ "authenticated": true, "user": user }),
        _ => json!({ "authenticated": false }),
    }
}

fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use dexter_fixtures::{FixtureClient, FixtureConfig};
    use tempfile::TempDir;

    fn fixture_api() -> Api {
        Api::from_client(FixtureClient::seeded(FixtureConfig::deterministic(), 11))
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["dexter"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    async fn run_fixture(args: &[&str]) -> (bool, Value) {
        let mut out = Vec::new();
        let ok = run_data(parse(args), fixture_api(), &mut out).await.unwrap();
        (ok, serde_json::from_slice(&out).unwrap())
    }

    fn session_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.session.storage_file = Some(dir.path().join("session.json"));
        config
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn test_to_value_reports_serialization_failure() {
        let response = to_value(ApiResponse::ok(Unserializable));
        assert_eq!(response.error(), Some("Serialization error: cannot encode"));
    }

    #[test]
    fn test_to_value_keeps_meta_and_failures() {
        let meta = dexter_core::ResponseMeta::new(2, 1, 10);
        let response = to_value(ApiResponse::ok(vec![1, 2]).with_meta(meta));
        assert_eq!(response.data(), Some(&json!([1, 2])));
        assert_eq!(response.meta(), Some(&meta));

        let failed = to_value(ApiResponse::<u32>::failure("boom"));
        assert_eq!(failed, ApiResponse::failure("boom"));
    }

    #[tokio::test]
    async fn test_narratives_command() {
        let (ok, output) = run_fixture(&["narratives"]).await;

        assert!(ok);
        assert_eq!(output["success"], true);
        assert_eq!(output["data"].as_array().unwrap().len(), 2);
        assert_eq!(output["meta"], json!({"total": 2, "page": 1, "limit": 10}));
    }

    #[tokio::test]
    async fn test_raw_get_unknown_endpoint_fails() {
        let (ok, output) = run_fixture(&["get", "/unknown-thing"]).await;

        assert!(!ok);
        assert_eq!(
            output,
            json!({"success": false, "error": "Endpoint not found: /unknown-thing"})
        );
    }

    #[tokio::test]
    async fn test_fixture_rejects_writes() {
        let (ok, output) = run_fixture(&["update-alert", "1", "resolve"]).await;
        assert!(!ok);
        assert_eq!(output["error"], "Endpoint not found: /alerts/1");

        let (ok, _) = run_fixture(&["delete-report", "2"]).await;
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_invalid_body_is_an_error() {
        let mut out = Vec::new();
        let result = run_data(
            parse(&["post", "/narratives", "--body", "{oops"]),
            fixture_api(),
            &mut out,
        )
        .await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_stats_command() {
        let mut out = Vec::new();
        let ok = run(Commands::Stats, &AppConfig::default(), &mut out).await.unwrap();
        let output: Value = serde_json::from_slice(&out).unwrap();

        assert!(ok);
        assert_eq!(output["data"][0]["title"], "Active Narratives");
        assert_eq!(output["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_session_commands_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = session_config(&dir);

        let mut out = Vec::new();
        assert!(run(parse(&["login", "a@b.org", "secret"]), &config, &mut out).await.unwrap());

        let mut out = Vec::new();
        run(Commands::Whoami, &config, &mut out).await.unwrap();
        let whoami: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(whoami["authenticated"], true);
        assert_eq!(whoami["user"]["email"], "a@b.org");
        assert_eq!(whoami["user"]["organization"], "Election Watch");

        let mut out = Vec::new();
        run(Commands::Logout, &config, &mut out).await.unwrap();

        let mut out = Vec::new();
        run(Commands::Whoami, &config, &mut out).await.unwrap();
        let whoami: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(whoami, json!({"authenticated": false}));
    }

    #[tokio::test]
    async fn test_login_with_blank_password_fails() {
        let dir = TempDir::new().unwrap();
        let config = session_config(&dir);

        let mut out = Vec::new();
        let ok = run(parse(&["login", "a@b.org", " "]), &config, &mut out).await.unwrap();
        let output: Value = serde_json::from_slice(&out).unwrap();

        assert!(!ok);
        assert_eq!(output, json!({"success": false, "message": "Invalid email or password"}));
    }
}
