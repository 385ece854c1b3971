//! HTTP client for the Supabase backend.
//!
//! All table access goes through PostgREST with explicit `select` lists;
//! identity goes through GoTrue. The client itself is stateless apart from
//! the bearer token, so cloning it for background tasks is cheap.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use reqwest::{header, Client as HttpClient, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::auth::SessionData;
use crate::models::{
    Athlete, AttendanceFlag, AttendanceRecord, Group, Schedule, ScheduleRow, Teacher,
    ATTENDANCE_CONFLICT_KEY,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Nested select for the schedules-by-weekday query. The join tables come
/// back as arrays of `{grupos: ...}` / `{profesores: ...}` wrappers.
const SCHEDULE_SELECT: &str = "id,dia_semana,hora_inicio,hora_fin,\
horarios_grupos(grupos(id,nombre,nivel)),\
profesores_horarios(profesores(id,nombre,user_id,email,telefono))";

const TEACHER_SELECT: &str = "id,nombre,user_id,email,telefono";
const ATHLETE_SELECT: &str = "id,nombre,apellido,grupo_id";

/// GoTrue token/signup response
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Sign-up response: GoTrue returns a full session when email confirmation
/// is disabled, and just the user row when a confirmation mail went out.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(AuthResponse),
    PendingConfirmation { id: String },
}

/// API client for the Supabase project.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    anon_key: String,
    token: Option<Arc<String>>,
}

impl Client {
    /// Create a new client for the given project URL and anon key
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: Arc<String>) {
        self.token = Some(token);
    }

    /// Drop the bearer token; subsequent requests fall back to the anon key
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Common headers: the anon key identifies the project, the bearer token
    /// carries the user identity (anon key again when signed out).
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .token
            .as_deref()
            .map(String::as_str)
            .unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .header(header::ACCEPT, "application/json")
    }

    /// Check if a response is successful, mapping failures to `ApiError`
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn rest_get<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.rest_url(table);
        let response = self
            .request(Method::GET, &url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", table))
    }

    // ===== Identity (GoTrue) =====

    /// Sign in with email and password, returning a fresh session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionData> {
        let url = self.auth_url("token");
        let response = self
            .request(Method::POST, &url)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ApiError::Network)?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse sign-in response")?;

        Ok(Self::session_from_auth(auth))
    }

    /// Register a new account. Returns a session when the project signs the
    /// user straight in, `None` when a confirmation email is pending.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<SessionData>> {
        let url = self.auth_url("signup");
        let response = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ApiError::Network)?;

        let response = Self::check_response(response).await?;
        let parsed: SignUpResponse = response
            .json()
            .await
            .context("Failed to parse sign-up response")?;

        match parsed {
            SignUpResponse::Session(auth) => Ok(Some(Self::session_from_auth(auth))),
            SignUpResponse::PendingConfirmation { id } => {
                debug!(user_id = %id, "Sign-up pending email confirmation");
                Ok(None)
            }
        }
    }

    /// Invalidate the current session server-side. Requires a bearer token.
    pub async fn sign_out(&self) -> Result<()> {
        let url = self.auth_url("logout");
        let response = self
            .request(Method::POST, &url)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<SessionData> {
        let url = self.auth_url("token");
        let response = self
            .request(Method::POST, &url)
            .query(&[("grant_type", "refresh_token")])
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(ApiError::Network)?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse refresh response")?;
        Ok(Self::session_from_auth(auth))
    }

    fn session_from_auth(auth: AuthResponse) -> SessionData {
        SessionData {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            user_id: auth.user.id,
            email: auth.user.email.unwrap_or_default(),
            expires_at: Utc::now() + chrono::Duration::seconds(auth.expires_in),
        }
    }

    // ===== Table queries (PostgREST) =====

    /// Fetch every schedule for a weekday with nested groups and teachers
    pub async fn fetch_schedules_for_day(&self, dia_semana: &str) -> Result<Vec<Schedule>> {
        let rows: Vec<ScheduleRow> = self
            .rest_get(
                "horarios",
                &[
                    ("select", SCHEDULE_SELECT.to_string()),
                    ("dia_semana", format!("eq.{}", dia_semana)),
                ],
            )
            .await?;

        debug!(dia = dia_semana, count = rows.len(), "Schedules fetched");
        Ok(rows.into_iter().map(ScheduleRow::into_schedule).collect())
    }

    /// Resolve the teacher profile for an auth account, if one exists
    pub async fn fetch_teacher_by_user(&self, user_id: &str) -> Result<Option<Teacher>> {
        let mut rows: Vec<Teacher> = self
            .rest_get(
                "profesores",
                &[
                    ("select", TEACHER_SELECT.to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Fetch all athletes belonging to any of the given groups
    pub async fn fetch_athletes_by_groups(&self, group_ids: &[i64]) -> Result<Vec<Athlete>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.rest_get(
            "atletas",
            &[
                ("select", ATHLETE_SELECT.to_string()),
                ("grupo_id", in_list(group_ids)),
            ],
        )
        .await
    }

    /// Fetch saved presence flags for an exact (date, schedule, teacher) key
    pub async fn fetch_attendance(
        &self,
        fecha: NaiveDate,
        horario_id: i64,
        profesor_id: i64,
    ) -> Result<Vec<AttendanceFlag>> {
        self.rest_get(
            "asistencias",
            &[
                ("select", "atleta_id,presente".to_string()),
                ("fecha", format!("eq.{}", fecha)),
                ("horario_id", format!("eq.{}", horario_id)),
                ("profesor_id", format!("eq.{}", profesor_id)),
            ],
        )
        .await
    }

    /// Write an attendance batch in a single upsert. Rows matching the
    /// (fecha, horario_id, atleta_id) conflict key are replaced, new rows
    /// inserted; the store accepts the whole batch or rejects the call.
    pub async fn upsert_attendance(&self, batch: &[AttendanceRecord]) -> Result<()> {
        let url = self.rest_url("asistencias");
        let response = self
            .request(Method::POST, &url)
            .query(&[("on_conflict", ATTENDANCE_CONFLICT_KEY)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(batch)
            .send()
            .await
            .map_err(ApiError::Network)?;

        Self::check_response(response).await?;
        debug!(count = batch.len(), "Attendance batch upserted");
        Ok(())
    }

    /// Fetch all training groups (reference data for the Athletes tab)
    pub async fn fetch_groups(&self) -> Result<Vec<Group>> {
        self.rest_get(
            "grupos",
            &[("select", "id,nombre,nivel".to_string())],
        )
        .await
    }

    /// Fetch the full athlete list (Athletes tab)
    pub async fn fetch_all_athletes(&self) -> Result<Vec<Athlete>> {
        self.rest_get("atletas", &[("select", ATHLETE_SELECT.to_string())])
            .await
    }

    /// Fetch every saved attendance row's (athlete, presence) pair, for
    /// client-side statistics
    pub async fn fetch_all_attendance(&self) -> Result<Vec<AttendanceFlag>> {
        self.rest_get(
            "asistencias",
            &[("select", "atleta_id,presente".to_string())],
        )
        .await
    }
}

/// PostgREST `in.(...)` filter value for a set of ids
fn in_list(ids: &[i64]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_list() {
        assert_eq!(in_list(&[1, 2, 3]), "in.(1,2,3)");
        assert_eq!(in_list(&[7]), "in.(7)");
    }

    #[test]
    fn test_signup_response_shapes() {
        let session_json = r#"{
            "access_token": "tok",
            "refresh_token": "ref",
            "expires_in": 3600,
            "user": {"id": "abc-123", "email": "laura@club.test"}
        }"#;
        let parsed: SignUpResponse = serde_json::from_str(session_json).unwrap();
        assert!(matches!(parsed, SignUpResponse::Session(_)));

        let pending_json = r#"{"id": "abc-123", "email": "laura@club.test"}"#;
        let parsed: SignUpResponse = serde_json::from_str(pending_json).unwrap();
        assert!(matches!(parsed, SignUpResponse::PendingConfirmation { .. }));
    }

    #[test]
    fn test_session_from_auth_carries_identity() {
        let auth = AuthResponse {
            access_token: "tok".to_string(),
            refresh_token: "ref".to_string(),
            expires_in: 3600,
            user: AuthUser {
                id: "abc-123".to_string(),
                email: Some("laura@club.test".to_string()),
            },
        };
        let session = Client::session_from_auth(auth);
        assert_eq!(session.user_id, "abc-123");
        assert_eq!(session.email, "laura@club.test");
        assert!(!session.is_expired());
    }
}
