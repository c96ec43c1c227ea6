//! Presence client for the Teams presence service
//!
//! Validates arguments, builds request bodies, and maps response status
//! codes to success or `PresenceError::Upstream`. Requests go through an
//! injected `HttpTransport`.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::json;

use super::transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};
use crate::error::{PresenceError, Result};
use crate::models::{
    validate_combination, Activity, Availability, Expiry, PresenceDuration, WorkLocation,
    OFFLINE_ACTIVITY,
};

pub const DEFAULT_BASE_URL: &str = "https://presence.teams.microsoft.com/v1/me";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Status codes accepted by the note, location, availability and status calls.
const ACCEPTED_STATUS: RangeInclusive<u16> = 20..=200;
/// The endpoint presence call also accepts 201.
const ENDPOINT_ACCEPTED_STATUS: RangeInclusive<u16> = 20..=201;

/// Connection settings, fixed at construction.
#[derive(Clone)]
pub struct ClientConfig {
    pub bearer_token: String,
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub session_id: Option<String>,
}

impl ClientConfig {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            session_id: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

// Keep the token out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("bearer_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("session_id", &self.session_id)
            .finish()
    }
}

/// Client for the `/v1/me` presence endpoints.
pub struct PresenceClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    bearer_token: String,
    user_agent: String,
    headers: HeaderMap,
    timeout: Duration,
    session_id: String,
}

impl PresenceClient<ReqwestTransport> {
    /// Build a client that talks to the service over reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> PresenceClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            PresenceError::InvalidConfig(format!("base URL {:?}: {}", config.base_url, e))
        })?;
        let headers = build_headers(&config.user_agent, &config.bearer_token)?;

        Ok(Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token,
            user_agent: config.user_agent,
            headers,
            timeout: config.timeout,
            session_id: config.session_id.unwrap_or_default(),
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Identifier of the calling device, required by `set_presence`.
    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = session_id.into();
    }

    pub fn set_bearer_token(&mut self, bearer_token: impl Into<String>) -> Result<()> {
        let bearer_token = bearer_token.into();
        self.headers = build_headers(&self.user_agent, &bearer_token)?;
        self.bearer_token = bearer_token;
        Ok(())
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) -> Result<()> {
        let user_agent = user_agent.into();
        self.headers = build_headers(&user_agent, &self.bearer_token)?;
        self.user_agent = user_agent;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Force an availability regardless of activity-derived signals.
    /// `Offline` is sent with the `OffWork` activity. An unset expiry
    /// leaves `desiredExpirationTime` out of the body.
    pub async fn set_forced_availability(
        &self,
        availability: Availability,
        expiry: &Expiry,
    ) -> Result<RawResponse> {
        let body = forced_availability_body(availability, expiry);
        self.send(Method::PUT, "/forceavailability", Some(body), ACCEPTED_STATUS)
            .await
    }

    /// Publish a status note, optionally pinned.
    pub async fn set_publish_note(
        &self,
        note: &str,
        pinned: bool,
        expiry: &Expiry,
    ) -> Result<RawResponse> {
        let body = json!({
            "expiry": expiry.as_str(),
            "message": render_note(note, pinned),
        });
        self.send(Method::PUT, "/publishnote", Some(body), ACCEPTED_STATUS)
            .await
    }

    pub async fn set_work_location(
        &self,
        location: WorkLocation,
        expiry: &Expiry,
    ) -> Result<RawResponse> {
        let body = json!({
            "location": location.code(),
            "expirationTime": expiry.as_str(),
        });
        self.send(Method::PUT, "/workLocation", Some(body), ACCEPTED_STATUS)
            .await
    }

    /// Fetch the current presence as decoded JSON.
    pub async fn get_status(&self) -> Result<serde_json::Value> {
        let resp = self
            .send(Method::GET, "/presence", None, ACCEPTED_STATUS)
            .await?;
        resp.json(&self.url("/presence"))
    }

    /// Report presence for this session's endpoint for `duration`
    /// (`PresenceDuration::default()` is 240 minutes). Only the pairs in
    /// `ALLOWED_COMBINATIONS` are accepted.
    pub async fn set_presence(
        &self,
        availability: Availability,
        activity: Activity,
        duration: PresenceDuration,
    ) -> Result<RawResponse> {
        if self.session_id.is_empty() {
            return Err(PresenceError::InvalidState("session identifier required"));
        }
        validate_combination(availability, activity)?;

        let body = json!({
            "id": self.session_id,
            "activityReporting": "Transport",
            "deviceType": "Web",
            "availability": availability.as_str(),
            "activity": activity.as_str(),
            "expirationDuration": duration.to_iso8601(),
        });
        self.send(Method::PUT, "/endpoints/", Some(body), ENDPOINT_ACCEPTED_STATUS)
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        accepted: RangeInclusive<u16>,
    ) -> Result<RawResponse> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let resp = self
            .transport
            .send(ApiRequest {
                method,
                url: url.clone(),
                headers: self.headers.clone(),
                body,
                timeout: self.timeout,
            })
            .await?;

        check_response(resp, &url, &accepted)
    }
}

/// Map a status code outside `accepted` to `PresenceError::Upstream`.
fn check_response(
    resp: RawResponse,
    url: &str,
    accepted: &RangeInclusive<u16>,
) -> Result<RawResponse> {
    if !accepted.contains(&resp.status) {
        return Err(PresenceError::Upstream {
            status: resp.status,
            url: url.to_string(),
            body: resp.body,
        });
    }
    Ok(resp)
}

fn build_headers(user_agent: &str, bearer_token: &str) -> Result<HeaderMap> {
    if bearer_token.is_empty() {
        return Err(PresenceError::InvalidConfig(
            "bearer token is required".to_string(),
        ));
    }

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("User-Agent", user_agent)?);
    let mut auth = header_value("Authorization", &format!("Bearer {}", bearer_token))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| PresenceError::InvalidConfig(format!("{} is not a valid header value", name)))
}

fn forced_availability_body(availability: Availability, expiry: &Expiry) -> serde_json::Value {
    let mut body = json!({ "availability": availability.as_str() });
    if availability == Availability::Offline {
        body["activity"] = OFFLINE_ACTIVITY.into();
    }
    if !expiry.is_empty() {
        body["desiredExpirationTime"] = expiry.as_str().into();
    }
    body
}

/// Note markup: `<p>{note}</p>`, followed by the pinned marker if pinned.
pub fn render_note(note: &str, pinned: bool) -> String {
    let mut message = format!("<p>{}</p>", note);
    if pinned {
        message.push_str("<pinnednote></pinnednote>");
    }
    message
}
