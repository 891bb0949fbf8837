// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the router's goform web API.
//!
//! [`ZteSession`] runs the challenge/response login, derives the
//! authorization token, and issues the read and mutating calls the polling
//! pipeline needs.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use zte_sms_config::RouterConfig;
use zte_sms_core::{ListQuery, RawSms, ZteSmsError};

use crate::crypto;
use crate::state::{SessionState, VersionSeeds};
use crate::wire::{
    ChallengeResponse, LoginInfoResponse, LoginOutcome, LoginResponse, RandomizerResponse,
    SetResultResponse, SmsListResponse, VersionResponse, join_ids, require,
};

const GET_PATH: &str = "/goform/goform_get_cmd_process";
const SET_PATH: &str = "/goform/goform_set_cmd_process";

const VERSION_CMD: &str = "Language,cr_version,wa_inner_version";

/// One authenticated connection to a router.
#[derive(Debug)]
pub struct ZteSession {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    state: SessionState,
}

impl ZteSession {
    /// Creates an unauthenticated session for the router at `base_url`.
    ///
    /// Every request is bounded by `timeout`; an expired timeout surfaces
    /// as [`ZteSmsError::Transport`].
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ZteSmsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ZteSmsError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            state: SessionState::default(),
        })
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self, ZteSmsError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// True once an authorization token exists and mutating calls may be sent.
    pub fn has_token(&self) -> bool {
        self.state.token().is_some()
    }

    /// Fetches the single-use login challenge (`LD`).
    pub async fn fetch_challenge(&self) -> Result<String, ZteSmsError> {
        let resp: ChallengeResponse = self.get("LD", "cmd=LD&multi_data=1").await?;
        require(resp.ld, "LD", "LD")
    }

    /// Fetches the randomizer (`RD`) and records it in the session state.
    pub async fn fetch_randomizer(&mut self) -> Result<String, ZteSmsError> {
        let resp: RandomizerResponse = self.get("RD", "cmd=RD&multi_data=1").await?;
        let rd = require(resp.rd, "RD", "RD")?;
        self.state = self.state.clone().with_randomizer(rd.clone());
        Ok(rd)
    }

    /// Fetches the two version seeds and records them in the session state.
    pub async fn fetch_version_seeds(&mut self) -> Result<VersionSeeds, ZteSmsError> {
        let resp: VersionResponse = self
            .get("version", &format!("cmd={VERSION_CMD}&multi_data=1"))
            .await?;
        let seeds = VersionSeeds {
            seed0: require(resp.wa_inner_version, "version", "wa_inner_version")?,
            seed1: require(resp.cr_version, "version", "cr_version")?,
        };
        self.state = self.state.clone().with_seeds(seeds.clone());
        Ok(seeds)
    }

    /// Derives the authorization token from the stored state without
    /// touching it. Empty when the inputs have not all been fetched.
    pub fn derive_authorization_token(&self) -> String {
        self.state.derive_authorization_token()
    }

    /// Runs the full login handshake.
    ///
    /// After the router accepts the digest the session is authenticated even
    /// if fetching the seeds or randomizer then fails; such a session has no
    /// token and rejects mutating calls with [`ZteSmsError::NotAuthorized`].
    pub async fn login(&mut self, password: &str) -> Result<LoginOutcome, ZteSmsError> {
        let challenge = self.fetch_challenge().await?;
        let digest = crypto::password_digest(password, &challenge);

        let resp: LoginResponse = self.set("LOGIN", &[("password", digest.as_str())]).await?;
        let code = resp.code()?;
        let outcome = LoginOutcome::from_code(code)?;
        info!(?outcome, "router accepted login");

        self.state = SessionState::accepted();
        self.fetch_version_seeds().await?;
        self.fetch_randomizer().await?;
        self.state = self.state.clone().with_derived_token();

        if self.has_token() {
            debug!("authorization token derived");
        } else {
            warn!("router returned empty version seeds or randomizer; mutating calls disabled");
        }

        Ok(outcome)
    }

    /// Lightweight liveness check. Anything but `loginfo == "ok"` means the
    /// router has dropped the session.
    pub async fn check_login(&self) -> Result<(), ZteSmsError> {
        let resp: LoginInfoResponse = self.get("loginfo", "cmd=loginfo&multi_data=1").await?;
        match resp.loginfo {
            Some(status) if status == "ok" => Ok(()),
            other => Err(ZteSmsError::SessionExpired {
                status: other.unwrap_or_default(),
            }),
        }
    }

    /// Ends the router session and discards local state.
    ///
    /// A no-op when no token was ever derived.
    pub async fn logout(&mut self) -> Result<(), ZteSmsError> {
        let Some(token) = self.state.token().map(str::to_string) else {
            debug!("logout skipped: no authorization token");
            return Ok(());
        };

        self.post_form("LOGOUT", &[("AD", token.as_str())]).await?;
        self.state = SessionState::default();
        info!("logged out of router");
        Ok(())
    }

    /// Lists stored SIM messages, newest first as the router orders them.
    pub async fn list_messages(&self, query: &ListQuery) -> Result<Vec<RawSms>, ZteSmsError> {
        let q = format!(
            "cmd=sms_data_total&page={}&data_per_page={}&mem_store=1&tags={}&order_by=order+by+id+desc",
            query.page,
            query.per_page,
            query.tag.code()
        );
        let resp: SmsListResponse = self.get("sms_data_total", &q).await?;
        let messages = require(resp.messages, "sms_data_total", "messages")?;
        debug!(count = messages.len(), tag = %query.tag, "listed messages");
        Ok(messages)
    }

    /// Marks `ids` as read with one `SET_MSG_READ` call.
    pub async fn mark_read(&self, ids: &[String]) -> Result<(), ZteSmsError> {
        let token = self.require_token("SET_MSG_READ")?;
        if ids.is_empty() {
            return Ok(());
        }

        let msg_id = join_ids(ids);
        let resp: SetResultResponse = self
            .set(
                "SET_MSG_READ",
                &[("msg_id", msg_id.as_str()), ("tag", "0"), ("AD", token)],
            )
            .await?;
        resp.into_result("SET_MSG_READ")
    }

    /// Deletes `ids` with one `DELETE_SMS` call.
    pub async fn delete_messages(&self, ids: &[String]) -> Result<(), ZteSmsError> {
        let token = self.require_token("DELETE_SMS")?;
        if ids.is_empty() {
            return Ok(());
        }

        let msg_id = join_ids(ids);
        let resp: SetResultResponse = self
            .set(
                "DELETE_SMS",
                &[
                    ("msg_id", msg_id.as_str()),
                    ("notCallback", "true"),
                    ("AD", token),
                ],
            )
            .await?;
        resp.into_result("DELETE_SMS")
    }

    fn require_token(&self, operation: &'static str) -> Result<&str, ZteSmsError> {
        self.state
            .token()
            .ok_or(ZteSmsError::NotAuthorized { operation })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &str,
    ) -> Result<T, ZteSmsError> {
        let url = format!("{}{GET_PATH}?{query}&isTest=false", self.base_url);
        let response = self.execute(endpoint, self.http.get(url)).await?;
        decode(endpoint, response).await
    }

    async fn set<T: DeserializeOwned>(
        &self,
        goform_id: &'static str,
        fields: &[(&str, &str)],
    ) -> Result<T, ZteSmsError> {
        let response = self.post_form(goform_id, fields).await?;
        decode(goform_id, response).await
    }

    async fn post_form(
        &self,
        goform_id: &'static str,
        fields: &[(&str, &str)],
    ) -> Result<reqwest::Response, ZteSmsError> {
        let mut form: Vec<(&str, &str)> = vec![("isTest", "false"), ("goformId", goform_id)];
        form.extend_from_slice(fields);
        let body = serde_urlencoded::to_string(&form)
            .map_err(|e| ZteSmsError::Internal(format!("failed to encode {goform_id} form: {e}")))?;

        let request = self
            .http
            .post(format!("{}{SET_PATH}", self.base_url))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        self.execute(goform_id, request).await
    }

    async fn execute(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ZteSmsError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let status = response.status();
        debug!(endpoint, status = %status, "router response received");

        if !status.is_success() {
            return Err(ZteSmsError::Transport {
                message: format!("{endpoint} returned HTTP {status}"),
                source: None,
            });
        }
        Ok(response)
    }

    fn transport_error(&self, endpoint: &'static str, e: reqwest::Error) -> ZteSmsError {
        let message = if e.is_timeout() {
            format!("{endpoint} timed out after {:?}", self.timeout)
        } else {
            format!("{endpoint} request failed: {e}")
        };
        ZteSmsError::transport(message, e)
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T, ZteSmsError> {
    let body = response
        .text()
        .await
        .map_err(|e| ZteSmsError::transport(format!("failed to read {endpoint} body"), e))?;
    serde_json::from_str(&body).map_err(|e| {
        ZteSmsError::protocol(format!("{endpoint} response is not the expected JSON object: {e}"))
    })
}
