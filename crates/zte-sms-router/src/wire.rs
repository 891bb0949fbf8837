// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-endpoint response decoders for the goform API.
//!
//! Each endpoint gets its own struct with optional fields, and
//! [`require`] turns an absent field into [`ZteSmsError::MissingField`].
//! This keeps "the router sent something else" apart from "the router
//! omitted an optional key".

use serde::Deserialize;
use serde_json::Value;
use zte_sms_core::{RawSms, ZteSmsError};

/// `cmd=LD`
#[derive(Debug, Deserialize)]
pub(crate) struct ChallengeResponse {
    #[serde(rename = "LD")]
    pub ld: Option<String>,
}

/// `cmd=RD`
#[derive(Debug, Deserialize)]
pub(crate) struct RandomizerResponse {
    #[serde(rename = "RD")]
    pub rd: Option<String>,
}

/// `cmd=Language,cr_version,wa_inner_version`
#[derive(Debug, Deserialize)]
pub(crate) struct VersionResponse {
    pub wa_inner_version: Option<String>,
    pub cr_version: Option<String>,
}

/// `cmd=loginfo`
#[derive(Debug, Deserialize)]
pub(crate) struct LoginInfoResponse {
    pub loginfo: Option<String>,
}

/// `cmd=sms_data_total`
#[derive(Debug, Deserialize)]
pub(crate) struct SmsListResponse {
    pub messages: Option<Vec<RawSms>>,
}

/// `goformId=LOGIN`. Firmware sends the code as a number or a numeric string.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub result: Option<Value>,
}

impl LoginResponse {
    pub fn code(&self) -> Result<i64, ZteSmsError> {
        match require(self.result.as_ref(), "LOGIN", "result")? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| ZteSmsError::protocol(format!("LOGIN result `{n}` is not an integer"))),
            Value::String(s) => s.trim().parse().map_err(|_| {
                ZteSmsError::protocol(format!("LOGIN result `{s}` is not an integer"))
            }),
            other => Err(ZteSmsError::protocol(format!(
                "LOGIN result has unexpected type: {other}"
            ))),
        }
    }
}

/// Any other `goform_set_cmd_process` call: `{"result": "success"}` or an
/// error string.
#[derive(Debug, Deserialize)]
pub(crate) struct SetResultResponse {
    pub result: Option<Value>,
}

impl SetResultResponse {
    /// Checks for `"success"`; anything else is [`ZteSmsError::Rejected`].
    pub fn into_result(self, operation: &'static str) -> Result<(), ZteSmsError> {
        let result = require(self.result, operation, "result")?;
        match result {
            Value::String(s) if s == "success" => Ok(()),
            Value::String(s) => Err(ZteSmsError::Rejected {
                operation,
                result: s,
            }),
            other => Err(ZteSmsError::Rejected {
                operation,
                result: other.to_string(),
            }),
        }
    }
}

/// Outcome of an accepted login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Result code 0.
    LoggedIn,
    /// Result code 4: the router already held a session for us.
    AlreadyLoggedIn,
}

impl LoginOutcome {
    /// Map the router's login result code.
    ///
    /// 0 and 4 are accepted; 1 (wrong password), 5 (logged in elsewhere)
    /// and anything else are [`ZteSmsError::Authentication`].
    pub fn from_code(code: i64) -> Result<Self, ZteSmsError> {
        match code {
            0 => Ok(Self::LoggedIn),
            4 => Ok(Self::AlreadyLoggedIn),
            code => Err(ZteSmsError::Authentication { code }),
        }
    }
}

/// Unwrap a required field or report which endpoint omitted it.
pub(crate) fn require<T>(
    value: Option<T>,
    endpoint: &'static str,
    field: &'static str,
) -> Result<T, ZteSmsError> {
    value.ok_or(ZteSmsError::MissingField { endpoint, field })
}

/// `msg_id` form value: every id followed by `;`.
pub(crate) fn join_ids(ids: &[String]) -> String {
    ids.iter().map(|id| format!("{id};")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_code_table() {
        let cases: &[(i64, Option<LoginOutcome>)] = &[
            (0, Some(LoginOutcome::LoggedIn)),
            (4, Some(LoginOutcome::AlreadyLoggedIn)),
            (1, None),
            (5, None),
            (3, None),
            (-1, None),
            (99, None),
        ];

        for &(code, expected) in cases {
            match (LoginOutcome::from_code(code), expected) {
                (Ok(outcome), Some(want)) => assert_eq!(outcome, want, "code {code}"),
                (Err(ZteSmsError::Authentication { code: got }), None) => {
                    assert_eq!(got, code)
                }
                (other, _) => panic!("code {code}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn login_code_accepts_number_or_string() {
        let numeric: LoginResponse = serde_json::from_str(r#"{"result":4}"#).unwrap();
        assert_eq!(numeric.code().unwrap(), 4);

        let stringly: LoginResponse = serde_json::from_str(r#"{"result":"0"}"#).unwrap();
        assert_eq!(stringly.code().unwrap(), 0);

        let garbage: LoginResponse = serde_json::from_str(r#"{"result":"yes"}"#).unwrap();
        assert!(garbage.code().unwrap_err().is_protocol());

        let missing: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            missing.code(),
            Err(ZteSmsError::MissingField { field: "result", .. })
        ));
    }

    #[test]
    fn set_result_success_and_rejection() {
        let ok: SetResultResponse = serde_json::from_str(r#"{"result":"success"}"#).unwrap();
        assert!(ok.into_result("SET_MSG_READ").is_ok());

        let failed: SetResultResponse = serde_json::from_str(r#"{"result":"failure"}"#).unwrap();
        assert!(matches!(
            failed.into_result("SET_MSG_READ"),
            Err(ZteSmsError::Rejected { operation: "SET_MSG_READ", result }) if result == "failure"
        ));
    }

    #[test]
    fn join_ids_appends_trailing_delimiter() {
        let ids = vec!["1".to_string(), "22".to_string(), "333".to_string()];
        assert_eq!(join_ids(&ids), "1;22;333;");
        assert_eq!(join_ids(&["1".to_string()]), "1;");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn version_response_ignores_language() {
        let parsed: VersionResponse = serde_json::from_str(
            r#"{"Language":"en","cr_version":"CR_2.0","wa_inner_version":"WA_1.0"}"#,
        )
        .unwrap();
        assert_eq!(parsed.cr_version.as_deref(), Some("CR_2.0"));
        assert_eq!(parsed.wa_inner_version.as_deref(), Some("WA_1.0"));
    }
}
