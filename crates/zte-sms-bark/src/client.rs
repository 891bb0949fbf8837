// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a Bark push server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use zte_sms_config::{BarkConfig, BarkMethod};
use zte_sms_core::{Notification, Notifier, ZteSmsError};

/// Sends notifications to one or more Bark devices.
///
/// Device keys are part of the request path, so they never appear in logs
/// or error messages; failures name the key by position instead.
#[derive(Debug, Clone)]
pub struct BarkNotifier {
    client: reqwest::Client,
    server_url: Url,
    keys: Vec<String>,
    sound: String,
    method: BarkMethod,
}

impl BarkNotifier {
    pub fn new(
        server_url: &str,
        keys: Vec<String>,
        sound: impl Into<String>,
        method: BarkMethod,
        timeout: Duration,
    ) -> Result<Self, ZteSmsError> {
        let server_url = Url::parse(server_url)
            .map_err(|e| ZteSmsError::Config(format!("invalid Bark server URL: {e}")))?;
        if server_url.cannot_be_a_base() {
            return Err(ZteSmsError::Config(format!(
                "Bark server URL `{server_url}` cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ZteSmsError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            server_url,
            keys,
            sound: sound.into(),
            method,
        })
    }

    /// Builds a notifier from the `[bark]` section. Blank keys are dropped.
    pub fn from_config(config: &BarkConfig) -> Result<Self, ZteSmsError> {
        Self::new(
            &config.server_url,
            config.effective_keys(),
            config.sound.clone(),
            config.method,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Delivers `notification` to a single device key using the configured
    /// method.
    pub async fn send_with_options(
        &self,
        key: &str,
        notification: &Notification,
    ) -> Result<(), ZteSmsError> {
        let request = match self.method {
            BarkMethod::Get => self.client.get(self.get_url(key, notification)?),
            BarkMethod::Post => {
                let body = serde_urlencoded::to_string(self.form_fields(notification))
                    .map_err(|e| ZteSmsError::Internal(format!("failed to encode Bark form: {e}")))?;
                self.client
                    .post(self.key_url(key)?)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(body)
            }
        };

        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            let message = if e.is_timeout() {
                "Bark request timed out".to_string()
            } else {
                format!("Bark request failed: {e}")
            };
            ZteSmsError::Notify {
                message,
                source: Some(Box::new(e)),
            }
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ZteSmsError::Notify {
                message: format!("Bark returned HTTP {status}: {}", body.trim()),
                source: None,
            });
        }

        Ok(())
    }

    /// `{server}/{key}/{title}/{body}?sound=..&<options>`
    fn get_url(&self, key: &str, notification: &Notification) -> Result<Url, ZteSmsError> {
        let mut url = self.server_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ZteSmsError::Internal("Bark URL cannot be a base".into()))?;
            segments
                .pop_if_empty()
                .push(key)
                .push(&notification.title)
                .push(&notification.body);
        }
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in self.query_fields(notification) {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn key_url(&self, key: &str) -> Result<Url, ZteSmsError> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|()| ZteSmsError::Internal("Bark URL cannot be a base".into()))?
            .pop_if_empty()
            .push(key);
        Ok(url)
    }

    /// `sound` first, then the notification options; a `sound` option
    /// replaces the configured one.
    fn query_fields<'a>(&'a self, notification: &'a Notification) -> Vec<(&'a str, &'a str)> {
        let sound = notification
            .options
            .get("sound")
            .map(String::as_str)
            .unwrap_or(&self.sound);

        let mut fields = vec![("sound", sound)];
        fields.extend(
            notification
                .options
                .iter()
                .filter(|(name, _)| name.as_str() != "sound")
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        fields
    }

    fn form_fields<'a>(&'a self, notification: &'a Notification) -> Vec<(&'a str, &'a str)> {
        let mut fields = vec![
            ("title", notification.title.as_str()),
            ("body", notification.body.as_str()),
        ];
        fields.extend(self.query_fields(notification));
        fields
    }
}

#[async_trait]
impl Notifier for BarkNotifier {
    fn name(&self) -> &str {
        "bark"
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ZteSmsError> {
        if self.keys.is_empty() {
            return Err(ZteSmsError::Notify {
                message: "no Bark device key configured".into(),
                source: None,
            });
        }

        let mut last_error = None;
        for (index, key) in self.keys.iter().enumerate() {
            match self.send_with_options(key, notification).await {
                Ok(()) => debug!(key_index = index, "Bark notification delivered"),
                Err(e) => {
                    warn!(key_index = index, error = %e, "Bark delivery failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(server: &str) -> BarkNotifier {
        BarkNotifier::new(
            server,
            vec!["devkey".into()],
            "healthnotification",
            BarkMethod::Get,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn get_url_encodes_path_segments() {
        let n = notifier("https://api.day.app");
        let url = n
            .get_url("devkey", &Notification::new("SMS from 10086", "a/b?c"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.day.app/devkey/SMS%20from%2010086/a%2Fb%3Fc?sound=healthnotification"
        );
    }

    #[test]
    fn get_url_keeps_server_path_prefix() {
        let n = notifier("https://push.example.com/bark/");
        let url = n.get_url("devkey", &Notification::new("t", "b")).unwrap();
        assert_eq!(url.path(), "/bark/devkey/t/b");
    }

    #[test]
    fn sound_option_overrides_configured_sound() {
        let n = notifier("https://api.day.app");
        let notification = Notification::new("t", "b")
            .with_option("sound", "alarm")
            .with_option("group", "sms");
        assert_eq!(
            n.query_fields(&notification),
            vec![("sound", "alarm"), ("group", "sms")]
        );
    }

    #[test]
    fn form_fields_carry_title_body_and_sound() {
        let n = notifier("https://api.day.app");
        let notification = Notification::new("t", "b");
        let fields = n.form_fields(&notification);
        assert_eq!(
            fields,
            vec![("title", "t"), ("body", "b"), ("sound", "healthnotification")]
        );
    }

    #[test]
    fn rejects_unparseable_server_url() {
        let err = BarkNotifier::new(
            "not a url",
            vec![],
            "s",
            BarkMethod::Get,
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, ZteSmsError::Config(_)));
    }

    #[test]
    fn from_config_drops_blank_keys() {
        let config = BarkConfig {
            keys: vec!["a".into(), "  ".into(), " b ".into()],
            ..BarkConfig::default()
        };
        let n = BarkNotifier::from_config(&config).unwrap();
        assert_eq!(n.key_count(), 2);
        assert_eq!(n.name(), "bark");
    }
}
