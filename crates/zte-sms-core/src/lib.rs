// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the zte-sms bridge.
//!
//! This crate provides the error taxonomy, the SMS and notification types,
//! and the two adapter traits the polling pipeline is written against:
//! [`SmsGateway`] (the router session) and [`Notifier`] (the push relay).

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ZteSmsError;
pub use types::{ListQuery, Notification, RawSms, SmsMessage, SmsTag, decode_content};

pub use traits::{Notifier, SmsGateway};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_render() {
        let cases: Vec<(ZteSmsError, &str)> = vec![
            (ZteSmsError::Config("bad".into()), "configuration error: bad"),
            (
                ZteSmsError::Authentication { code: 1 },
                "router rejected login (result code 1)",
            ),
            (
                ZteSmsError::NotAuthorized {
                    operation: "SET_MSG_READ",
                },
                "SET_MSG_READ requires an authorization token; log in first",
            ),
            (
                ZteSmsError::MissingField {
                    endpoint: "LD",
                    field: "LD",
                },
                "response from LD is missing required field `LD`",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_gateway<T: SmsGateway>() {}
        fn _assert_notifier<T: Notifier>() {}
    }
}
