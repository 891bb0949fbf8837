// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment errors and validation failures are turned into [`ConfigError`]
//! values that miette renders with source snippets, "did you mean"
//! suggestions and, for settings that have one, the command-line flag that
//! supplies them.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Settings that can also be given on the command line.
const CLI_FLAGS: &[(&str, &str)] = &[
    ("router.password", "-p <password>"),
    ("router.base_url", "--url <url>"),
    ("bark.keys", "-b <key1,key2>"),
    ("bark.sound", "-s <sound>"),
    ("poll.interval_secs", "-i <seconds>"),
    ("poll.page_size", "--page-size <n>"),
    ("logging.level", "--log-level <level>"),
];

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(zte_sms::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a zte-sms setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(zte_sms::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required setting is missing. `flag` names the CLI option for it.
    #[error("missing required setting `{key}`")]
    #[diagnostic(
        code(zte_sms::config::missing_key),
        help("{}", missing_key_help(key, flag.as_deref()))
    )]
    MissingKey { key: String, flag: Option<String> },

    #[error("validation error: {message}")]
    #[diagnostic(code(zte_sms::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(zte_sms::config::other))]
    Other(String),
}

impl ConfigError {
    /// Missing setting `key` (dotted path), with its CLI flag if it has one.
    pub fn missing(key: impl Into<String>) -> Self {
        let key = key.into();
        let flag = cli_flag(&key).map(str::to_string);
        ConfigError::MissingKey { key, flag }
    }
}

/// The command-line flag that sets `key`, if any.
pub fn cli_flag(key: &str) -> Option<&'static str> {
    CLI_FLAGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, flag)| *flag)
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

fn missing_key_help(key: &str, flag: Option<&str>) -> String {
    match flag {
        Some(flag) => format!("pass `{flag}` or set `{key}` in zte-sms.toml"),
        None => format!("set `{key}` in zte-sms.toml"),
    }
}

/// `router` + `password` -> `router.password`.
fn dotted(path: &[String], field: Option<&str>) -> String {
    path.iter()
        .map(String::as_str)
        .chain(field)
        .collect::<Vec<_>>()
        .join(".")
}

/// Convert every error carried by a `figment::Error` into a diagnostic.
///
/// `toml_sources` holds `(path, content)` pairs of the files that were
/// merged, used to point at unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, field, toml_sources).unzip();
                ConfigError::UnknownKey {
                    key: dotted(&error.path, Some(field.as_str())),
                    suggestion: suggest_key(field, *expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::missing(dotted(&error.path, Some(&**field))),
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: dotted(&error.path, None),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Source snippet and span for `field` in the file the error came from.
fn locate(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(file) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let file = file.display().to_string();
    let (name, content) = toml_sources.iter().find(|(name, _)| *name == file)?;

    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `field` inside the table named by `path`.
///
/// The file is scanned line by line, tracking the current `[table]` header,
/// so a header-like string inside a value never moves the search. An empty
/// `path` means the top level, before any header.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted = path.first().map(String::as_str);
    let mut table: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(name) = table_header(trimmed) {
            table = Some(name);
        } else if table == wanted && defines_key(trimmed, field) {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }

    None
}

/// `[name]` (optionally followed by a comment) -> `name`.
fn table_header(line: &str) -> Option<&str> {
    let line = line.split('#').next()?.trim_end();
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    (!name.starts_with('[')).then(|| name.trim())
}

fn defines_key(line: &str, field: &str) -> bool {
    line.strip_prefix(field)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

/// Closest valid key by Jaro-Winkler similarity, if close enough.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, valid_keys: &[S]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key.as_ref()), key.as_ref()))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render every error to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(table: &str) -> Vec<String> {
        vec![table.to_string()]
    }

    #[test]
    fn suggests_close_keys_only() {
        let bark = ["keys", "sound", "server_url", "timeout_secs", "method"];
        assert_eq!(suggest_key("sonud", &bark), Some("sound".to_string()));
        assert_eq!(
            suggest_key("intervl_secs", &["interval_secs", "page_size"]),
            Some("interval_secs".to_string())
        );
        assert_eq!(suggest_key("zzzzzz", &["base_url", "password"]), None);
    }

    #[test]
    fn key_offset_is_found_inside_its_table() {
        let content = "[router]\nbase_url = \"x\"\n\n[bark]\nsonud = \"bell\"\n";
        let o = find_key_offset(content, &path("bark"), "sonud").unwrap();
        assert_eq!(&content[o..o + 5], "sonud");
    }

    #[test]
    fn header_text_inside_a_value_is_not_a_table() {
        let content = "[router]\npassword = \"[bark]\"\nsonud = 1\n\n[bark] # push\nsonud = \"bell\"\n";
        let o = find_key_offset(content, &path("bark"), "sonud").unwrap();
        assert!(content[..o].ends_with("[bark] # push\n"), "offset {o}");
    }

    #[test]
    fn key_offset_handles_crlf_and_prefix_keys() {
        let content = "[poll]\r\ninterval = 1\r\ninterval_secs = 3\r\n";
        let o = find_key_offset(content, &path("poll"), "interval_secs").unwrap();
        assert_eq!(&content[o..o + 13], "interval_secs");
        assert_eq!(find_key_offset(content, &path("bark"), "interval_secs"), None);
    }

    #[test]
    fn unknown_key_from_inline_toml_has_suggestion() {
        let err = crate::loader::load_config_from_str("[bark]\nsonud = \"bell\"\n").unwrap_err();
        let errors = figment_to_config_errors(err, &[]);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "bark.sonud" && s == "sound"
        )));
    }

    #[test]
    fn figment_missing_field_carries_cli_flag() {
        let mut err = figment::Error::from(Kind::MissingField("password".into()));
        err.path = path("router");

        let errors = figment_to_config_errors(err, &[]);
        assert!(matches!(
            errors.as_slice(),
            [ConfigError::MissingKey { key, flag: Some(flag) }]
                if key == "router.password" && flag == "-p <password>"
        ));
    }

    #[test]
    fn missing_key_help_names_flag_when_known() {
        let with_flag = ConfigError::missing("bark.keys");
        let help = with_flag.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("-b <key1,key2>"), "{help}");

        let without = ConfigError::missing("bark.server_url");
        assert!(matches!(&without, ConfigError::MissingKey { flag: None, .. }));
        let help = without.help().map(|h| h.to_string()).unwrap_or_default();
        assert_eq!(help, "set `bark.server_url` in zte-sms.toml");
    }
}
