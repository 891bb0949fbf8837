// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable session state.
//!
//! Every step of the login sequence produces a new [`SessionState`] and the
//! session swaps it in whole. A fresh login acceptance starts from
//! [`SessionState::accepted`], so a token from an earlier login can never
//! survive into the next one.

use crate::crypto;

/// Device version identifiers used as token seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSeeds {
    /// `wa_inner_version` (rd0).
    pub seed0: String,
    /// `cr_version` (rd1).
    pub seed1: String,
}

/// Snapshot of one router session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    authenticated: bool,
    seeds: Option<VersionSeeds>,
    randomizer: Option<String>,
    token: Option<String>,
}

impl SessionState {
    /// State right after the router accepted a login digest.
    pub fn accepted() -> Self {
        Self {
            authenticated: true,
            ..Self::default()
        }
    }

    pub fn with_seeds(self, seeds: VersionSeeds) -> Self {
        Self {
            seeds: Some(seeds),
            ..self
        }
    }

    pub fn with_randomizer(self, randomizer: String) -> Self {
        Self {
            randomizer: Some(randomizer),
            ..self
        }
    }

    /// Attach the token derived from the stored seeds and randomizer.
    ///
    /// Leaves the state tokenless when it cannot be derived yet.
    pub fn with_derived_token(self) -> Self {
        let token = self.derive_authorization_token();
        Self {
            token: (!token.is_empty()).then_some(token),
            ..self
        }
    }

    /// Pure derivation over the stored seeds and randomizer; empty when any
    /// of them is missing.
    pub fn derive_authorization_token(&self) -> String {
        match (&self.seeds, &self.randomizer) {
            (Some(seeds), Some(rd)) => crypto::authorization_token(&seeds.seed0, &seeds.seed1, rd),
            _ => String::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn seeds(&self) -> Option<&VersionSeeds> {
        self.seeds.as_ref()
    }

    pub fn randomizer(&self) -> Option<&str> {
        self.randomizer.as_deref()
    }

    /// The authorization token, if one was derived.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("authenticated", &self.authenticated)
            .field("seeds", &self.seeds)
            .field("randomizer", &self.randomizer.as_ref().map(|_| "[set]"))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
