// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hash chains required by the router's login and authorization scheme.
//!
//! The firmware compares these strings verbatim, so the chaining order and
//! the hex case of every step are part of the protocol:
//!
//! - login digest: `UPPER(hex(sha256(UPPER(hex(sha256(password))) || LD)))`
//! - authorization token: `hex(sha256(hex(sha256(rd0 || rd1)) || RD))`

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a UTF-8 string.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Password digest submitted with `goformId=LOGIN`, salted with the
/// single-use challenge.
pub fn password_digest(password: &str, challenge: &str) -> String {
    let inner = sha256_hex(password).to_uppercase();
    sha256_hex(&format!("{inner}{challenge}")).to_uppercase()
}

/// Authorization token (`AD`) for mutating requests.
///
/// Returns an empty string when any input is empty: the token is not yet
/// derivable, which is distinct from an error.
pub fn authorization_token(seed0: &str, seed1: &str, randomizer: &str) -> String {
    if seed0.is_empty() || seed1.is_empty() || randomizer.is_empty() {
        return String::new();
    }
    let seeds = sha256_hex(&format!("{seed0}{seed1}"));
    sha256_hex(&format!("{seeds}{randomizer}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_is_lowercase() {
        assert_eq!(
            sha256_hex("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
    }

    #[test]
    fn password_digest_known_vector() {
        assert_eq!(
            password_digest("admin", "ABCDEF0123"),
            "964BD45C9ECD6CFA373E3C980AB0715E18CECA3ACB0CFA2EF2F151C8AD7EFF64"
        );
    }

    #[test]
    fn authorization_token_known_vector() {
        assert_eq!(
            authorization_token("WA_INNER_1.0", "CR_2.0", "rd-nonce-42"),
            "d4150052fc6085c531a81767fb8bf9c35a34930fb41a9417bdcbfc32c88ecb02"
        );
    }

    #[test]
    fn authorization_token_empty_when_any_input_missing() {
        assert_eq!(authorization_token("", "CR_2.0", "rd"), "");
        assert_eq!(authorization_token("WA", "", "rd"), "");
        assert_eq!(authorization_token("WA", "CR", ""), "");
    }

    #[test]
    fn seed_order_matters() {
        assert_ne!(
            authorization_token("a", "b", "rd"),
            authorization_token("b", "a", "rd")
        );
    }

    proptest::proptest! {
        #[test]
        fn authorization_token_is_deterministic(
            seed0 in "[A-Za-z0-9_.]{1,24}",
            seed1 in "[A-Za-z0-9_.]{1,24}",
            rd in "[a-f0-9]{1,32}",
        ) {
            let first = authorization_token(&seed0, &seed1, &rd);
            let second = authorization_token(&seed0, &seed1, &rd);
            proptest::prop_assert_eq!(&first, &second);
            proptest::prop_assert_eq!(first.len(), 64);
            proptest::prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
