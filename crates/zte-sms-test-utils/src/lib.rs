// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for zte-sms integration tests.
//!
//! Provides scripted stand-ins for the router session and the push relay so
//! the polling pipeline can be exercised without a network.
//!
//! # Components
//!
//! - [`MockGateway`] - Scripted inbox with call capture and failure toggles
//! - [`MockNotifier`] - Captures deliveries and fails on demand

pub mod mock_gateway;
pub mod mock_notifier;

pub use mock_gateway::{MockGateway, unread_sms};
pub use mock_notifier::MockNotifier;
