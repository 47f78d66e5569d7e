// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spec normalization and validation.
//!
//! This is the only place client input is checked. Everything downstream
//! assumes a spec that passed [`RequestSpec::validate`].

use crate::naming::{is_dns_label, namespace_for_user};
use crate::request::RequestSpec;
use indexmap::IndexSet;
use thiserror::Error;

/// Reasons a spec is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("userName must not be empty")]
    EmptyUserName,
    #[error("userName {user:?} does not yield a valid namespace name ({namespace:?})")]
    InvalidUserName { user: String, namespace: String },
    #[error("requiredServices[{index}] is empty")]
    EmptyServiceName { index: usize },
    #[error("requiredServices[{index}] {name:?} has surrounding whitespace")]
    PaddedServiceName { index: usize, name: String },
}

impl RequestSpec {
    /// The user name with surrounding whitespace removed.
    pub fn user(&self) -> &str {
        self.user_name.trim()
    }

    /// Required services deduplicated in first-seen order.
    ///
    /// Duplicates collapse to a single provisioning attempt. Names are taken
    /// verbatim; [`validate`](Self::validate) rejects blank or padded ones,
    /// so every entry is literally one of `requiredServices`.
    pub fn services(&self) -> IndexSet<String> {
        self.required_services.iter().cloned().collect()
    }

    /// Check the request spec before any provisioning happens.
    pub fn validate(&self) -> Result<(), SpecError> {
        let user = self.user();
        if user.is_empty() {
            return Err(SpecError::EmptyUserName);
        }

        let namespace = namespace_for_user(user);
        if !is_dns_label(&namespace) {
            return Err(SpecError::InvalidUserName {
                user: user.to_string(),
                namespace,
            });
        }

        for (index, name) in self.required_services.iter().enumerate() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(SpecError::EmptyServiceName { index });
            }
            if trimmed.len() != name.len() {
                return Err(SpecError::PaddedServiceName {
                    index,
                    name: name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
