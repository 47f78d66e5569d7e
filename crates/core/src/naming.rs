// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic names for provisioned objects.
//!
//! Every object the reconciler creates gets a name derived from the request,
//! so a retried phase collides with what an earlier pass already created
//! ("already exists") instead of creating a second copy.

use crate::id::RequestId;
use sha2::{Digest, Sha256};

/// Label put on every namespace and binding the provisioner creates.
pub const MANAGED_LABEL: &str = "workspace-provisioner.io/managed";

/// Cluster roles granted to the requesting user inside their namespace.
pub const USER_ROLES: &[&str] = &["edit"];

/// Suffix appended to the user name to form the namespace name.
const NAMESPACE_SUFFIX: &str = "-workspace";

/// Longest name a DNS-1123 label may have.
const MAX_LABEL_LEN: usize = 63;

/// Hex digits of the hash suffix on derived names.
const HASH_LEN: usize = 10;

/// Namespace owned by `user`: `<user>-workspace`.
pub fn namespace_for_user(user: &str) -> String {
    format!("{}{}", user, NAMESPACE_SUFFIX)
}

/// Name of the binding granting `role` for the given request.
pub fn binding_name(request: &RequestId, role: &str) -> String {
    derived_name(role, request.as_str())
}

/// Name of the service instance created for `service` on behalf of the request.
pub fn instance_name(request: &RequestId, service: &str) -> String {
    derived_name(service, request.as_str())
}

/// Whether `name` is a valid DNS-1123 label (what Kubernetes requires for
/// namespace names).
pub fn is_dns_label(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
        return false;
    }
    let allowed = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-';
    let alnum = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    bytes.iter().all(allowed) && bytes.first().is_some_and(alnum) && bytes.last().is_some_and(alnum)
}

/// `<prefix>-<owner>` stripped to label characters, followed by a hash of
/// the raw pair.
///
/// Sanitizing alone is lossy (`DB` and `db`, `my_db` and `my.db` map to the
/// same text), so the hash is always appended. The readable head is cut
/// short when the whole name would exceed the label limit.
fn derived_name(prefix: &str, owner: &str) -> String {
    // Length-prefixed so no (prefix, owner) split can alias another
    let digest = Sha256::digest(format!("{}:{}/{}", prefix.len(), prefix, owner).as_bytes());
    let hash = format!("{:x}", digest);
    let hash = &hash[..HASH_LEN];

    let full = sanitize(&format!("{}-{}", prefix, owner));
    let keep = MAX_LABEL_LEN - HASH_LEN - 1;
    let head: String = full.chars().take(keep).collect();
    let head = head.trim_end_matches('-');
    if head.is_empty() {
        hash.to_string()
    } else {
        format!("{}-{}", head, hash)
    }
}

fn sanitize(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_matches('-').to_string()
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
