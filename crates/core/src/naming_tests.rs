// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn namespace_is_derived_from_user() {
    assert_eq!(namespace_for_user("alice"), "alice-workspace");
}

#[test]
fn binding_name_is_deterministic() {
    let request = RequestId::new("alice-dev");
    let name = binding_name(&request, "edit");
    assert!(name.starts_with("edit-alice-dev-"), "{name}");
    assert!(is_dns_label(&name));
    assert_eq!(name, binding_name(&request, "edit"));
    assert_ne!(name, binding_name(&request, "view"));
}

#[test]
fn instance_name_keeps_a_readable_head() {
    let request = RequestId::new("Alice.Dev");
    let name = instance_name(&request, "my_cache");
    assert!(name.starts_with("my-cache-alice-dev-"), "{name}");
    assert_eq!(name.len(), "my-cache-alice-dev-".len() + 10);
    assert!(is_dns_label(&name));
}

#[yare::parameterized(
    case_only         = { "alice-dev", "DB", "alice-dev", "db" },
    punctuation       = { "alice-dev", "my_db", "alice-dev", "my.db" },
    shifted_separator = { "x-y", "db", "y", "db-x" },
    slash_in_service  = { "c", "a/b", "b/c", "a" },
)]
fn instance_names_of_distinct_pairs_differ(req_a: &str, svc_a: &str, req_b: &str, svc_b: &str) {
    let a = instance_name(&RequestId::new(req_a), svc_a);
    let b = instance_name(&RequestId::new(req_b), svc_b);
    assert_ne!(a, b);
}

#[test]
fn unprintable_input_still_yields_a_label() {
    let name = instance_name(&RequestId::new("---"), "__");
    assert_eq!(name.len(), 10);
    assert!(is_dns_label(&name), "{name}");
}

#[test]
fn long_names_are_shortened_with_hash() {
    let request = RequestId::new("r".repeat(80));
    let a = instance_name(&request, "postgresql");
    let b = instance_name(&request, "postgresqm");

    assert!(a.len() <= 63, "{a} too long");
    assert!(is_dns_label(&a));
    assert_ne!(a, b);
    assert_eq!(a, instance_name(&request, "postgresql"));
}

#[yare::parameterized(
    simple           = { "alice-workspace", true },
    digits           = { "a1-2b", true },
    single_char      = { "a", true },
    empty            = { "", false },
    uppercase        = { "Alice-workspace", false },
    leading_dash     = { "-alice", false },
    trailing_dash    = { "alice-", false },
    underscore       = { "al_ice", false },
    dot              = { "al.ice", false },
    max_len          = { "a23456789012345678901234567890123456789012345678901234567890123", true },
    over_max_len     = { "a234567890123456789012345678901234567890123456789012345678901234", false },
)]
fn dns_label(name: &str, valid: bool) {
    assert_eq!(is_dns_label(name), valid);
}

#[test]
fn user_roles_grant_edit() {
    assert_eq!(USER_ROLES, &["edit"]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn derived_names_are_always_labels(request in ".{0,90}", service in ".{0,40}") {
            let name = instance_name(&RequestId::new(request), &service);
            prop_assert!(is_dns_label(&name), "{}", name);
        }
    }
}
