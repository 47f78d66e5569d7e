// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn phases_are_ordered_by_declaration() {
    for pair in Phase::ALL.windows(2) {
        assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
        assert_eq!(pair[0].next(), Some(pair[1]));
    }
}

#[test]
fn only_complete_is_terminal() {
    for phase in Phase::ALL {
        assert_eq!(phase.is_terminal(), phase == Phase::Complete);
    }
    assert_eq!(Phase::Complete.next(), None);
}

#[test]
fn default_phase_is_new() {
    assert_eq!(Phase::default(), Phase::New);
}

#[yare::parameterized(
    new                  = { Phase::New, "\"\"" },
    provision_namespace  = { Phase::ProvisionNamespace, "\"provision_namespace\"" },
    role_bindings        = { Phase::RoleBindings, "\"role_bindings\"" },
    provision_services   = { Phase::ProvisionServices, "\"provision_services\"" },
    provisioned_services = { Phase::ProvisionedServices, "\"provisioned_services\"" },
    complete             = { Phase::Complete, "\"complete\"" },
)]
fn wire_name(phase: Phase, json: &str) {
    assert_eq!(serde_json::to_string(&phase).unwrap(), json);
    assert_eq!(serde_json::from_str::<Phase>(json).unwrap(), phase);
    assert_eq!(format!("\"{}\"", phase.as_str()), json);
}

#[test]
fn display_names_new_phase() {
    assert_eq!(Phase::New.to_string(), "new");
    assert_eq!(Phase::RoleBindings.to_string(), "role_bindings");
}
