// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use indexmap::IndexSet;

fn services(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn resolves_in_required_order() {
    let classes = vec![ServiceClass::new("c1", "cache"), ServiceClass::new("c2", "db")];

    let resolved = resolve(&services(&["db", "cache"]), &classes).unwrap();

    let pairs: Vec<(&str, &str)> = resolved
        .iter()
        .map(|(s, c)| (s.as_str(), c.id.as_str()))
        .collect();
    assert_eq!(pairs, vec![("db", "c2"), ("cache", "c1")]);
}

#[test]
fn reports_missing_and_ambiguous_together() {
    let classes = vec![
        ServiceClass::new("c1", "db"),
        ServiceClass::new("m1", "mq"),
        ServiceClass::new("m2", "mq"),
    ];

    let err = resolve(&services(&["db", "cache", "mq"]), &classes).unwrap_err();

    match err {
        PhaseError::CatalogResolution { unresolved } => assert_eq!(
            unresolved,
            vec![
                UnresolvedService {
                    name: "cache".into(),
                    matches: 0
                },
                UnresolvedService {
                    name: "mq".into(),
                    matches: 2
                },
            ]
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn match_is_exact() {
    let classes = vec![ServiceClass::new("c1", "DB"), ServiceClass::new("c2", "db-large")];

    let err = resolve(&services(&["db"]), &classes).unwrap_err();

    assert_eq!(err.kind(), crate::ErrorKind::CatalogResolution);
}
