// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

/// Invariants every reachable record satisfies.
fn assert_invariants(record: &WorkspaceRequest) {
    assert!(
        record.services_within_spec(),
        "provisioned services outside spec: {record:?}"
    );
    if record.status.ready {
        assert_eq!(record.phase(), Phase::Complete);
        let required = record.spec.services();
        assert!(required
            .iter()
            .all(|s| record.status.provisioned_services.contains_key(s)));
    }
}

#[tokio::test]
async fn alice_runs_to_completion() {
    let ctx = setup();
    ctx.store(alice_request());

    let phases = ctx.drive("alice-dev").await;
    assert_eq!(
        phases,
        vec![
            Phase::New,
            Phase::ProvisionNamespace,
            Phase::RoleBindings,
            Phase::ProvisionServices,
            Phase::ProvisionedServices,
        ]
    );
    assert!(!ctx.stored("alice-dev").status.ready);

    ctx.set_all_ready(true);
    let phases = ctx.drive("alice-dev").await;

    assert_eq!(phases, vec![Phase::ProvisionedServices, Phase::Complete]);
    let done = ctx.stored("alice-dev");
    assert!(done.status.ready);
    assert_eq!(done.status.namespace, "alice-workspace");
    assert_eq!(done.status.provisioned_services.len(), 2);
    assert_invariants(&done);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const CATALOG: [&str; 4] = ["db", "cache", "mq", "search"];

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn phases_never_regress(
            wanted in proptest::sample::subsequence(CATALOG.to_vec(), 0..=4),
            offered in proptest::sample::subsequence(CATALOG.to_vec(), 0..=4),
            ready_after in 0usize..4,
        ) {
            let ctx = setup_with_classes(&offered);
            ctx.store(
                RequestBuilder::new("prop", "prop-user")
                    .services(&wanted)
                    .build(),
            );

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let mut last = Phase::New;
            for pass in 0..10 {
                if pass >= ready_after {
                    ctx.set_all_ready(true);
                }
                let before = ctx.stored("prop");
                let result = rt.block_on(ctx.step(&before));
                let after = ctx.stored("prop");

                match result {
                    Ok(Reconciled::Advanced { from, record }) => {
                        prop_assert_eq!(from, before.phase());
                        prop_assert_eq!(Some(record.phase()), from.next());
                        prop_assert_eq!(&record, &after);
                    }
                    Ok(_) | Err(_) => {
                        prop_assert_eq!(&before, &after);
                    }
                }

                prop_assert!(after.phase() >= last);
                last = after.phase();
                assert_invariants(&after);
            }

            let all_offered = wanted.iter().all(|w| offered.contains(w));
            if all_offered {
                prop_assert_eq!(last, Phase::Complete);
            } else {
                prop_assert_eq!(last, Phase::ProvisionServices);
            }
        }
    }
}
