//! Property-based tests for account partition isolation.
//!
//! Every window runs in the storage partition of its account, and the two
//! accounts never share a partition or a data directory.

#[path = "../support/fake_host.rs"]
mod fake_host;

use std::path::Path;

use fake_host::FakeHost;
use suiteshell::managers::lifecycle::{Lifecycle, LifecyclePolicy};
use suiteshell::managers::session_manager::SessionManager;
use suiteshell::services::partition::{partition_for, partition_for_name};
use suiteshell::types::account::{AccountType, Partition};
use suiteshell::types::app_type::AppType;
use suiteshell::types::window::OpenRequest;
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_account_type() -> impl Strategy<Value = AccountType> {
    prop_oneof![Just(AccountType::Personal), Just(AccountType::Work)]
}

fn arb_app_type() -> impl Strategy<Value = AppType> {
    proptest::sample::select(AppType::ALL.to_vec())
}

#[test]
fn partitions_are_distinct() {
    let personal = partition_for(AccountType::Personal);
    let work = partition_for(AccountType::Work);
    assert_ne!(personal, work);
    assert_eq!(personal.as_str(), "persist:personal");
    assert_eq!(work.as_str(), "persist:work");

    let root = Path::new("/data/suiteshell");
    assert_ne!(personal.data_dir(root), work.data_dir(root));
    assert!(personal.data_dir(root).starts_with(root));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn every_window_uses_its_account_partition(
        opens in proptest::collection::vec((arb_app_type(), arb_account_type()), 1..12),
    ) {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(Some(dir.path().join("session.json")));
        let mut lifecycle = Lifecycle::new(sessions, LifecyclePolicy::default());
        let mut host = FakeHost::new();

        for (app, account) in &opens {
            lifecycle
                .open_window(&mut host, OpenRequest::new(*app, *account))
                .unwrap();
        }

        let created = host.created();
        prop_assert_eq!(created.len(), opens.len());
        for (spec, (_, account)) in created.iter().zip(opens.iter()) {
            let expected = match account {
                AccountType::Personal => Partition::Personal,
                AccountType::Work => Partition::Work,
            };
            prop_assert_eq!(spec.partition, expected);
        }
    }

    #[test]
    fn unknown_account_names_resolve_to_personal(name in "[a-z]{0,12}") {
        prop_assume!(!matches!(name.as_str(), "work" | "business" | "school"));
        prop_assert_eq!(partition_for_name(&name), Partition::Personal);
    }

    #[test]
    fn work_names_resolve_to_work_in_any_case(
        name in prop_oneof![Just("work"), Just("business"), Just("school")],
        upper in any::<bool>(),
    ) {
        let name = if upper { name.to_ascii_uppercase() } else { name.to_string() };
        prop_assert_eq!(partition_for_name(&format!(" {name} ")), Partition::Work);
    }
}
