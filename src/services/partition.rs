//! Partition Resolver.
//!
//! Maps an account identity to its isolated storage partition. Two different
//! accounts never share a partition.

use crate::types::account::{AccountType, Partition};

/// Returns the storage partition for `account`.
pub fn partition_for(account: AccountType) -> Partition {
    match account {
        AccountType::Personal => Partition::Personal,
        AccountType::Work => Partition::Work,
    }
}

/// Resolves a partition from a loosely-typed account name (e.g. a raw setting value).
///
/// Unknown names resolve to the personal partition.
pub fn partition_for_name(account: &str) -> Partition {
    partition_for(AccountType::parse(account))
}
