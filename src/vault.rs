// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Denomination inventory.
//!
//! # Example
//!
//! ```
//! use atm_demo_rs::{Denomination, Vault};
//! use rust_decimal_macros::dec;
//! use std::collections::BTreeMap;
//!
//! let mut vault = Vault::default();
//! vault.set_count(Denomination(dec!(100)), dec!(40)).unwrap();
//! assert_eq!(vault.count_of(Denomination(dec!(100))), dec!(40));
//! ```

use crate::base::Denomination;
use crate::error::AtmError;
use log::warn;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sorted denomination-to-available-count map.
///
/// Counts never go negative, and an entry whose count reaches zero is
/// removed, so every key present is actually stocked. The vault is a plain
/// data structure: the [`Atm`](crate::Atm) owns it behind its critical
/// section and is the only component that mutates it. Callers only ever see
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vault {
    counts: BTreeMap<Denomination, Decimal>,
}

impl Vault {
    /// Builds a vault from an initial inventory.
    ///
    /// Entries follow [`Vault::set_all_counts`] policy: negative counts are
    /// logged and skipped, zero counts are simply not stored.
    pub fn new(initial: BTreeMap<Denomination, Decimal>) -> Self {
        let mut vault = Vault::default();
        vault.set_all_counts(&initial);
        vault
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.counts.values().all(|count| *count > Decimal::ZERO),
            "Invariant violated: vault holds a non-positive count"
        );
    }

    /// Returns the known denominations, largest first.
    ///
    /// Re-derived from live contents on every call; the returned vector is
    /// the caller's own copy.
    pub fn denominations(&self) -> Vec<Denomination> {
        self.counts.keys().rev().copied().collect()
    }

    /// Smallest stocked denomination, if any.
    pub fn min_denomination(&self) -> Option<Denomination> {
        self.counts.keys().next().copied()
    }

    /// Returns the available count for `denomination`, zero if absent.
    pub fn count_of(&self, denomination: Denomination) -> Decimal {
        self.counts
            .get(&denomination)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns an independent copy of the full denomination-to-count map.
    pub fn all_counts(&self) -> BTreeMap<Denomination, Decimal> {
        self.counts.clone()
    }

    /// Total cash value of the vault: sum of denomination times count.
    pub fn total_value(&self) -> Decimal {
        self.counts
            .iter()
            .map(|(denomination, count)| denomination.value() * *count)
            .sum()
    }

    /// True when no denomination is stocked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Replaces the count for `denomination`, returning the previous count
    /// (zero if the entry did not exist).
    ///
    /// A zero count removes the entry. This is the only mutation primitive:
    /// increments and decrements are expressed by the caller as read, compute,
    /// set.
    ///
    /// # Errors
    ///
    /// [`AtmError::NegativeCount`] if `count` is negative; the vault is left
    /// untouched.
    pub fn set_count(
        &mut self,
        denomination: Denomination,
        count: Decimal,
    ) -> Result<Decimal, AtmError> {
        if count < Decimal::ZERO {
            return Err(AtmError::NegativeCount);
        }
        let previous = if count == Decimal::ZERO {
            self.counts.remove(&denomination)
        } else {
            self.counts.insert(denomination, count)
        };
        self.assert_invariants();
        Ok(previous.unwrap_or(Decimal::ZERO))
    }

    /// Applies [`Vault::set_count`] semantics for every entry in `updates`.
    ///
    /// Negative counts are logged at warn level and skipped; the rest of the
    /// batch still applies. Skipped entries are never written, so the policy
    /// degrades a partially invalid batch instead of aborting it. Returns the
    /// full snapshot from before the update.
    pub fn set_all_counts(
        &mut self,
        updates: &BTreeMap<Denomination, Decimal>,
    ) -> BTreeMap<Denomination, Decimal> {
        let previous = self.counts.clone();
        for (denomination, count) in updates {
            if self.set_count(*denomination, *count).is_err() {
                warn!("skipping negative count {count} for denomination {denomination}");
            }
        }
        previous
    }
}
