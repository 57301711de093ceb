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

//! Withdrawal coordination.
//!
//! The [`Atm`] is the central component: it owns the vault and the active
//! holds and drives the two-phase withdrawal lifecycle.
//!
//! - **Authorization**: validate the amount, claim notes greedily, store the
//!   hold.
//! - **Clearing**: drop the hold; the cash was dispensed.
//! - **Reversal**: drop the hold and return its notes to the vault.
//!
//! # Thread Safety
//!
//! A single `parking_lot::Mutex` around the vault is the critical section for
//! every ledger-mutating operation. Holds live in a [`DashMap`], but are
//! inserted and removed only while that lock is held, so hold state and
//! inventory state stay mutually consistent at every observable point. No
//! lock is ever nested or re-entered.

use crate::allocation::{self, Allocation};
use crate::base::{AuthorizationId, Denomination};
use crate::error::AtmError;
use crate::vault::Vault;
use crate::withdrawal::{ClearType, Withdrawal};
use dashmap::DashMap;
use log::warn;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Cash-inventory coordinator for a single machine.
///
/// # Invariants
///
/// - Every vault count is positive; zero-count entries are removed.
/// - A hold exists if and only if its notes have been decremented from the
///   vault and not yet cleared or reversed.
/// - Authorization identifiers are write-once: once a hold is cleared or
///   reversed, its identifier never resolves again.
//
//  (none) ──authorize──► held ──clearing──► cleared (notes gone for good)
//                          │
//                          └───reversal───► reversed (notes back in vault)
pub struct Atm {
    /// Inventory, guarded by the coordinator's single critical section.
    vault: Mutex<Vault>,
    /// Active holds indexed by authorization identifier.
    holds: DashMap<AuthorizationId, Allocation>,
}

impl Atm {
    /// Creates a coordinator over an initial inventory.
    ///
    /// Initial entries follow [`Vault::set_all_counts`] policy: negative
    /// counts are logged and skipped, zero counts are not stored.
    pub fn new(initial: BTreeMap<Denomination, Decimal>) -> Self {
        Atm {
            vault: Mutex::new(Vault::new(initial)),
            holds: DashMap::new(),
        }
    }

    /// Returns a consistent snapshot of the full denomination-to-count map.
    ///
    /// Takes the vault lock only long enough to clone the map; no other side
    /// effects.
    pub fn check_balance(&self) -> BTreeMap<Denomination, Decimal> {
        self.vault.lock().all_counts()
    }

    /// Total cash value currently available (holds excluded).
    pub fn available_value(&self) -> Decimal {
        self.vault.lock().total_value()
    }

    /// Number of holds awaiting clearing or reversal.
    pub fn pending_holds(&self) -> usize {
        self.holds.len()
    }

    /// Authorizes a withdrawal of `amount`, holding the allocated notes.
    ///
    /// Runs entirely inside the critical section: validation, greedy
    /// allocation and the per-denomination decrements happen atomically, so
    /// no concurrent caller can observe counts this call is about to claim.
    ///
    /// An exhausted inventory is *not* an error: the call returns an empty
    /// allocation with no authorization identifier, and no hold is stored.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] - `amount` is zero or negative.
    /// - [`AtmError::AmountBelowMinimum`] - `amount` is smaller than the
    ///   smallest stocked denomination.
    /// - [`AtmError::AmountNotMultiple`] - `amount` is not a whole multiple
    ///   of the smallest stocked denomination.
    /// - [`AtmError::NoInventory`] - the vault knows no denominations.
    ///
    /// On any error no ledger mutation has occurred.
    pub fn withdrawal_authorization(&self, amount: Decimal) -> Result<Withdrawal, AtmError> {
        let mut vault = self.vault.lock();

        allocation::validate(amount, &vault)?;

        let allocation = allocation::allocate(amount, &vault);

        // Claim the notes while still holding the lock.
        for (denomination, claimed) in allocation.notes() {
            let available = vault.count_of(*denomination);
            vault.set_count(*denomination, available - *claimed)?;
        }

        if allocation.is_empty() {
            warn!("no denominations available for withdrawal of {amount}");
            return Ok(Withdrawal {
                authorization_id: None,
                allocation,
            });
        }

        let authorization_id = AuthorizationId::generate();
        self.holds.insert(authorization_id, allocation.clone());

        Ok(Withdrawal {
            authorization_id: Some(authorization_id),
            allocation,
        })
    }

    /// Resolves a held withdrawal, either finalizing or cancelling it.
    ///
    /// | Clear type | Behavior |
    /// |------------|----------|
    /// | [`ClearType::Clearing`] | Hold deleted, vault untouched |
    /// | [`ClearType::Reversal`] | Hold deleted, held notes added back |
    ///
    /// Returns the (now removed) held allocation together with its
    /// identifier. The identifier is invalid for any further lifecycle
    /// operation afterwards.
    ///
    /// # Errors
    ///
    /// [`AtmError::AuthorizationNotFound`] - the identifier is unknown or was
    /// already resolved. The two cases are deliberately indistinguishable so
    /// a replayed clearing leaks nothing about past holds.
    pub fn withdrawal_clearing(
        &self,
        authorization_id: AuthorizationId,
        clear_type: ClearType,
    ) -> Result<Withdrawal, AtmError> {
        let mut vault = self.vault.lock();

        let (_, held) = self
            .holds
            .remove(&authorization_id)
            .ok_or(AtmError::AuthorizationNotFound)?;

        if clear_type == ClearType::Reversal {
            for (denomination, count) in held.notes() {
                let current = vault.count_of(*denomination);
                vault.set_count(*denomination, current + *count)?;
            }
        }

        Ok(Withdrawal {
            authorization_id: Some(authorization_id),
            allocation: held,
        })
    }
}

impl Default for Atm {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}
