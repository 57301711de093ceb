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

//! Greedy denomination allocation.
//!
//! Both functions here are pure: they read a vault but never mutate it. The
//! [`Atm`](crate::Atm) runs them inside its critical section and applies the
//! matching decrements itself, so validation, allocation and the actual
//! claims are atomic as a whole.

use crate::base::Denomination;
use crate::error::AtmError;
use crate::vault::Vault;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of decomposing a requested amount into notes.
///
/// Maps each claimed denomination to the number of notes claimed, together
/// with the part of the request that could not be covered. Constructed per
/// call; never persisted beyond the hold that claims it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Allocation {
    notes: BTreeMap<Denomination, Decimal>,
    leftover: Decimal,
}

impl Allocation {
    /// Claimed notes per denomination.
    pub fn notes(&self) -> &BTreeMap<Denomination, Decimal> {
        &self.notes
    }

    /// Amount by which the allocation fell short of the request.
    pub fn leftover(&self) -> Decimal {
        self.leftover
    }

    /// True when the full requested amount was covered.
    pub fn is_fully_satisfied(&self) -> bool {
        self.leftover == Decimal::ZERO
    }

    /// True when no notes at all could be claimed.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Cash value of the claimed notes: sum of denomination times count.
    pub fn total(&self) -> Decimal {
        self.notes
            .iter()
            .map(|(denomination, count)| denomination.value() * *count)
            .sum()
    }
}

/// Checks that `amount` is withdrawable from `vault` at all.
///
/// Runs before any allocation so a failing request never mutates anything.
///
/// # Errors
///
/// - [`AtmError::InvalidAmount`] when `amount` is zero or negative.
/// - [`AtmError::NoInventory`] when the vault knows no denominations.
/// - [`AtmError::AmountBelowMinimum`] when `amount` is smaller than the
///   smallest stocked denomination.
/// - [`AtmError::AmountNotMultiple`] when `amount` cannot be expressed in
///   whole notes of the smallest stocked denomination.
pub fn validate(amount: Decimal, vault: &Vault) -> Result<(), AtmError> {
    if amount <= Decimal::ZERO {
        return Err(AtmError::InvalidAmount);
    }
    let minimum = vault.min_denomination().ok_or(AtmError::NoInventory)?;
    if amount < minimum.value() {
        return Err(AtmError::AmountBelowMinimum);
    }
    if amount % minimum.value() != Decimal::ZERO {
        return Err(AtmError::AmountNotMultiple);
    }
    Ok(())
}

/// Greedily decomposes `amount` into notes available in `vault`.
///
/// Walks denominations largest-first, claiming
/// `min(floor(remaining / denomination), available)` notes of each and
/// reducing the remainder accordingly. The vault itself is not touched; the
/// caller applies the matching decrements transactionally.
///
/// Greedy selection is not guaranteed optimal or complete for arbitrary
/// denomination sets; there is no fallback to an exact search. With canonical
/// currency sets it finds the exact decomposition whenever one exists, which
/// is the accepted trade-off here.
pub fn allocate(amount: Decimal, vault: &Vault) -> Allocation {
    let mut remaining = amount;
    let mut notes = BTreeMap::new();

    for denomination in vault.denominations() {
        let desired = (remaining / denomination.value()).floor();
        let claimed = desired.min(vault.count_of(denomination));
        if claimed > Decimal::ZERO {
            notes.insert(denomination, claimed);
            remaining -= claimed * denomination.value();
        }
    }

    Allocation {
        notes,
        leftover: remaining,
    }
}
