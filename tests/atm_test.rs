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

//! Atm public API integration tests.

use atm_demo_rs::{Atm, AtmError, AuthorizationId, ClearType, Denomination};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn denom(value: Decimal) -> Denomination {
    Denomination(value)
}

/// The showcase inventory: 20000 + 10000 + 6000 + 4000 = 40000 total.
fn showcase_atm() -> Atm {
    Atm::new(BTreeMap::from([
        (denom(dec!(2000)), dec!(10)),
        (denom(dec!(500)), dec!(20)),
        (denom(dec!(200)), dec!(30)),
        (denom(dec!(100)), dec!(40)),
    ]))
}

#[test]
fn check_balance_returns_full_snapshot() {
    let atm = showcase_atm();
    let balance = atm.check_balance();

    assert_eq!(balance.len(), 4);
    assert_eq!(balance[&denom(dec!(2000))], dec!(10));
    assert_eq!(atm.available_value(), dec!(40000));
}

#[test]
fn single_note_withdrawal() {
    let atm = showcase_atm();

    let withdrawal = atm.withdrawal_authorization(dec!(100)).unwrap();

    assert!(withdrawal.authorization_id.is_some());
    assert!(withdrawal.allocation.is_fully_satisfied());
    assert_eq!(
        withdrawal.allocation.notes(),
        &BTreeMap::from([(denom(dec!(100)), dec!(1))])
    );
}

/// The worked example: withdrawing 100 and 10200 from the showcase
/// inventory leaves `{2000:5, 500:20, 200:29, 100:39}`.
#[test]
fn greedy_allocation_example() {
    let atm = showcase_atm();

    let first = atm.withdrawal_authorization(dec!(100)).unwrap();
    assert_eq!(
        first.allocation.notes(),
        &BTreeMap::from([(denom(dec!(100)), dec!(1))])
    );

    let second = atm.withdrawal_authorization(dec!(10200)).unwrap();
    assert_eq!(
        second.allocation.notes(),
        &BTreeMap::from([(denom(dec!(2000)), dec!(5)), (denom(dec!(200)), dec!(1))])
    );
    assert!(second.allocation.is_fully_satisfied());

    assert_eq!(
        atm.check_balance(),
        BTreeMap::from([
            (denom(dec!(2000)), dec!(5)),
            (denom(dec!(500)), dec!(20)),
            (denom(dec!(200)), dec!(29)),
            (denom(dec!(100)), dec!(39)),
        ])
    );
}

#[test]
fn zero_amount_fails() {
    let atm = showcase_atm();
    let result = atm.withdrawal_authorization(Decimal::ZERO);
    assert_eq!(result.unwrap_err(), AtmError::InvalidAmount);
}

#[test]
fn negative_amount_fails() {
    let atm = showcase_atm();
    let result = atm.withdrawal_authorization(dec!(-500));
    assert_eq!(result.unwrap_err(), AtmError::InvalidAmount);
}

#[test]
fn amount_below_minimum_fails() {
    let atm = showcase_atm();
    let result = atm.withdrawal_authorization(dec!(60));
    assert_eq!(result.unwrap_err(), AtmError::AmountBelowMinimum);
}

#[test]
fn non_multiple_amounts_fail() {
    let atm = showcase_atm();
    for amount in [dec!(101), dec!(150), dec!(5555), dec!(10250)] {
        let result = atm.withdrawal_authorization(amount);
        assert_eq!(result.unwrap_err(), AtmError::AmountNotMultiple);
    }
}

#[test]
fn empty_machine_has_no_inventory() {
    let atm = Atm::default();
    let result = atm.withdrawal_authorization(dec!(100));
    assert_eq!(result.unwrap_err(), AtmError::NoInventory);
}

#[test]
fn failed_validation_leaves_balance_untouched() {
    let atm = showcase_atm();
    let before = atm.check_balance();

    let _ = atm.withdrawal_authorization(dec!(150));

    assert_eq!(atm.check_balance(), before);
    assert_eq!(atm.pending_holds(), 0);
}

#[test]
fn clearing_removes_cash_permanently() {
    let atm = showcase_atm();

    let withdrawal = atm.withdrawal_authorization(dec!(10200)).unwrap();
    let id = withdrawal.authorization_id.unwrap();

    let cleared = atm.withdrawal_clearing(id, ClearType::Clearing).unwrap();
    assert_eq!(cleared.allocation, withdrawal.allocation);
    assert_eq!(cleared.authorization_id, Some(id));

    // 40000 - 10200 gone for good
    assert_eq!(atm.available_value(), dec!(29800));
    assert_eq!(atm.pending_holds(), 0);
}

#[test]
fn reversal_restores_exact_prior_balance() {
    let atm = showcase_atm();
    let before = atm.check_balance();

    let withdrawal = atm.withdrawal_authorization(dec!(10200)).unwrap();
    assert_ne!(atm.check_balance(), before);

    let id = withdrawal.authorization_id.unwrap();
    atm.withdrawal_clearing(id, ClearType::Reversal).unwrap();

    assert_eq!(atm.check_balance(), before);
    assert_eq!(atm.pending_holds(), 0);
}

#[test]
fn double_clear_fails_with_not_found() {
    let atm = showcase_atm();

    let withdrawal = atm.withdrawal_authorization(dec!(500)).unwrap();
    let id = withdrawal.authorization_id.unwrap();

    atm.withdrawal_clearing(id, ClearType::Clearing).unwrap();

    let result = atm.withdrawal_clearing(id, ClearType::Reversal);
    assert_eq!(result.unwrap_err(), AtmError::AuthorizationNotFound);
}

#[test]
fn unknown_authorization_fails_with_not_found() {
    let atm = showcase_atm();

    let result = atm.withdrawal_clearing(AuthorizationId::generate(), ClearType::Clearing);
    assert_eq!(result.unwrap_err(), AtmError::AuthorizationNotFound);
}

#[test]
fn authorization_ids_are_unique() {
    let atm = showcase_atm();

    let first = atm.withdrawal_authorization(dec!(100)).unwrap();
    let second = atm.withdrawal_authorization(dec!(100)).unwrap();

    assert_ne!(first.authorization_id, second.authorization_id);
    assert_eq!(atm.pending_holds(), 2);
}

/// Partial allocations still create a hold for whatever was claimed; the
/// shortfall is reported via the allocation's leftover.
#[test]
fn partial_allocation_holds_claimed_notes_only() {
    let atm = Atm::new(BTreeMap::from([(denom(dec!(2000)), dec!(2))]));

    let withdrawal = atm.withdrawal_authorization(dec!(6000)).unwrap();

    assert!(!withdrawal.allocation.is_fully_satisfied());
    assert_eq!(withdrawal.allocation.leftover(), dec!(2000));
    assert_eq!(withdrawal.allocation.total(), dec!(4000));
    assert!(withdrawal.authorization_id.is_some());

    // The machine is now empty, with one hold outstanding
    assert_eq!(atm.available_value(), Decimal::ZERO);
    assert_eq!(atm.pending_holds(), 1);

    // Reversing the partial hold brings back exactly the claimed notes
    let id = withdrawal.authorization_id.unwrap();
    atm.withdrawal_clearing(id, ClearType::Reversal).unwrap();
    assert_eq!(
        atm.check_balance(),
        BTreeMap::from([(denom(dec!(2000)), dec!(2))])
    );
}

/// Draining a denomination removes its ledger entry, which in turn moves
/// the minimum-denomination validation rule.
#[test]
fn drained_denomination_disappears_from_balance() {
    let atm = Atm::new(BTreeMap::from([
        (denom(dec!(500)), dec!(1)),
        (denom(dec!(100)), dec!(1)),
    ]));

    atm.withdrawal_authorization(dec!(100)).unwrap();
    assert_eq!(
        atm.check_balance(),
        BTreeMap::from([(denom(dec!(500)), dec!(1))])
    );

    // 100 is no longer stocked, so the minimum denomination is now 500
    let result = atm.withdrawal_authorization(dec!(100));
    assert_eq!(result.unwrap_err(), AtmError::AmountBelowMinimum);
}

#[test]
fn interleaved_holds_resolve_independently() {
    let atm = showcase_atm();

    let first = atm.withdrawal_authorization(dec!(2000)).unwrap();
    let second = atm.withdrawal_authorization(dec!(2000)).unwrap();
    let third = atm.withdrawal_authorization(dec!(2000)).unwrap();

    atm.withdrawal_clearing(first.authorization_id.unwrap(), ClearType::Clearing)
        .unwrap();
    atm.withdrawal_clearing(second.authorization_id.unwrap(), ClearType::Reversal)
        .unwrap();

    // One cleared (gone), one reversed (back), one still held
    assert_eq!(atm.available_value(), dec!(40000) - dec!(2000) - dec!(2000));
    assert_eq!(atm.pending_holds(), 1);

    atm.withdrawal_clearing(third.authorization_id.unwrap(), ClearType::Reversal)
        .unwrap();
    assert_eq!(atm.available_value(), dec!(38000));
    assert_eq!(atm.pending_holds(), 0);
}
