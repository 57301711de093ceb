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

//! # ATM Demo
//!
//! This library simulates an automated teller machine's cash inventory: it
//! tracks how many notes of each denomination are stocked, authorizes
//! withdrawals by greedily allocating denominations, holds the allocated
//! cash against an authorization identifier, and later either clears
//! (finalizes) or reverses (cancels) the hold.
//!
//! ## Core Components
//!
//! - [`Atm`]: Withdrawal coordinator owning the vault and the active holds
//! - [`Vault`]: Sorted denomination-to-count inventory
//! - [`Allocation`]: Greedy denomination breakdown of a requested amount
//! - [`AtmError`]: Error types for validation and lifecycle failures
//!
//! ## Example
//!
//! ```
//! use atm_demo_rs::{Atm, ClearType, Denomination};
//! use rust_decimal_macros::dec;
//! use std::collections::BTreeMap;
//!
//! let atm = Atm::new(BTreeMap::from([
//!     (Denomination(dec!(500)), dec!(20)),
//!     (Denomination(dec!(100)), dec!(40)),
//! ]));
//!
//! // Authorize a withdrawal: 700 = 1 x 500 + 2 x 100
//! let withdrawal = atm.withdrawal_authorization(dec!(700)).unwrap();
//! assert!(withdrawal.allocation.is_fully_satisfied());
//!
//! // Finalize it: the held notes are gone for good.
//! let id = withdrawal.authorization_id.unwrap();
//! atm.withdrawal_clearing(id, ClearType::Clearing).unwrap();
//! ```
//!
//! ## Thread Safety
//!
//! Multiple callers may drive the same [`Atm`] from parallel threads. All
//! ledger-mutating operations run inside one critical section, so holds can
//! never double-spend inventory and counts never go negative; balance checks
//! only need a consistent snapshot read.

pub mod allocation;
mod atm;
pub mod base;
pub mod error;
mod vault;
mod withdrawal;

pub use allocation::Allocation;
pub use atm::Atm;
pub use base::{AuthorizationId, Denomination};
pub use error::AtmError;
pub use vault::Vault;
pub use withdrawal::{ClearType, Withdrawal};
