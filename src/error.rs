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

//! Error types for vault and withdrawal operations.

use thiserror::Error;

/// ATM operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtmError {
    /// Requested amount is zero or negative
    #[error("amount must be positive")]
    InvalidAmount,

    /// Requested amount is smaller than the smallest stocked denomination
    #[error("amount is below the minimum denomination")]
    AmountBelowMinimum,

    /// Requested amount cannot be decomposed into whole notes
    #[error("amount is not a multiple of the minimum denomination")]
    AmountNotMultiple,

    /// The vault has no denominations configured at all
    #[error("no denominations configured")]
    NoInventory,

    /// A vault mutation attempted to store a negative count
    #[error("denomination count cannot be negative")]
    NegativeCount,

    /// Unknown or already-resolved authorization identifier
    #[error("authorization already cleared or not found")]
    AuthorizationNotFound,
}
