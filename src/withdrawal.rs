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

//! Withdrawal results and clearing modes.

use crate::allocation::Allocation;
use crate::base::AuthorizationId;
use serde::{Deserialize, Serialize};

/// How a held withdrawal is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearType {
    /// Cash physically left the machine; the held notes are gone for good.
    Clearing,
    /// The withdrawal was cancelled; the held notes return to the vault.
    Reversal,
}

/// Outcome of an authorization or clearing call.
///
/// `authorization_id` is `None` exactly when `allocation` is empty: no hold
/// was stored, so there is nothing a later clearing could reference. Callers
/// must check [`Allocation::is_empty`] rather than treat exhaustion as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Withdrawal {
    pub authorization_id: Option<AuthorizationId>,
    pub allocation: Allocation,
}
