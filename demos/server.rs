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

//! Simple REST API server example for the ATM engine.
//!
//! Run with: `cargo run --example server`
//!
//! ## Endpoints
//!
//! - `GET /balance` - Full denomination-to-count snapshot
//! - `POST /withdrawals` - Authorize a withdrawal
//! - `POST /withdrawals/{id}/clearings` - Clear or reverse a held withdrawal
//!
//! ## Example Usage
//!
//! ```bash
//! # Check the balance
//! curl http://localhost:3000/balance
//!
//! # Authorize a withdrawal
//! curl -X POST http://localhost:3000/withdrawals \
//!   -H "Content-Type: application/json" \
//!   -d '{"amount": "10200"}'
//!
//! # Reverse it (id comes from the authorization response)
//! curl -X POST http://localhost:3000/withdrawals/<id>/clearings \
//!   -H "Content-Type: application/json" \
//!   -d '{"clear_type": "reversal"}'
//! ```

use atm_demo_rs::{Atm, AtmError, AuthorizationId, ClearType, Denomination, Withdrawal};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;

// === Request DTOs ===

/// Request body for authorizing a withdrawal.
#[derive(Debug, Deserialize)]
struct WithdrawalRequest {
    amount: Decimal,
}

/// Request body for clearing or reversing a held withdrawal.
#[derive(Debug, Deserialize)]
struct ClearingRequest {
    clear_type: ClearType,
}

// === Error Mapping ===

/// Wraps [`AtmError`] so it can be converted into an HTTP response.
struct AppError(AtmError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AtmError::AuthorizationNotFound => StatusCode::NOT_FOUND,
            AtmError::NoInventory => StatusCode::CONFLICT,
            AtmError::InvalidAmount
            | AtmError::AmountBelowMinimum
            | AtmError::AmountNotMultiple
            | AtmError::NegativeCount => StatusCode::BAD_REQUEST,
        };
        (status, self.0.to_string()).into_response()
    }
}

// === Handlers ===

async fn check_balance(State(atm): State<Arc<Atm>>) -> Json<BTreeMap<Denomination, Decimal>> {
    Json(atm.check_balance())
}

async fn authorize_withdrawal(
    State(atm): State<Arc<Atm>>,
    Json(request): Json<WithdrawalRequest>,
) -> Result<Json<Withdrawal>, AppError> {
    atm.withdrawal_authorization(request.amount)
        .map(Json)
        .map_err(AppError)
}

async fn clear_withdrawal(
    State(atm): State<Arc<Atm>>,
    Path(authorization_id): Path<AuthorizationId>,
    Json(request): Json<ClearingRequest>,
) -> Result<Json<Withdrawal>, AppError> {
    atm.withdrawal_clearing(authorization_id, request.clear_type)
        .map(Json)
        .map_err(AppError)
}

fn router(atm: Arc<Atm>) -> Router {
    Router::new()
        .route("/balance", get(check_balance))
        .route("/withdrawals", post(authorize_withdrawal))
        .route("/withdrawals/{id}/clearings", post(clear_withdrawal))
        .with_state(atm)
}

#[tokio::main]
async fn main() {
    let atm = Arc::new(Atm::new(BTreeMap::from([
        (Denomination(dec!(2000)), dec!(10)),
        (Denomination(dec!(500)), dec!(20)),
        (Denomination(dec!(200)), dec!(30)),
        (Denomination(dec!(100)), dec!(40)),
    ])));

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    println!("Listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, router(atm)).await.unwrap();
}
