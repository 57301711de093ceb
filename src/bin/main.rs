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

use atm_demo_rs::{Atm, Denomination};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use log::{error, info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use std::thread;

/// ATM Demo - Concurrent cash withdrawals against a shared inventory
///
/// Seeds a vault from a CSV inventory file (or a built-in showcase
/// inventory), runs each requested withdrawal on its own thread, and writes
/// the final balance to stdout.
#[derive(Parser, Debug)]
#[command(name = "atm-demo-rs")]
#[command(about = "An ATM cash-inventory engine demo", long_about = None)]
struct Args {
    /// Path to CSV file with the initial inventory
    ///
    /// Expected format: denomination,count
    /// Example: cargo run -- inventory.csv --withdraw 10200
    #[arg(value_name = "FILE")]
    inventory: Option<PathBuf>,

    /// Amount to withdraw; repeat the flag to run several withdrawals, one
    /// thread each
    #[arg(short, long = "withdraw", value_name = "AMOUNT", default_values_t = [dec!(100), dec!(10200)])]
    withdrawals: Vec<Decimal>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let inventory = match &args.inventory {
        Some(path) => {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error opening file '{}': {}", path.display(), e);
                    process::exit(1);
                }
            };
            match load_inventory(BufReader::new(file)) {
                Ok(inventory) => inventory,
                Err(e) => {
                    eprintln!("Error reading inventory: {}", e);
                    process::exit(1);
                }
            }
        }
        None => showcase_inventory(),
    };

    let atm = Atm::new(inventory);
    info!("balance before withdrawals: {:?}", atm.check_balance());

    // One thread per withdrawal; the scope joins them all.
    thread::scope(|scope| {
        let atm = &atm;
        for &amount in &args.withdrawals {
            scope.spawn(move || execute_withdrawal(atm, amount));
        }
    });

    info!("balance after withdrawals: {:?}", atm.check_balance());

    if let Err(e) = write_balance(&atm, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// The original machine's seeded inventory, total value 40000.
fn showcase_inventory() -> BTreeMap<Denomination, Decimal> {
    BTreeMap::from([
        (Denomination(dec!(2000)), dec!(10)),
        (Denomination(dec!(500)), dec!(20)),
        (Denomination(dec!(200)), dec!(30)),
        (Denomination(dec!(100)), dec!(40)),
    ])
}

/// Raw CSV record matching the inventory format.
///
/// Fields: `denomination, count`
#[derive(Debug, Deserialize)]
struct InventoryRecord {
    denomination: Decimal,
    count: Decimal,
}

/// Reads an initial inventory from a CSV reader.
///
/// Malformed rows are logged at warn level and skipped; valid rows for the
/// same denomination overwrite earlier ones.
///
/// # CSV Format
///
/// ```csv
/// denomination,count
/// 2000,10
/// 500,20
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader itself fails.
fn load_inventory<R: Read>(reader: R) -> Result<BTreeMap<Denomination, Decimal>, csv::Error> {
    let mut inventory = BTreeMap::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<InventoryRecord>() {
        match result {
            Ok(record) => {
                inventory.insert(Denomination(record.denomination), record.count);
            }
            Err(e) => {
                warn!("skipping malformed inventory row: {}", e);
                continue;
            }
        }
    }

    Ok(inventory)
}

/// Runs a single withdrawal authorization and logs the outcome.
fn execute_withdrawal(atm: &Atm, amount: Decimal) {
    info!("withdrawal authorization for {}", amount);
    match atm.withdrawal_authorization(amount) {
        Ok(withdrawal) => match withdrawal.authorization_id {
            Some(id) => info!(
                "authorized {} under {}: {:?}",
                amount,
                id,
                withdrawal.allocation.notes()
            ),
            None => warn!("inventory exhausted, nothing allocated for {}", amount),
        },
        Err(e) => error!("authorization for {} failed: {}", amount, e),
    }
}

/// Writes the balance snapshot to a CSV writer.
///
/// # CSV Format
///
/// Columns: `denomination, count`, smallest denomination first.
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_balance<W: Write>(atm: &Atm, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(["denomination", "count"])?;
    for (denomination, count) in atm.check_balance() {
        wtr.write_record([denomination.to_string(), count.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
