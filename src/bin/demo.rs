#![forbid(unsafe_code)]
//! Demonstration driver: emission, transfers, destruction and blocking
//! against a freshly seeded ledger.

use clap::Parser;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use payledger::config::load_config;
use payledger::ledger::EMISSION_KEY;
use payledger::{iban, AccountStatus, Ledger, TransferRequest};
use std::path::PathBuf;
use tracing::warn;

const MY_IBAN: &str = "BY04CBDC00000000000000000000";
const MY_SECOND_IBAN: &str = "BY04CBDC00000000000000000001";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "payledger.toml")]
    config: PathBuf,

    /// Print account listings as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    let emission_iban = config.ledger.emission_iban.unwrap_or_else(iban::generate);
    let destruction_iban = config
        .ledger
        .destruction_iban
        .unwrap_or_else(iban::generate);

    let mut ledger = Ledger::new(emission_iban, destruction_iban);

    ledger.create_account(MY_IBAN)?;
    ledger.create_account(&iban::generate())?;
    ledger.create_account(MY_SECOND_IBAN)?;

    ledger.emit(config.demo.emission_amount)?;
    print_accounts(&ledger, "Accounts before operations", cli.json);

    ledger.transfer(EMISSION_KEY, MY_IBAN, config.demo.transfer_amount)?;
    print_accounts(&ledger, "After transfer from emission", cli.json);

    ledger.destroy(MY_IBAN, config.demo.destroy_amount)?;
    print_accounts(&ledger, "After destroying funds", cli.json);

    let request = TransferRequest {
        from_iban: EMISSION_KEY.to_string(),
        to_iban: MY_IBAN.to_string(),
        amount: config.demo.transfer_amount,
    };
    ledger.transfer_json(&serde_json::to_string(&request)?)?;
    print_accounts(&ledger, "After JSON transfer from emission", cli.json);

    ledger.block_account(MY_IBAN)?;
    print_accounts(&ledger, "After blocking my account", cli.json);

    if let Err(e) = ledger.transfer(MY_IBAN, MY_SECOND_IBAN, 33.0) {
        println!("{} {}", "Transfer from blocked account failed:".red(), e);
    }

    ledger.unblock_account(MY_IBAN)?;
    ledger.transfer(MY_IBAN, MY_SECOND_IBAN, config.demo.transfer_amount)?;
    print_accounts(&ledger, "After transfer to my second account", cli.json);

    Ok(())
}

/// Print an account listing. A serialization failure is reportable but
/// non-fatal: log it and move on.
fn print_accounts(ledger: &Ledger, heading: &str, json: bool) {
    println!();
    println!("{}", heading.bright_cyan().bold());

    let snapshot = ledger.snapshot();

    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(listing) => println!("{}", listing),
            Err(e) => warn!("Failed to serialize account listing: {}", e),
        }
        return;
    }

    let mut keys: Vec<_> = snapshot.keys().collect();
    keys.sort();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Key", "IBAN", "Balance", "Status"]);

    for key in keys {
        let account = &snapshot[key];
        let status = match account.status {
            AccountStatus::Active => Cell::new("active"),
            AccountStatus::Blocked => Cell::new("blocked"),
        };
        table.add_row(vec![
            Cell::new(key),
            Cell::new(&account.iban),
            Cell::new(format!("{:.2}", account.balance)),
            status,
        ]);
    }

    println!("{table}");
}
