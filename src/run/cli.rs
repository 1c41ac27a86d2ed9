use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Database;
use crate::files::UploadDir;
use crate::models::TransactionType;
use crate::services::{
    CreateTransactionRequest, ImportOptions, TransactionCreator, TransactionDeleter,
    TransactionImporter, TransactionLister, UnresolvedPolicy,
};
use crate::store::LedgerStore;

/// Record income and outcome transactions by category.
#[derive(Parser, Debug)]
#[command(name = "ledger", version, about, long_about = None)]
pub(crate) struct Cli {
    /// File path to the ledger SQLite database.
    #[arg(long, env = "LEDGER_DB", global = true)]
    pub(crate) db: Option<PathBuf>,

    /// Directory that import file names are resolved against.
    #[arg(long, env = "LEDGER_UPLOAD_DIR", global = true)]
    pub(crate) upload_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub(crate) enum Command {
    /// Record a single transaction
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, value_parser = parse_value)]
        value: Decimal,
        /// income or outcome
        #[arg(long = "type", value_parser = parse_type)]
        kind: TransactionType,
        #[arg(long)]
        category: String,
    },
    /// Import a CSV file with title,type,value,category columns, then delete it
    Import {
        /// File name inside the upload directory, or an absolute path
        file: String,
        /// Leave out rows whose category cannot be resolved instead of failing
        #[arg(long)]
        skip_unresolved: bool,
    },
    /// List all transactions with the current balance
    List,
    /// Print income, outcome and total
    Balance,
    /// List all categories
    Categories,
    /// Delete a transaction by ID
    Delete { id: i64 },
}

pub(crate) fn as_cli(command: Command, config: &Config, db: &mut Database) -> Result<()> {
    match command {
        Command::Add {
            title,
            value,
            kind,
            category,
        } => cli_add(
            CreateTransactionRequest {
                title,
                value,
                kind,
                category,
            },
            db,
        ),
        Command::Import {
            file,
            skip_unresolved,
        } => cli_import(&file, skip_unresolved, config, db),
        Command::List => cli_list(db),
        Command::Balance => cli_balance(db),
        Command::Categories => cli_categories(db),
        Command::Delete { id } => {
            TransactionDeleter::new(&*db).delete(id)?;
            println!("Deleted transaction {id}");
            Ok(())
        }
    }
}

fn parse_value(s: &str) -> std::result::Result<Decimal, String> {
    crate::import::parse_decimal(s)
}

fn parse_type(s: &str) -> std::result::Result<TransactionType, String> {
    TransactionType::parse(&s.to_lowercase()).ok_or_else(|| {
        let expected: Vec<&str> = TransactionType::all().iter().map(|t| t.as_str()).collect();
        format!("expected one of: {}", expected.join(", "))
    })
}

fn cli_add(request: CreateTransactionRequest, db: &mut Database) -> Result<()> {
    let category = request.category.trim().to_string();
    let txn = TransactionCreator::new(&*db).create(request)?;
    println!(
        "Recorded {} #{} {:<20} ${:.2} [{category}]",
        txn.kind,
        txn.id.unwrap_or(0),
        txn.title,
        txn.value,
    );
    Ok(())
}

fn cli_import(file: &str, skip_unresolved: bool, config: &Config, db: &mut Database) -> Result<()> {
    let files = UploadDir::new(&config.upload_dir);
    let options = ImportOptions {
        on_unresolved: if skip_unresolved {
            UnresolvedPolicy::Skip
        } else {
            UnresolvedPolicy::Abort
        },
    };

    let outcome = TransactionImporter::new(db, &files).import(file, options)?;
    println!(
        "Imported {} transactions ({} new categories)",
        outcome.transactions.len(),
        outcome.new_categories
    );
    if outcome.skipped_rows > 0 {
        println!("Skipped {} incomplete rows", outcome.skipped_rows);
    }
    for row in &outcome.unresolved {
        println!("  Row {}: no category for '{}'", row.line, row.category);
    }
    Ok(())
}

fn cli_list(db: &mut Database) -> Result<()> {
    let listing = TransactionLister::new(&*db).list()?;
    if listing.transactions.is_empty() {
        println!("No transactions");
    } else {
        println!(
            "{:<4} {:<24} {:<8} {:>12} Category",
            "ID", "Title", "Type", "Value"
        );
        println!("{}", "─".repeat(64));
        for item in &listing.transactions {
            let txn = &item.transaction;
            println!(
                "{:<4} {:<24} {:<8} {:>12} {}",
                txn.id.unwrap_or(0),
                txn.title,
                txn.kind,
                format!("{:.2}", txn.signed_value()),
                item.category.as_ref().map(|c| c.title.as_str()).unwrap_or("-"),
            );
        }
        println!();
    }
    print_balance(&listing.balance);
    Ok(())
}

fn cli_balance(db: &mut Database) -> Result<()> {
    let balance = db.compute_balance()?;
    print_balance(&balance);
    Ok(())
}

fn print_balance(balance: &crate::models::Balance) {
    println!("  Income:   ${:.2}", balance.income);
    println!("  Outcome:  ${:.2}", balance.outcome);
    println!("  Total:    ${:.2}", balance.total);
}

fn cli_categories(db: &mut Database) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<4} Title", "ID");
    println!("{}", "─".repeat(30));
    for cat in &categories {
        println!("{:<4} {cat}", cat.id);
    }
    Ok(())
}
