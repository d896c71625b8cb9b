use clap::Parser;
use miette::{IntoDiagnostic, Result};
use smmvault::application::engine::VaultEngine;
use smmvault::config::VaultConfig;
use smmvault::domain::catalog::Catalog;
use smmvault::domain::payment::PaymentMethod;
use smmvault::domain::ports::SharedOrderStore;
use smmvault::infrastructure::in_memory::InMemoryOrderStore;
use smmvault::interfaces::csv::intent_reader::{IntentKind, IntentRecord, IntentReader};
use smmvault::interfaces::csv::order_writer::OrderWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input intent script CSV file
    script: PathBuf,

    /// Wait for scheduled order transitions to fire before reporting.
    #[arg(long)]
    settle: bool,

    /// Print the final read model as JSON instead of CSV.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let store: SharedOrderStore = Arc::new(InMemoryOrderStore::new());
    let engine = VaultEngine::new(store, Catalog::seeded(), VaultConfig::default());

    // Process intents
    let file = File::open(cli.script).into_diagnostic()?;
    let reader = IntentReader::new(file);
    for intent_result in reader.intents() {
        match intent_result {
            Ok(record) => {
                if let Err(e) = dispatch(&engine, record).await {
                    eprintln!("Error processing intent: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading intent: {}", e);
            }
        }
    }

    if cli.settle {
        // Outlive the longest scheduled transition so every order lands in
        // its final state before the report.
        tokio::time::sleep(engine.config().completion_delay + Duration::from_millis(250)).await;
    }

    // Output final read model
    let snapshot = engine.snapshot().await.into_diagnostic()?;
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).into_diagnostic()?
        );
    } else {
        let stdout = io::stdout();
        let mut writer = OrderWriter::new(stdout.lock());
        writer.write_orders(&snapshot.orders).into_diagnostic()?;
        println!("balance,{}", snapshot.balance);
    }

    Ok(())
}

/// Maps one raw script row onto an engine intent. Missing payload fields are
/// passed through empty; the engine owns all validation.
async fn dispatch(engine: &VaultEngine, record: IntentRecord) -> smmvault::error::Result<()> {
    let name = record.name.unwrap_or_default();
    let email = record.email.unwrap_or_default();
    let password = record.password.unwrap_or_default();
    let link = record.link.unwrap_or_default();

    match record.intent {
        IntentKind::Login => {
            engine.login(&email, &password).await?;
        }
        IntentKind::Signup => {
            engine
                .signup(&name, &email, &password, record.agreed.unwrap_or(false))
                .await?;
        }
        IntentKind::ResetPassword => {
            engine.reset_password_request(&email).await?;
        }
        IntentKind::Logout => {
            engine.logout().await?;
        }
        IntentKind::UpdateProfile => {
            engine.update_profile(&name, &email).await?;
        }
        IntentKind::AddFunds => {
            engine.add_funds(record.amount.unwrap_or_default()).await?;
        }
        IntentKind::SelectPayment => {
            let method = record.method.unwrap_or(PaymentMethod::QrScan);
            engine.select_payment_method(method).await?;
            if method == PaymentMethod::QrScan {
                // Stand-in for the camera flow: the core only learns about
                // the capture after the fixed scan delay.
                tokio::time::sleep(engine.config().qr_scan_delay).await;
                info!("payment info captured");
            }
        }
        IntentKind::PlaceOrder => {
            engine
                .place_order(
                    record.offering.unwrap_or_default(),
                    record.quantity.unwrap_or_default(),
                    &link,
                )
                .await?;
        }
    }
    Ok(())
}

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}
