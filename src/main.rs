use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use skyseat::application::engine::{ReservationSystem, SystemConfig};
use skyseat::application::shared;
use skyseat::domain::money::Money;
use skyseat::interfaces::console::Console;
use skyseat::interfaces::csv::customer_reader::CustomerReader;
use skyseat::interfaces::http::{self, AppState, ServerConfig};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Start without the default airplanes and customers
    #[arg(long, global = true)]
    no_seed: bool,

    /// Price of an economy seat; business seats cost twice as much
    #[arg(long, global = true, default_value = "50.00", value_parser = parse_price)]
    economy_price: Decimal,

    /// CSV file of customers (name, age, money) to register at startup
    #[arg(long, global = true)]
    customers: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Mode {
    /// Interactive menu on stdin/stdout (default)
    Console,
    /// JSON HTTP API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn parse_price(raw: &str) -> std::result::Result<Decimal, String> {
    let price: Decimal = raw.parse().map_err(|e| format!("{e}"))?;
    if price <= Decimal::ZERO {
        return Err("price must be greater than zero".to_string());
    }
    Ok(price)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyseat=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut system = ReservationSystem::new(SystemConfig {
        economy_price: Money::new(cli.economy_price),
        seed_defaults: !cli.no_seed,
    });

    if let Some(path) = cli.customers {
        let file = File::open(path).into_diagnostic()?;
        let reader = CustomerReader::new(file);
        for record in reader.customers() {
            match record {
                Ok(record) => {
                    system.add_customer(&record.name, record.age, record.money, false);
                }
                Err(e) => {
                    eprintln!("Error reading customer: {}", e);
                }
            }
        }
    }

    match cli.mode.unwrap_or(Mode::Console) {
        Mode::Console => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Console::new(&mut system, stdin.lock(), stdout.lock())
                .run()
                .into_diagnostic()?;
        }
        Mode::Serve { port } => {
            let state = AppState {
                reservations: shared(system),
            };
            let config = ServerConfig {
                port,
                ..ServerConfig::default()
            };
            http::serve(config, state).await.into_diagnostic()?;
        }
    }

    Ok(())
}
