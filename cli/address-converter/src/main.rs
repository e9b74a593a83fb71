#![deny(clippy::unwrap_used)]

mod dispatch;
mod error;

use std::process::ExitCode;

use clap::Parser;
use primitives_address::Network;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Convert between Ethereum addresses (0x...) and Filecoin delegated
/// addresses (f410f... or t410f...).
///
/// On success the converted address is printed to stdout, otherwise a single
/// error line is printed to stderr and the exit status is non-zero.
#[derive(Debug, Parser)]
#[command(
    after_help = "Examples:\n  \
                  convert-address 0x351F3A0FAfc8fF97d5359f793A0e5d5206D9BB0D\n  \
                  convert-address f410fguptud5pzd7zpvjvt54tuds5kidntoyn3oivr6y"
)]
struct Cli {
    /// Ethereum or Filecoin delegated address.
    address: String,

    /// Network of the delegated address produced from an Ethereum address.
    /// Addresses converted to Ethereum keep the network of the input.
    #[arg(long, env = "FIL_NETWORK", value_enum, default_value_t = Network::Mainnet)]
    network: Network,

    /// Shorthand for `--network testnet`.
    #[arg(long)]
    testnet: bool,
}

impl Cli {
    fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            self.network
        }
    }
}

fn main() -> ExitCode {
    // Logger initialization. Logs go to stderr and stay quiet unless
    // `RUST_LOG` asks for them, stdout only ever carries the result.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::WARN.into())
                        .from_env_lossy(),
                )
                .with_filter(filter::filter_fn(|metadata| {
                    if let Some(module_path) = metadata.module_path() {
                        module_path.starts_with("convert_address")
                            || module_path.starts_with("primitives_address")
                    } else {
                        true
                    }
                })),
        )
        .init();

    let cli = Cli::parse();
    let network = cli.network();
    debug!(address = %cli.address, %network, "converting address");

    match dispatch::convert(&cli.address, network) {
        Ok(converted) => {
            println!("{converted}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(cause = ?err.address_error(), "conversion failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
