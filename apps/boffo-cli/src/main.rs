//! # boffo
//!
//! Command-line front end for the Boffo list endpoints.
//!
//! ```text
//! boffo list payments --method MPESA --from 2024-01-01 --to 2024-01-31
//! boffo list stock-movements --owner-type RESELLER --reseller-id 4 --page 2
//! boffo reseller 4
//! boffo stats admin payments
//! ```

mod cli;

use std::process::ExitCode;

use clap::Parser;

use boffo_client::logging::{init_tracing, DEFAULT_FILTER};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(DEFAULT_FILTER);

    match cli::Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {}", e.user_message());
            if let Some(hint) = e.retry_hint() {
                eprintln!("hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
