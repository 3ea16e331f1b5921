use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ecinv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Issue, query and cancel e-invoices through the encrypted envelope API")]
pub(crate) struct Cli {
    /// Configuration file (TOML, JSON or YAML); `ECINV__*` variables override it
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Log request and response envelopes under `ecinv::diagnostics`
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Issue a B2C invoice from a JSON payload
    Issue {
        #[arg(short, long)]
        payload: PathBuf,
    },
    /// Query an invoice by its relate number
    Query {
        #[arg(short, long)]
        relate_number: String,
        #[arg(long)]
        invoice_no: Option<String>,
        #[arg(long)]
        invoice_date: Option<String>,
    },
    /// Invalidate an issued invoice
    Invalidate {
        #[arg(long)]
        invoice_no: String,
        /// Invoice date as `YYYY-MM-DD`
        #[arg(long)]
        invoice_date: String,
        #[arg(long)]
        reason: String,
    },
    /// Issue an allowance (credit note) from a JSON payload
    Allowance {
        #[arg(short, long)]
        payload: PathBuf,
    },
    /// Invalidate an allowance
    AllowanceInvalid {
        #[arg(long)]
        invoice_no: String,
        #[arg(long)]
        allowance_no: String,
        #[arg(long)]
        reason: String,
    },
    /// Seal a file with the configured key and IV and print the envelope data
    Seal {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Open sealed envelope data read from a file
    Open {
        #[arg(short, long)]
        input: PathBuf,
    },
}
