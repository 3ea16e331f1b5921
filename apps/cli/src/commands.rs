use anyhow::Context;
use ecinv_cipher::{EnvelopeCipher, UnpadPolicy};
use ecinv_client::{Client, ClientError};
use ecinv_domain::config::ClientConfig;
use ecinv_domain::invoice::{
    AllowanceInvalidRequest, AllowanceInvoiceRequest, InvalidInvoiceRequest, IssueInvoiceRequest,
    QueryInvoiceRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::args::Command;

/// Runs one command and returns what should be printed.
pub(crate) async fn execute(command: Command, config: &ClientConfig) -> anyhow::Result<String> {
    match command {
        Command::Seal { input } => {
            let plaintext = fs::read(&input).with_context(|| format!("Reading {}", input.display()))?;
            Ok(offline_cipher(config)?.seal(plaintext)?)
        },
        Command::Open { input } => {
            let sealed =
                fs::read_to_string(&input).with_context(|| format!("Reading {}", input.display()))?;
            let plaintext = offline_cipher(config)?.open(&sealed)?;
            Ok(render_payload(&plaintext))
        },
        Command::Issue { payload } => {
            let request: IssueInvoiceRequest = read_payload(&payload)?;
            pretty(&client(config)?.issue_invoice(&request).await?)
        },
        Command::Allowance { payload } => {
            let request: AllowanceInvoiceRequest = read_payload(&payload)?;
            pretty(&client(config)?.issue_allowance(&request).await?)
        },
        Command::Query { relate_number, invoice_no, invoice_date } => {
            let request = QueryInvoiceRequest { relate_number, invoice_no, invoice_date };
            pretty(&client(config)?.query_invoice(&request).await?)
        },
        Command::Invalidate { invoice_no, invoice_date, reason } => {
            let request = InvalidInvoiceRequest { invoice_no, invoice_date, reason };
            pretty(&client(config)?.invalidate_invoice(&request).await?)
        },
        Command::AllowanceInvalid { invoice_no, allowance_no, reason } => {
            let request = AllowanceInvalidRequest { invoice_no, allowance_no, reason };
            pretty(&client(config)?.invalidate_allowance(&request).await?)
        },
    }
}

fn client(config: &ClientConfig) -> Result<Client, ClientError> {
    Client::new(config)
}

/// Cipher built from the key and IV alone; seal and open need no merchant or endpoint.
fn offline_cipher(config: &ClientConfig) -> anyhow::Result<EnvelopeCipher> {
    let policy = if config.strict_padding { UnpadPolicy::Strict } else { UnpadPolicy::Lenient };
    Ok(EnvelopeCipher::builder()
        .secret(&config.hash_key, &config.hash_iv)
        .unpad_policy(policy)
        .diagnostics(config.debug)
        .build()?)
}

fn read_payload<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    serde_json::from_slice(&raw)
        .map_err(ClientError::from)
        .with_context(|| format!("Payload {}", path.display()))
}

fn pretty<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Pretty JSON when the payload is JSON, lossy UTF-8 otherwise.
fn render_payload(plaintext: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(plaintext)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(plaintext).into_owned())
}
