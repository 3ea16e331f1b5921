use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STAGE_KEY: &str = "ejCk326UnaZWKisg";
const STAGE_IV: &str = "q9jcZX8Ib9LM8wYk";

fn ecinv() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ecinv"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, merchant_id: &str, environment: &str) -> std::path::PathBuf {
    let path = dir.join("ecinv.toml");
    fs::write(
        &path,
        format!(
            "[client]\nmerchant_id = \"{merchant_id}\"\nhash_key = \"{STAGE_KEY}\"\nhash_iv = \"{STAGE_IV}\"\nenvironment = \"{environment}\"\ntimeout_secs = 5\n\n[log]\nlevel = \"warn\"\n"
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    ecinv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("seal").and(predicate::str::contains("allowance-invalid")));
}

#[test]
fn test_seal_then_open() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "2000132", "staging");

    let payload = dir.path().join("payload.json");
    fs::write(&payload, r#"{"RelateNumber":"ORD001","CustomerName":"測試 客戶"}"#).unwrap();

    let sealed = ecinv().arg("--config").arg(&config).arg("seal").arg("--input").arg(&payload).output().unwrap();
    assert!(sealed.status.success());

    let sealed_file = dir.path().join("sealed.txt");
    fs::write(&sealed_file, &sealed.stdout).unwrap();

    let opened = ecinv().arg("--config").arg(&config).arg("open").arg("--input").arg(&sealed_file).output().unwrap();
    assert!(opened.status.success());

    let value: Value = serde_json::from_slice(&opened.stdout).unwrap();
    assert_eq!(value, json!({"RelateNumber": "ORD001", "CustomerName": "測試 客戶"}));
}

#[test]
fn test_missing_merchant_id_prints_taxonomy_code() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "", "staging");

    ecinv()
        .arg("--config")
        .arg(&config)
        .args(["query", "--relate-number", "ORD001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VALIDATION_ERROR"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    ecinv()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["query", "--relate-number", "ORD001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_ERROR"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_against_mock_server() {
    let server = MockServer::start().await;
    let cipher = ecinv_cipher::EnvelopeCipher::builder().secret(STAGE_KEY, STAGE_IV).build().unwrap();
    let data = cipher
        .seal(json!({"RtnCode": 1, "RtnMsg": "OK", "InvoiceNo": "AB12345678", "InvoiceStatus": "1"}).to_string())
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/Query/Issue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MerchantID": 2_000_132,
            "TransCode": 1,
            "TransMsg": "Success",
            "Data": data,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "2000132", &server.uri());

    let output = tokio::task::spawn_blocking(move || {
        ecinv().arg("--config").arg(&config).args(["query", "--relate-number", "ORD001"]).output()
    })
    .await
    .unwrap()
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["InvoiceNo"], "AB12345678");
    drop(dir);
}
