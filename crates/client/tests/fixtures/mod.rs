#![allow(dead_code)]

use ecinv_cipher::EnvelopeCipher;
use ecinv_client::Client;
use ecinv_domain::config::{ClientConfig, Environment};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const MERCHANT_ID: &str = "2000132";
pub const STAGE_KEY: &str = "ejCk326UnaZWKisg";
pub const STAGE_IV: &str = "q9jcZX8Ib9LM8wYk";

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig {
        merchant_id: MERCHANT_ID.to_owned(),
        hash_key: STAGE_KEY.to_owned(),
        hash_iv: STAGE_IV.to_owned(),
        environment: Environment::Custom(base_url.to_owned()),
        timeout_secs: 5,
        ..ClientConfig::default()
    }
}

pub fn client_for(server: &MockServer) -> Client {
    Client::new(&config_for(&server.uri())).unwrap()
}

pub fn stage_cipher() -> EnvelopeCipher {
    EnvelopeCipher::builder().secret(STAGE_KEY, STAGE_IV).build().unwrap()
}

/// A response envelope carrying `payload` sealed with the stage key.
pub fn sealed_response(trans_code: i64, trans_msg: &str, payload: &Value) -> String {
    let data = stage_cipher().seal(payload.to_string()).unwrap();
    json!({
        "MerchantID": 2_000_132,
        "RpHeader": {"Timestamp": 1_700_000_000},
        "TransCode": trans_code,
        "TransMsg": trans_msg,
        "Data": data,
    })
    .to_string()
}
