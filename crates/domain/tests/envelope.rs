use ecinv_domain::envelope::{
    MerchantId, PROTOCOL_REVISION, RequestEnvelope, RequestHeader, ResponseEnvelope,
};

#[test]
fn test_request_envelope_wire_names() {
    let envelope = RequestEnvelope {
        merchant_id: "2000132".to_owned(),
        rq_header: RequestHeader::new(1_700_000_000),
        data: "abc=".to_owned(),
    };

    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value["MerchantID"], "2000132");
    assert_eq!(value["RqHeader"]["Timestamp"], 1_700_000_000);
    assert_eq!(value["RqHeader"]["Revision"], "3.0.0");
    assert_eq!(value["Data"], "abc=");
    assert_eq!(PROTOCOL_REVISION, "3.0.0");
}

#[test]
fn test_merchant_id_accepts_string_and_number() {
    let as_string: ResponseEnvelope =
        serde_json::from_str(r#"{"MerchantID":"2000132","TransCode":1}"#).unwrap();
    let as_number: ResponseEnvelope =
        serde_json::from_str(r#"{"MerchantID":2000132,"TransCode":1}"#).unwrap();
    let as_float: ResponseEnvelope =
        serde_json::from_str(r#"{"MerchantID":2000132.0,"TransCode":1}"#).unwrap();

    assert_eq!(as_string.merchant_id, MerchantId::from("2000132"));
    assert_eq!(as_number.merchant_id, as_string.merchant_id);
    assert_eq!(as_float.merchant_id.as_str(), "2000132");
}

#[test]
fn test_merchant_id_serializes_as_string() {
    let value = serde_json::to_value(MerchantId::from("2000132")).unwrap();
    assert_eq!(value, serde_json::json!("2000132"));
}

#[test]
fn test_response_null_fields_default() {
    let parsed: ResponseEnvelope = serde_json::from_str(
        r#"{"MerchantID":null,"RpHeader":null,"TransCode":1,"TransMsg":null,"Data":null}"#,
    )
    .unwrap();

    assert!(parsed.is_success());
    assert_eq!(parsed.merchant_id.as_str(), "");
    assert_eq!(parsed.rp_header.timestamp, 0);
    assert!(parsed.trans_msg.is_empty());
    assert!(parsed.data.is_empty());
}

#[test]
fn test_missing_trans_code_is_failure() {
    let parsed: ResponseEnvelope = serde_json::from_str(r#"{"TransMsg":"oops"}"#).unwrap();
    assert_eq!(parsed.trans_code, 0);
    assert!(!parsed.is_success());
}

#[test]
fn test_full_response_envelope() {
    let parsed: ResponseEnvelope = serde_json::from_str(
        r#"{"MerchantID":"2000132","RpHeader":{"Timestamp":1700000001},"TransCode":1,"TransMsg":"Success","Data":"xyz"}"#,
    )
    .unwrap();

    assert_eq!(parsed.rp_header.timestamp, 1_700_000_001);
    assert_eq!(parsed.trans_msg, "Success");
    assert_eq!(parsed.data, "xyz");
}

#[test]
fn test_null_trans_code_and_timestamp_read_as_zero() {
    let parsed: ResponseEnvelope = serde_json::from_str(
        r#"{"MerchantID":"2000132","RpHeader":{"Timestamp":null},"TransCode":null,"TransMsg":"Invalid signature"}"#,
    )
    .unwrap();

    assert_eq!(parsed.trans_code, 0);
    assert_eq!(parsed.rp_header.timestamp, 0);
    assert!(!parsed.is_success());
    assert_eq!(parsed.trans_msg, "Invalid signature");
}
