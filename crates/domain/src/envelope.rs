use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Protocol revision sent in every request header.
pub const PROTOCOL_REVISION: &str = "3.0.0";

/// The only `TransCode` that denotes a successful exchange.
pub const TRANSPORT_SUCCESS: i64 = 1;

/// Outer request envelope.
///
/// ```json
/// {"MerchantID":"2000132","RqHeader":{"Timestamp":1700000000,"Revision":"3.0.0"},"Data":"..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestEnvelope {
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    pub rq_header: RequestHeader,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
    pub timestamp: i64,
    pub revision: String,
}

impl RequestHeader {
    /// Header for the current protocol revision.
    #[must_use]
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp, revision: PROTOCOL_REVISION.to_owned() }
    }
}

/// Outer response envelope as produced by the remote service.
///
/// Missing or `null` fields fall back to empty values; a missing or `null`
/// `TransCode` reads as `0` and is therefore a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope {
    #[serde(rename = "MerchantID", default)]
    pub merchant_id: MerchantId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rp_header: ResponseHeader,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trans_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trans_msg: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
}

impl ResponseEnvelope {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.trans_code == TRANSPORT_SUCCESS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseHeader {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Merchant identifier normalised to its string form.
///
/// The remote service sends it either as a JSON string or as a number; both
/// decode to the same value. It always serializes as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MerchantId(String);

impl MerchantId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MerchantId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for MerchantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for MerchantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MerchantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MerchantIdVisitor)
    }
}

struct MerchantIdVisitor;

impl Visitor<'_> for MerchantIdVisitor {
    type Value = MerchantId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a merchant id as string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(MerchantId(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(MerchantId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(MerchantId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(MerchantId(v.to_string()))
    }

    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // 2000132.0 must read the same as 2000132
        if v.fract() == 0.0 && v.abs() < 9.0e15 {
            Ok(MerchantId((v as i64).to_string()))
        } else {
            Ok(MerchantId(v.to_string()))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MerchantId::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MerchantId::default())
    }
}
