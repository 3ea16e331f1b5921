//! Business payloads of the B2C invoice operations.
//!
//! These types travel inside the encrypted `Data` field. They carry no
//! validation rules; callers are expected to hand over well-formed values.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The only `RtnCode` that denotes business success.
pub const BUSINESS_SUCCESS: i64 = 1;

/// Business status carried by every decrypted response.
pub trait BusinessStatus {
    fn rtn_code(&self) -> i64;
    fn rtn_msg(&self) -> &str;

    fn is_success(&self) -> bool {
        self.rtn_code() == BUSINESS_SUCCESS
    }
}

/// A request payload bound to its API route and response type.
pub trait Operation: Serialize {
    const ROUTE: &'static str;
    type Response: DeserializeOwned + BusinessStatus;
}

macro_rules! business_status {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl BusinessStatus for $ty {
                fn rtn_code(&self) -> i64 {
                    self.rtn_code
                }

                fn rtn_msg(&self) -> &str {
                    &self.rtn_msg
                }
            }
        )+
    };
}

macro_rules! operation {
    ($req:ty => $resp:ty, $route:literal) => {
        impl Operation for $req {
            const ROUTE: &'static str = $route;
            type Response = $resp;
        }
    };
}

// --- Codes ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    #[default]
    #[serde(rename = "1")]
    Taxable,
    #[serde(rename = "2")]
    ZeroRated,
    #[serde(rename = "3")]
    Exempt,
    #[serde(rename = "4")]
    SpecialRate,
    #[serde(rename = "9")]
    Mixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvType {
    #[default]
    #[serde(rename = "07")]
    General,
    #[serde(rename = "08")]
    Special,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintFlag {
    #[default]
    #[serde(rename = "0")]
    No,
    #[serde(rename = "1")]
    Yes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationFlag {
    #[default]
    #[serde(rename = "0")]
    No,
    #[serde(rename = "1")]
    Yes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierType {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "2")]
    Member,
    #[serde(rename = "3")]
    MobileBarcode,
}

/// Whether item prices include tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatFlag {
    #[default]
    #[serde(rename = "1")]
    Included,
    #[serde(rename = "0")]
    Excluded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllowanceNotify {
    #[serde(rename = "S")]
    Sms,
    #[default]
    #[serde(rename = "E")]
    Email,
    #[serde(rename = "A")]
    All,
    #[serde(rename = "N")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Normal,
    Invalidated,
}

impl InvoiceStatus {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Normal),
            "0" => Some(Self::Invalidated),
            _ => None,
        }
    }
}

// --- Issue ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssueInvoiceRequest {
    pub relate_number: String,
    #[serde(rename = "CustomerID", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_identifier: Option<String>,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub customer_email: String,
    pub print: PrintFlag,
    pub donation: DonationFlag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub love_code: Option<String>,
    #[serde(default)]
    pub carrier_type: CarrierType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_num: Option<String>,
    pub tax_type: TaxType,
    pub sales_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_remark: Option<String>,
    pub inv_type: InvType,
    #[serde(rename = "vat", default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<VatFlag>,
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_day: Option<u32>,
    #[serde(rename = "ECBankID", default, skip_serializing_if = "Option::is_none")]
    pub ec_bank_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub item_seq: u32,
    pub item_name: String,
    pub item_count: i64,
    pub item_word: String,
    pub item_price: i64,
    pub item_tax_type: TaxType,
    pub item_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_remark: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IssueInvoiceResponse {
    pub rtn_code: i64,
    pub rtn_msg: String,
    pub invoice_no: String,
    pub invoice_date: String,
    pub random_number: String,
}

// --- Invalidate ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvalidInvoiceRequest {
    pub invoice_no: String,
    pub invoice_date: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InvalidInvoiceResponse {
    pub rtn_code: i64,
    pub rtn_msg: String,
    pub invoice_no: String,
}

// --- Query ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInvoiceRequest {
    pub relate_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct QueryInvoiceResponse {
    pub rtn_code: i64,
    pub rtn_msg: String,
    pub invoice_no: String,
    pub invoice_date: String,
    pub invoice_status: String,
    pub total_amount: String,
    pub random_number: String,
}

impl QueryInvoiceResponse {
    /// Decoded `InvoiceStatus`, if it holds a known code.
    #[must_use]
    pub fn status(&self) -> Option<InvoiceStatus> {
        InvoiceStatus::from_code(&self.invoice_status)
    }
}

// --- Allowance ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllowanceInvoiceRequest {
    pub invoice_no: String,
    pub invoice_date: String,
    pub allowance_notify: AllowanceNotify,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_phone: Option<String>,
    pub allowance_amount: i64,
    pub items: Vec<AllowanceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllowanceItem {
    pub item_seq: u32,
    pub item_name: String,
    pub item_count: i64,
    pub item_word: String,
    pub item_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_tax_type: Option<TaxType>,
    pub item_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceInvoiceResponse {
    #[serde(rename = "RtnCode")]
    pub rtn_code: i64,
    #[serde(rename = "RtnMsg")]
    pub rtn_msg: String,
    #[serde(rename = "IA_Allow_No")]
    pub allowance_no: String,
    #[serde(rename = "IA_Invoice_No")]
    pub invoice_no: String,
    #[serde(rename = "IA_Date")]
    pub date: String,
    #[serde(rename = "IA_Remain_Allowance_Amt")]
    pub remaining_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllowanceInvalidRequest {
    pub invoice_no: String,
    pub allowance_no: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceInvalidResponse {
    #[serde(rename = "RtnCode")]
    pub rtn_code: i64,
    #[serde(rename = "RtnMsg")]
    pub rtn_msg: String,
    #[serde(rename = "IA_Invoice_No")]
    pub invoice_no: String,
}

/// Bare business status, for operations without a dedicated response type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatusOnly {
    pub rtn_code: i64,
    pub rtn_msg: String,
}

business_status!(
    IssueInvoiceResponse,
    InvalidInvoiceResponse,
    QueryInvoiceResponse,
    AllowanceInvoiceResponse,
    AllowanceInvalidResponse,
    StatusOnly,
);

operation!(IssueInvoiceRequest => IssueInvoiceResponse, "/B2CInvoice/Issue");
operation!(InvalidInvoiceRequest => InvalidInvoiceResponse, "/Invoice/IssueInvalid");
operation!(QueryInvoiceRequest => QueryInvoiceResponse, "/Query/Issue");
operation!(AllowanceInvoiceRequest => AllowanceInvoiceResponse, "/Invoice/Allowance");
operation!(AllowanceInvalidRequest => AllowanceInvalidResponse, "/Invoice/AllowanceInvalid");
