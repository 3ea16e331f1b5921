use chrono::{NaiveDate, NaiveDateTime, Utc};
use ecinv_domain::invoice::{
    AllowanceInvalidRequest, AllowanceInvalidResponse, AllowanceInvoiceRequest,
    AllowanceInvoiceResponse, BusinessStatus, InvalidInvoiceRequest, InvalidInvoiceResponse,
    IssueInvoiceRequest, IssueInvoiceResponse, Operation, QueryInvoiceRequest,
    QueryInvoiceResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::Client;
use crate::error::{ClientError, ClientErrorExt};

/// Layout of `InvoiceDate` values returned by the remote service.
pub const INVOICE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Layout of dates sent back in invalidation and allowance requests.
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d";

impl Client {
    /// Runs one exchange on `route` and decodes the business payload.
    ///
    /// # Errors
    /// Any error of [`Client::execute`], plus [`ClientError::Parse`] if the decrypted
    /// payload is not a `Resp`, and [`ClientError::Api`] if its `RtnCode` is not `1`.
    pub async fn call<Req, Resp>(&self, route: &str, request: &Req) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned + BusinessStatus,
    {
        let plaintext = self.execute(route, request).await?;
        let response: Resp = serde_json::from_slice(&plaintext).context("Business payload")?;

        if !response.is_success() {
            return Err(ClientError::api(response.rtn_msg().to_owned(), response.rtn_code()));
        }

        Ok(response)
    }

    /// Runs the operation bound to the request type.
    ///
    /// # Errors
    /// See [`Client::call`].
    pub async fn send<O: Operation>(&self, request: &O) -> Result<O::Response, ClientError> {
        self.call(O::ROUTE, request).await
    }

    /// # Errors
    /// See [`Client::call`].
    #[instrument(skip_all, fields(relate_number = %request.relate_number))]
    pub async fn issue_invoice(
        &self,
        request: &IssueInvoiceRequest,
    ) -> Result<IssueInvoiceResponse, ClientError> {
        let response = self.send(request).await?;
        info!(invoice_no = %response.invoice_no, "Invoice issued");
        Ok(response)
    }

    /// # Errors
    /// See [`Client::call`].
    #[instrument(skip_all, fields(invoice_no = %request.invoice_no))]
    pub async fn invalidate_invoice(
        &self,
        request: &InvalidInvoiceRequest,
    ) -> Result<InvalidInvoiceResponse, ClientError> {
        let response = self.send(request).await?;
        info!("Invoice invalidated");
        Ok(response)
    }

    /// # Errors
    /// See [`Client::call`].
    #[instrument(skip_all, fields(relate_number = %request.relate_number))]
    pub async fn query_invoice(
        &self,
        request: &QueryInvoiceRequest,
    ) -> Result<QueryInvoiceResponse, ClientError> {
        self.send(request).await
    }

    /// # Errors
    /// See [`Client::call`].
    #[instrument(skip_all, fields(invoice_no = %request.invoice_no))]
    pub async fn issue_allowance(
        &self,
        request: &AllowanceInvoiceRequest,
    ) -> Result<AllowanceInvoiceResponse, ClientError> {
        let response = self.send(request).await?;
        info!(allowance_no = %response.allowance_no, "Allowance issued");
        Ok(response)
    }

    /// # Errors
    /// See [`Client::call`].
    #[instrument(skip_all, fields(invoice_no = %request.invoice_no, allowance_no = %request.allowance_no))]
    pub async fn invalidate_allowance(
        &self,
        request: &AllowanceInvalidRequest,
    ) -> Result<AllowanceInvalidResponse, ClientError> {
        let response = self.send(request).await?;
        info!("Allowance invalidated");
        Ok(response)
    }
}

/// `prefix` followed by the current Unix time in seconds.
#[must_use]
pub fn generate_relate_number(prefix: &str) -> String {
    format!("{prefix}{}", Utc::now().timestamp())
}

/// Parses an `InvoiceDate` such as `2024-01-31 14:05:00`.
///
/// # Errors
/// Returns [`ClientError::Validation`] if `value` does not match
/// [`INVOICE_DATETIME_FORMAT`].
pub fn parse_invoice_date(value: &str) -> Result<NaiveDateTime, ClientError> {
    NaiveDateTime::parse_from_str(value.trim(), INVOICE_DATETIME_FORMAT).map_err(|e| {
        ClientError::Validation {
            message: format!("Invalid invoice date '{value}': {e}").into(),
            context: None,
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_invoice_date(date: NaiveDate) -> String {
    date.format(INVOICE_DATE_FORMAT).to_string()
}
