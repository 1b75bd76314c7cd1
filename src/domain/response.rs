//! Vendor response model.
//!
//! Mirrors the JSON shapes returned by the Worldline API and carried inside
//! webhook events. Only the fields the plugin reads are modelled; unknown
//! fields are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AmountOfMoney {
    /// Amount in the smallest currency subdivision (e.g. cents).
    pub amount: i64,
    pub currency_code: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct References {
    #[serde(default)]
    pub merchant_reference: String,
}

/// Lifecycle status reported by the vendor together with the capability flags
/// that gate gateway actions.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusOutput {
    pub status_code: i32,
    pub is_cancellable: bool,
    pub is_refundable: bool,
    pub is_authorized: bool,
    pub status_category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FraudResults {
    pub fraud_service_result: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardEssentials {
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentMethodSpecificOutput {
    pub payment_product_id: u32,
    pub card: Option<CardEssentials>,
    pub fraud_results: Option<FraudResults>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RedirectPaymentMethodSpecificOutput {
    pub payment_product_id: u32,
    pub fraud_results: Option<FraudResults>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SepaDirectDebitPaymentMethodSpecificOutput {
    pub payment_product_id: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutput {
    pub amount_of_money: AmountOfMoney,
    #[serde(default)]
    pub references: References,
    pub payment_method: Option<String>,
    pub card_payment_method_specific_output: Option<CardPaymentMethodSpecificOutput>,
    pub redirect_payment_method_specific_output: Option<RedirectPaymentMethodSpecificOutput>,
    pub sepa_direct_debit_payment_method_specific_output:
        Option<SepaDirectDebitPaymentMethodSpecificOutput>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefundOutput {
    pub amount_of_money: AmountOfMoney,
    #[serde(default)]
    pub references: References,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_output: StatusOutput,
    pub payment_output: PaymentOutput,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_output: StatusOutput,
    pub refund_output: RefundOutput,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CancelPaymentResponse {
    pub payment: PaymentResponse,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResponse {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_output: StatusOutput,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CapturePaymentRequest {
    /// Amount to capture in minor units.
    pub amount: i64,
    pub is_final: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub amount_of_money: AmountOfMoney,
}

/// A vendor response that can be reconciled into the transaction history.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum WorldlineResponse {
    Payment(PaymentResponse),
    Refund(RefundResponse),
}

impl WorldlineResponse {
    pub fn id(&self) -> &str {
        match self {
            WorldlineResponse::Payment(payment) => &payment.id,
            WorldlineResponse::Refund(refund) => &refund.id,
        }
    }

    pub fn status(&self) -> &str {
        match self {
            WorldlineResponse::Payment(payment) => &payment.status,
            WorldlineResponse::Refund(refund) => &refund.status,
        }
    }

    pub fn status_output(&self) -> &StatusOutput {
        match self {
            WorldlineResponse::Payment(payment) => &payment.status_output,
            WorldlineResponse::Refund(refund) => &refund.status_output,
        }
    }

    pub fn amount_of_money(&self) -> &AmountOfMoney {
        match self {
            WorldlineResponse::Payment(payment) => &payment.payment_output.amount_of_money,
            WorldlineResponse::Refund(refund) => &refund.refund_output.amount_of_money,
        }
    }

    /// The order increment id the merchant sent along with the payment.
    pub fn merchant_reference(&self) -> &str {
        match self {
            WorldlineResponse::Payment(payment) => {
                &payment.payment_output.references.merchant_reference
            }
            WorldlineResponse::Refund(refund) => &refund.refund_output.references.merchant_reference,
        }
    }
}

impl From<PaymentResponse> for WorldlineResponse {
    fn from(payment: PaymentResponse) -> Self {
        WorldlineResponse::Payment(payment)
    }
}

impl From<RefundResponse> for WorldlineResponse {
    fn from(refund: RefundResponse) -> Self {
        WorldlineResponse::Refund(refund)
    }
}

/// Gateway operations that are guarded by a vendor capability flag.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GatewayAction {
    Void,
    Capture,
    Refund,
}

impl fmt::Display for GatewayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GatewayAction::Void => "Void",
            GatewayAction::Capture => "Capture",
            GatewayAction::Refund => "Refund",
        };
        f.write_str(name)
    }
}
