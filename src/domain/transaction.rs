use super::payment_products::payment_method_group;
use super::response::{
    CardPaymentMethodSpecificOutput, FraudResults, PaymentOutput,
    RedirectPaymentMethodSpecificOutput, SepaDirectDebitPaymentMethodSpecificOutput,
    WorldlineResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FRAUD_RESULT: &str = "fraud_result";
pub const PAYMENT_PRODUCT_ID: &str = "payment_product_id";
pub const PAYMENT_METHOD: &str = "payment_method";
pub const CARD_LAST_4: &str = "card_last_4";

/// Payment-method specific details captured alongside a transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MethodDetails {
    Card {
        fraud_result: Option<String>,
        payment_product_id: u32,
        payment_method: Option<String>,
        card_last_4: Option<String>,
    },
    Redirect {
        fraud_result: Option<String>,
        payment_product_id: u32,
        payment_method: Option<String>,
    },
    Sepa {
        payment_product_id: u32,
        payment_method: Option<String>,
    },
}

impl MethodDetails {
    fn from_card(output: &CardPaymentMethodSpecificOutput) -> Self {
        MethodDetails::Card {
            fraud_result: fraud_result(output.fraud_results.as_ref()),
            payment_product_id: output.payment_product_id,
            payment_method: group_of(output.payment_product_id),
            card_last_4: output
                .card
                .as_ref()
                .and_then(|card| card.card_number.as_deref())
                .map(|number| number.trim_matches('*').to_string()),
        }
    }

    fn from_redirect(output: &RedirectPaymentMethodSpecificOutput) -> Self {
        MethodDetails::Redirect {
            fraud_result: fraud_result(output.fraud_results.as_ref()),
            payment_product_id: output.payment_product_id,
            payment_method: group_of(output.payment_product_id),
        }
    }

    fn from_sepa(output: &SepaDirectDebitPaymentMethodSpecificOutput) -> Self {
        MethodDetails::Sepa {
            payment_product_id: output.payment_product_id,
            payment_method: group_of(output.payment_product_id),
        }
    }

    /// Card, redirect and SEPA sections are read in that order and a later
    /// section replaces an earlier one.
    pub fn from_payment_output(output: &PaymentOutput) -> Option<Self> {
        [
            output
                .card_payment_method_specific_output
                .as_ref()
                .map(Self::from_card),
            output
                .redirect_payment_method_specific_output
                .as_ref()
                .map(Self::from_redirect),
            output
                .sepa_direct_debit_payment_method_specific_output
                .as_ref()
                .map(Self::from_sepa),
        ]
        .into_iter()
        .flatten()
        .last()
    }

    pub fn payment_product_id(&self) -> u32 {
        match self {
            MethodDetails::Card {
                payment_product_id, ..
            }
            | MethodDetails::Redirect {
                payment_product_id, ..
            }
            | MethodDetails::Sepa {
                payment_product_id, ..
            } => *payment_product_id,
        }
    }

    pub fn payment_method(&self) -> Option<&str> {
        match self {
            MethodDetails::Card { payment_method, .. }
            | MethodDetails::Redirect { payment_method, .. }
            | MethodDetails::Sepa { payment_method, .. } => payment_method.as_deref(),
        }
    }

    pub fn fraud_result(&self) -> Option<&str> {
        match self {
            MethodDetails::Card { fraud_result, .. }
            | MethodDetails::Redirect { fraud_result, .. } => fraud_result.as_deref(),
            MethodDetails::Sepa { .. } => None,
        }
    }

    pub fn card_last_4(&self) -> Option<&str> {
        match self {
            MethodDetails::Card { card_last_4, .. } => card_last_4.as_deref(),
            _ => None,
        }
    }
}

fn group_of(payment_product_id: u32) -> Option<String> {
    payment_method_group(payment_product_id).map(str::to_string)
}

fn fraud_result(results: Option<&FraudResults>) -> Option<String> {
    results
        .and_then(|results| results.fraud_service_result.as_deref())
        .map(capitalize_first)
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One entry of an order's transaction history.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionRecord {
    /// Assigned by the repository on insert.
    pub entity_id: Option<u64>,
    pub increment_id: String,
    pub transaction_id: String,
    pub status: String,
    pub status_code: i32,
    pub amount: Decimal,
    pub currency: String,
    pub method_details: Option<MethodDetails>,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Builds an unsaved record from a vendor response.
    ///
    /// Method details are only read from payment responses; refunds never carry them.
    pub fn from_response(response: &WorldlineResponse) -> Self {
        let money = response.amount_of_money();
        let method_details = match response {
            WorldlineResponse::Payment(payment) => {
                MethodDetails::from_payment_output(&payment.payment_output)
            }
            WorldlineResponse::Refund(_) => None,
        };

        Self {
            entity_id: None,
            increment_id: response.merchant_reference().to_string(),
            transaction_id: response.id().to_string(),
            status: response.status().to_string(),
            status_code: response.status_output().status_code,
            amount: Decimal::new(money.amount, 2),
            currency: money.currency_code.clone(),
            method_details,
            created_at: Utc::now(),
        }
    }

    /// True when this record already reflects the given vendor state.
    pub fn matches_state(&self, status_code: i32, transaction_id: &str) -> bool {
        self.status_code == status_code && self.transaction_id == transaction_id
    }

    /// Key/value view of the method details, keyed like the legacy
    /// additional-data column.
    pub fn additional_data(&self) -> BTreeMap<&'static str, String> {
        let mut data = BTreeMap::new();
        let Some(details) = &self.method_details else {
            return data;
        };

        if let Some(fraud_result) = details.fraud_result() {
            data.insert(FRAUD_RESULT, fraud_result.to_string());
        }
        data.insert(PAYMENT_PRODUCT_ID, details.payment_product_id().to_string());
        if let Some(payment_method) = details.payment_method() {
            data.insert(PAYMENT_METHOD, payment_method.to_string());
        }
        if let Some(card_last_4) = details.card_last_4() {
            data.insert(CARD_LAST_4, card_last_4.to_string());
        }
        data
    }
}
