#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use worldline_payment_core::domain::ports::PaymentGateway;
use worldline_payment_core::domain::response::{
    AmountOfMoney, CancelPaymentResponse, CapturePaymentRequest, CaptureResponse, PaymentOutput,
    PaymentResponse, References, RefundOutput, RefundRequest, RefundResponse, StatusOutput,
};
use worldline_payment_core::error::{PaymentError, Result};

pub fn amount(amount: i64) -> AmountOfMoney {
    AmountOfMoney {
        amount,
        currency_code: "EUR".to_string(),
    }
}

pub fn payment(
    id: &str,
    increment_id: &str,
    status: &str,
    status_output: StatusOutput,
) -> PaymentResponse {
    PaymentResponse {
        id: id.to_string(),
        status: status.to_string(),
        status_output,
        payment_output: PaymentOutput {
            amount_of_money: amount(2990),
            references: References {
                merchant_reference: increment_id.to_string(),
            },
            payment_method: None,
            card_payment_method_specific_output: None,
            redirect_payment_method_specific_output: None,
            sepa_direct_debit_payment_method_specific_output: None,
        },
    }
}

pub fn refund(id: &str, increment_id: &str, status_code: i32, minor: i64) -> RefundResponse {
    RefundResponse {
        id: id.to_string(),
        status: "REFUNDED".to_string(),
        status_output: StatusOutput {
            status_code,
            ..Default::default()
        },
        refund_output: RefundOutput {
            amount_of_money: amount(minor),
            references: References {
                merchant_reference: increment_id.to_string(),
            },
            payment_method: None,
        },
    }
}

pub fn status(status_code: i32) -> StatusOutput {
    StatusOutput {
        status_code,
        ..Default::default()
    }
}

/// A remote call observed by [`RecordingGateway`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GatewayCall {
    Get(String, u32),
    Cancel(String, u32),
    Capture(String, u32, CapturePaymentRequest),
    Refund(String, u32, RefundRequest),
}

/// Gateway double answering every fetch with the same payment.
pub struct RecordingGateway {
    payment: PaymentResponse,
    unreachable: bool,
    calls: Mutex<Vec<GatewayCall>>,
}

impl RecordingGateway {
    pub fn new(status_output: StatusOutput) -> Self {
        Self {
            payment: payment("3066019730_0", "000000042", "PENDING_CAPTURE", status_output),
            unreachable: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A gateway whose payment lookups fail.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new(StatusOutput {
                is_cancellable: true,
                is_refundable: true,
                is_authorized: true,
                ..Default::default()
            })
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn get_payment(&self, transaction_id: &str, store_id: u32) -> Result<PaymentResponse> {
        self.record(GatewayCall::Get(transaction_id.to_string(), store_id));
        if self.unreachable {
            return Err(PaymentError::GatewayError(format!(
                "Payment {} could not be retrieved",
                transaction_id
            )));
        }
        Ok(self.payment.clone())
    }

    async fn cancel_payment(
        &self,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<CancelPaymentResponse> {
        self.record(GatewayCall::Cancel(transaction_id.to_string(), store_id));
        let mut payment = self.payment.clone();
        payment.status = "CANCELLED".to_string();
        payment.status_output = status(6);
        Ok(CancelPaymentResponse { payment })
    }

    async fn capture_payment(
        &self,
        transaction_id: &str,
        store_id: u32,
        request: CapturePaymentRequest,
    ) -> Result<CaptureResponse> {
        self.record(GatewayCall::Capture(
            transaction_id.to_string(),
            store_id,
            request,
        ));
        Ok(CaptureResponse {
            id: format!("{}-C1", transaction_id),
            status: "CAPTURE_REQUESTED".to_string(),
            status_output: status(4),
        })
    }

    async fn refund_payment(
        &self,
        transaction_id: &str,
        store_id: u32,
        request: RefundRequest,
    ) -> Result<RefundResponse> {
        let minor = request.amount_of_money.amount;
        self.record(GatewayCall::Refund(
            transaction_id.to_string(),
            store_id,
            request,
        ));
        Ok(refund(
            &format!("{}-R1", transaction_id),
            "000000042",
            81,
            minor,
        ))
    }
}
