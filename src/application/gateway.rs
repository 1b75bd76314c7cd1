//! Gateway actions against an existing Worldline payment.
//!
//! Every action follows the same three steps: fetch the current payment from
//! the gateway, check the capability flag the vendor reports for that action,
//! and only then invoke the remote action with the same transaction and store ids.

use crate::domain::ports::PaymentGateway;
use crate::domain::response::{
    AmountOfMoney, CancelPaymentResponse, CapturePaymentRequest, CaptureResponse, GatewayAction,
    RefundRequest, RefundResponse, StatusOutput,
};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

#[async_trait]
pub trait GatewayCommand: Send + Sync {
    type Output: Send;

    const ACTION: GatewayAction;

    /// Whether the fetched payment state allows this action.
    fn is_permitted(status: &StatusOutput) -> bool;

    async fn invoke(
        &self,
        gateway: &dyn PaymentGateway,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<Self::Output>;
}

/// Cancels a payment that has not been captured yet.
pub struct Void;

#[async_trait]
impl GatewayCommand for Void {
    type Output = CancelPaymentResponse;

    const ACTION: GatewayAction = GatewayAction::Void;

    fn is_permitted(status: &StatusOutput) -> bool {
        status.is_cancellable
    }

    async fn invoke(
        &self,
        gateway: &dyn PaymentGateway,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<Self::Output> {
        gateway.cancel_payment(transaction_id, store_id).await
    }
}

pub struct Capture {
    /// Amount in minor units.
    pub amount: i64,
    pub is_final: bool,
}

#[async_trait]
impl GatewayCommand for Capture {
    type Output = CaptureResponse;

    const ACTION: GatewayAction = GatewayAction::Capture;

    fn is_permitted(status: &StatusOutput) -> bool {
        status.is_authorized
    }

    async fn invoke(
        &self,
        gateway: &dyn PaymentGateway,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<Self::Output> {
        let request = CapturePaymentRequest {
            amount: self.amount,
            is_final: self.is_final,
        };
        gateway
            .capture_payment(transaction_id, store_id, request)
            .await
    }
}

pub struct Refund {
    pub amount: AmountOfMoney,
}

#[async_trait]
impl GatewayCommand for Refund {
    type Output = RefundResponse;

    const ACTION: GatewayAction = GatewayAction::Refund;

    fn is_permitted(status: &StatusOutput) -> bool {
        status.is_refundable
    }

    async fn invoke(
        &self,
        gateway: &dyn PaymentGateway,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<Self::Output> {
        let request = RefundRequest {
            amount_of_money: self.amount.clone(),
        };
        gateway
            .refund_payment(transaction_id, store_id, request)
            .await
    }
}

pub struct GatewayActionHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl GatewayActionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute<C: GatewayCommand>(
        &self,
        command: C,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<C::Output> {
        let payment = self.gateway.get_payment(transaction_id, store_id).await?;

        if !C::is_permitted(&payment.status_output) {
            warn!(
                action = %C::ACTION,
                transaction_id,
                store_id,
                status = %payment.status,
                "Gateway action rejected by payment state"
            );
            return Err(PaymentError::ActionNotAllowed { action: C::ACTION });
        }

        info!(action = %C::ACTION, transaction_id, store_id, "Invoking gateway action");
        command
            .invoke(self.gateway.as_ref(), transaction_id, store_id)
            .await
    }

    pub async fn void(&self, transaction_id: &str, store_id: u32) -> Result<CancelPaymentResponse> {
        self.execute(Void, transaction_id, store_id).await
    }

    pub async fn capture(
        &self,
        transaction_id: &str,
        store_id: u32,
        amount: i64,
        is_final: bool,
    ) -> Result<CaptureResponse> {
        self.execute(Capture { amount, is_final }, transaction_id, store_id)
            .await
    }

    pub async fn refund(
        &self,
        transaction_id: &str,
        store_id: u32,
        amount: AmountOfMoney,
    ) -> Result<RefundResponse> {
        self.execute(Refund { amount }, transaction_id, store_id)
            .await
    }
}
