use reqwest::Method;
use srmiggy_core::{PaymentOrder, PaymentTransaction, PaymentVerification};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /payments/create-order?orderId=`: opens a provider-side payment
    /// for an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn create_payment_order(&self, order_id: i64) -> Result<PaymentOrder, ApiError> {
        let id = order_id.to_string();
        let url = self.endpoint(&["payments", "create-order"], &[("orderId", id.as_str())]);
        self.execute(
            self.request(Method::POST, url),
            &format!("payment order for order {order_id}"),
        )
        .await
    }

    /// `POST /payments/verify`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the server does not accept the
    /// provider's proof of payment.
    pub async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<PaymentTransaction, ApiError> {
        let url = self.endpoint(&["payments", "verify"], &[]);
        self.execute(
            self.request(Method::POST, url).json(verification),
            "verify payment",
        )
        .await
    }

    /// `GET /payments/order/{orderId}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the order has no payment yet.
    pub async fn payment_for_order(&self, order_id: i64) -> Result<PaymentTransaction, ApiError> {
        let id = order_id.to_string();
        let url = self.endpoint(&["payments", "order", id.as_str()], &[]);
        self.execute(
            self.request(Method::GET, url),
            &format!("payment for order {order_id}"),
        )
        .await
    }

    /// `POST /payments/pay-with-wallet?orderId=`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the wallet cannot cover the order.
    pub async fn pay_with_wallet(
        &self,
        order_id: i64,
    ) -> Result<Option<PaymentTransaction>, ApiError> {
        let id = order_id.to_string();
        let url = self.endpoint(&["payments", "pay-with-wallet"], &[("orderId", id.as_str())]);
        self.execute_optional(
            self.request(Method::POST, url),
            &format!("wallet payment for order {order_id}"),
        )
        .await
    }

    /// `POST /payments/confirm-cod?orderId=`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx status.
    pub async fn confirm_cod(&self, order_id: i64) -> Result<Option<PaymentTransaction>, ApiError> {
        let id = order_id.to_string();
        let url = self.endpoint(&["payments", "confirm-cod"], &[("orderId", id.as_str())]);
        self.execute_optional(
            self.request(Method::POST, url),
            &format!("cash on delivery for order {order_id}"),
        )
        .await
    }
}
