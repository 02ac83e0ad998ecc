use reqwest::Method;
use srmiggy_core::{CreateOrderRequest, Order};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::IDEMPOTENCY_HEADER;

impl ApiClient {
    /// `POST /orders`
    ///
    /// `idempotency_key` identifies the checkout attempt; resending the same
    /// key lets a cooperating server recognise a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's reason when the order
    /// is refused.
    pub async fn create_order(
        &self,
        order: &CreateOrderRequest,
        idempotency_key: Uuid,
    ) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders"], &[]);
        let request = self
            .request(Method::POST, url)
            .header(IDEMPOTENCY_HEADER, idempotency_key.to_string())
            .json(order);

        let created: Order = self.execute(request, "create order").await?;
        tracing::info!(
            order_id = created.id,
            vendor_id = order.vendor_id,
            slot_id = %order.slot_id,
            payment_method = %order.payment_method,
            "order created"
        );
        Ok(created)
    }

    /// `GET /orders`: the signed-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["orders"], &[]);
        self.execute(self.request(Method::GET, url), "my orders")
            .await
    }

    /// `GET /orders/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown order.
    pub async fn get_order(&self, order_id: i64) -> Result<Order, ApiError> {
        let id = order_id.to_string();
        let url = self.endpoint(&["orders", id.as_str()], &[]);
        self.execute(
            self.request(Method::GET, url),
            &format!("order {order_id}"),
        )
        .await
    }
}
