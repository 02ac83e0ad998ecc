use reqwest::Method;
use srmiggy_core::{AdminStats, Order, OrderStatus, UserAccount, Vendor};

use crate::client::ApiClient;
use crate::error::ApiError;

// All of these require an admin token; the server answers 401/403 otherwise.
impl ApiClient {
    /// `GET /admin/orders`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the token lacks admin rights.
    pub async fn admin_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["admin", "orders"], &[]);
        self.execute(self.request(Method::GET, url), "admin orders")
            .await
    }

    /// `GET /admin/vendors`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the token lacks admin rights.
    pub async fn admin_vendors(&self) -> Result<Vec<Vendor>, ApiError> {
        let url = self.endpoint(&["admin", "vendors"], &[]);
        self.execute(self.request(Method::GET, url), "admin vendors")
            .await
    }

    /// `GET /admin/users`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the token lacks admin rights.
    pub async fn admin_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        let url = self.endpoint(&["admin", "users"], &[]);
        self.execute(self.request(Method::GET, url), "admin users")
            .await
    }

    /// `GET /admin/stats`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the token lacks admin rights.
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        let url = self.endpoint(&["admin", "stats"], &[]);
        self.execute(self.request(Method::GET, url), "admin stats")
            .await
    }

    /// `PUT /admin/orders/{id}/status?status=`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the token lacks admin rights or
    /// the transition is refused.
    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let id = order_id.to_string();
        let url = self.endpoint(
            &["admin", "orders", id.as_str(), "status"],
            &[("status", status.as_str())],
        );
        let order: Order = self
            .execute(
                self.request(Method::PUT, url),
                &format!("status update for order {order_id}"),
            )
            .await?;
        tracing::info!(order_id, %status, "order status updated");
        Ok(order)
    }
}
