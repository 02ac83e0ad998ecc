use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use srmiggy_core::{LoyaltyPreview, WalletTopUp, WalletTransaction};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct AddMoneyRequest {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

impl ApiClient {
    /// `GET /wallet/balance`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn wallet_balance(&self) -> Result<Decimal, ApiError> {
        let url = self.endpoint(&["wallet", "balance"], &[]);
        self.execute(self.request(Method::GET, url), "wallet balance")
            .await
    }

    /// `GET /wallet/transactions`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn wallet_transactions(&self) -> Result<Vec<WalletTransaction>, ApiError> {
        let url = self.endpoint(&["wallet", "transactions"], &[]);
        self.execute(self.request(Method::GET, url), "wallet transactions")
            .await
    }

    /// `POST /wallet/add-money`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] without sending anything when
    /// `amount` is not positive.
    pub async fn add_money(&self, amount: Decimal) -> Result<WalletTopUp, ApiError> {
        if amount <= Decimal::ZERO {
            return Err(ApiError::Validation(
                "Amount must be greater than zero.".to_owned(),
            ));
        }

        let url = self.endpoint(&["wallet", "add-money"], &[]);
        let topup: WalletTopUp = self
            .execute(
                self.request(Method::POST, url).json(&AddMoneyRequest { amount }),
                "wallet top-up",
            )
            .await?;
        tracing::info!(%amount, balance = ?topup.balance, "wallet topped up");
        Ok(topup)
    }

    /// `GET /wallet/loyalty-points`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn loyalty_points(&self) -> Result<Decimal, ApiError> {
        let url = self.endpoint(&["wallet", "loyalty-points"], &[]);
        self.execute(self.request(Method::GET, url), "loyalty points")
            .await
    }

    /// `GET /wallet/calculate-loyalty-points?orderTotal=`: current points and
    /// what an order of `order_total` would earn.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn calculate_loyalty_points(
        &self,
        order_total: Decimal,
    ) -> Result<LoyaltyPreview, ApiError> {
        let total = order_total.normalize().to_string();
        let url = self.endpoint(
            &["wallet", "calculate-loyalty-points"],
            &[("orderTotal", total.as_str())],
        );
        self.execute(self.request(Method::GET, url), "loyalty preview")
            .await
    }
}
