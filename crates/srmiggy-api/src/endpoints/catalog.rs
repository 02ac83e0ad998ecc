use reqwest::Method;
use srmiggy_core::{MenuItem, SlotAvailability, Vendor};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /vendors`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn list_vendors(&self) -> Result<Vec<Vendor>, ApiError> {
        let url = self.endpoint(&["vendors"], &[]);
        self.execute(self.request(Method::GET, url), "list vendors")
            .await
    }

    /// `GET /vendors/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown vendor, otherwise as
    /// [`Self::list_vendors`].
    pub async fn get_vendor(&self, vendor_id: i64) -> Result<Vendor, ApiError> {
        let id = vendor_id.to_string();
        let url = self.endpoint(&["vendors", id.as_str()], &[]);
        self.execute(
            self.request(Method::GET, url),
            &format!("vendor {vendor_id}"),
        )
        .await
    }

    /// `GET /menu/vendor/{vendorId}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn vendor_menu(&self, vendor_id: i64) -> Result<Vec<MenuItem>, ApiError> {
        let id = vendor_id.to_string();
        let url = self.endpoint(&["menu", "vendor", id.as_str()], &[]);
        self.execute(
            self.request(Method::GET, url),
            &format!("menu of vendor {vendor_id}"),
        )
        .await
    }

    /// `GET /menu/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown item.
    pub async fn get_menu_item(&self, item_id: i64) -> Result<MenuItem, ApiError> {
        let id = item_id.to_string();
        let url = self.endpoint(&["menu", id.as_str()], &[]);
        self.execute(
            self.request(Method::GET, url),
            &format!("menu item {item_id}"),
        )
        .await
    }

    /// `GET /slots`: active delivery slots and whether ordering is open.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected body.
    pub async fn active_slots(&self) -> Result<SlotAvailability, ApiError> {
        let url = self.endpoint(&["slots"], &[]);
        self.execute(self.request(Method::GET, url), "delivery slots")
            .await
    }
}
