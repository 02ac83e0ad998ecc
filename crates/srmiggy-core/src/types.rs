//! Wire types for the SRMiggy REST API.
//!
//! The backend speaks camelCase JSON with numeric ids (UUIDs for delivery
//! slots) and floating-point money. Amounts are read into [`Decimal`] so display arithmetic never
//! accumulates float error.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub is_veg: bool,
}

/// Diet filter offered on a vendor's menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuFilter {
    #[default]
    All,
    Veg,
    NonVeg,
}

impl MenuFilter {
    #[must_use]
    pub fn matches(self, item: &MenuItem) -> bool {
        match self {
            MenuFilter::All => true,
            MenuFilter::Veg => item.is_veg,
            MenuFilter::NonVeg => !item.is_veg,
        }
    }

    pub fn apply<'a>(self, items: &'a [MenuItem]) -> impl Iterator<Item = &'a MenuItem> + 'a {
        items.iter().filter(move |item| self.matches(item))
    }
}

/// Opaque delivery-slot identifier. The backend issues UUIDs; numeric ids
/// from older deployments are kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self(id.trim().to_owned())
    }
}

impl From<String> for SlotId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => SlotId(n.to_string()),
            Raw::Text(s) => SlotId::from(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySlot {
    pub id: SlotId,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl DeliverySlot {
    /// Human label: the server's display name, else `HH:MM–HH:MM`.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                format!("{}–{}", start.format("%H:%M"), end.format("%H:%M"))
            }
            _ => format!("slot {}", self.id),
        }
    }
}

/// Response of `GET /slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    pub slots: Vec<DeliverySlot>,
    pub is_ordering_open: bool,
}

impl SlotAvailability {
    /// Active slots the user may pick, ignoring any the server flagged inactive.
    pub fn open_slots(&self) -> impl Iterator<Item = &DeliverySlot> {
        self.slots.iter().filter(|s| s.active)
    }
}

// Older backends answer `GET /slots` with a bare array and no ordering flag.
impl<'de> Deserialize<'de> for SlotAvailability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Envelope {
            slots: Vec<DeliverySlot>,
            #[serde(default = "default_true")]
            is_ordering_open: bool,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Envelope(Envelope),
            Bare(Vec<DeliverySlot>),
        }

        Ok(match Shape::deserialize(deserializer)? {
            Shape::Envelope(e) => SlotAvailability {
                slots: e.slots,
                is_ordering_open: e.is_ordering_open,
            },
            Shape::Bare(slots) => SlotAvailability {
                slots,
                is_ordering_open: true,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "WALLET")]
    Wallet,
    /// Card/UPI through the payment provider.
    #[serde(rename = "ONLINE")]
    Online,
    #[serde(rename = "COD")]
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Wallet => write!(f, "wallet"),
            PaymentMethod::Online => write!(f, "online"),
            PaymentMethod::CashOnDelivery => write!(f, "cod"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wallet" => Ok(PaymentMethod::Wallet),
            "online" | "card" | "upi" | "mock" => Ok(PaymentMethod::Online),
            "cod" | "cash" | "cash-on-delivery" => Ok(PaymentMethod::CashOnDelivery),
            other => Err(format!(
                "unknown payment method '{other}' (expected wallet, online, or cod)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Query-string form used by `PUT /admin/orders/{id}/status`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
        .into_iter()
        .find(|status| status.as_str() == normalised)
        .ok_or_else(|| format!("unknown order status '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: i64,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub vendor_id: i64,
    pub slot_id: SlotId,
    pub delivery_address: String,
    pub customer_phone: String,
    pub items: Vec<OrderItemRequest>,
    pub use_loyalty_points: bool,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub menu_item_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

/// Server-owned order record. The client keeps only what it needs to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub platform_fee: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub points_used: Option<Decimal>,
    #[serde(default, alias = "loyaltyPointsEarned")]
    pub points_earned: Option<Decimal>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Response of `POST /payments/create-order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub provider_order_id: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "id_from_number_or_string")]
    pub order_id: Option<i64>,
}

/// Body of `POST /payments/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub provider_order_id: String,
    pub provider_payment_id: String,
    pub provider_signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub provider_order_id: Option<String>,
    #[serde(default)]
    pub provider_payment_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletTransactionKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    #[serde(default)]
    pub id: Option<i64>,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: WalletTransactionKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Response of `POST /wallet/add-money`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTopUp {
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /wallet/calculate-loyalty-points`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyPreview {
    pub current_points: Decimal,
    pub points_earned_from_order: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: u64,
    pub total_vendors: u64,
    pub total_users: u64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(default, deserialize_with = "id_from_number_or_string")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub wallet_balance: Option<Decimal>,
    #[serde(default)]
    pub loyalty_points: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "id_from_number_or_string")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub wallet_balance: Option<Decimal>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Some endpoints echo ids back as strings (`"orderId": "42"`).
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => Ok(s.trim().parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_parses_backend_shape() {
        let item: MenuItem = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Paneer Roll",
            "price": 85.0,
            "imageUrl": "https://img/roll.png",
            "available": true,
            "isVeg": true
        }))
        .expect("menu item should parse");
        assert_eq!(item.id, 7);
        assert_eq!(item.price, Decimal::from(85));
        assert_eq!(item.image_url.as_deref(), Some("https://img/roll.png"));
        assert!(item.is_veg);
    }

    #[test]
    fn menu_filter_splits_veg_and_non_veg() {
        let items: Vec<MenuItem> = serde_json::from_value(serde_json::json!([
            { "id": 1, "name": "Dosa", "price": 40, "isVeg": true },
            { "id": 2, "name": "Chicken Biryani", "price": 120, "isVeg": false }
        ]))
        .expect("menu should parse");

        let veg: Vec<i64> = MenuFilter::Veg.apply(&items).map(|i| i.id).collect();
        let non_veg: Vec<i64> = MenuFilter::NonVeg.apply(&items).map(|i| i.id).collect();
        assert_eq!(veg, vec![1]);
        assert_eq!(non_veg, vec![2]);
        assert_eq!(MenuFilter::All.apply(&items).count(), 2);
    }

    #[test]
    fn slot_availability_accepts_envelope() {
        let availability: SlotAvailability = serde_json::from_value(serde_json::json!({
            "slots": [{ "id": 3, "startTime": "12:00:00", "endTime": "13:00:00", "active": true }],
            "isOrderingOpen": false
        }))
        .expect("envelope should parse");
        assert!(!availability.is_ordering_open);
        assert_eq!(availability.slots.len(), 1);
        assert_eq!(availability.slots[0].label(), "12:00–13:00");
    }

    #[test]
    fn slot_availability_accepts_bare_array() {
        let availability: SlotAvailability = serde_json::from_value(serde_json::json!([
            { "id": 1, "displayName": "Lunch 12–1", "active": true },
            { "id": 2, "displayName": "Closed", "active": false }
        ]))
        .expect("bare array should parse");
        assert!(availability.is_ordering_open);
        assert_eq!(availability.open_slots().count(), 1);
    }

    #[test]
    fn slot_availability_accepts_uuid_ids() {
        let availability: SlotAvailability = serde_json::from_str(
            r#"[{"id":"3f2b8c1e-9d4a-4b7e-a1c2-5e6f7a8b9c0d","startTime":"12:00:00","endTime":"13:00:00","active":true}]"#,
        )
        .expect("uuid slot ids should parse");
        assert_eq!(
            availability.slots[0].id.as_str(),
            "3f2b8c1e-9d4a-4b7e-a1c2-5e6f7a8b9c0d"
        );
        assert_eq!(availability.slots[0].label(), "12:00–13:00");
    }

    #[test]
    fn numeric_slot_ids_become_text() {
        let slot: DeliverySlot =
            serde_json::from_value(serde_json::json!({ "id": 7 })).expect("slot should parse");
        assert_eq!(slot.id, SlotId::from("7"));
        assert_eq!(serde_json::to_value(&slot.id).unwrap(), "7");
    }

    #[test]
    fn create_order_request_uses_camel_case() {
        let body = serde_json::to_value(CreateOrderRequest {
            vendor_id: 1,
            slot_id: SlotId::from("2"),
            delivery_address: "Hostel A".to_owned(),
            customer_phone: "9999999999".to_owned(),
            items: vec![OrderItemRequest {
                menu_item_id: 5,
                quantity: 2,
            }],
            use_loyalty_points: true,
            payment_method: PaymentMethod::CashOnDelivery,
        })
        .expect("request should serialize");
        assert_eq!(body["vendorId"], 1);
        assert_eq!(body["slotId"], "2");
        assert_eq!(body["items"][0]["menuItemId"], 5);
        assert_eq!(body["useLoyaltyPoints"], true);
        assert_eq!(body["paymentMethod"], "COD");
    }

    #[test]
    fn payment_order_accepts_string_order_id() {
        let order: PaymentOrder = serde_json::from_value(serde_json::json!({
            "providerOrderId": "MOCK_abc",
            "amount": 92.0,
            "provider": "MOCK",
            "orderId": "42"
        }))
        .expect("payment order should parse");
        assert_eq!(order.order_id, Some(42));
    }

    #[test]
    fn order_status_round_trips_through_str() {
        let status: OrderStatus = "out-for-delivery".parse().expect("status should parse");
        assert_eq!(status, OrderStatus::OutForDelivery);
        assert_eq!(status.to_string(), "OUT_FOR_DELIVERY");
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn payment_method_parses_aliases() {
        assert_eq!("UPI".parse::<PaymentMethod>(), Ok(PaymentMethod::Online));
        assert_eq!("cod".parse::<PaymentMethod>(), Ok(PaymentMethod::CashOnDelivery));
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
