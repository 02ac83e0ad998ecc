use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MenuItem, OrderItemRequest};

/// One menu item in the cart. A line with quantity zero is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartLine {
    /// A fresh line for `item` with quantity 1.
    #[must_use]
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            image_ref: item.image_url.clone(),
        }
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Vendor-scoped collection of lines pending order.
///
/// A non-empty cart always carries the vendor its lines came from; lines
/// from two vendors never share a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub vendor_id: Option<i64>,
    pub lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, item_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Lines in the shape `POST /orders` expects.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItemRequest> {
        self.lines
            .iter()
            .map(|l| OrderItemRequest {
                menu_item_id: l.item_id,
                quantity: l.quantity,
            })
            .collect()
    }

    /// `true` when adding from `vendor_id` would discard existing lines.
    #[must_use]
    pub fn conflicts_with(&self, vendor_id: i64) -> bool {
        !self.is_empty() && self.vendor_id.is_some_and(|v| v != vendor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: i64, price: i64, quantity: u32) -> CartLine {
        CartLine {
            item_id,
            name: format!("item-{item_id}"),
            unit_price: Decimal::from(price),
            quantity,
            image_ref: None,
        }
    }

    #[test]
    fn subtotal_and_count_cover_all_lines() {
        let cart = Cart {
            vendor_id: Some(1),
            lines: vec![line(1, 40, 2), line(2, 15, 3)],
        };
        assert_eq!(cart.subtotal(), Decimal::from(125));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = Cart::default();
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
        assert!(!cart.conflicts_with(7));
    }

    #[test]
    fn conflict_only_for_other_vendor() {
        let cart = Cart {
            vendor_id: Some(1),
            lines: vec![line(1, 40, 1)],
        };
        assert!(!cart.conflicts_with(1));
        assert!(cart.conflicts_with(2));
    }

    #[test]
    fn order_items_map_ids_and_quantities() {
        let cart = Cart {
            vendor_id: Some(1),
            lines: vec![line(11, 40, 2), line(12, 15, 1)],
        };
        let items = cart.order_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].menu_item_id, 11);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].menu_item_id, 12);
    }
}
