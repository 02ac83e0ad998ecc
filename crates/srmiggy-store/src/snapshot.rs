//! Versioned on-disk shape of the persisted cart.
//!
//! Two keys, matching what the web client wrote to local storage:
//! - `cart`: `{"version": 1, "vendorId": 4, "lines": [...]}`
//! - `cartVendorId`: the owning vendor id as text
//!
//! The snapshot repeats the vendor id so a torn write across the two keys
//! is detected on read instead of pairing lines with the wrong vendor.
//!
//! Unversioned snapshots (a bare array of menu-item objects) are migrated
//! on read. Anything else is reported as a [`SnapshotError`] and the caller
//! decides how to fall back.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use srmiggy_core::{Cart, CartLine};
use thiserror::Error;

use crate::error::StoreError;

pub const CART_SCHEMA_VERSION: u32 = 1;

pub(crate) const CART_KEY: &str = "cart";
pub(crate) const VENDOR_KEY: &str = "cartVendorId";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cart snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("cart snapshot version {0} is not supported")]
    UnsupportedVersion(u64),

    #[error("cart snapshot has an unrecognised shape")]
    UnknownShape,

    #[error("cart has items but no vendor id")]
    MissingVendor,

    #[error("cart vendor id '{0}' is not a number")]
    InvalidVendor(String),

    #[error("cart snapshot belongs to vendor {snapshot} but vendor key says {stored}")]
    VendorMismatch { snapshot: i64, stored: i64 },

    #[error("cart line for item {0} has zero quantity")]
    ZeroQuantity(i64),

    #[error("cart contains item {0} more than once")]
    DuplicateItem(i64),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotV1 {
    vendor_id: Option<i64>,
    lines: Vec<CartLine>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotV1Ref<'a> {
    version: u32,
    vendor_id: i64,
    lines: &'a [CartLine],
}

/// Line shape written by the web client: the whole menu item plus a quantity.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLine {
    id: i64,
    name: String,
    price: Decimal,
    quantity: i64,
    #[serde(default)]
    image_url: Option<String>,
}

pub(crate) fn encode_snapshot(vendor_id: i64, lines: &[CartLine]) -> Result<String, StoreError> {
    serde_json::to_string(&SnapshotV1Ref {
        version: CART_SCHEMA_VERSION,
        vendor_id,
        lines,
    })
    .map_err(|source| StoreError::Serialize {
        context: "cart snapshot".to_owned(),
        source,
    })
}

/// Rebuilds a cart from the two persisted entries.
///
/// A missing or empty line list yields an empty cart whatever the vendor
/// entry holds.
///
/// # Errors
///
/// Returns [`SnapshotError`] when the entries cannot be trusted.
pub fn decode_cart(lines_raw: Option<&str>, vendor_raw: Option<&str>) -> Result<Cart, SnapshotError> {
    let Some(lines_raw) = lines_raw else {
        return Ok(Cart::default());
    };

    let value: serde_json::Value = serde_json::from_str(lines_raw)?;
    let version = value.get("version").and_then(serde_json::Value::as_u64);
    let (embedded_vendor, lines) = if value.is_array() {
        (None, migrate_legacy(value)?)
    } else {
        match version {
            Some(v) if v == u64::from(CART_SCHEMA_VERSION) => {
                let snapshot = serde_json::from_value::<SnapshotV1>(value)?;
                (snapshot.vendor_id, snapshot.lines)
            }
            Some(v) => return Err(SnapshotError::UnsupportedVersion(v)),
            None => return Err(SnapshotError::UnknownShape),
        }
    };

    if lines.is_empty() {
        return Ok(Cart::default());
    }

    let mut seen = HashSet::new();
    for line in &lines {
        if line.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(line.item_id));
        }
        if !seen.insert(line.item_id) {
            return Err(SnapshotError::DuplicateItem(line.item_id));
        }
    }

    let vendor_raw = vendor_raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SnapshotError::MissingVendor)?;
    let vendor_id = vendor_raw
        .parse::<i64>()
        .map_err(|_| SnapshotError::InvalidVendor(vendor_raw.to_owned()))?;

    if let Some(snapshot) = embedded_vendor.filter(|v| *v != vendor_id) {
        return Err(SnapshotError::VendorMismatch {
            snapshot,
            stored: vendor_id,
        });
    }

    Ok(Cart {
        vendor_id: Some(vendor_id),
        lines,
    })
}

fn migrate_legacy(value: serde_json::Value) -> Result<Vec<CartLine>, SnapshotError> {
    let legacy: Vec<LegacyLine> = serde_json::from_value(value)?;
    let lines = legacy
        .into_iter()
        .filter_map(|l| {
            let quantity = u32::try_from(l.quantity).ok().filter(|q| *q > 0)?;
            Some(CartLine {
                item_id: l.id,
                name: l.name,
                unit_price: l.price,
                quantity,
                image_ref: l.image_url,
            })
        })
        .collect();
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: i64, quantity: u32) -> CartLine {
        CartLine {
            item_id,
            name: format!("item-{item_id}"),
            unit_price: "49.50".parse().unwrap(),
            quantity,
            image_ref: Some(format!("https://img/{item_id}.png")),
        }
    }

    #[test]
    fn encoded_snapshot_decodes_to_same_cart() {
        let lines = vec![line(1, 2), line(2, 1)];
        let raw = encode_snapshot(4, &lines).unwrap();
        let cart = decode_cart(Some(&raw), Some("4")).unwrap();
        assert_eq!(cart.vendor_id, Some(4));
        assert_eq!(cart.lines, lines);
    }

    #[test]
    fn encoded_snapshot_carries_version_and_string_prices() {
        let raw = encode_snapshot(1, &[line(1, 1)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["vendorId"], 1);
        assert_eq!(value["lines"][0]["unitPrice"], "49.50");
    }

    #[test]
    fn legacy_array_is_migrated() {
        let raw = r#"[
            {"id": 5, "name": "Masala Dosa", "price": 60.0, "quantity": 2, "imageUrl": "d.png", "isVeg": true},
            {"id": 6, "name": "Filter Coffee", "price": 20, "quantity": 0}
        ]"#;
        let cart = decode_cart(Some(raw), Some("3")).unwrap();
        assert_eq!(cart.vendor_id, Some(3));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].item_id, 5);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].unit_price, Decimal::from(60));
        assert_eq!(cart.lines[0].image_ref.as_deref(), Some("d.png"));
    }

    #[test]
    fn missing_lines_mean_empty_cart() {
        let cart = decode_cart(None, Some("3")).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.vendor_id, None);
    }

    #[test]
    fn future_version_is_rejected() {
        let err = decode_cart(Some(r#"{"version": 9, "lines": []}"#), Some("1")).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedVersion(9)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            decode_cart(Some("{not json"), Some("1")),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            decode_cart(Some("\"cart\""), Some("1")),
            Err(SnapshotError::UnknownShape)
        ));
    }

    #[test]
    fn lines_without_vendor_are_rejected() {
        let raw = encode_snapshot(1, &[line(1, 1)]).unwrap();
        assert!(matches!(
            decode_cart(Some(&raw), None),
            Err(SnapshotError::MissingVendor)
        ));
        assert!(matches!(
            decode_cart(Some(&raw), Some("null")),
            Err(SnapshotError::InvalidVendor(_))
        ));
    }

    #[test]
    fn torn_vendor_switch_is_detected() {
        let raw = encode_snapshot(2, &[line(1, 1)]).unwrap();
        assert!(matches!(
            decode_cart(Some(&raw), Some("7")),
            Err(SnapshotError::VendorMismatch {
                snapshot: 2,
                stored: 7
            })
        ));
    }

    #[test]
    fn duplicate_and_zero_lines_are_rejected() {
        let dup = encode_snapshot(1, &[line(1, 1), line(1, 2)]).unwrap();
        assert!(matches!(
            decode_cart(Some(&dup), Some("1")),
            Err(SnapshotError::DuplicateItem(1))
        ));

        let zero = encode_snapshot(1, &[line(1, 0)]).unwrap();
        assert!(matches!(
            decode_cart(Some(&zero), Some("1")),
            Err(SnapshotError::ZeroQuantity(1))
        ));
    }
}
