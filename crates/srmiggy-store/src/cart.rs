//! Persistent, vendor-scoped cart.

use rust_decimal::Decimal;
use srmiggy_core::{Cart, CartLine, MenuItem, Vendor};

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::snapshot::{decode_cart, encode_snapshot, CART_KEY, VENDOR_KEY};

/// What the user is asked to confirm before a cross-vendor add wipes the cart.
#[derive(Debug, Clone, Copy)]
pub struct VendorSwitch<'a> {
    pub current_vendor_id: i64,
    pub new_vendor: &'a Vendor,
    /// Items that will be discarded (sum of quantities).
    pub discarded_items: u64,
}

/// Cart state with write-through persistence.
///
/// Every mutator writes the next state to storage before swapping it in, so
/// a failed write leaves memory on the previous state and is reported to
/// the caller. When the vendor key write fails after the snapshot was
/// written, the snapshot is put back to match memory.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    store: S,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Loads the persisted cart, falling back to an empty one when nothing
    /// usable is stored. Never fails.
    pub fn restore(store: S) -> Self {
        let cart = match (store.get(CART_KEY), store.get(VENDOR_KEY)) {
            (Ok(lines), Ok(vendor)) => match decode_cart(lines.as_deref(), vendor.as_deref()) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable cart snapshot");
                    Cart::default()
                }
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "cart storage unreadable; starting with an empty cart");
                Cart::default()
            }
        };

        tracing::debug!(
            vendor_id = ?cart.vendor_id,
            lines = cart.lines.len(),
            "cart restored"
        );
        Self { store, cart }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.cart.lines
    }

    #[must_use]
    pub fn vendor_id(&self) -> Option<i64> {
        self.cart.vendor_id
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of `unit_price × quantity`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Adds one unit of `item` from `vendor`.
    ///
    /// When the cart already holds another vendor's items, `confirm` is asked
    /// whether to discard them; declining returns `Ok(false)` and changes
    /// nothing. Accepting replaces the cart with just this item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted; the cart
    /// is then unchanged.
    pub fn add<F>(&mut self, item: &MenuItem, vendor: &Vendor, confirm: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&VendorSwitch<'_>) -> bool,
    {
        let mut next = if self.cart.conflicts_with(vendor.id) {
            let switch = VendorSwitch {
                current_vendor_id: self.cart.vendor_id.unwrap_or_default(),
                new_vendor: vendor,
                discarded_items: self.cart.item_count(),
            };
            if !confirm(&switch) {
                tracing::debug!(vendor_id = vendor.id, "vendor switch declined");
                return Ok(false);
            }
            tracing::info!(
                from_vendor = switch.current_vendor_id,
                to_vendor = vendor.id,
                "vendor switch confirmed; discarding cart"
            );
            Cart::default()
        } else {
            self.cart.clone()
        };

        match next.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => next.lines.push(CartLine::from_menu_item(item)),
        }
        next.vendor_id = Some(vendor.id);

        self.commit(next)?;
        Ok(true)
    }

    /// Deletes the line for `item_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted.
    pub fn remove(&mut self, item_id: i64) -> Result<(), StoreError> {
        let mut next = self.cart.clone();
        next.lines.retain(|l| l.item_id != item_id);
        self.commit(next)
    }

    /// Overwrites the quantity for `item_id`; zero or less removes the line.
    /// Unknown items are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state cannot be persisted.
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) -> Result<(), StoreError> {
        if quantity <= 0 {
            return self.remove(item_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut next = self.cart.clone();
        match next.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => line.quantity = quantity,
            None => return Ok(()),
        }
        self.commit(next)
    }

    /// Empties the cart and deletes the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be removed.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(Cart::default())
    }

    /// Hands back the underlying storage.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn commit(&mut self, next: Cart) -> Result<(), StoreError> {
        debug_assert!(next.is_empty() || next.vendor_id.is_some());

        match next.vendor_id.filter(|_| !next.is_empty()) {
            None => {
                // Without a snapshot the cart reads back empty whatever the
                // vendor key holds, so a stale vendor key is harmless.
                self.store.remove(CART_KEY)?;
                self.cart = Cart::default();
                if let Err(e) = self.store.remove(VENDOR_KEY) {
                    tracing::warn!(error = %e, "cart cleared but vendor key could not be removed");
                }
            }
            Some(vendor_id) => {
                self.store
                    .set(CART_KEY, &encode_snapshot(vendor_id, &next.lines)?)?;
                if let Err(e) = self.store.set(VENDOR_KEY, &vendor_id.to_string()) {
                    self.roll_back_snapshot();
                    return Err(e);
                }
                self.cart = next;
            }
        }
        Ok(())
    }

    /// Rewrites the snapshot key from the in-memory cart after the vendor
    /// key write failed. If this fails too the two keys disagree and the
    /// next restore starts empty.
    fn roll_back_snapshot(&mut self) {
        let result = match self.cart.vendor_id.filter(|_| !self.cart.is_empty()) {
            None => self.store.remove(CART_KEY),
            Some(vendor_id) => encode_snapshot(vendor_id, &self.cart.lines)
                .and_then(|raw| self.store.set(CART_KEY, &raw)),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not roll back cart snapshot");
        }
    }
}
