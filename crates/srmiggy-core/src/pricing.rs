//! Display-side fee and discount arithmetic.
//!
//! The backend is the pricing authority; these functions mirror its
//! arithmetic so the cart and checkout views can show totals before an
//! order exists. They are pure: identical inputs always give identical
//! outputs.

use rust_decimal::Decimal;

/// Fee constants and the switches that select between the two pricing
/// revisions the backend has shipped (delivery fee under a threshold, or a
/// hard minimum order value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub delivery_fee_enabled: bool,
    pub delivery_fee: Decimal,
    pub min_order_threshold: Decimal,
    pub platform_fee: Decimal,
    /// When set, checkout is blocked while the subtotal is under
    /// `min_order_threshold`.
    pub enforce_minimum_order: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_fee_enabled: true,
            delivery_fee: Decimal::from(10),
            min_order_threshold: Decimal::from(100),
            platform_fee: Decimal::from(2),
            enforce_minimum_order: false,
        }
    }
}

/// Everything outside the cart that feeds the price shown at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingInput {
    pub subtotal: Decimal,
    /// Last loyalty balance fetched from the server; zero when unknown.
    pub available_points: Decimal,
    pub use_loyalty_points: bool,
    /// Server-computed points preview, authoritative when present.
    pub server_points_preview: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub platform_fee: Decimal,
    pub loyalty_discount: Decimal,
    pub total: Decimal,
    pub points_earned_preview: Decimal,
    /// `true` while the preview is the local placeholder rather than the
    /// server's figure.
    pub points_preview_is_estimate: bool,
}

impl PriceBreakdown {
    /// Total before the loyalty discount is applied.
    #[must_use]
    pub fn pre_discount_total(&self) -> Decimal {
        self.subtotal + self.delivery_fee + self.platform_fee
    }
}

impl PricingConfig {
    #[must_use]
    pub fn delivery_fee_for(&self, subtotal: Decimal) -> Decimal {
        if self.delivery_fee_enabled && subtotal < self.min_order_threshold {
            self.delivery_fee
        } else {
            Decimal::ZERO
        }
    }

    /// Amount still needed to reach the minimum order, if one is enforced.
    #[must_use]
    pub fn minimum_order_shortfall(&self, subtotal: Decimal) -> Option<Decimal> {
        (self.enforce_minimum_order && subtotal < self.min_order_threshold)
            .then(|| self.min_order_threshold - subtotal)
    }

    #[must_use]
    pub fn breakdown(&self, input: &PricingInput) -> PriceBreakdown {
        let subtotal = input.subtotal;
        let delivery_fee = self.delivery_fee_for(subtotal);
        let platform_fee = self.platform_fee;
        let pre_discount = subtotal + delivery_fee + platform_fee;

        let loyalty_discount = if input.use_loyalty_points {
            input.available_points.max(Decimal::ZERO).min(pre_discount)
        } else {
            Decimal::ZERO
        };

        let (points_earned_preview, points_preview_is_estimate) =
            match input.server_points_preview {
                Some(points) => (points, false),
                None => (points_earned_preview(subtotal), true),
            };

        PriceBreakdown {
            subtotal,
            delivery_fee,
            platform_fee,
            loyalty_discount,
            total: pre_discount - loyalty_discount,
            points_earned_preview,
            points_preview_is_estimate,
        }
    }
}

/// Local estimate of loyalty points earned: 0.5 points per ₹100 of subtotal.
#[must_use]
pub fn points_earned_preview(subtotal: Decimal) -> Decimal {
    subtotal / Decimal::from(100) * Decimal::new(5, 1)
}

/// How much more the wallet needs to cover `total`, if anything.
#[must_use]
pub fn wallet_shortfall(balance: Decimal, total: Decimal) -> Option<Decimal> {
    (balance < total).then(|| total - balance)
}

/// Formats a rupee amount for user-facing messages: whole amounts print
/// without decimals (`₹42`), fractional ones with two (`₹42.50`).
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.fract().is_zero() {
        format!("₹{}", rounded.trunc().normalize())
    } else {
        format!("₹{rounded:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().expect("valid decimal literal")
    }

    fn input(subtotal: &str) -> PricingInput {
        PricingInput {
            subtotal: d(subtotal),
            ..PricingInput::default()
        }
    }

    #[test]
    fn small_order_pays_delivery_and_platform_fee() {
        let quote = PricingConfig::default().breakdown(&input("80"));
        assert_eq!(quote.delivery_fee, d("10"));
        assert_eq!(quote.platform_fee, d("2"));
        assert_eq!(quote.total, d("92"));
    }

    #[test]
    fn order_at_threshold_skips_delivery_fee() {
        let quote = PricingConfig::default().breakdown(&input("100"));
        assert_eq!(quote.delivery_fee, Decimal::ZERO);
        assert_eq!(quote.total, d("102"));
    }

    #[test]
    fn loyalty_discount_uses_available_points() {
        let quote = PricingConfig::default().breakdown(&PricingInput {
            subtotal: d("150"),
            available_points: d("5"),
            use_loyalty_points: true,
            server_points_preview: None,
        });
        assert_eq!(quote.loyalty_discount, d("5"));
        assert_eq!(quote.total, d("147"));
    }

    #[test]
    fn loyalty_discount_is_capped_at_pre_discount_total() {
        let quote = PricingConfig::default().breakdown(&PricingInput {
            subtotal: d("50"),
            available_points: d("500"),
            use_loyalty_points: true,
            server_points_preview: None,
        });
        assert_eq!(quote.loyalty_discount, d("62"));
        assert_eq!(quote.total, Decimal::ZERO);
    }

    #[test]
    fn loyalty_discount_ignored_when_toggle_off() {
        let quote = PricingConfig::default().breakdown(&PricingInput {
            subtotal: d("150"),
            available_points: d("5"),
            use_loyalty_points: false,
            server_points_preview: None,
        });
        assert_eq!(quote.loyalty_discount, Decimal::ZERO);
        assert_eq!(quote.total, d("152"));
    }

    #[test]
    fn negative_point_balance_never_increases_total() {
        let quote = PricingConfig::default().breakdown(&PricingInput {
            subtotal: d("150"),
            available_points: d("-3"),
            use_loyalty_points: true,
            server_points_preview: None,
        });
        assert_eq!(quote.loyalty_discount, Decimal::ZERO);
        assert_eq!(quote.total, d("152"));
    }

    #[test]
    fn delivery_fee_flag_off_removes_fee() {
        let config = PricingConfig {
            delivery_fee_enabled: false,
            ..PricingConfig::default()
        };
        let quote = config.breakdown(&input("80"));
        assert_eq!(quote.delivery_fee, Decimal::ZERO);
        assert_eq!(quote.total, d("82"));
    }

    #[test]
    fn breakdown_is_deterministic() {
        let config = PricingConfig::default();
        let pricing_input = PricingInput {
            subtotal: d("123.45"),
            available_points: d("7.5"),
            use_loyalty_points: true,
            server_points_preview: Some(d("0.6")),
        };
        assert_eq!(config.breakdown(&pricing_input), config.breakdown(&pricing_input));
    }

    #[test]
    fn points_preview_prefers_server_value() {
        let quote = PricingConfig::default().breakdown(&PricingInput {
            subtotal: d("200"),
            server_points_preview: Some(d("1.5")),
            ..PricingInput::default()
        });
        assert_eq!(quote.points_earned_preview, d("1.5"));
        assert!(!quote.points_preview_is_estimate);
    }

    #[test]
    fn points_preview_falls_back_to_local_estimate() {
        let quote = PricingConfig::default().breakdown(&input("200"));
        assert_eq!(quote.points_earned_preview, d("1"));
        assert!(quote.points_preview_is_estimate);
    }

    #[test]
    fn minimum_shortfall_only_when_enforced() {
        let relaxed = PricingConfig::default();
        assert_eq!(relaxed.minimum_order_shortfall(d("80")), None);

        let strict = PricingConfig {
            enforce_minimum_order: true,
            ..PricingConfig::default()
        };
        assert_eq!(strict.minimum_order_shortfall(d("80")), Some(d("20")));
        assert_eq!(strict.minimum_order_shortfall(d("100")), None);
    }

    #[test]
    fn wallet_shortfall_reports_missing_amount() {
        assert_eq!(wallet_shortfall(d("50"), d("92")), Some(d("42")));
        assert_eq!(wallet_shortfall(d("92"), d("92")), None);
    }

    #[test]
    fn format_inr_drops_zero_fraction() {
        assert_eq!(format_inr(d("42.00")), "₹42");
        assert_eq!(format_inr(d("42")), "₹42");
        assert_eq!(format_inr(d("42.5")), "₹42.50");
        assert_eq!(format_inr(d("0.756")), "₹0.76");
    }
}
