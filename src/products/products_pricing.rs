use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// Which side of the `price = vendor_price + margin` equation the admin
/// last edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    VendorPrice,
    Margin,
    Price,
}

/// The three cooperating pricing fields of the margin-aware edit surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    pub vendor_price: Decimal,
    pub margin: Decimal,
    pub price: Decimal,
}

/// Re-balance the pricing triple so `price = vendor_price + margin` holds
/// after `changed` was edited. Editing the vendor price or the margin
/// recomputes the selling price; editing the selling price recomputes the
/// margin, leaving the vendor price alone. Idempotent for a fixed
/// `changed` field.
pub fn reconcile(pricing: Pricing, changed: PriceField) -> Pricing {
    match changed {
        PriceField::VendorPrice | PriceField::Margin => Pricing {
            price: pricing.vendor_price + pricing.margin,
            ..pricing
        },
        PriceField::Price => Pricing {
            margin: pricing.price - pricing.vendor_price,
            ..pricing
        },
    }
}

/// Derive the discount badge from the strike-through price, e.g. `"25% Off"`.
/// Absent unless `original_price > price > 0`.
pub fn derive_discount(original_price: Option<Decimal>, price: Decimal) -> Option<String> {
    let original_price = original_price?;
    if !(original_price > price && price > Decimal::ZERO) {
        return None;
    }
    let percent = ((original_price - price) / original_price * Decimal::from(100)).round();
    Some(format!("{}% Off", percent))
}

/// Numeric percentage carried by a discount badge; absent or unparsable
/// badges count as zero (used by the discount sort).
pub fn discount_percent(discount: Option<&str>) -> i64 {
    discount
        .and_then(|d| d.split('%').next())
        .and_then(|n| n.trim().parse::<f64>().ok())
        .and_then(|n| n.to_i64())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn margin_edit_recomputes_price() {
        let pricing = reconcile(
            Pricing {
                vendor_price: dec!(400),
                margin: dec!(100),
                price: dec!(0),
            },
            PriceField::Margin,
        );
        assert_eq!(pricing.price, dec!(500));
        assert_eq!(pricing.vendor_price, dec!(400));
    }

    #[test]
    fn price_edit_recomputes_margin_keeping_vendor_price() {
        let pricing = reconcile(
            Pricing {
                vendor_price: dec!(400),
                margin: dec!(100),
                price: dec!(600),
            },
            PriceField::Price,
        );
        assert_eq!(pricing.margin, dec!(200));
        assert_eq!(pricing.vendor_price, dec!(400));
        assert_eq!(pricing.price, dec!(600));
    }

    #[test]
    fn reconcile_is_idempotent_per_changed_field() {
        let start = Pricing {
            vendor_price: dec!(250),
            margin: dec!(75),
            price: dec!(999),
        };
        for changed in [PriceField::VendorPrice, PriceField::Margin, PriceField::Price] {
            let once = reconcile(start, changed);
            let twice = reconcile(once, changed);
            assert_eq!(once, twice);
            assert_eq!(once.price, once.vendor_price + once.margin);
        }
    }

    #[test]
    fn discount_badge_from_strike_through_price() {
        assert_eq!(
            derive_discount(Some(dec!(1000)), dec!(750)).as_deref(),
            Some("25% Off")
        );
        // Rounded to the nearest whole percent.
        assert_eq!(
            derive_discount(Some(dec!(300)), dec!(200)).as_deref(),
            Some("33% Off")
        );
        assert_eq!(derive_discount(Some(dec!(500)), dec!(500)), None);
        assert_eq!(derive_discount(Some(dec!(400)), dec!(450)), None);
        assert_eq!(derive_discount(Some(dec!(400)), dec!(0)), None);
        assert_eq!(derive_discount(None, dec!(750)), None);
    }

    #[test]
    fn discount_percent_tolerates_missing_badges() {
        assert_eq!(discount_percent(Some("25% Off")), 25);
        assert_eq!(discount_percent(Some("7.5% Off")), 7);
        assert_eq!(discount_percent(None), 0);
        assert_eq!(discount_percent(Some("garbage")), 0);
    }
}
