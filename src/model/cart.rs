use serde::{Deserialize, Serialize};

/// An item in the shopping cart. Prices are in centavos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: u64,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// The line sent with a purchase request.
    pub fn line(&self) -> ProductLine {
        ProductLine {
            id: self.id,
            price: self.price,
        }
    }
}

/// A product as listed in a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    pub id: u64,
    pub price: u64,
}

/// Sums item prices.
pub fn cart_total(items: &[Product]) -> u64 {
    items.iter().map(|p| p.price).sum()
}

/// Formats centavos as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_price(cents: u64) -> String {
    let reais = (cents / 100).to_string();
    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, ch) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i).is_multiple_of(3) {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("R$ {grouped},{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn format_small_amount() {
        assert_eq!(format_price(0), "R$ 0,00");
        assert_eq!(format_price(5), "R$ 0,05");
        assert_eq!(format_price(1990), "R$ 19,90");
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_price(123_456), "R$ 1.234,56");
        assert_eq!(format_price(100_000_000), "R$ 1.000.000,00");
        assert_eq!(format_price(99_999), "R$ 999,99");
    }

    #[test]
    fn total_sums_prices() {
        let items = vec![Product::new(1, "Hades", 9990), Product::new(2, "Celeste", 4590)];
        assert_eq!(cart_total(&items), 14580);
        assert_eq!(cart_total(&[]), 0);
    }

    #[test]
    fn line_keeps_id_and_price() {
        let product = Product::new(7, "Stardew Valley", 2499);
        assert_eq!(product.line(), ProductLine { id: 7, price: 2499 });
    }

    #[quickcheck]
    fn formatted_digits_match_amount(cents: u32) -> bool {
        let cents = u64::from(cents);
        let digits: String = format_price(cents)
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse::<u64>() == Ok(cents)
    }
}
