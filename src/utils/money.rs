use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Monetary values are stored as DECIMAL(20,2); inputs are normalized to
/// two decimal places before validation or persistence.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Value must be zero or greater (fees, totals).
pub fn require_non_negative(field: &str, value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO {
        return Err(format!("{field} cannot be negative"));
    }
    Ok(())
}

/// Value must be strictly greater than zero (donation amounts, bids, goals).
pub fn require_positive(field: &str, value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err(format!("{field} must be a positive non-zero value"));
    }
    Ok(())
}

/// Lossy conversion used only for draw weights; amounts fit f64 comfortably
/// at DECIMAL(20,2) scale.
pub fn money_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        let v: Decimal = "10.555".parse().unwrap();
        assert_eq!(round_money(v), "10.56".parse::<Decimal>().unwrap());
        let v: Decimal = "10".parse().unwrap();
        assert_eq!(round_money(v), "10".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("fee", Decimal::ZERO).is_ok());
        assert!(require_non_negative("fee", Decimal::new(100, 2)).is_ok());
        assert!(require_non_negative("fee", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("amount", Decimal::new(1, 2)).is_ok());
        assert!(require_positive("amount", Decimal::ZERO).is_err());
        assert!(require_positive("amount", Decimal::new(-500, 2)).is_err());
    }

    #[test]
    fn test_money_to_f64() {
        assert_eq!(money_to_f64(Decimal::new(700, 2)), 7.0);
        assert_eq!(money_to_f64(Decimal::new(2500, 2)), 25.0);
    }
}
