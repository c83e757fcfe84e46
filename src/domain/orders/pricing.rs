use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const LOCAL_STATE: &str = "west bengal";
const LOCAL_DELIVERY_DAYS: i64 = 3;
const NATIONAL_DELIVERY_DAYS: i64 = 7;

pub fn delivery_days_for_state(state: &str) -> i64 {
    if state.trim().eq_ignore_ascii_case(LOCAL_STATE) {
        LOCAL_DELIVERY_DAYS
    } else {
        NATIONAL_DELIVERY_DAYS
    }
}

pub fn estimate_delivery(state: &str, placed_at: DateTime<Utc>) -> DateTime<Utc> {
    placed_at + Duration::days(delivery_days_for_state(state))
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a rupee amount into paise, rounding half away from zero.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn west_bengal_ships_faster() {
        assert_eq!(delivery_days_for_state("West Bengal"), 3);
        assert_eq!(delivery_days_for_state(" west bengal "), 3);
        assert_eq!(delivery_days_for_state("Karnataka"), 7);
        assert_eq!(delivery_days_for_state(""), 7);
    }

    #[test]
    fn estimate_adds_days_to_placement_time() {
        let placed = Utc::now();
        assert_eq!(estimate_delivery("Kerala", placed) - placed, Duration::days(7));
    }

    #[test]
    fn minor_units_round_to_nearest_paisa() {
        assert_eq!(to_minor_units(Decimal::new(49999, 2)), Some(49999));
        assert_eq!(to_minor_units(Decimal::new(1005, 3)), Some(101));
        assert_eq!(to_minor_units(Decimal::ZERO), Some(0));
    }
}
