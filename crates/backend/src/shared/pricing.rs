use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::shared::{config, settings};

pub const MARKUP_SETTING_KEY: &str = "markup_percent";

/// Итоговая цена: source × (1 + markup/100), округление до центов.
///
/// Банковское округление, как у Decimal.quantize — никакого двоичного
/// float, чтобы центы не расползались.
pub fn calculate_final_price(source_price: Decimal, markup_percent: Decimal) -> Decimal {
    let multiplier = Decimal::ONE + markup_percent / Decimal::from(100);
    (source_price * multiplier).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Текущая наценка из sys_settings, иначе default из конфигурации.
///
/// Значение изменяемо во времени: применять только в момент создания
/// заявки (снапшот) или для живой витринной цены каталога.
pub async fn get_markup_percent() -> Result<Decimal> {
    if let Some(raw) = settings::get_value(MARKUP_SETTING_KEY).await? {
        if let Ok(value) = Decimal::from_str(raw.trim()) {
            return Ok(value);
        }
        tracing::warn!("sys_settings[{}] is not a decimal: {}", MARKUP_SETTING_KEY, raw);
    }

    let fallback = &config::get_config().pricing.default_markup_percent;
    Ok(Decimal::from_str(fallback.trim()).unwrap_or_else(|_| Decimal::from(12)))
}

/// Цена и наценка одним вызовом — для снапшота при создании заявки.
pub async fn get_final_price(source_price: Decimal) -> Result<(Decimal, Decimal)> {
    let markup = get_markup_percent().await?;
    let final_price = calculate_final_price(source_price, markup);
    Ok((final_price, markup))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        // 28000 * 1.12 = 31360.00 — а не 32500 из старых сидов.
        assert_eq!(
            calculate_final_price(dec("28000.00"), dec("12.0")),
            dec("31360.00")
        );
    }

    #[test]
    fn test_zero_markup_is_identity() {
        assert_eq!(
            calculate_final_price(dec("19999.99"), Decimal::ZERO),
            dec("19999.99")
        );
        assert_eq!(calculate_final_price(Decimal::ZERO, dec("50")), Decimal::ZERO);
    }

    #[test]
    fn test_rounds_to_cents() {
        // 100.005 * 1.0 остается на границе полуцента: банковское округление.
        assert_eq!(calculate_final_price(dec("33.333"), dec("0")), dec("33.33"));
        assert_eq!(calculate_final_price(dec("10.00"), dec("12.5")), dec("11.25"));
    }

    #[test]
    fn test_monotonic_in_both_inputs() {
        let base = calculate_final_price(dec("28000"), dec("12"));
        assert!(calculate_final_price(dec("28001"), dec("12")) >= base);
        assert!(calculate_final_price(dec("28000"), dec("12.5")) >= base);
        assert!(calculate_final_price(dec("27999"), dec("12")) <= base);
    }

    #[test]
    fn test_markup_above_hundred_percent() {
        assert_eq!(
            calculate_final_price(dec("1000.00"), dec("150")),
            dec("2500.00")
        );
    }
}
