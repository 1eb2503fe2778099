//! HRK/EUR conversion in exact decimal arithmetic

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::settings::CommonSettings;
use crate::slip::validate::Currency;

/// Both amounts of a slip, in minor units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Amounts {
    /// Amount in lipa
    pub hrk: i64,
    /// Amount in euro cents
    pub eur: i64,
    /// The EUR amount was derived from the HRK amount
    pub conversion_to_eur_performed: bool,
}

/// Conversion rate as an exact decimal; `None` when it has no decimal form
pub(crate) fn rate_decimal(rate: f64) -> Option<Decimal> {
    // shortest round-trip text keeps 7.5345 exact
    rate.to_string().parse().ok()
}

/// Fill in the currency the slip does not carry
pub fn convert(amount: i64, currency: Currency, settings: &CommonSettings) -> Option<Amounts> {
    let rate = rate_decimal(settings.conversion_rate)?;
    if rate <= Decimal::ZERO {
        return None;
    }
    let strategy = settings.rounding.strategy();
    let carried = Decimal::from(amount);
    let amounts = match currency {
        Currency::Hrk => Amounts {
            hrk: amount,
            eur: carried
                .checked_div(rate)?
                .round_dp_with_strategy(0, strategy)
                .to_i64()?,
            conversion_to_eur_performed: true,
        },
        Currency::Eur => Amounts {
            hrk: carried
                .checked_mul(rate)?
                .round_dp_with_strategy(0, strategy)
                .to_i64()?,
            eur: amount,
            conversion_to_eur_performed: false,
        },
    };
    Some(amounts)
}
