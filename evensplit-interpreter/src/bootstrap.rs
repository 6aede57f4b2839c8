use evensplit_domain::{CurrencyContext, RoundingMode};
use std::{borrow::Cow, env};

/// Runtime configuration resolved from the environment.
///
/// `EVENSPLIT_SCALE` sets the currency's minor-unit precision (default 0);
/// `EVENSPLIT_ROUNDING` selects `half-even` (default) or `half-up`.
pub struct AppConfig {
    pub context: CurrencyContext,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Cow<'static, str>> {
        let _ = dotenvy::dotenv();

        let scale = match env::var("EVENSPLIT_SCALE") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                format!("Invalid EVENSPLIT_SCALE '{raw}': expected a non-negative integer")
            })?,
            Err(_) => 0,
        };

        let rounding_mode = match env::var("EVENSPLIT_ROUNDING") {
            Ok(raw) => match raw.as_str() {
                "half-even" => RoundingMode::HalfEven,
                "half-up" => RoundingMode::HalfUp,
                _ => {
                    return Err(format!(
                        "Invalid EVENSPLIT_ROUNDING '{raw}': expected 'half-even' or 'half-up'"
                    )
                    .into());
                }
            },
            Err(_) => RoundingMode::HalfEven,
        };

        Ok(Self {
            context: CurrencyContext {
                scale,
                rounding_mode,
            },
        })
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    tracing_subscriber::fmt::init();
}
