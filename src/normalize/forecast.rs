use super::text_or;
use crate::client::models::{NwsPeriod, RawForecast, flex};
use crate::format::{format_rounded, reround};
use crate::models::{Forecast, Period};

/// Hourly periods kept after normalization
pub const HOURLY_LIMIT: usize = 24;

pub(super) fn normalize(raw: RawForecast) -> Forecast {
    let (daily, hourly) = match raw {
        RawForecast::Cached(cached) => {
            return Forecast {
                daily: cached.daily.into_iter().map(renormalize).collect(),
                hourly: cached
                    .hourly
                    .into_iter()
                    .take(HOURLY_LIMIT)
                    .map(renormalize)
                    .collect(),
            };
        }
        RawForecast::Snapshot(snapshot) => (snapshot.daily, snapshot.hourly),
        RawForecast::Nws { daily, hourly } => (daily, hourly),
    };

    Forecast {
        daily: daily.into_iter().map(period).collect(),
        hourly: hourly.into_iter().take(HOURLY_LIMIT).map(period).collect(),
    }
}

fn period(p: NwsPeriod) -> Period {
    Period {
        name: text_or(p.name.as_deref(), ""),
        temperature: format_rounded(flex(&p.temperature)),
        icon: text_or(p.icon.as_deref(), ""),
        short_forecast: text_or(p.short_forecast.as_deref(), ""),
        detailed_forecast: text_or(p.detailed_forecast.as_deref(), ""),
        is_daytime: p.is_daytime.unwrap_or(false),
        start_time: text_or(p.start_time.as_deref(), ""),
    }
}

fn renormalize(p: Period) -> Period {
    Period {
        name: p.name.trim().to_string(),
        temperature: reround(p.temperature),
        icon: p.icon.trim().to_string(),
        short_forecast: p.short_forecast.trim().to_string(),
        detailed_forecast: p.detailed_forecast.trim().to_string(),
        is_daytime: p.is_daytime,
        start_time: p.start_time.trim().to_string(),
    }
}
