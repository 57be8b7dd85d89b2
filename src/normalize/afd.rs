use super::AFD_UNAVAILABLE;
use crate::client::models::RawAfd;
use crate::format::to_epoch_seconds;
use crate::models::AreaForecastDiscussion;

pub(super) fn normalize(raw: RawAfd) -> AreaForecastDiscussion {
    let (content, timestamp) = match raw {
        RawAfd::Cached(cached) => (cached.content, cached.timestamp),
        RawAfd::Snapshot(snapshot) => (snapshot.content, snapshot.timestamp.unwrap_or(0)),
        RawAfd::ProductPage { text, fetched_at } => (text, fetched_at),
    };

    let content = content.trim();
    AreaForecastDiscussion {
        content: if content.is_empty() {
            AFD_UNAVAILABLE.to_string()
        } else {
            content.to_string()
        },
        timestamp: to_epoch_seconds(timestamp),
    }
}

/// Timestamp zero marks "never issued"
pub(super) fn fallback() -> AreaForecastDiscussion {
    AreaForecastDiscussion {
        content: AFD_UNAVAILABLE.to_string(),
        timestamp: 0,
    }
}
