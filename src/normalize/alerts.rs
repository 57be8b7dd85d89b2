use super::text_or;
use crate::client::models::{RawAlertFields, RawAlerts, SnapshotAlert};
use crate::models::{AlertProperties, AlertRecord, Alerts};

const UNKNOWN: &str = "Unknown";

pub(super) fn normalize(raw: RawAlerts) -> Alerts {
    let mut alerts: Vec<AlertRecord> = match raw {
        RawAlerts::Cached(cached) => cached.alerts.into_iter().map(renormalize).collect(),
        RawAlerts::Snapshot(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                SnapshotAlert::Wrapped { id, properties } => record(id, properties),
                SnapshotAlert::Flat(fields) => record(None, fields),
            })
            .collect(),
        RawAlerts::Nws(features) => features
            .into_iter()
            .map(|f| record(f.id, f.properties))
            .collect(),
    };

    alerts.sort_by_key(|a| severity_rank(&a.properties.severity));
    Alerts { alerts }
}

/// Sort rank, most severe first
pub fn severity_rank(severity: &str) -> u8 {
    match severity.trim().to_ascii_lowercase().as_str() {
        "extreme" => 0,
        "severe" => 1,
        "moderate" => 2,
        "minor" => 3,
        _ => 4,
    }
}

fn record(id: Option<String>, f: RawAlertFields) -> AlertRecord {
    AlertRecord {
        id: text_or(id.as_deref().or(f.id.as_deref()), ""),
        properties: AlertProperties {
            event: text_or(f.event.as_deref(), UNKNOWN),
            headline: text_or(f.headline.as_deref(), ""),
            description: text_or(f.description.as_deref(), ""),
            instruction: text_or(f.instruction.as_deref(), ""),
            severity: text_or(f.severity.as_deref(), UNKNOWN),
            certainty: text_or(f.certainty.as_deref(), UNKNOWN),
            urgency: text_or(f.urgency.as_deref(), UNKNOWN),
            area_desc: text_or(f.area_desc.as_deref(), ""),
            expires: text_or(f.expires.as_deref(), ""),
        },
    }
}

fn renormalize(a: AlertRecord) -> AlertRecord {
    let p = a.properties;
    record(
        Some(a.id),
        RawAlertFields {
            id: None,
            event: Some(p.event),
            headline: Some(p.headline),
            description: Some(p.description),
            instruction: Some(p.instruction),
            severity: Some(p.severity),
            certainty: Some(p.certainty),
            urgency: Some(p.urgency),
            area_desc: Some(p.area_desc),
            expires: Some(p.expires),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::AlertsResponse;
    use serde_json::json;

    fn snapshot(entries: serde_json::Value) -> RawAlerts {
        RawAlerts::Snapshot(serde_json::from_value(entries).unwrap())
    }

    #[test]
    fn test_flat_snapshot_defaults() {
        let alerts = normalize(snapshot(json!([{"event": "Flood Warning"}])));
        assert_eq!(alerts.alerts.len(), 1);
        let p = &alerts.alerts[0].properties;
        assert_eq!(p.event, "Flood Warning");
        assert_eq!(p.severity, "Unknown");
        assert_eq!(p.certainty, "Unknown");
        assert_eq!(p.urgency, "Unknown");
        assert_eq!(p.headline, "");
        assert_eq!(p.instruction, "");
    }

    #[test]
    fn test_wrapped_snapshot_and_live_agree() {
        let wrapped = normalize(snapshot(json!([
            {"id": "urn:oid:1", "properties": {"event": "Heat Advisory", "severity": "Moderate"}}
        ])));

        let response: AlertsResponse = serde_json::from_value(json!({"features": [
            {"id": "urn:oid:1", "properties": {"event": "Heat Advisory", "severity": "Moderate"}}
        ]}))
        .unwrap();
        let live = normalize(RawAlerts::Nws(response.features));

        assert_eq!(wrapped, live);
        assert_eq!(live.alerts[0].id, "urn:oid:1");
    }

    #[test]
    fn test_sorted_by_severity() {
        let alerts = normalize(snapshot(json!([
            {"event": "Beach Hazards Statement", "severity": "Minor"},
            {"event": "Special Weather Statement"},
            {"event": "Tornado Warning", "severity": "Extreme"},
            {"event": "Flood Watch", "severity": "Severe"},
            {"event": "Heat Advisory", "severity": "Moderate"},
            {"event": "Rip Current Statement", "severity": "Minor"}
        ])));
        let events: Vec<_> = alerts
            .alerts
            .iter()
            .map(|a| a.properties.event.as_str())
            .collect();
        assert_eq!(
            events,
            vec![
                "Tornado Warning",
                "Flood Watch",
                "Heat Advisory",
                "Beach Hazards Statement",
                "Rip Current Statement",
                "Special Weather Statement",
            ]
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = normalize(snapshot(json!([
            {"event": " Flood Warning ", "severity": "Severe", "areaDesc": "Pitt, NC"},
            {"headline": "Something"}
        ])));
        assert_eq!(normalize(RawAlerts::Cached(first.clone())), first);
    }
}
