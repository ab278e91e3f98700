//! Route aggregation: normalized rows → per-route metrics

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::types::{AlertBucket, RawRow, RouteMetrics, StatusFlag};

/// Minutes since the last delivery above which a route is RED
pub const RED_MINUTES: f64 = 60.0;
/// Minutes since the last delivery above which a route is YELLOW
pub const YELLOW_MINUTES: f64 = 30.0;

/// Group rows by route and compute metrics for each group.
///
/// Rows without a route are dropped. `now` is the Eastern wall clock of the
/// run; delivery timestamps are compared against it directly.
pub fn aggregate_routes(rows: &[RawRow], now: NaiveDateTime) -> Vec<RouteMetrics> {
    let mut groups: BTreeMap<&str, Vec<&RawRow>> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in rows {
        match row.route.as_deref() {
            Some(route) => groups.entry(route).or_default().push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {} rows without a route", dropped);
    }

    let routes: Vec<RouteMetrics> = groups
        .into_iter()
        .map(|(route, group)| route_metrics(route, &group, now))
        .collect();

    log::info!("Aggregated {} rows into {} routes", rows.len() - dropped, routes.len());
    routes
}

/// Metrics for a single route group
pub fn route_metrics(route: &str, group: &[&RawRow], now: NaiveDateTime) -> RouteMetrics {
    let total = group.len() as i64;
    let delivered = group.iter().filter(|r| r.is_delivered()).count() as i64;
    let failed = group.iter().filter(|r| r.is_failed()).count() as i64;
    let remaining = total - delivered - failed;
    let completion_rate = if total > 0 {
        delivered as f64 / total as f64
    } else {
        0.0
    };

    let fleet_name = group.iter().find_map(|r| r.fleet_name.clone());
    let driver_name = group.iter().find_map(|r| r.driver_name.clone());

    let delivered_times: Vec<NaiveDateTime> = group
        .iter()
        .filter(|r| r.is_delivered())
        .filter_map(|r| r.status_time)
        .collect();
    let first_delivered_at = delivered_times.iter().min().copied();
    let last_delivered_at = delivered_times.iter().max().copied();

    let (Some(first), Some(last)) = (first_delivered_at, last_delivered_at) else {
        return RouteMetrics {
            route: route.to_string(),
            driver_name,
            fleet_name,
            total,
            delivered,
            failed,
            remaining,
            completion_rate,
            first_delivered_at: None,
            last_delivered_at: None,
            minutes_since_last: None,
            hours_since_first: None,
            deliveries_per_hour: None,
            status_flag: StatusFlag::NoDelivered,
            alert_bucket: AlertBucket::NoDelivered,
        };
    };

    let minutes_since_last = (now - last).num_milliseconds() as f64 / 60_000.0;
    let hours_since_first = (now - first).num_milliseconds() as f64 / 3_600_000.0;
    let deliveries_per_hour = if hours_since_first > 0.0 {
        Some(delivered as f64 / hours_since_first)
    } else {
        None
    };

    RouteMetrics {
        route: route.to_string(),
        driver_name,
        fleet_name,
        total,
        delivered,
        failed,
        remaining,
        completion_rate,
        first_delivered_at: Some(first),
        last_delivered_at: Some(last),
        minutes_since_last: Some(minutes_since_last),
        hours_since_first: Some(hours_since_first),
        deliveries_per_hour,
        status_flag: StatusFlag::HasDelivered,
        alert_bucket: alert_bucket(minutes_since_last),
    }
}

/// Freshness bucket for a route that has delivered
pub fn alert_bucket(minutes_since_last: f64) -> AlertBucket {
    if minutes_since_last > RED_MINUTES {
        AlertBucket::Red
    } else if minutes_since_last > YELLOW_MINUTES {
        AlertBucket::Yellow
    } else {
        AlertBucket::Ok
    }
}
