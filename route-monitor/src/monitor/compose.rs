//! Report composition: sorting, carrier summary, exceptions and time gates

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

use super::aggregate::aggregate_routes;
use super::types::{
    AlertBucket, CarrierSummary, GateCheck, GateKind, RawRow, Report, RouteMetrics, StatusFlag,
};

/// Exception rule (b): minutes since last delivery
pub const STALLED_MINUTES: f64 = 120.0;
/// Exception rule (c): deliveries per hour
pub const SLOW_DELIVERIES_PER_HOUR: f64 = 10.0;
/// Stand-in rate when a route has none, keeps rule (c) from firing
const MISSING_RATE: f64 = 999.0;

/// Build the full report from normalized rows
pub fn build_report(rows: &[RawRow], now: DateTime<Tz>, source_name: Option<String>) -> Report {
    let mut routes = aggregate_routes(rows, now.naive_local());
    sort_routes(&mut routes);

    let carriers = summarize_carriers(&routes);
    let exceptions = select_exceptions(&routes);
    let three_pm = gate_check(GateKind::ThreePm, &routes, &now);
    let six_pm = gate_check(GateKind::SixPm, &routes, &now);

    log::info!(
        "Report: {} routes, {} carriers, {} exceptions, 3pm applied={} ({}), 6pm applied={} ({})",
        routes.len(),
        carriers.len(),
        exceptions.len(),
        three_pm.applied,
        three_pm.routes.len(),
        six_pm.applied,
        six_pm.routes.len()
    );

    Report {
        now,
        source_name,
        routes,
        carriers,
        exceptions,
        three_pm,
        six_pm,
    }
}

/// NO_DELIVERED routes first, then most stalled to least stalled.
///
/// Missing minutes sort as +infinity within a flag. The sort is stable, so
/// ties keep route order.
pub fn sort_routes(routes: &mut [RouteMetrics]) {
    routes.sort_by(|a, b| {
        a.status_flag.cmp(&b.status_flag).then_with(|| {
            let ma = a.minutes_since_last.unwrap_or(f64::INFINITY);
            let mb = b.minutes_since_last.unwrap_or(f64::INFINITY);
            mb.partial_cmp(&ma).unwrap_or(Ordering::Equal)
        })
    });
}

/// Group routes by fleet name (missing → UNKNOWN), ordered by fleet name
pub fn summarize_carriers(routes: &[RouteMetrics]) -> Vec<CarrierSummary> {
    let mut groups: BTreeMap<&str, Vec<&RouteMetrics>> = BTreeMap::new();
    for route in routes {
        groups.entry(route.fleet_or_unknown()).or_default().push(route);
    }

    groups
        .into_iter()
        .map(|(fleet, members)| {
            let total: i64 = members.iter().map(|r| r.total).sum();
            let delivered: i64 = members.iter().map(|r| r.delivered).sum();
            let rates: Vec<f64> = members.iter().filter_map(|r| r.deliveries_per_hour).collect();
            let count_bucket =
                |bucket: AlertBucket| members.iter().filter(|r| r.alert_bucket == bucket).count();

            CarrierSummary {
                fleet_name: fleet.to_string(),
                routes: members.len(),
                total,
                delivered,
                failed: members.iter().map(|r| r.failed).sum(),
                remaining: members.iter().map(|r| r.remaining).sum(),
                no_delivered_routes: members
                    .iter()
                    .filter(|r| r.status_flag == StatusFlag::NoDelivered)
                    .count(),
                red_routes: count_bucket(AlertBucket::Red),
                yellow_routes: count_bucket(AlertBucket::Yellow),
                avg_deliveries_per_hour: if rates.is_empty() {
                    None
                } else {
                    Some(rates.iter().sum::<f64>() / rates.len() as f64)
                },
                completion_rate: if total > 0 {
                    delivered as f64 / total as f64
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Whether a route needs operational attention
pub fn is_exception(route: &RouteMetrics) -> bool {
    let no_delivered = route.status_flag == StatusFlag::NoDelivered;
    let stalled = route.minutes_since_last.unwrap_or(0.0) > STALLED_MINUTES && route.remaining > 0;
    let slow = route.deliveries_per_hour.unwrap_or(MISSING_RATE) < SLOW_DELIVERIES_PER_HOUR
        && route.remaining > 0;
    no_delivered || stalled || slow
}

/// Exception subset, keeping the input order
pub fn select_exceptions(routes: &[RouteMetrics]) -> Vec<RouteMetrics> {
    routes.iter().filter(|r| is_exception(r)).cloned().collect()
}

/// Evaluate a time gate against the captured Eastern now
pub fn gate_check(kind: GateKind, routes: &[RouteMetrics], now: &DateTime<Tz>) -> GateCheck {
    let applied = now.hour() >= kind.hour();
    let routes = if applied {
        routes
            .iter()
            .filter(|r| r.completion_rate < kind.threshold())
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    GateCheck {
        kind,
        applied,
        routes,
    }
}
