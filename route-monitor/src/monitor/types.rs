//! Plain data structures passed between pipeline stages

use chrono::NaiveDateTime;
use chrono_tz::Tz;

/// Carrier placeholder used when a route has no fleet value
pub const UNKNOWN_FLEET: &str = "UNKNOWN";

/// Raw table as read from the input file: header row plus text cells
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One normalized input record
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Route identifier, `None` when the cell is empty
    pub route: Option<String>,
    /// Status text, already uppercased
    pub status: String,
    /// Status timestamp as US Eastern wall clock
    pub status_time: Option<NaiveDateTime>,
    pub fleet_name: Option<String>,
    pub driver_name: Option<String>,
}

impl RawRow {
    pub fn is_delivered(&self) -> bool {
        self.status == "DELIVERED"
    }

    pub fn is_failed(&self) -> bool {
        self.status.contains("FAIL")
    }
}

/// Whether a route has at least one timestamped delivery.
///
/// Variant order is the report sort order: `NO_DELIVERED` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusFlag {
    NoDelivered,
    HasDelivered,
}

impl StatusFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFlag::NoDelivered => "NO_DELIVERED",
            StatusFlag::HasDelivered => "HAS_DELIVERED",
        }
    }
}

impl std::fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Freshness classification of the latest delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertBucket {
    NoDelivered,
    Ok,
    Yellow,
    Red,
}

impl AlertBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertBucket::NoDelivered => "NO_DELIVERED",
            AlertBucket::Ok => "OK",
            AlertBucket::Yellow => "YELLOW",
            AlertBucket::Red => "RED",
        }
    }
}

impl std::fmt::Display for AlertBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-route metrics
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    pub route: String,
    pub driver_name: Option<String>,
    pub fleet_name: Option<String>,
    pub total: i64,
    pub delivered: i64,
    pub failed: i64,
    /// `total - delivered - failed`, never clamped
    pub remaining: i64,
    pub completion_rate: f64,
    pub first_delivered_at: Option<NaiveDateTime>,
    pub last_delivered_at: Option<NaiveDateTime>,
    pub minutes_since_last: Option<f64>,
    pub hours_since_first: Option<f64>,
    pub deliveries_per_hour: Option<f64>,
    pub status_flag: StatusFlag,
    pub alert_bucket: AlertBucket,
}

impl RouteMetrics {
    /// Fleet name used for carrier grouping
    pub fn fleet_or_unknown(&self) -> &str {
        self.fleet_name.as_deref().unwrap_or(UNKNOWN_FLEET)
    }
}

/// Aggregate over all routes sharing a fleet name
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierSummary {
    pub fleet_name: String,
    pub routes: usize,
    pub total: i64,
    pub delivered: i64,
    pub failed: i64,
    pub remaining: i64,
    pub no_delivered_routes: usize,
    pub red_routes: usize,
    pub yellow_routes: usize,
    /// Mean of the member routes' deliveries per hour, `None` if no route has one
    pub avg_deliveries_per_hour: Option<f64>,
    pub completion_rate: f64,
}

/// End-of-shift completion gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    ThreePm,
    SixPm,
}

impl GateKind {
    pub fn sheet_name(&self) -> &'static str {
        match self {
            GateKind::ThreePm => "3pm check",
            GateKind::SixPm => "6pm check",
        }
    }

    /// Eastern hour at which the gate starts applying
    pub fn hour(&self) -> u32 {
        match self {
            GateKind::ThreePm => 15,
            GateKind::SixPm => 18,
        }
    }

    /// Routes strictly below this completion rate are flagged
    pub fn threshold(&self) -> f64 {
        match self {
            GateKind::ThreePm => 0.50,
            GateKind::SixPm => 0.80,
        }
    }

    pub fn rule_text(&self) -> String {
        format!(
            "At or after {}:00 ET, list routes with CompletionRate < {:.0}%",
            self.hour(),
            self.threshold() * 100.0
        )
    }
}

/// Outcome of one time gate
#[derive(Debug, Clone, PartialEq)]
pub struct GateCheck {
    pub kind: GateKind,
    pub applied: bool,
    pub routes: Vec<RouteMetrics>,
}

/// Everything the renderer needs for one run
#[derive(Debug, Clone)]
pub struct Report {
    pub now: chrono::DateTime<Tz>,
    pub source_name: Option<String>,
    pub routes: Vec<RouteMetrics>,
    pub carriers: Vec<CarrierSummary>,
    pub exceptions: Vec<RouteMetrics>,
    pub three_pm: GateCheck,
    pub six_pm: GateCheck,
}

impl Report {
    pub fn count_bucket(&self, bucket: AlertBucket) -> usize {
        self.routes
            .iter()
            .filter(|r| r.alert_bucket == bucket)
            .count()
    }
}
