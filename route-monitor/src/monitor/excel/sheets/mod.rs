//! Excel sheet generators for the route monitor report

pub mod gate_check;
pub mod meta;
pub mod routes;
pub mod summary;

pub use gate_check::create_gate_sheet;
pub use meta::create_meta_sheet;
pub use routes::{create_exceptions_sheet, create_route_monitor_sheet};
pub use summary::create_summary_sheet;
