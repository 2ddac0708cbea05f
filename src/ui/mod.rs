// UI and formatting module

pub mod formatters;
pub mod report_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_bytes, format_rate, format_time, format_uptime};
pub use report_formatters::{
    print_alerts, print_daily_report, print_delivery_outcome, print_snapshot,
    print_snapshot_details,
};
