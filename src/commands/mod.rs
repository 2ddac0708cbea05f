// Command handlers module
pub mod category;
pub mod config;
pub mod report;
pub mod simulate;
pub mod watch;

// Re-exports for cleaner imports
pub use category::execute as category;
pub use report::execute as report;
pub use simulate::execute as simulate;
pub use watch::execute as watch;
