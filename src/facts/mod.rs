// Hardware fact collection modules
pub mod types;
pub mod probe;
pub mod collector;
pub mod collect_raid;
pub mod collect_ipmi;
pub mod collect_smartctl;

// Re-export the collector surface
pub use collector::{collect_all_facts, FactCollector};
pub use collect_ipmi::IpmiCollector;
pub use collect_raid::RaidCollector;
pub use collect_smartctl::SmartctlCollector;
pub use probe::SystemProbe;
