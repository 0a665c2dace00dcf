//! Per-resource storage operations, one `impl HubStorage` block per table.

pub mod charge_current;
pub mod charge_history;
pub mod chargers;
pub mod connector_types;
pub mod favourites;
pub mod users;
pub mod vehicles;
