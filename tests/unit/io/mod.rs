pub mod configuration;
pub mod presets;
pub mod rule_store;
