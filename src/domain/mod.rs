//! Domain layer
pub mod aggregates;
pub mod sell_command;
pub mod value_objects;
