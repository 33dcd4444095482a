pub mod builder;
pub mod envelope;
pub mod group;
