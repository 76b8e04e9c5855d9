//! Environmental sensors

pub mod dht22;
