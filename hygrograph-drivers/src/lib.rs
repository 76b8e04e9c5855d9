//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! hygrograph-core:
//!
//! - Temperature/humidity sensors (DHT22 single-wire)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;

pub use sensor::dht22::{Dht22, Dht22Error, Dht22Frame};
