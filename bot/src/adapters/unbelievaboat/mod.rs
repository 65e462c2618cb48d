//! UnbelievaBoat adapter
//!
//! Economy service client backed by the UnbelievaBoat REST API.

pub mod client;

pub use client::UnbelievaBoatClient;
