//! Read-only warehouse client and panel queries.

mod client;

pub use client::WarehouseReader;
