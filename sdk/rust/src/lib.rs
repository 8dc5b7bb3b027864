//! Client SDK for the price service.

pub mod client;

pub use client::{ClientError, PriceClient, PriceResponse};
