//! Movie-theater catalog client for Marquee.
//!
//! This crate provides:
//! - The [`Catalog`] contract consumed by the job engine
//! - Domain types for theaters, movies, images and schedules
//! - An HTTP JSON client implementing the contract

mod catalog;
mod client;
mod error;
mod types;

pub use catalog::Catalog;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::*;
