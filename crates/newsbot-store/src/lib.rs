//! Client for the store's PostgREST `news` collection.
//!
//! Looks up links that were already imported and submits new rows in a
//! single batched insert.

pub mod client;
pub mod error;

pub use client::{
    filter_new_items, StoreClient, DEFAULT_READ_TIMEOUT, DEFAULT_WRITE_TIMEOUT, NEWS_PATH,
};
pub use error::StoreError;
