//! Location Loader: one retrieval of the facility listing per session,
//! published as a [`saude_core::LoadState`].

pub mod client;
pub mod error;
pub mod loader;

pub use client::LocationClient;
pub use error::{describe, LoaderError};
pub use loader::Loader;
