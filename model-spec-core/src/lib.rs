//! Shared types for per-provider model configuration.
//!
//! This crate has no I/O. It defines the closed provider enumeration ([`ProviderId`]),
//! the config key allow-list ([`ConfigKey`], [`normalize_key`]), the normalized document
//! tree ([`ConfigValue`]) and the typed views built from it ([`ProviderConfig`],
//! [`ModelConfig`], [`Pricing`]). `model-catalog` loads documents into these types.

pub mod capability;
pub mod key;
pub mod model;
pub mod provider;
pub mod value;

pub use capability::Capability;
pub use key::{normalize_key, ConfigKey};
pub use model::{ModelConfig, Pricing, ProviderConfig, ShapeError};
pub use provider::{ProviderId, UnknownProvider};
pub use value::ConfigValue;
