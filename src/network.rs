//! Network definition validation
//!
//! Provides:
//! - CIDR normalization and overlap detection
//! - Gateway and lease range checks
//! - Whole-network subnet validation
//! - Container attachment request validation

pub mod attach;
pub mod cidr;
pub mod conflict;
pub mod gateway;
pub mod lease;
pub mod registry;
pub mod subnet;
pub mod types;

pub use attach::validate_attachment_request;
pub use registry::NetworkRegistry;
pub use subnet::validate_subnet;
pub use types::{AttachmentRequest, Network, NetworkConfig, PerNetworkOptions, SubnetConfig};
