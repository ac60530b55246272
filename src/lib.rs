//! # certify
//!
//! Certificate issuing and verification
//!
//! ## Crates
//!
//! - `certify_core` - identifiers, records, storage seam, issuing, verification, PDF export
//! - `certify-server` - HTTP service (binary)

// Re-export the core crate
pub use certify_core;
