//! Persisted provisioning state.
//!
//! The only state rigup keeps between runs is the requirements
//! fingerprint marker; everything else is re-probed from the prefix.

pub mod fingerprint;

pub use fingerprint::{
    compute_fingerprint, manifest_status, read_marker, write_marker, ManifestStatus,
};
