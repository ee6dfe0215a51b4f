//! Archive verification
//!
//! Computes digests of saved archives so they can be recorded next to the
//! build output.

pub mod checksum;

pub use checksum::archive_sha256;
