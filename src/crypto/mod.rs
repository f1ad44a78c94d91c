//! Field-level encryption.
//!
//! This module contains the symmetric codec used to protect personally
//! identifiable data and credentials at rest.

pub mod cipher;
