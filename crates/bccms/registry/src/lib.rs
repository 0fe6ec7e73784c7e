//! Directory and identifier services for BCCMS
//!
//! The registry is the single owner of user records and complaint
//! storage. It knows nothing about roles or lifecycle rules — it stores,
//! indexes and looks up. Identifier generation is injected so tests can
//! run with deterministic ids; tracking codes come from a per-deployment
//! sequential issuer and are never reused.

#![deny(unsafe_code)]

mod id_gen;
mod registry;

pub use id_gen::*;
pub use registry::*;
