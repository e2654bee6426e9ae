//! Graph accumulation and solver-facing representations
//!
//! [`model::GraphModel`] is the mutable, add-only edge accumulator fed by a
//! graph strategy. [`csr::InboundCsr`] is the reverse index the sparse solver
//! iterates over.

pub mod model;
pub mod csr;
