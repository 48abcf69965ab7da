//! Open Targets client — resolves gene and disease names to canonical
//! identifiers and fetches the association evidence between them.
//!
//! Implements [`genelink_core::association::AssociationSource`].

mod client;
mod queries;

pub use client::{OpenTargetsClient, DEFAULT_BASE_URL};
