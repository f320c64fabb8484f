//! Assemblers for the client and types modules.
//!
//! Route handlers live in [`crate::routes`]; everything here produces a
//! single TypeScript module from the whole catalog.

pub mod client;
pub mod method;
pub mod proxy;
pub mod types;

pub use client::render_direct_client;
pub use method::{method_signature, render_method, MethodShape};
pub use proxy::render_proxy_client;
pub use types::render_types;

/// First line of every generated file
pub const GENERATED_HEADER: &str =
    "// Generated by schedgen from the scheduling API catalog. Do not edit by hand.";
