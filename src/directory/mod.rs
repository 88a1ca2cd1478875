//! Directory operations service.
//!
//! [`DirectoryService`] owns the upstream client, the token provider, and the
//! retry policy, and exposes the four public operations the tool surface
//! calls. Traversal and search are layered on top of a small set of
//! authorized call primitives so every upstream round trip passes through the
//! same failure policy.
//!
//! # Module Organization
//!
//! * [`core`] - Service struct, construction and configuration
//! * [`calls`] - Authorized call execution (token handling, retries)
//! * [`operations`] - Token, department listing and membership operations
//! * [`walker`] - Lazy breadth-first hierarchy traversal
//! * [`resolver`] - Name-based user search with dedup by user id

pub mod calls;
pub mod core;
pub mod operations;
pub mod resolver;
pub mod walker;

pub use core::DirectoryService;
pub use resolver::{DepartmentRef, SearchOptions, SearchResult, UserMatch};
pub use walker::DepartmentWalk;
