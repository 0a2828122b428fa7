//! Domain model for authors, articles and permissions.
//!
//! # Responsibility
//! - Define canonical records shared by repositories and services.
//! - Keep permission and write-outcome enums free of transport concerns.
//!
//! # Invariants
//! - Every article has exactly one author fixed at creation.
//! - A deleted article is never a read or write target.

pub mod article;
pub mod author;
pub mod permission;
