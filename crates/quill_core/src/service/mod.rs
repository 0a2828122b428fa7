//! Core use-case services.
//!
//! # Responsibility
//! - Combine permission resolution with article operations.
//! - Keep adapters decoupled from repository and storage details.

pub mod article_service;
