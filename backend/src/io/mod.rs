//! # IO Module
//!
//! The interface layer between the outside world and the domain.
//!
//! Currently this is the REST API served by axum. It owns request parsing,
//! DTO mapping and status codes; the domain owns everything else.

pub mod rest;
