//! Hedge Lifecycle - Hedge relationship lifecycle engine
//!
//! This crate validates and orchestrates hedge accounting transitions
//! (designation, de-designation, re-designation, redraft) against a remote
//! Hedge Accounting API, including inception regression and inception
//! package generation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
