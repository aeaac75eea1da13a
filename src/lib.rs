//! Employment subsidy engine for Korean government hiring programs
//!
//! This crate reconciles employee records extracted from wage ledgers,
//! insurance rosters and employment contracts, cross-checks them, and
//! determines eligibility and expected amounts for each subsidy program.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
pub mod validation;
