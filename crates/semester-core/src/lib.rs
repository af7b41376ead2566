//! Session countdown, activities, level campaign, and configuration for
//! the Semester simulation.
//!
//! This crate owns time. Gauges in `semester-gauges` know nothing about
//! seconds or levels; the [`Session`](session::Session) here accumulates
//! elapsed time from the host's `advance(dt)` calls, applies periodic
//! deltas, runs activities, and resolves the outcome exactly once.
//!
//! # Modules
//!
//! - [`activity`] -- Timed player activities ([`ActivitySettings`], [`ActivityRun`])
//! - [`campaign`] -- Level progression across sessions ([`Campaign`])
//! - [`config`] -- Loading `semester-config.yaml` into typed structs
//! - [`session`] -- The countdown driver and its observer seam
//!
//! [`ActivitySettings`]: activity::ActivitySettings
//! [`ActivityRun`]: activity::ActivityRun
//! [`Campaign`]: campaign::Campaign

pub mod activity;
pub mod campaign;
pub mod config;
pub mod session;
