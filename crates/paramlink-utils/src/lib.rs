//! Internal utilities for the paramlink workspace.
//!
//! This crate holds small, dependency-free helpers shared between
//! `paramlink-core` and `paramlink-bridge`. It is an implementation detail;
//! use the `paramlink` facade crate instead.
//!
//! # Contents
//!
//! - [`fnv1a_32`] - FNV-1a hash used to derive numeric parameter ids from uids

pub mod hash;

pub use hash::fnv1a_32;
