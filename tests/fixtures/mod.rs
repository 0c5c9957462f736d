//! Test fixtures for pick-route.
//!
//! Provides:
//! - A synthetic rack layout with products stocked at several slots
//! - Builders for products and their candidate positions

#![allow(dead_code)]

pub mod warehouse_layout;

pub use warehouse_layout::*;
