//! # Sluice Core
//!
//! Fluid handlers, fluid filters and the fluid filter cover.
//!
//! A [`cover::CoverFluidFilter`] sits on one face of a block. When the host asks it for
//! the block's fluid handler on that face it hands back a [`cover::FilteredFluidHandler`]
//! that only lets through the transfers its mode and filter allow.

pub mod config;
pub mod cover;
pub mod filter;
pub mod fluid;
pub mod ui;
