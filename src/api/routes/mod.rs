//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dataset;
pub mod events;
pub mod health;
pub mod page;
