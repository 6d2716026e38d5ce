//! Synthetic Mexican e-commerce order and delivery dataset generator.
//!
//! One seeded stream, one pass: sample N orders, corrupt a fixed share of
//! them with controlled defects, write the table and a 1000-row sample.

pub mod assembler;
pub mod calendar;
pub mod config;
pub mod error;
pub mod injector;
pub mod output;
pub mod record;
pub mod reference;
pub mod rng;
pub mod summary;
pub mod synthesizer;
pub mod types;
