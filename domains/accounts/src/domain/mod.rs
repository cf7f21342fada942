//! Accounts domain entities

pub mod entities;
