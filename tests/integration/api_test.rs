//! HTTP-level integration tests
//!
//! Drive the composed application router over in-memory stores, and over
//! Postgres when `TEST_DATABASE_URL` (or `DATABASE_URL`) is set.

#![allow(dead_code)]

mod auth;
mod common;
mod invariants;
mod jobs;
mod postgres;
