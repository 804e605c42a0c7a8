//! `gatherly-api` — HTTP surface for the identity & authorization core.

pub mod app;
pub mod bearer;
