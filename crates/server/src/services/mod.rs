//! Business workflows that span multiple repositories.

pub mod checkout;
