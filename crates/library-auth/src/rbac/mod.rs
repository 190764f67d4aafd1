//! Role-based gating over a resolved principal.

pub mod enforcer;

pub use enforcer::require_admin;
