//! Request-independent business operations used by the handlers.

pub mod membership;

pub use membership::MembershipService;
