//! User domain entities.

pub mod membership;
pub mod model;
pub mod role;

pub use membership::{LibraryMember, MembershipStatus};
pub use model::{CreateUser, User};
pub use role::UserRole;
