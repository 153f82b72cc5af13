//! openhr-admin — user, role, and subscription-plan administration.
//!
//! Roles and super-admin users carry client-side protection: the UI
//! refuses to edit or delete them before any request is issued. The
//! backend stays authoritative; the client check is a UX shortcut.

mod role;
mod subscription_plan;
mod user;

pub use role::*;
pub use subscription_plan::*;
pub use user::*;
