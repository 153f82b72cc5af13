pub mod context;
pub mod login;
pub mod permissions;
pub mod resource;
pub mod session;
