//! openhr-store — the permission-gated resource manager.
//!
//! One generic implementation of the pattern every OpenHR admin page
//! repeats: resolve permissions, fetch a collection, filter it client
//! side, and run create/edit/delete through a confirming dialog. Each
//! concrete resource supplies only its descriptor (`openhr_core::Resource`),
//! never its own copy of fetch/filter/submit logic.

pub mod context;
pub mod dialog;
pub mod notify;
pub mod store;
pub mod view;

pub use context::PermissionContext;
pub use dialog::{DialogController, DialogMode, SubmitOutcome};
pub use notify::{Notifier, NullNotifier};
pub use store::ResourceStore;
pub use view::{list_state, ListState, Row};
