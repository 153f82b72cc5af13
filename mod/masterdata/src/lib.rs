//! openhr-masterdata — master-data resources of the organization portal.
//!
//! Countries, states, cities, the simple lookup sets (genders, religions,
//! blood groups, marital statuses, education levels), document types, and
//! the super-admin portal's organization types. Each supplies its wire
//! record, draft, and descriptor; the generic store does the rest.

mod city;
mod country;
mod document_type;
mod lookup;
mod organization_type;
mod state;

pub use city::*;
pub use country::*;
pub use document_type::*;
pub use lookup::*;
pub use organization_type::*;
pub use state::*;
