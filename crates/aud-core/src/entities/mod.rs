//! Entity structs for all Auditrail domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema validation. Back-references (`Finding::audit_item_id`,
//! `Action::finding_id`) are lookup keys, never owned links.

mod access_grant;
mod action;
mod attachment;
mod audit;
mod checklist;
mod department;
mod finding;
mod user;

pub use access_grant::AccessGrant;
pub use action::Action;
pub use attachment::Attachment;
pub use audit::Audit;
pub use checklist::ChecklistItem;
pub use department::Department;
pub use finding::Finding;
pub use user::UserAccount;
