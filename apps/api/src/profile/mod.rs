// Profile API: singleton resume document plus read-only derived views.
// Storage goes through `store::ProfileStore`; handlers never touch sqlx directly.

pub mod auth;
pub mod handlers;
pub mod pg;
pub mod queries;
pub mod seed;
pub mod store;
