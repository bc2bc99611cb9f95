//! campsync_core - functional core for the campsync camp-management client.
//!
//! Pure data types and functions with no network I/O:
//!
//! - [`cache`]: request fingerprints, per-entity TTL configuration and the
//!   in-memory request cache with token-based invalidation.
//! - [`recurrence`]: repeat rules and the recurring-event date generator.
//! - [`permissions`]: role/scope access checks for an authenticated principal.
//! - [`conflicts`]: capacity, double-booking, certification and housing checks.

pub mod cache;
pub mod conflicts;
pub mod permissions;
pub mod recurrence;
