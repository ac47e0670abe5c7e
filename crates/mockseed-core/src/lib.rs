//! Core contracts and helpers for mockseed.
//!
//! This crate defines the record types written by the generators, argument
//! validation, and the unique-value generator shared by every record kind.

pub mod error;
pub mod record;
pub mod unique;
pub mod validation;

pub use error::{Error, Result};
pub use record::{
    Credentials, EVENT_COLUMNS, EVENT_TEAM_COLUMNS, Event, EventTeam, PLAYER_COLUMNS, Player,
    Record, Role, TEAM_COLUMNS, Team, USER_COLUMNS, USER_CREDENTIAL_COLUMNS, User, VENUE_COLUMNS,
    Venue, user_columns,
};
pub use unique::{DEFAULT_MAX_ATTEMPTS, IssuedSet, ensure_unique, ensure_unique_with};
pub use validation::{
    validate_bounds, validate_count, validate_id_range, validate_range, validate_sample_size,
};
