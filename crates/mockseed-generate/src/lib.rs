//! Synthetic fixture generation for seeding a sports league database.
//!
//! Each generator reads its foreign keys from previously written CSV files,
//! draws rows from an explicitly seeded RNG and writes a header-plus-rows CSV
//! with a fixed column order.

pub mod context;
pub mod convert;
pub mod engine;
pub mod errors;
pub mod faker;
pub mod generators;
pub mod input;
pub mod model;
pub mod output;
pub mod password;

pub use context::GeneratorContext;
pub use convert::{ConversionSummary, convert_csv_to_json};
pub use engine::{EventPaths, GenerationEngine};
pub use errors::GenerationError;
pub use faker::{Faker, LocaleKey};
pub use model::{
    EventsOptions, GenerationSummary, PlayersOptions, TeamsOptions, UsersOptions, VenuesOptions,
};
pub use password::{hash_password, hashing_available, verify_password};
