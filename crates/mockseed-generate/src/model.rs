use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use mockseed_core::Role;
use serde::{Deserialize, Serialize};

/// Default bcrypt cost, matching common web framework defaults.
pub const DEFAULT_HASH_COST: u32 = 12;

/// Options for the team generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsOptions {
    /// Number of teams to generate.
    pub count: i64,
    pub start_id: u64,
}

impl Default for TeamsOptions {
    fn default() -> Self {
        Self {
            count: 50,
            start_id: 1001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenuesOptions {
    pub start_id: u64,
}

impl Default for VenuesOptions {
    fn default() -> Self {
        Self { start_id: 3001 }
    }
}

/// Options for the user generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersOptions {
    pub start_id: u64,
    /// One user per role per team, in this order.
    pub roles: Vec<Role>,
    /// Add a plain password and its bcrypt digest to each user.
    pub include_passwords: bool,
    /// bcrypt cost used for the digests.
    pub hash_cost: u32,
}

impl Default for UsersOptions {
    fn default() -> Self {
        Self {
            start_id: 5001,
            roles: Role::DEFAULT.to_vec(),
            include_passwords: false,
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

/// Options for the player generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersOptions {
    pub players_per_team: i64,
    pub age_min: u32,
    pub age_max: u32,
    pub start_id: u64,
}

impl Default for PlayersOptions {
    fn default() -> Self {
        Self {
            players_per_team: 20,
            age_min: 16,
            age_max: 22,
            start_id: 7001,
        }
    }
}

/// Options for the event generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsOptions {
    pub count: i64,
    pub teams_per_event: i64,
    pub start_id: u64,
    /// Event dates fall within 180 days after this date.
    pub base_date: NaiveDate,
}

impl Default for EventsOptions {
    fn default() -> Self {
        Self {
            count: 20,
            teams_per_event: 2,
            start_id: 9001,
            base_date: chrono::Local::now().date_naive(),
        }
    }
}

/// One written output file.
///
/// `Display` renders the summary line printed by every generator command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Plural noun used in the summary, e.g. `users` or `event-team rows`.
    pub noun: String,
    pub rows: usize,
    pub path: PathBuf,
    pub bytes_written: u64,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} {} to {}",
            self.rows,
            self.noun,
            self.path.display()
        )
    }
}
