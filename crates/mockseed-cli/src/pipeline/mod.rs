//! Runs the generator subcommands in dependency order, each as a child
//! process, and streams their output as humanized log lines.

mod humanize;
mod process;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use mockseed_core::Role;
use mockseed_generate::LocaleKey;
use mockseed_generate::model::DEFAULT_HASH_COST;
use serde::{Deserialize, Serialize};

use humanize::humanize_log_line;
use process::run_streaming;

pub const TEAMS_FILE: &str = "mock_teams.csv";
pub const VENUES_FILE: &str = "mock_venues.csv";
pub const USERS_FILE: &str = "mock_users.csv";
pub const PLAYERS_FILE: &str = "mock_players.csv";
pub const EVENTS_FILE: &str = "mock_events.csv";
pub const EVENT_TEAMS_FILE: &str = "mock_events-teams.csv";

const BANNER_TOP: &str = "╔══════════════════════════════════════╗";
const BANNER_BOTTOM: &str = "╚══════════════════════════════════════╝";

/// Which generators to run and with what arguments.
///
/// Also the schema of `mockseed.toml`; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub locale: LocaleKey,
    pub teams_count: i64,
    pub venues: bool,
    pub users: bool,
    pub roles: Vec<Role>,
    pub include_passwords: bool,
    /// bcrypt cost for generated passwords.
    pub hash_cost: u32,
    pub events: bool,
    pub events_count: i64,
    pub teams_per_event: i64,
    pub players: bool,
    pub players_per_team: i64,
    pub age_min: u32,
    pub age_max: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            seed: None,
            locale: LocaleKey::EnUs,
            teams_count: 50,
            venues: true,
            users: true,
            roles: Role::DEFAULT.to_vec(),
            include_passwords: false,
            hash_cost: DEFAULT_HASH_COST,
            events: true,
            events_count: 20,
            teams_per_event: 2,
            players: true,
            players_per_team: 20,
            age_min: 16,
            age_max: 22,
        }
    }
}

impl PipelineConfig {
    /// Teams always run first; the rest read the teams file.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![Step::Teams];
        if self.venues {
            steps.push(Step::Venues);
        }
        if self.users {
            steps.push(Step::Users);
        }
        if self.events {
            steps.push(Step::Events);
        }
        if self.players {
            steps.push(Step::Players);
        }
        steps
    }

    fn path(&self, file: &str) -> OsString {
        self.output_dir.join(file).into_os_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Teams,
    Venues,
    Users,
    Events,
    Players,
}

impl Step {
    pub fn name(self) -> &'static str {
        match self {
            Self::Teams => "teams",
            Self::Venues => "venues",
            Self::Users => "users",
            Self::Events => "events",
            Self::Players => "players",
        }
    }

    fn start_banner(self) -> &'static str {
        match self {
            Self::Teams => "┣━━━ Starting mock team generation  ━━━┫",
            Self::Venues => "┣━━━ Starting mock venue generation ━━━┫",
            Self::Users => "┣━━━ Starting mock user generation  ━━━┫",
            Self::Events => "┣━━━ Starting mock event generation ━━━┫",
            Self::Players => "┣━━━ Starting mock player generation ━━━┫",
        }
    }

    /// Subcommand and flags passed to the child process.
    pub fn args(self, config: &PipelineConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![self.name().into()];
        let mut flag = |name: &str, value: OsString| {
            args.push(name.into());
            args.push(value);
        };

        match self {
            Self::Teams => {
                flag("--num-teams", config.teams_count.to_string().into());
                flag("--out", config.path(TEAMS_FILE));
            }
            Self::Venues => {
                flag("--teams-csv", config.path(TEAMS_FILE));
                flag("--out", config.path(VENUES_FILE));
            }
            Self::Users => {
                flag("--teams-csv", config.path(TEAMS_FILE));
                flag("--out", config.path(USERS_FILE));
                let roles = config
                    .roles
                    .iter()
                    .map(|role| role.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                flag("--roles", roles.into());
            }
            Self::Events => {
                flag("--teams-csv", config.path(TEAMS_FILE));
                flag("--venues-csv", config.path(VENUES_FILE));
                flag("--events-out", config.path(EVENTS_FILE));
                flag("--join-out", config.path(EVENT_TEAMS_FILE));
                flag("--num-events", config.events_count.to_string().into());
                flag("--teams-per-event", config.teams_per_event.to_string().into());
            }
            Self::Players => {
                flag("--teams-csv", config.path(TEAMS_FILE));
                flag("--out", config.path(PLAYERS_FILE));
                flag("--players-per-team", config.players_per_team.to_string().into());
                flag("--age-min", config.age_min.to_string().into());
                flag("--age-max", config.age_max.to_string().into());
            }
        }

        if let Some(seed) = config.seed {
            flag("--seed", seed.to_string().into());
        }
        flag("--locale", config.locale.as_str().into());
        if self == Self::Users && config.include_passwords {
            flag("--hash-cost", config.hash_cost.to_string().into());
            args.push("--include-passwords".into());
        }
        args
    }
}

/// Run every selected step with `program` and report lines to `sink`.
///
/// Returns the bitwise OR of the child exit codes, so zero means every step
/// succeeded. A failing step does not stop later steps.
pub fn run_pipeline(config: &PipelineConfig, program: &Path, sink: &mut dyn FnMut(String)) -> i32 {
    if let Err(err) = std::fs::create_dir_all(&config.output_dir) {
        sink(format!(
            "❌ Cannot create output directory {}: {err}",
            config.output_dir.display()
        ));
        return 1;
    }

    sink(BANNER_TOP.to_string());
    sink("║     Mock data generation started     ║".to_string());
    sink(BANNER_BOTTOM.to_string());

    let mut rc_total = 0;
    for step in config.steps() {
        sink(step.start_banner().to_string());
        tracing::info!(step = step.name(), "pipeline step started");

        let args = step.args(config);
        let rc = match run_streaming(program, &args, &mut |line| sink(humanize_log_line(line))) {
            Ok(rc) => rc,
            Err(err) => {
                sink(format!("❌ [{}] ERROR: failed to start: {err}", step.name()));
                1
            }
        };

        if rc == 0 {
            sink(format!("✔ Finished {}.", step.name()));
        } else {
            sink(format!(
                "❌ {} failed. Exit code {rc}",
                capitalize(step.name())
            ));
            tracing::warn!(step = step.name(), exit_code = rc, "pipeline step failed");
        }
        rc_total |= rc;
    }

    sink(BANNER_TOP.to_string());
    if rc_total == 0 {
        sink("║   All tasks completed successfully   ║".to_string());
    } else {
        sink("║         Finished with errors         ║".to_string());
    }
    sink(BANNER_BOTTOM.to_string());

    rc_total
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
