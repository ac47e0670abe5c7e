use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use mockseed_core::Role;
use mockseed_generate::{hash_password, hashing_available};

use crate::config::save_config;
use crate::pipeline::{PipelineConfig, run_pipeline};

pub const MAX_LOG_LINES: usize = 1000;
pub const DEFAULT_ROUNDS: u32 = 12;

pub enum AppEvent {
    Log(String),
    RunFinished(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Options,
    Log,
    Hash,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Options, Tab::Log, Tab::Hash];

    pub fn title(self) -> &'static str {
        match self {
            Self::Options => "Options",
            Self::Log => "Log",
            Self::Hash => "Hash",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Options => 0,
            Self::Log => 1,
            Self::Hash => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// One editable row on the Options tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionField {
    OutputDir,
    TeamsCount,
    Venues,
    Users,
    Role(Role),
    IncludePasswords,
    HashCost,
    Events,
    EventsCount,
    TeamsPerEvent,
    Players,
    PlayersPerTeam,
    AgeMin,
    AgeMax,
}

impl OptionField {
    pub fn all() -> Vec<OptionField> {
        let mut fields = vec![
            Self::OutputDir,
            Self::TeamsCount,
            Self::Venues,
            Self::Users,
        ];
        fields.extend(Role::ALL.into_iter().map(Self::Role));
        fields.extend([
            Self::IncludePasswords,
            Self::HashCost,
            Self::Events,
            Self::EventsCount,
            Self::TeamsPerEvent,
            Self::Players,
            Self::PlayersPerTeam,
            Self::AgeMin,
            Self::AgeMax,
        ]);
        fields
    }

    pub fn label(self) -> String {
        match self {
            Self::OutputDir => "Output directory".to_string(),
            Self::TeamsCount => "Teams".to_string(),
            Self::Venues => "Generate venues".to_string(),
            Self::Users => "Generate users".to_string(),
            Self::Role(role) => format!("  Role: {role}"),
            Self::IncludePasswords => "  Include passwords".to_string(),
            Self::HashCost => "  Hash cost".to_string(),
            Self::Events => "Generate events".to_string(),
            Self::EventsCount => "  Events".to_string(),
            Self::TeamsPerEvent => "  Teams per event".to_string(),
            Self::Players => "Generate players".to_string(),
            Self::PlayersPerTeam => "  Players per team".to_string(),
            Self::AgeMin => "  Minimum age".to_string(),
            Self::AgeMax => "  Maximum age".to_string(),
        }
    }

    pub fn is_toggle(self) -> bool {
        matches!(
            self,
            Self::Venues
                | Self::Users
                | Self::Role(_)
                | Self::IncludePasswords
                | Self::Events
                | Self::Players
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashFocus {
    Password,
    Rounds,
}

#[derive(Debug, Clone)]
pub struct HashPanel {
    pub password: String,
    pub rounds: String,
    pub focus: HashFocus,
    pub digest: Option<String>,
    pub error: Option<String>,
}

impl Default for HashPanel {
    fn default() -> Self {
        Self {
            password: String::new(),
            rounds: DEFAULT_ROUNDS.to_string(),
            focus: HashFocus::Password,
            digest: None,
            error: None,
        }
    }
}

pub struct App {
    pub tx: Sender<AppEvent>,
    pub program: PathBuf,
    pub config: PipelineConfig,
    pub config_path: PathBuf,
    pub tab: Tab,
    pub fields: Vec<OptionField>,
    pub selected: usize,
    /// Edit buffer for the selected text field.
    pub editing: Option<String>,
    pub log: Vec<String>,
    pub scroll_offset: u16,
    pub running: bool,
    pub status: Option<String>,
    pub hash: HashPanel,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: PipelineConfig,
        config_path: PathBuf,
        program: PathBuf,
        tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            tx,
            program,
            config,
            config_path,
            tab: Tab::Options,
            fields: OptionField::all(),
            selected: 0,
            editing: None,
            log: Vec::new(),
            scroll_offset: 0,
            running: false,
            status: None,
            hash: HashPanel::default(),
            should_quit: false,
        }
    }

    pub fn selected_field(&self) -> OptionField {
        self.fields[self.selected.min(self.fields.len() - 1)]
    }

    pub fn field_value(&self, field: OptionField) -> String {
        let flag = |value: bool| (if value { "[x]" } else { "[ ]" }).to_string();
        let config = &self.config;
        match field {
            OptionField::OutputDir => config.output_dir.display().to_string(),
            OptionField::TeamsCount => config.teams_count.to_string(),
            OptionField::Venues => flag(config.venues),
            OptionField::Users => flag(config.users),
            OptionField::Role(role) => flag(config.roles.contains(&role)),
            OptionField::IncludePasswords => flag(config.include_passwords),
            OptionField::HashCost => config.hash_cost.to_string(),
            OptionField::Events => flag(config.events),
            OptionField::EventsCount => config.events_count.to_string(),
            OptionField::TeamsPerEvent => config.teams_per_event.to_string(),
            OptionField::Players => flag(config.players),
            OptionField::PlayersPerTeam => config.players_per_team.to_string(),
            OptionField::AgeMin => config.age_min.to_string(),
            OptionField::AgeMax => config.age_max.to_string(),
        }
    }

    pub fn toggle(&mut self, field: OptionField) {
        let config = &mut self.config;
        match field {
            OptionField::Venues => config.venues = !config.venues,
            OptionField::Users => config.users = !config.users,
            OptionField::IncludePasswords => {
                config.include_passwords = !config.include_passwords;
            }
            OptionField::Events => config.events = !config.events,
            OptionField::Players => config.players = !config.players,
            OptionField::Role(role) => {
                if let Some(pos) = config.roles.iter().position(|r| *r == role) {
                    config.roles.remove(pos);
                } else {
                    // Keep display order stable.
                    config.roles.push(role);
                    config.roles.sort_by_key(|r| Role::ALL.iter().position(|a| a == r));
                }
            }
            _ => {}
        }
    }

    pub fn begin_edit(&mut self) {
        let field = self.selected_field();
        if field.is_toggle() {
            self.toggle(field);
        } else {
            self.editing = Some(self.field_value(field));
        }
    }

    /// Store the edit buffer into the selected field.
    pub fn commit_edit(&mut self) {
        let Some(input) = self.editing.take() else {
            return;
        };
        let field = self.selected_field();
        if let Err(message) = self.set_field(field, input.trim()) {
            self.status = Some(message);
        } else {
            self.status = None;
        }
    }

    pub fn set_field(&mut self, field: OptionField, input: &str) -> Result<(), String> {
        fn number<T: std::str::FromStr>(label: &str, input: &str) -> Result<T, String> {
            input
                .parse()
                .map_err(|_| format!("{} must be a whole number", label.trim()))
        }

        let label = field.label();
        let config = &mut self.config;
        match field {
            OptionField::OutputDir => {
                if input.is_empty() {
                    return Err("Output directory cannot be empty".to_string());
                }
                config.output_dir = PathBuf::from(input);
            }
            OptionField::TeamsCount => config.teams_count = number(&label, input)?,
            OptionField::HashCost => config.hash_cost = number(&label, input)?,
            OptionField::EventsCount => config.events_count = number(&label, input)?,
            OptionField::TeamsPerEvent => config.teams_per_event = number(&label, input)?,
            OptionField::PlayersPerTeam => config.players_per_team = number(&label, input)?,
            OptionField::AgeMin => config.age_min = number(&label, input)?,
            OptionField::AgeMax => config.age_max = number(&label, input)?,
            _ => {}
        }
        Ok(())
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    /// Start the pipeline on a worker thread. Ignored while a run is active.
    pub fn start_run(&mut self) {
        if self.running {
            self.status = Some("A run is already in progress".to_string());
            return;
        }
        if self.config.users && self.config.roles.is_empty() {
            self.status = Some("Select at least one role or disable users".to_string());
            return;
        }

        self.running = true;
        self.status = None;
        self.log.clear();
        self.scroll_offset = 0;
        self.tab = Tab::Log;
        tracing::info!(output_dir = %self.config.output_dir.display(), "tui run started");

        let config = self.config.clone();
        let program = self.program.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let rc = run_pipeline(&config, &program, &mut |line| {
                let _ = tx.send(AppEvent::Log(line));
            });
            let _ = tx.send(AppEvent::RunFinished(rc));
        });
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Log(line) => self.push_log(line),
            AppEvent::RunFinished(rc) => {
                self.running = false;
                self.status = Some(if rc == 0 {
                    "Run finished".to_string()
                } else {
                    format!("Run finished with errors (exit code {rc})")
                });
                tracing::info!(exit_code = rc, "tui run finished");
            }
        }
    }

    pub fn save(&mut self) {
        self.status = Some(match save_config(&self.config_path, &self.config) {
            Ok(()) => format!("Saved {}", self.config_path.display()),
            Err(err) => format!("Save failed: {err}"),
        });
    }

    /// Reset the hash panel: empty password, default rounds, no digest.
    pub fn clear_hash(&mut self) {
        self.hash = HashPanel::default();
    }

    pub fn generate_hash(&mut self) {
        self.hash.digest = None;
        self.hash.error = None;
        if !hashing_available() {
            self.hash.error = Some("Password hashing is not available in this build".to_string());
            return;
        }
        let rounds = match self.hash.rounds.trim().parse::<u32>() {
            Ok(rounds) => rounds,
            Err(_) => {
                self.hash.error = Some("Rounds must be a whole number".to_string());
                return;
            }
        };
        match hash_password(&self.hash.password, rounds) {
            Ok(digest) => self.hash.digest = Some(digest),
            Err(err) => self.hash.error = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel();
        App::new(
            PipelineConfig::default(),
            PathBuf::from("mockseed.toml"),
            PathBuf::from("mockseed"),
            tx,
        )
    }

    #[test]
    fn run_is_ignored_while_running() {
        let mut app = app();
        app.running = true;
        app.push_log("previous line");
        app.start_run();
        assert_eq!(app.log, vec!["previous line".to_string()]);
        assert_eq!(app.status.as_deref(), Some("A run is already in progress"));
    }

    #[test]
    fn run_finished_clears_running_flag() {
        let mut app = app();
        app.running = true;
        app.apply_event(AppEvent::Log("Wrote 1 teams to x".to_string()));
        app.apply_event(AppEvent::RunFinished(1));
        assert!(!app.running);
        assert_eq!(app.log.len(), 1);
        assert!(app.status.unwrap_or_default().contains("exit code 1"));
    }

    #[test]
    fn log_is_capped() {
        let mut app = app();
        for i in 0..(MAX_LOG_LINES + 5) {
            app.push_log(i.to_string());
        }
        assert_eq!(app.log.len(), MAX_LOG_LINES);
        assert_eq!(app.log[0], "5");
    }

    #[test]
    fn role_toggle_keeps_display_order() {
        let mut app = app();
        app.toggle(OptionField::Role(Role::Coach));
        assert!(!app.config.roles.contains(&Role::Coach));
        app.toggle(OptionField::Role(Role::Other));
        app.toggle(OptionField::Role(Role::Coach));
        assert_eq!(app.config.roles.first(), Some(&Role::TeamAdmin));
        assert_eq!(app.config.roles.get(1), Some(&Role::Coach));
        assert_eq!(app.config.roles.last(), Some(&Role::Other));
    }

    #[test]
    fn numeric_edit_rejects_text() {
        let mut app = app();
        app.selected = app
            .fields
            .iter()
            .position(|field| *field == OptionField::TeamsCount)
            .expect("teams field");
        app.begin_edit();
        app.editing = Some("lots".to_string());
        app.commit_edit();
        assert_eq!(app.config.teams_count, 50);
        assert!(app.status.is_some());

        app.begin_edit();
        app.editing = Some(" 12 ".to_string());
        app.commit_edit();
        assert_eq!(app.config.teams_count, 12);
    }

    #[test]
    fn hash_cost_is_editable() {
        let mut app = app();
        app.selected = app
            .fields
            .iter()
            .position(|field| *field == OptionField::HashCost)
            .expect("hash cost field");
        assert_eq!(app.field_value(OptionField::HashCost), "12");
        app.begin_edit();
        app.editing = Some("6".to_string());
        app.commit_edit();
        assert_eq!(app.config.hash_cost, 6);
    }

    #[test]
    fn clear_resets_the_hash_panel() {
        let mut app = app();
        app.hash.password = "sesame12".to_string();
        app.hash.rounds = "5".to_string();
        app.hash.focus = HashFocus::Rounds;
        app.hash.digest = Some("$2b$05$digest".to_string());
        app.hash.error = Some("old error".to_string());

        app.clear_hash();
        assert!(app.hash.password.is_empty());
        assert_eq!(app.hash.rounds, DEFAULT_ROUNDS.to_string());
        assert_eq!(app.hash.focus, HashFocus::Password);
        assert!(app.hash.digest.is_none());
        assert!(app.hash.error.is_none());
    }

    #[test]
    fn empty_roles_block_the_run() {
        let mut app = app();
        app.config.roles.clear();
        app.start_run();
        assert!(!app.running);
    }

    #[cfg(feature = "bcrypt")]
    #[test]
    fn hash_panel_produces_verifiable_digest() {
        let mut app = app();
        app.hash.password = "correct horse".to_string();
        app.hash.rounds = "4".to_string();
        app.generate_hash();
        let digest = app.hash.digest.clone().expect("digest");
        assert!(mockseed_generate::verify_password("correct horse", &digest).expect("verify"));
    }

    #[cfg(feature = "bcrypt")]
    #[test]
    fn hash_panel_reports_short_password() {
        let mut app = app();
        app.hash.password = "short".to_string();
        app.hash.rounds = "4".to_string();
        app.generate_hash();
        assert!(app.hash.digest.is_none());
        assert!(app.hash.error.is_some());
    }
}
