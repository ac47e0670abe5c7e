mod config;
mod logging;
mod pipeline;
mod tui;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use mockseed_core::Role;
use mockseed_generate::{
    EventPaths, EventsOptions, GenerationEngine, GenerationError, LocaleKey, PlayersOptions,
    TeamsOptions, UsersOptions, VenuesOptions, convert_csv_to_json, hash_password,
};
use thiserror::Error;

use crate::logging::{LoggingOptions, init_logging};
use crate::pipeline::{
    EVENT_TEAMS_FILE, EVENTS_FILE, PLAYERS_FILE, PipelineConfig, TEAMS_FILE, USERS_FILE,
    VENUES_FILE, run_pipeline,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerationError),
    #[error(transparent)]
    Core(#[from] mockseed_core::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot encode config: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("pipeline finished with errors (exit code {0})")]
    PipelineFailed(i32),
}

#[derive(Parser, Debug)]
#[command(name = "mockseed", version, about = "Mock sports league data generator")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Append JSON log lines to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate mock teams.
    Teams(TeamsArgs),
    /// Generate one venue per team.
    Venues(VenuesArgs),
    /// Generate staff users for every team and role.
    Users(UsersArgs),
    /// Generate players for every team.
    Players(PlayersArgs),
    /// Generate events and the event-team join table.
    Events(EventsArgs),
    /// Convert a CSV file to a JSON array of objects.
    Convert(ConvertArgs),
    /// Print the bcrypt digest of a password.
    Hash(HashArgs),
    /// Run the generators in order as child processes.
    Run(RunArgs),
    /// Interactive terminal interface for runs and hashing.
    Tui(TuiArgs),
}

#[derive(Args, Debug)]
struct GenArgs {
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Faker locale (en_US or pt_BR).
    #[arg(long, default_value = "en_US", value_parser = parse_locale)]
    locale: LocaleKey,
}

#[derive(Args, Debug)]
struct TeamsArgs {
    /// Number of teams to generate.
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    num_teams: i64,
    #[arg(long, default_value = TEAMS_FILE)]
    out: PathBuf,
    #[arg(long, default_value_t = 1001)]
    start_id: u64,
    #[command(flatten)]
    gen_args: GenArgs,
}

#[derive(Args, Debug)]
struct VenuesArgs {
    /// Teams CSV with team_id and team_school columns.
    #[arg(long, default_value = TEAMS_FILE)]
    teams_csv: PathBuf,
    #[arg(long, default_value = VENUES_FILE)]
    out: PathBuf,
    #[arg(long, default_value_t = 3001)]
    start_id: u64,
    #[command(flatten)]
    gen_args: GenArgs,
}

#[derive(Args, Debug)]
struct UsersArgs {
    #[arg(long, default_value = TEAMS_FILE)]
    teams_csv: PathBuf,
    #[arg(long, default_value = USERS_FILE)]
    out: PathBuf,
    #[arg(long, default_value_t = 5001)]
    start_user_id: u64,
    /// Comma separated roles, e.g. "Coach,Team Admin".
    #[arg(long)]
    roles: Option<String>,
    /// Add user_password and user_password_hash columns.
    #[arg(long, default_value_t = false)]
    include_passwords: bool,
    /// bcrypt cost for generated passwords.
    #[arg(long, default_value_t = 12)]
    hash_cost: u32,
    #[command(flatten)]
    gen_args: GenArgs,
}

#[derive(Args, Debug)]
struct PlayersArgs {
    #[arg(long, default_value = TEAMS_FILE)]
    teams_csv: PathBuf,
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    players_per_team: i64,
    #[arg(long, default_value_t = 16)]
    age_min: u32,
    #[arg(long, default_value_t = 22)]
    age_max: u32,
    #[arg(long, default_value_t = 7001)]
    start_id: u64,
    #[arg(long, default_value = PLAYERS_FILE)]
    out: PathBuf,
    #[command(flatten)]
    gen_args: GenArgs,
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[arg(long, default_value = TEAMS_FILE)]
    teams_csv: PathBuf,
    /// Optional; without it event_venue_id stays empty.
    #[arg(long, default_value = VENUES_FILE)]
    venues_csv: PathBuf,
    #[arg(long, default_value = EVENTS_FILE)]
    events_out: PathBuf,
    #[arg(long, default_value = EVENT_TEAMS_FILE)]
    join_out: PathBuf,
    #[arg(long, default_value_t = 9001)]
    start_event_id: u64,
    /// Prompted for on a terminal when omitted.
    #[arg(long, allow_negative_numbers = true)]
    num_events: Option<i64>,
    /// Prompted for on a terminal when omitted.
    #[arg(long, allow_negative_numbers = true)]
    teams_per_event: Option<i64>,
    /// First possible event date (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    base_date: Option<NaiveDate>,
    #[command(flatten)]
    gen_args: GenArgs,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    input: PathBuf,
    output: PathBuf,
}

#[derive(Args, Debug)]
struct HashArgs {
    /// Read from stdin when omitted.
    #[arg(long)]
    password: Option<String>,
    #[arg(long, default_value_t = 12)]
    rounds: u32,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML file with pipeline settings; ./mockseed.toml is used if present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for every generated file.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_parser = parse_locale)]
    locale: Option<LocaleKey>,
    #[arg(long, allow_negative_numbers = true)]
    num_teams: Option<i64>,
    /// Comma separated roles for the users step.
    #[arg(long)]
    roles: Option<String>,
    #[arg(long, default_value_t = false)]
    include_passwords: bool,
    /// bcrypt cost used when passwords are included.
    #[arg(long)]
    hash_cost: Option<u32>,
    #[arg(long, default_value_t = false)]
    skip_venues: bool,
    #[arg(long, default_value_t = false)]
    skip_users: bool,
    #[arg(long, default_value_t = false)]
    skip_events: bool,
    #[arg(long, default_value_t = false)]
    skip_players: bool,
}

#[derive(Args, Debug)]
struct TuiArgs {
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_locale(value: &str) -> Result<LocaleKey, String> {
    LocaleKey::parse(value).ok_or_else(|| format!("unsupported faker locale '{value}'"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let is_tui = matches!(cli.command, Command::Tui(_));
    let logging = LoggingOptions {
        verbosity: cli.verbose,
        log_file: cli.log_file.as_deref(),
        stderr: !is_tui,
    };
    if let Err(err) = init_logging(logging) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Command) -> Result<(), CliError> {
    match command {
        Command::Teams(args) => run_teams(args),
        Command::Venues(args) => run_venues(args),
        Command::Users(args) => run_users(args),
        Command::Players(args) => run_players(args),
        Command::Events(args) => run_events(args),
        Command::Convert(args) => run_convert(args),
        Command::Hash(args) => run_hash(args),
        Command::Run(args) => run_run(args),
        Command::Tui(args) => {
            let config = config::load_config(args.config.as_deref())?;
            let config_path = args
                .config
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
            let program = std::env::current_exe()?;
            tui::run_tui(config, config_path, program)
        }
    }
}

fn engine(args: &GenArgs) -> GenerationEngine {
    GenerationEngine::new(args.seed, args.locale)
}

fn run_teams(args: TeamsArgs) -> Result<(), CliError> {
    let options = TeamsOptions {
        count: args.num_teams,
        start_id: args.start_id,
    };
    let summary = engine(&args.gen_args).teams(&options, &args.out)?;
    println!("{summary}");
    Ok(())
}

fn run_venues(args: VenuesArgs) -> Result<(), CliError> {
    let options = VenuesOptions {
        start_id: args.start_id,
    };
    let summary = engine(&args.gen_args).venues(&args.teams_csv, &options, &args.out)?;
    println!("{summary}");
    Ok(())
}

fn run_users(args: UsersArgs) -> Result<(), CliError> {
    let roles = match args.roles.as_deref() {
        Some(value) => Role::parse_list(value)?,
        None => Role::DEFAULT.to_vec(),
    };
    let options = UsersOptions {
        start_id: args.start_user_id,
        roles,
        include_passwords: args.include_passwords,
        hash_cost: args.hash_cost,
    };
    let summary = engine(&args.gen_args).users(&args.teams_csv, &options, &args.out)?;
    println!("{summary}");
    Ok(())
}

fn run_players(args: PlayersArgs) -> Result<(), CliError> {
    let options = PlayersOptions {
        players_per_team: args.players_per_team,
        age_min: args.age_min,
        age_max: args.age_max,
        start_id: args.start_id,
    };
    let summary = engine(&args.gen_args).players(&args.teams_csv, &options, &args.out)?;
    println!("{summary}");
    Ok(())
}

fn run_events(args: EventsArgs) -> Result<(), CliError> {
    let defaults = EventsOptions::default();
    let interactive = io::stdin().is_terminal();
    let prompt = |label: &str, value: Option<i64>, default: i64| match value {
        Some(value) => value,
        None if interactive => {
            prompt_i64(&mut io::stdin().lock(), &mut io::stderr(), label, default)
        }
        None => default,
    };

    let options = EventsOptions {
        count: prompt("Number of events", args.num_events, defaults.count),
        teams_per_event: prompt(
            "Teams per event",
            args.teams_per_event,
            defaults.teams_per_event,
        ),
        start_id: args.start_event_id,
        base_date: args.base_date.unwrap_or(defaults.base_date),
    };

    let paths = EventPaths {
        teams_csv: &args.teams_csv,
        venues_csv: &args.venues_csv,
        events_out: &args.events_out,
        join_out: &args.join_out,
    };
    for summary in engine(&args.gen_args).events(paths, &options)? {
        println!("{summary}");
    }
    Ok(())
}

/// Ask for a number; EOF or unparsable input picks `default`.
fn prompt_i64<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: i64,
) -> i64 {
    let _ = write!(output, "{label} [{default}]: ");
    let _ = output.flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => default,
        Ok(_) => line.trim().parse().unwrap_or(default),
    }
}

fn run_convert(args: ConvertArgs) -> Result<(), CliError> {
    let summary = convert_csv_to_json(&args.input, &args.output)?;
    println!("{summary}");
    Ok(())
}

fn run_hash(args: HashArgs) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => password,
        None => {
            if io::stdin().is_terminal() {
                eprint!("Password: ");
                let _ = io::stderr().flush();
            }
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    let digest = hash_password(&password, args.rounds)?;
    println!("{digest}");
    Ok(())
}

fn run_run(args: RunArgs) -> Result<(), CliError> {
    let mut config = config::load_config(args.config.as_deref())?;
    apply_run_overrides(&mut config, &args)?;

    let program = std::env::current_exe()?;
    let mut stdout = io::stdout();
    let rc = run_pipeline(&config, &program, &mut |line| {
        let _ = writeln!(stdout, "{line}");
    });
    if rc != 0 {
        return Err(CliError::PipelineFailed(rc));
    }
    Ok(())
}

fn apply_run_overrides(config: &mut PipelineConfig, args: &RunArgs) -> Result<(), CliError> {
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(count) = args.num_teams {
        config.teams_count = count;
    }
    if let Some(roles) = args.roles.as_deref() {
        config.roles = Role::parse_list(roles)?;
    }
    config.include_passwords |= args.include_passwords;
    if let Some(cost) = args.hash_cost {
        config.hash_cost = cost;
    }
    config.venues &= !args.skip_venues;
    config.users &= !args.skip_users;
    config.events &= !args.skip_events;
    config.players &= !args.skip_players;
    Ok(())
}
