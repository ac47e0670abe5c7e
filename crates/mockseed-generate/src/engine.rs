use std::path::Path;
use std::time::Instant;

use mockseed_core::{
    EVENT_COLUMNS, EVENT_TEAM_COLUMNS, PLAYER_COLUMNS, Record, TEAM_COLUMNS, VENUE_COLUMNS,
    user_columns,
};
use tracing::info;

use crate::context::GeneratorContext;
use crate::errors::GenerationError;
use crate::faker::LocaleKey;
use crate::generators::events::generate_events;
use crate::generators::players::generate_players;
use crate::generators::teams::generate_teams;
use crate::generators::users::generate_users;
use crate::generators::venues::generate_venues;
use crate::input::{read_integer_ids, read_optional_ids, read_required_ids, read_team_schools};
use crate::model::{
    EventsOptions, GenerationSummary, PlayersOptions, TeamsOptions, UsersOptions, VenuesOptions,
};
use crate::output::csv::write_table_csv;

/// Entry point for the read, generate, write cycle of every record kind.
///
/// All inputs are read and every argument is validated before an output file
/// is touched, so a failing run leaves no partial output behind.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    ctx: GeneratorContext,
}

/// Input and output paths for the event generator.
#[derive(Debug, Clone, Copy)]
pub struct EventPaths<'a> {
    pub teams_csv: &'a Path,
    /// Optional: a missing file leaves `event_venue_id` empty.
    pub venues_csv: &'a Path,
    pub events_out: &'a Path,
    pub join_out: &'a Path,
}

impl GenerationEngine {
    pub fn new(seed: Option<u64>, locale: LocaleKey) -> Self {
        Self::with_context(GeneratorContext::new(seed, locale))
    }

    pub fn with_context(ctx: GeneratorContext) -> Self {
        Self { ctx }
    }

    pub fn teams(
        &mut self,
        options: &TeamsOptions,
        out: &Path,
    ) -> Result<GenerationSummary, GenerationError> {
        let start = self.started("teams");
        let teams = generate_teams(&mut self.ctx, options)?;
        write_summary("teams", out, TEAM_COLUMNS, &teams, start)
    }

    pub fn venues(
        &mut self,
        teams_csv: &Path,
        options: &VenuesOptions,
        out: &Path,
    ) -> Result<GenerationSummary, GenerationError> {
        let start = self.started("venues");
        let teams = read_team_schools(teams_csv)?;
        let venues = generate_venues(&mut self.ctx, &teams, options)?;
        write_summary("venues", out, VENUE_COLUMNS, &venues, start)
    }

    pub fn users(
        &mut self,
        teams_csv: &Path,
        options: &UsersOptions,
        out: &Path,
    ) -> Result<GenerationSummary, GenerationError> {
        let start = self.started("users");
        let team_ids = read_required_ids(teams_csv, "team_id")?;
        let users = generate_users(&mut self.ctx, &team_ids, options)?;
        let columns = user_columns(options.include_passwords);
        write_summary("users", out, &columns, &users, start)
    }

    pub fn players(
        &mut self,
        teams_csv: &Path,
        options: &PlayersOptions,
        out: &Path,
    ) -> Result<GenerationSummary, GenerationError> {
        let start = self.started("players");
        let team_ids = read_integer_ids(teams_csv, "team_id")?;
        let players = generate_players(&mut self.ctx, &team_ids, options)?;
        write_summary("players", out, PLAYER_COLUMNS, &players, start)
    }

    /// Writes the events table and the event-team join table.
    pub fn events(
        &mut self,
        paths: EventPaths<'_>,
        options: &EventsOptions,
    ) -> Result<Vec<GenerationSummary>, GenerationError> {
        let start = self.started("events");
        let team_ids = read_required_ids(paths.teams_csv, "team_id")?;
        let venue_ids = read_optional_ids(paths.venues_csv, "venue_id")?;
        if venue_ids.is_empty() {
            tracing::warn!(
                path = %paths.venues_csv.display(),
                "no venue ids available; event_venue_id will be empty"
            );
        }

        let schedule = generate_events(&mut self.ctx, &team_ids, &venue_ids, options)?;
        let events = write_summary(
            "events",
            paths.events_out,
            EVENT_COLUMNS,
            &schedule.events,
            start,
        )?;
        let join = write_summary(
            "event-team rows",
            paths.join_out,
            EVENT_TEAM_COLUMNS,
            &schedule.event_teams,
            Instant::now(),
        )?;
        Ok(vec![events, join])
    }

    fn started(&self, kind: &str) -> Instant {
        info!(
            kind,
            seed = self.ctx.seed(),
            locale = %self.ctx.faker.locale(),
            "generation started"
        );
        Instant::now()
    }
}

fn write_summary<R: Record>(
    noun: &str,
    path: &Path,
    columns: &[&str],
    rows: &[R],
    start: Instant,
) -> Result<GenerationSummary, GenerationError> {
    let bytes_written = write_table_csv(path, columns, rows)?;
    info!(
        table = noun,
        rows = rows.len(),
        bytes_written,
        path = %path.display(),
        duration_ms = start.elapsed().as_millis() as u64,
        "table written"
    );
    Ok(GenerationSummary {
        noun: noun.to_string(),
        rows: rows.len(),
        path: path.to_path_buf(),
        bytes_written,
    })
}
