use chrono::Duration;
use mockseed_core::{Event, EventTeam, validate_count, validate_id_range, validate_sample_size};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::context::GeneratorContext;
use crate::errors::GenerationError;
use crate::generators::pick;
use crate::model::EventsOptions;

const EVENT_SUFFIXES: &[&str] = &[
    "Challenge",
    "Classic",
    "Championship",
    "Cup",
    "Derby",
    "Finals",
    "Invitational",
    "Invite",
    "Open",
    "Series",
    "Showcase",
];
const MINUTES: &[u32] = &[0, 15, 30, 45];
const DATE_WINDOW_DAYS: i64 = 180;

/// Generated events plus the join rows linking each event to its teams.
#[derive(Debug, Clone, Default)]
pub struct EventSchedule {
    pub events: Vec<Event>,
    pub event_teams: Vec<EventTeam>,
}

/// Generate events, each with `teams_per_event` distinct teams and an
/// optional venue.
pub fn generate_events(
    ctx: &mut GeneratorContext,
    team_ids: &[String],
    venue_ids: &[String],
    options: &EventsOptions,
) -> Result<EventSchedule, GenerationError> {
    let count = validate_count("num-events", options.count)?;
    let teams_per_event = validate_count("teams-per-event", options.teams_per_event)?;
    validate_sample_size("teams-per-event", teams_per_event, team_ids.len())?;
    validate_id_range("start-event-id", options.start_id, count)?;

    let faker = ctx.faker;
    let rng = &mut ctx.rng;
    let mut schedule = EventSchedule::default();

    for id in (options.start_id..).take(count) {
        let name = format!("{} {}", faker.city(rng), pick(EVENT_SUFFIXES, rng));
        let offset = rng.random_range(0..=DATE_WINDOW_DAYS);
        let date = options.base_date + Duration::days(offset);
        let venue_id = venue_ids.choose(rng).cloned().unwrap_or_default();
        let hour = rng.random_range(8..=20_u32);
        let minute = MINUTES.choose(rng).copied().unwrap_or_default();

        schedule.events.push(Event {
            id,
            name,
            date: date.format("%Y-%m-%d").to_string(),
            venue_id,
            start_time: format!("{hour:02}:{minute:02}"),
        });

        for team_id in team_ids.choose_multiple(rng, teams_per_event) {
            schedule.event_teams.push(EventTeam {
                event_id: id,
                team_id: team_id.clone(),
            });
        }
    }

    Ok(schedule)
}
