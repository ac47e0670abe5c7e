use mockseed_core::{
    DEFAULT_MAX_ATTEMPTS, IssuedSet, Team, ensure_unique, validate_count, validate_id_range,
};

use crate::context::GeneratorContext;
use crate::errors::GenerationError;
use crate::generators::pick;
use crate::model::TeamsOptions;

const MASCOTS: &[&str] = &[
    "Bears", "Bobcats", "Bulldogs", "Cardinals", "Chargers", "Cougars", "Eagles", "Falcons",
    "Hawks", "Hornets", "Huskies", "Knights", "Lions", "Mustangs", "Panthers", "Pirates",
    "Raiders", "Rams", "Rockets", "Spartans", "Tigers", "Titans", "Vikings", "Wildcats",
];

/// Generate `count` teams, each tied to a distinct school town.
pub fn generate_teams(
    ctx: &mut GeneratorContext,
    options: &TeamsOptions,
) -> Result<Vec<Team>, GenerationError> {
    let count = validate_count("num-teams", options.count)?;
    validate_id_range("start-id", options.start_id, count)?;
    let faker = ctx.faker;
    let rng = &mut ctx.rng;
    let mut schools = IssuedSet::new();

    let mut teams = Vec::with_capacity(count);
    for (id, _) in (options.start_id..).zip(0..count) {
        let school = ensure_unique(|| faker.city(rng), &mut schools, DEFAULT_MAX_ATTEMPTS);
        let mascot = pick(MASCOTS, rng).to_string();
        teams.push(Team {
            id,
            name: format!("{school} {mascot}"),
            school,
            mascot,
        });
    }

    if schools.fallbacks() > 0 {
        tracing::debug!(fallbacks = schools.fallbacks(), "team schools needed suffixes");
    }

    Ok(teams)
}
