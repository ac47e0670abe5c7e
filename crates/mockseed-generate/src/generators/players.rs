use mockseed_core::{
    DEFAULT_MAX_ATTEMPTS, IssuedSet, Player, ensure_unique, validate_count, validate_id_range,
    validate_range,
};
use rand::Rng;

use crate::context::GeneratorContext;
use crate::errors::GenerationError;
use crate::model::PlayersOptions;

/// Generate `players_per_team` players for every team id.
pub fn generate_players(
    ctx: &mut GeneratorContext,
    team_ids: &[i64],
    options: &PlayersOptions,
) -> Result<Vec<Player>, GenerationError> {
    validate_range("age-min", options.age_min, "age-max", options.age_max)?;
    let per_team = validate_count("players-per-team", options.players_per_team)?;
    if per_team == 0 {
        return Ok(Vec::new());
    }
    let total = per_team.saturating_mul(team_ids.len());
    validate_id_range("start-id", options.start_id, total)?;

    let faker = ctx.faker;
    let rng = &mut ctx.rng;
    let mut names = IssuedSet::new();
    let mut next_id = options.start_id;
    let mut players = Vec::with_capacity(total);

    for &team_id in team_ids {
        for _ in 0..per_team {
            let name = ensure_unique(
                || format!("{} {}", faker.first_name(rng), faker.last_name(rng)),
                &mut names,
                DEFAULT_MAX_ATTEMPTS,
            );
            let age = rng.random_range(options.age_min..=options.age_max);
            players.push(Player {
                id: next_id,
                name,
                age,
                team_id,
            });
            next_id += 1;
        }
    }

    if names.fallbacks() > 0 {
        tracing::debug!(fallbacks = names.fallbacks(), "player names needed suffixes");
    }

    Ok(players)
}
