use mockseed_core::{Venue, validate_id_range};

use crate::context::GeneratorContext;
use crate::errors::GenerationError;
use crate::faker::numerify;
use crate::generators::{PHONE_PATTERN, clean_street};
use crate::input::TeamSchool;
use crate::model::VenuesOptions;

/// One home venue per team, named after the team's school.
pub fn generate_venues(
    ctx: &mut GeneratorContext,
    teams: &[TeamSchool],
    options: &VenuesOptions,
) -> Result<Vec<Venue>, GenerationError> {
    validate_id_range("start-id", options.start_id, teams.len())?;
    let faker = ctx.faker;
    let rng = &mut ctx.rng;

    let venues = teams
        .iter()
        .zip(options.start_id..)
        .map(|(team, id)| {
            let street = format!("{} {}", faker.building_number(rng), faker.street_name(rng));
            Venue {
                id,
                name: format!("{} High School", team.school),
                street: clean_street(&street),
                city: team.school.clone(),
                state: faker.state_abbr(rng),
                zip: faker.zipcode(rng),
                phone: numerify(PHONE_PATTERN, rng),
                team_id: team.team_id.clone(),
            }
        })
        .collect();
    Ok(venues)
}
