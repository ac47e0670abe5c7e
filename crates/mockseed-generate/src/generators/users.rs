use mockseed_core::{
    Credentials, DEFAULT_MAX_ATTEMPTS, IssuedSet, User, ensure_unique, ensure_unique_with,
    validate_id_range,
};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::context::GeneratorContext;
use crate::errors::GenerationError;
use crate::faker::{Faker, numerify};
use crate::generators::{PHONE_PATTERN, slugify};
use crate::model::UsersOptions;
use crate::password;

const INITIALS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const EXAMPLE_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];
const PASSWORD_LEN: usize = 12;

/// Per-run uniqueness state for the user columns that must not repeat.
#[derive(Debug, Default)]
struct IssuedUserFields {
    names: IssuedSet,
    emails: IssuedSet,
    phones: IssuedSet,
}

/// One user per selected role for every team id.
pub fn generate_users(
    ctx: &mut GeneratorContext,
    team_ids: &[String],
    options: &UsersOptions,
) -> Result<Vec<User>, GenerationError> {
    if options.roles.is_empty() {
        return Err(GenerationError::invalid_argument(
            "at least one role must be selected",
        ));
    }
    if options.include_passwords {
        password::ensure_available()?;
        password::validate_rounds(options.hash_cost)?;
    }

    let total = team_ids.len().saturating_mul(options.roles.len());
    validate_id_range("start-user-id", options.start_id, total)?;

    let faker = ctx.faker;
    let rng = &mut ctx.rng;
    let mut issued = IssuedUserFields::default();
    let mut next_id = options.start_id;
    let mut users = Vec::with_capacity(total);

    for team_id in team_ids {
        for &role in &options.roles {
            let full_name = unique_name(faker, rng, &mut issued.names);
            let email = unique_email(faker, rng, &full_name, &mut issued.emails);
            let phone = ensure_unique(
                || numerify(PHONE_PATTERN, rng),
                &mut issued.phones,
                DEFAULT_MAX_ATTEMPTS,
            );
            let credentials = if options.include_passwords {
                Some(generate_credentials(rng, options.hash_cost)?)
            } else {
                None
            };

            users.push(User {
                id: next_id,
                full_name,
                email,
                phone,
                team_id: team_id.clone(),
                role,
                credentials,
            });
            next_id += 1;
        }
    }

    tracing::debug!(
        users = users.len(),
        name_fallbacks = issued.names.fallbacks(),
        email_fallbacks = issued.emails.fallbacks(),
        phone_fallbacks = issued.phones.fallbacks(),
        "users generated"
    );

    Ok(users)
}

/// "First Last", switching to "First M. Last" when the plain form is taken.
fn unique_name<R: Rng>(faker: Faker, rng: &mut R, names: &mut IssuedSet) -> String {
    ensure_unique_with(
        |issued| {
            let first = faker.first_name(rng);
            let last = faker.last_name(rng);
            let name = format!("{first} {last}");
            if issued.contains(&name) {
                let initial = char::from(INITIALS[rng.random_range(0..INITIALS.len())]);
                format!("{first} {initial}. {last}")
            } else {
                name
            }
        },
        names,
        DEFAULT_MAX_ATTEMPTS,
    )
}

fn unique_email<R: Rng>(
    faker: Faker,
    rng: &mut R,
    full_name: &str,
    emails: &mut IssuedSet,
) -> String {
    let base_local = email_local_part(full_name);
    let mut domains: Vec<String> = EXAMPLE_DOMAINS.iter().map(|d| d.to_string()).collect();
    domains.push(faker.free_email_domain(rng));

    ensure_unique(
        || {
            let domain = &domains[rng.random_range(0..domains.len())];
            let suffix = rng.random_range(10..=9999_u32);
            let local = if base_local.is_empty() {
                faker.user_name(rng)
            } else {
                format!("{base_local}{suffix}")
            };
            format!("{local}@{domain}")
        },
        emails,
        DEFAULT_MAX_ATTEMPTS,
    )
}

/// `first.last` from a display name, ignoring middle initials.
fn email_local_part(full_name: &str) -> String {
    let cleaned = full_name.replace('.', "");
    let mut parts = cleaned.split_whitespace();
    let first = parts.next().map(slugify).unwrap_or_default();
    let last = parts.next_back().map(slugify).unwrap_or_default();
    if last.is_empty() {
        first
    } else {
        format!("{first}.{last}")
    }
}

fn generate_credentials<R: Rng>(rng: &mut R, cost: u32) -> Result<Credentials, GenerationError> {
    let password: String = (0..PASSWORD_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect();
    let salt: [u8; 16] = rng.random();
    let password_hash = password::hash_password_with_salt(&password, cost, salt)?;
    Ok(Credentials {
        password,
        password_hash,
    })
}
