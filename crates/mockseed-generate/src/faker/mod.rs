//! Locale-aware wrapper over the `fake` crate's raw fakers.

pub mod locales;

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::internet::raw::{FreeEmailProvider, Username};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::{EN, PT_BR};
use rand::Rng;

pub use locales::LocaleKey;

macro_rules! localized {
    ($locale:expr, $faker:ident, $rng:expr) => {
        match $locale {
            LocaleKey::EnUs => $faker(EN).fake_with_rng::<String, _>($rng),
            LocaleKey::PtBr => $faker(PT_BR).fake_with_rng::<String, _>($rng),
        }
    };
}

/// Name and address source bound to one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faker {
    locale: LocaleKey,
}

impl Faker {
    pub fn new(locale: LocaleKey) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }

    pub fn first_name<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, FirstName, rng)
    }

    pub fn last_name<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, LastName, rng)
    }

    pub fn city<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, CityName, rng)
    }

    pub fn building_number<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, BuildingNumber, rng)
    }

    pub fn street_name<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, StreetName, rng)
    }

    pub fn state_abbr<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, StateAbbr, rng)
    }

    pub fn zipcode<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, ZipCode, rng)
    }

    pub fn free_email_domain<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, FreeEmailProvider, rng)
    }

    pub fn user_name<R: Rng>(&self, rng: &mut R) -> String {
        localized!(self.locale, Username, rng)
    }
}

/// Replace every `#` in `pattern` with a random decimal digit.
pub fn numerify<R: Rng>(pattern: &str, rng: &mut R) -> String {
    pattern
        .chars()
        .map(|ch| {
            if ch == '#' {
                char::from(b'0' + rng.random_range(0..10_u8))
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn numerify_keeps_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let phone = numerify("(###) ###-####", &mut rng);
        assert_eq!(phone.len(), 14);
        assert!(phone.starts_with('('));
        assert_eq!(&phone[4..6], ") ");
        assert_eq!(phone.chars().filter(char::is_ascii_digit).count(), 10);
    }

    #[test]
    fn same_seed_same_names() {
        let faker = Faker::new(LocaleKey::EnUs);
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(faker.first_name(&mut a), faker.first_name(&mut b));
        assert_eq!(faker.city(&mut a), faker.city(&mut b));
    }

    #[test]
    fn parses_locale_aliases() {
        assert_eq!(LocaleKey::parse("en_US"), Some(LocaleKey::EnUs));
        assert_eq!(LocaleKey::parse("pt-BR"), Some(LocaleKey::PtBr));
        assert_eq!(LocaleKey::parse("xx"), None);
    }
}
