use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A generated row that knows how to render itself as CSV fields.
pub trait Record {
    /// Field values in the same order as the table's column list.
    fn values(&self) -> Vec<String>;
}

pub const TEAM_COLUMNS: &[&str] = &["team_id", "team_name", "team_school", "team_mascot"];

pub const VENUE_COLUMNS: &[&str] = &[
    "venue_id",
    "venue_name",
    "venue_street",
    "venue_city",
    "venue_state",
    "venue_zip",
    "venue_phone",
    "venue_team_id",
];

pub const USER_COLUMNS: &[&str] = &[
    "user_id",
    "user_full_name",
    "user_email",
    "user_phone",
    "user_team_id",
    "user_role",
];

pub const USER_CREDENTIAL_COLUMNS: &[&str] = &["user_password", "user_password_hash"];

pub const PLAYER_COLUMNS: &[&str] = &["player_id", "player_name", "player_age", "player_team_id"];

pub const EVENT_COLUMNS: &[&str] = &[
    "event_id",
    "event_name",
    "event_date",
    "event_venue_id",
    "event_start_time",
];

pub const EVENT_TEAM_COLUMNS: &[&str] = &["event_id", "team_id"];

/// Column list for the users table, with or without credential columns.
pub fn user_columns(include_passwords: bool) -> Vec<&'static str> {
    let mut columns = USER_COLUMNS.to_vec();
    if include_passwords {
        columns.extend_from_slice(USER_CREDENTIAL_COLUMNS);
    }
    columns
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub school: String,
    pub mascot: String,
}

impl Record for Team {
    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.school.clone(),
            self.mascot.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u64,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub team_id: String,
}

impl Record for Venue {
    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.street.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip.clone(),
            self.phone.clone(),
            self.team_id.clone(),
        ]
    }
}

/// Plain password plus the digest that goes into the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub password: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub team_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Record for User {
    fn values(&self) -> Vec<String> {
        let mut values = vec![
            self.id.to_string(),
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.team_id.clone(),
            self.role.to_string(),
        ];
        if let Some(credentials) = &self.credentials {
            values.push(credentials.password.clone());
            values.push(credentials.password_hash.clone());
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub team_id: i64,
}

impl Record for Player {
    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.team_id.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    /// Empty when no venues were available.
    pub venue_id: String,
    /// `HH:MM`.
    pub start_time: String,
}

impl Record for Event {
    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.date.clone(),
            self.venue_id.clone(),
            self.start_time.clone(),
        ]
    }
}

/// Join row linking an event to a participating team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTeam {
    pub event_id: u64,
    pub team_id: String,
}

impl Record for EventTeam {
    fn values(&self) -> Vec<String> {
        vec![self.event_id.to_string(), self.team_id.clone()]
    }
}

/// Staff role attached to a generated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Team Admin")]
    TeamAdmin,
    #[serde(rename = "Coach")]
    Coach,
    #[serde(rename = "Assistant Coach")]
    AssistantCoach,
    #[serde(rename = "Venue Admin")]
    VenueAdmin,
    #[serde(rename = "Event Admin")]
    EventAdmin,
    #[serde(rename = "Other")]
    Other,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 6] = [
        Role::TeamAdmin,
        Role::Coach,
        Role::AssistantCoach,
        Role::VenueAdmin,
        Role::EventAdmin,
        Role::Other,
    ];

    /// Roles generated for each team when none are selected explicitly.
    pub const DEFAULT: [Role; 5] = [
        Role::TeamAdmin,
        Role::Coach,
        Role::AssistantCoach,
        Role::VenueAdmin,
        Role::EventAdmin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TeamAdmin => "Team Admin",
            Self::Coach => "Coach",
            Self::AssistantCoach => "Assistant Coach",
            Self::VenueAdmin => "Venue Admin",
            Self::EventAdmin => "Event Admin",
            Self::Other => "Other",
        }
    }

    /// Parse a comma separated role list such as `"Coach,Team Admin"`.
    pub fn parse_list(value: &str) -> Result<Vec<Role>, Error> {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Role::from_str)
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownRole(trimmed.to_string()))
    }
}
