use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use mockseed_core::{EVENT_COLUMNS, PLAYER_COLUMNS, Role, TEAM_COLUMNS, USER_COLUMNS};
use mockseed_generate::{
    EventPaths, EventsOptions, GenerationEngine, GenerationError, LocaleKey, PlayersOptions,
    TeamsOptions, UsersOptions, VenuesOptions, input::InputTable,
};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("mockseed_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let headers = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|row| row.expect("row").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

fn write_teams(dir: &Path, seed: u64, count: i64) -> PathBuf {
    let path = dir.join("mock_teams.csv");
    let mut engine = GenerationEngine::new(Some(seed), LocaleKey::EnUs);
    let options = TeamsOptions {
        count,
        ..TeamsOptions::default()
    };
    engine.teams(&options, &path).expect("generate teams");
    path
}

fn fixed_events(count: i64, teams_per_event: i64) -> EventsOptions {
    EventsOptions {
        count,
        teams_per_event,
        base_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
        ..EventsOptions::default()
    }
}

#[test]
fn teams_round_trip_with_declared_headers() {
    let dir = temp_out_dir("teams");
    let path = write_teams(&dir, 42, 12);

    let (headers, rows) = read_csv(&path);
    assert_eq!(headers, TEAM_COLUMNS);
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0][0], "1001");
    assert_eq!(rows[11][0], "1012");

    let schools: HashSet<&String> = rows.iter().map(|row| &row[2]).collect();
    assert_eq!(schools.len(), 12, "team schools must be unique");
    for row in &rows {
        assert_eq!(row[1], format!("{} {}", row[2], row[3]));
    }
}

#[test]
fn seeded_runs_are_byte_identical() {
    let dir_a = temp_out_dir("det_a");
    let dir_b = temp_out_dir("det_b");

    for dir in [&dir_a, &dir_b] {
        let teams = write_teams(dir, 7, 10);
        let venues = dir.join("mock_venues.csv");
        let mut engine = GenerationEngine::new(Some(7), LocaleKey::EnUs);
        engine
            .venues(&teams, &VenuesOptions::default(), &venues)
            .expect("venues");
        engine
            .users(&teams, &UsersOptions::default(), &dir.join("mock_users.csv"))
            .expect("users");
        engine
            .events(
                EventPaths {
                    teams_csv: &teams,
                    venues_csv: &venues,
                    events_out: &dir.join("mock_events.csv"),
                    join_out: &dir.join("mock_events-teams.csv"),
                },
                &fixed_events(8, 2),
            )
            .expect("events");
        engine
            .players(
                &teams,
                &PlayersOptions::default(),
                &dir.join("mock_players.csv"),
            )
            .expect("players");
    }

    for file in [
        "mock_teams.csv",
        "mock_venues.csv",
        "mock_users.csv",
        "mock_events.csv",
        "mock_events-teams.csv",
        "mock_players.csv",
    ] {
        let a = hash_file(&dir_a.join(file)).expect("hash a");
        let b = hash_file(&dir_b.join(file)).expect("hash b");
        assert_eq!(a, b, "{file} should be deterministic");
    }
}

#[test]
fn users_are_unique_per_category() {
    let dir = temp_out_dir("users");
    let teams = write_teams(&dir, 3, 30);
    let out = dir.join("mock_users.csv");

    let mut engine = GenerationEngine::new(Some(3), LocaleKey::EnUs);
    let summary = engine
        .users(&teams, &UsersOptions::default(), &out)
        .expect("users");
    assert_eq!(summary.rows, 150);
    assert_eq!(
        summary.to_string(),
        format!("Wrote 150 users to {}", out.display())
    );

    let (headers, rows) = read_csv(&out);
    assert_eq!(headers, USER_COLUMNS);
    for column in [1, 2, 3] {
        let distinct: HashSet<&String> = rows.iter().map(|row| &row[column]).collect();
        assert_eq!(distinct.len(), rows.len(), "column {column} must be unique");
    }
    assert!(rows.iter().all(|row| row[2].contains('@')));
    assert_eq!(rows[0][5], "Team Admin");
    assert_eq!(rows[4][5], "Event Admin");
}

#[test]
fn users_honor_selected_roles() {
    let dir = temp_out_dir("roles");
    let teams = write_teams(&dir, 5, 4);
    let out = dir.join("mock_users.csv");
    let options = UsersOptions {
        roles: vec![Role::Coach, Role::Other],
        ..UsersOptions::default()
    };

    GenerationEngine::new(Some(5), LocaleKey::EnUs)
        .users(&teams, &options, &out)
        .expect("users");

    let (_, rows) = read_csv(&out);
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row[5] == "Coach" || row[5] == "Other"));
}

#[cfg(feature = "bcrypt")]
#[test]
fn users_with_passwords_carry_verifiable_hashes() {
    let dir = temp_out_dir("passwords");
    let teams = write_teams(&dir, 9, 1);
    let out = dir.join("mock_users.csv");
    let options = UsersOptions {
        roles: vec![Role::Coach],
        include_passwords: true,
        hash_cost: 4,
        ..UsersOptions::default()
    };

    GenerationEngine::new(Some(9), LocaleKey::EnUs)
        .users(&teams, &options, &out)
        .expect("users");

    let (headers, rows) = read_csv(&out);
    assert_eq!(headers.len(), 8);
    assert_eq!(headers[7], "user_password_hash");
    let password = &rows[0][6];
    assert_eq!(password.len(), 12);
    assert!(mockseed_generate::verify_password(password, &rows[0][7]).expect("verify"));
}

#[test]
fn players_respect_age_range_and_counts() {
    let dir = temp_out_dir("players");
    let teams = write_teams(&dir, 11, 3);
    let out = dir.join("mock_players.csv");
    let options = PlayersOptions {
        players_per_team: 5,
        age_min: 18,
        age_max: 19,
        ..PlayersOptions::default()
    };

    GenerationEngine::new(Some(11), LocaleKey::EnUs)
        .players(&teams, &options, &out)
        .expect("players");

    let (headers, rows) = read_csv(&out);
    assert_eq!(headers, PLAYER_COLUMNS);
    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0][0], "7001");
    for row in &rows {
        let age: u32 = row[2].parse().expect("age");
        assert!((18..=19).contains(&age));
    }
    let names: HashSet<&String> = rows.iter().map(|row| &row[1]).collect();
    assert_eq!(names.len(), 15);
}

#[test]
fn zero_players_writes_header_only() {
    let dir = temp_out_dir("no_players");
    let teams = write_teams(&dir, 1, 2);
    let out = dir.join("mock_players.csv");
    let options = PlayersOptions {
        players_per_team: 0,
        ..PlayersOptions::default()
    };

    let summary = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .players(&teams, &options, &out)
        .expect("players");
    assert_eq!(summary.rows, 0);
    let (headers, rows) = read_csv(&out);
    assert_eq!(headers, PLAYER_COLUMNS);
    assert!(rows.is_empty());
}

#[test]
fn invalid_ranges_are_rejected_before_writing() {
    let dir = temp_out_dir("bad_range");
    let teams = write_teams(&dir, 2, 2);
    let out = dir.join("mock_players.csv");
    let options = PlayersOptions {
        age_min: 30,
        age_max: 20,
        ..PlayersOptions::default()
    };

    let err = GenerationEngine::new(Some(2), LocaleKey::EnUs)
        .players(&teams, &options, &out)
        .expect_err("min > max");
    assert!(matches!(err, GenerationError::Core(_)));
    assert!(!out.exists());

    let negative = TeamsOptions {
        count: -1,
        ..TeamsOptions::default()
    };
    let teams_out = dir.join("negative.csv");
    assert!(
        GenerationEngine::new(None, LocaleKey::EnUs)
            .teams(&negative, &teams_out)
            .is_err()
    );
    assert!(!teams_out.exists());
}

#[test]
fn missing_required_column_writes_nothing() {
    let dir = temp_out_dir("missing_column");
    let teams = dir.join("mock_teams.csv");
    fs::write(&teams, "id,team_school\n1,Springfield\n").expect("write teams");
    let out = dir.join("mock_users.csv");

    let err = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .users(&teams, &UsersOptions::default(), &out)
        .expect_err("missing team_id");
    assert!(matches!(err, GenerationError::MissingColumn { ref column, .. } if column == "team_id"));
    assert!(!out.exists());
    assert_eq!(fs::read_dir(&dir).expect("read dir").count(), 1);
}

#[test]
fn missing_input_file_is_reported() {
    let dir = temp_out_dir("missing_file");
    let out = dir.join("mock_venues.csv");
    let err = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .venues(&dir.join("nope.csv"), &VenuesOptions::default(), &out)
        .expect_err("missing input");
    assert!(matches!(err, GenerationError::InputNotFound(_)));
    assert!(!out.exists());
}

#[test]
fn file_without_header_row_is_rejected() {
    let dir = temp_out_dir("no_header");
    let teams = dir.join("mock_teams.csv");
    fs::write(&teams, "").expect("write teams");
    let out = dir.join("mock_users.csv");

    let err = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .users(&teams, &UsersOptions::default(), &out)
        .expect_err("no header");
    assert!(matches!(err, GenerationError::MissingHeader { ref path } if path == &teams));
    assert!(!out.exists());
}

#[test]
fn header_lookup_ignores_case() {
    let dir = temp_out_dir("header_case");
    let teams = dir.join("mock_teams.csv");
    fs::write(&teams, "TEAM_ID,Team_School\n1001,Springfield\n1002,Shelbyville\n")
        .expect("write teams");

    let table = InputTable::open(&teams).expect("open teams");
    assert_eq!(table.headers(), ["TEAM_ID", "Team_School"]);
    assert_eq!(table.column_index("team_id"), Some(0));
    assert_eq!(table.column_index("team_school"), Some(1));

    let out = dir.join("mock_venues.csv");
    let summary = GenerationEngine::new(Some(2), LocaleKey::EnUs)
        .venues(&teams, &VenuesOptions::default(), &out)
        .expect("venues");
    assert_eq!(summary.rows, 2);
    let (_, rows) = read_csv(&out);
    assert_eq!(rows[1][3], "Shelbyville");
    assert_eq!(rows[1][7], "1002");
}

#[test]
fn start_id_overflow_is_rejected() {
    let dir = temp_out_dir("id_overflow");
    let out = dir.join("mock_teams.csv");
    let options = TeamsOptions {
        count: 3,
        start_id: u64::MAX,
        ..TeamsOptions::default()
    };

    let err = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .teams(&options, &out)
        .expect_err("ids overflow");
    assert!(matches!(err, GenerationError::Core(_)));
    assert!(!out.exists());

    let teams = write_teams(&dir, 1, 2);
    let players_out = dir.join("mock_players.csv");
    let players = PlayersOptions {
        start_id: u64::MAX - 5,
        ..PlayersOptions::default()
    };
    let err = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .players(&teams, &players, &players_out)
        .expect_err("ids overflow");
    assert!(matches!(err, GenerationError::Core(_)));
    assert!(!players_out.exists());
}

#[test]
fn non_integer_team_ids_fail_for_players() {
    let dir = temp_out_dir("bad_ids");
    let teams = dir.join("mock_teams.csv");
    fs::write(&teams, "team_id\n1001\nabc\n").expect("write teams");
    let err = GenerationEngine::new(Some(1), LocaleKey::EnUs)
        .players(&teams, &PlayersOptions::default(), &dir.join("p.csv"))
        .expect_err("invalid id");
    assert!(matches!(err, GenerationError::InvalidValue { ref value, .. } if value == "abc"));
}

#[test]
fn venues_follow_team_schools() {
    let dir = temp_out_dir("venues");
    let teams = dir.join("mock_teams.csv");
    fs::write(
        &teams,
        " team_id , team_school\n1001,Springfield\n,Nowhere\n1002,Shelbyville\n",
    )
    .expect("write teams");
    let out = dir.join("mock_venues.csv");

    let summary = GenerationEngine::new(Some(4), LocaleKey::EnUs)
        .venues(&teams, &VenuesOptions::default(), &out)
        .expect("venues");
    assert_eq!(summary.rows, 2);

    let (_, rows) = read_csv(&out);
    assert_eq!(rows[0][0], "3001");
    assert_eq!(rows[0][1], "Springfield High School");
    assert_eq!(rows[0][3], "Springfield");
    assert_eq!(rows[1][7], "1002");
    assert_eq!(rows[1][6].len(), 14);
}

#[test]
fn events_link_distinct_teams_and_known_venues() {
    let dir = temp_out_dir("events");
    let teams = write_teams(&dir, 8, 6);
    let venues = dir.join("mock_venues.csv");
    let mut engine = GenerationEngine::new(Some(8), LocaleKey::EnUs);
    engine
        .venues(&teams, &VenuesOptions::default(), &venues)
        .expect("venues");

    let events_out = dir.join("mock_events.csv");
    let join_out = dir.join("mock_events-teams.csv");
    let summaries = engine
        .events(
            EventPaths {
                teams_csv: &teams,
                venues_csv: &venues,
                events_out: &events_out,
                join_out: &join_out,
            },
            &fixed_events(10, 3),
        )
        .expect("events");

    assert_eq!(summaries.len(), 2);
    assert_eq!(
        summaries[1].to_string(),
        format!("Wrote 30 event-team rows to {}", join_out.display())
    );

    let (headers, events) = read_csv(&events_out);
    assert_eq!(headers, EVENT_COLUMNS);
    assert_eq!(events.len(), 10);
    let venue_ids: HashSet<String> = (3001..=3006).map(|id: u32| id.to_string()).collect();
    let base = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
    for event in &events {
        assert!(venue_ids.contains(&event[3]));
        let date = NaiveDate::parse_from_str(&event[2], "%Y-%m-%d").expect("date");
        let offset = (date - base).num_days();
        assert!((0..=180).contains(&offset));
        let (hour, minute) = event[4].split_once(':').expect("time");
        let hour: u32 = hour.parse().expect("hour");
        assert!((8..=20).contains(&hour));
        assert!(["00", "15", "30", "45"].contains(&minute));
    }

    let (_, joins) = read_csv(&join_out);
    assert_eq!(joins.len(), 30);
    for chunk in joins.chunks(3) {
        let teams: HashSet<&String> = chunk.iter().map(|row| &row[1]).collect();
        assert_eq!(teams.len(), 3);
        assert!(chunk.iter().all(|row| row[0] == chunk[0][0]));
    }
}

#[test]
fn events_without_venues_leave_venue_empty() {
    let dir = temp_out_dir("events_no_venues");
    let teams = write_teams(&dir, 6, 2);
    let events_out = dir.join("mock_events.csv");
    let join_out = dir.join("mock_events-teams.csv");

    GenerationEngine::new(Some(6), LocaleKey::EnUs)
        .events(
            EventPaths {
                teams_csv: &teams,
                venues_csv: &dir.join("absent.csv"),
                events_out: &events_out,
                join_out: &join_out,
            },
            &fixed_events(3, 2),
        )
        .expect("events");

    let (_, events) = read_csv(&events_out);
    assert!(events.iter().all(|event| event[3].is_empty()));
}

#[test]
fn too_many_teams_per_event_is_rejected() {
    let dir = temp_out_dir("events_too_many");
    let teams = write_teams(&dir, 6, 2);
    let events_out = dir.join("mock_events.csv");
    let join_out = dir.join("mock_events-teams.csv");

    let err = GenerationEngine::new(Some(6), LocaleKey::EnUs)
        .events(
            EventPaths {
                teams_csv: &teams,
                venues_csv: &dir.join("absent.csv"),
                events_out: &events_out,
                join_out: &join_out,
            },
            &fixed_events(3, 5),
        )
        .expect_err("k > teams");
    assert!(err.to_string().contains("exceeds available teams"));
    assert!(!events_out.exists());
    assert!(!join_out.exists());
}
