//! Demo rows mirroring `migrations/*_seed_data.sql`, used to seed the
//! in-memory backend.

use chrono::{DateTime, TimeZone, Utc};
use yoga_core::hash_password_with_cost;
use yoga_models::{SessionId, TeacherId, UserId};

use crate::error::StoreError;

/// Password of every fixture user.
pub const FIXTURE_PASSWORD: &str = "test!1234";

/// Email of the fixture administrator.
pub const ADMIN_EMAIL: &str = "yoga@studio.com";

pub struct TeacherFixture {
    pub id: TeacherId,
    pub first_name: &'static str,
    pub last_name: &'static str,
}

pub struct UserFixture {
    pub id: UserId,
    pub email: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub admin: bool,
}

pub struct SessionFixture {
    pub id: SessionId,
    pub name: &'static str,
    pub date: DateTime<Utc>,
    pub teacher_id: TeacherId,
    pub description: &'static str,
    pub users: &'static [UserId],
}

pub fn teachers() -> Vec<TeacherFixture> {
    vec![
        TeacherFixture {
            id: TeacherId::new(1),
            first_name: "Margot",
            last_name: "DELAHAYE",
        },
        TeacherFixture {
            id: TeacherId::new(2),
            first_name: "Hélène",
            last_name: "THIERCELIN",
        },
    ]
}

pub fn users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            id: UserId::new(1),
            email: ADMIN_EMAIL,
            first_name: "Admin",
            last_name: "Admin",
            admin: true,
        },
        UserFixture {
            id: UserId::new(2),
            email: "jean.martin@studio.com",
            first_name: "Jean",
            last_name: "Martin",
            admin: false,
        },
        UserFixture {
            id: UserId::new(3),
            email: "claire.dubois@studio.com",
            first_name: "Claire",
            last_name: "Dubois",
            admin: false,
        },
    ]
}

const EVENING_PARTICIPANTS: &[UserId] = &[UserId(3)];

pub fn sessions() -> Result<Vec<SessionFixture>, StoreError> {
    Ok(vec![
        SessionFixture {
            id: SessionId::new(1),
            name: "Séance de Yoga matin",
            date: fixture_date(2024, 6, 3, 7, 30)?,
            teacher_id: TeacherId::new(1),
            description: "Une séance de yoga revitalisante pour bien commencer la journée.",
            users: &[],
        },
        SessionFixture {
            id: SessionId::new(2),
            name: "Séance de Yoga soir",
            date: fixture_date(2024, 6, 3, 18, 30)?,
            teacher_id: TeacherId::new(2),
            description: "Une séance de yoga relaxante pour terminer la journée en douceur.",
            users: EVENING_PARTICIPANTS,
        },
    ])
}

/// Hashes [`FIXTURE_PASSWORD`] at the minimum bcrypt cost.
pub fn fixture_password_hash() -> Result<String, StoreError> {
    hash_password_with_cost(FIXTURE_PASSWORD, 4)
        .map_err(|e| StoreError::Fixture(e.error.to_string()))
}

fn fixture_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Utc>, StoreError> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            StoreError::Fixture(format!(
                "invalid date {year}-{month:02}-{day:02} {hour:02}:{minute:02}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_dates_match_seed_migration() {
        let sessions = sessions().unwrap();

        assert_eq!(sessions[0].date.to_rfc3339(), "2024-06-03T07:30:00+00:00");
        assert_eq!(sessions[1].date.to_rfc3339(), "2024-06-03T18:30:00+00:00");
        assert_eq!(sessions[1].users, [UserId::new(3)]);
    }

    #[test]
    fn test_invalid_fixture_date_is_an_error() {
        let err = fixture_date(2024, 2, 30, 9, 0).unwrap_err();
        assert!(matches!(err, StoreError::Fixture(_)));
    }
}
