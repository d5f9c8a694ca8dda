use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Points and streak state for one user, as returned by the backend.
///
/// `points_balance` is never changed locally. A new value only ever arrives
/// in a fresh backend response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_balance: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_streak: u64,
    #[serde(default, deserialize_with = "deserialize_check_in")]
    pub last_check_in: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub referral_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub referral_points: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_shared_stack: bool,
}

/// New rows carry `null` counters until the first check-in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps, Postgres `timestamptz` text, or a bare
/// `date` column (read as midnight UTC).
fn deserialize_check_in<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    parse_check_in(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid last_check_in: {raw}")))
}

pub(crate) fn parse_check_in(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
