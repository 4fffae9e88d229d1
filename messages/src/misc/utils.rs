use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Used for serialization of a [`DateTime<Utc>`] to the RFC3339 standard
/// with millisecond precision and a `Z` suffix.
pub(crate) fn serialize_datetime<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
        .serialize(serializer)
}

/// Used for serialization of an [`Option<DateTime<Utc>>`] to the RFC3339
/// standard.
pub(crate) fn serialize_opt_datetime<S>(
    dt: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match dt {
        Some(dt) => serialize_datetime(dt, serializer),
        None => serializer.serialize_none(),
    }
}
