// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A date-time scalar, encoded as an [RFC 3339] string on the wire.
///
/// # Examples
/// ```
/// # use oci_model::{DateTime, DateTimeError};
/// let dt = DateTime::try_from("2025-05-16T09:46:12.500Z")?;
/// assert_eq!(dt.unix_timestamp(), 1747388772);
/// assert_eq!(dt.to_string(), "2025-05-16T09:46:12.5Z");
/// # Ok::<(), DateTimeError>(())
/// ```
///
/// Two values are equal when they denote the same instant, even if the wire
/// strings used different UTC offsets.
///
/// [RFC 3339]: https://www.ietf.org/rfc/rfc3339.txt
#[derive(Clone, Copy, Debug)]
pub struct DateTime(OffsetDateTime);

/// Represent failures in converting or creating [DateTime] instances.
///
/// # Examples
/// ```
/// # use oci_model::{DateTime, DateTimeError};
/// let dt = DateTime::try_from("yesterday");
/// assert!(matches!(dt, Err(DateTimeError::Parse(_))));
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DateTimeError {
    /// The string is not a valid RFC 3339 date-time.
    #[error("cannot parse date-time, source={0}")]
    Parse(#[source] time::error::Parse),

    /// The value cannot be represented as an RFC 3339 date-time.
    #[error("date-time cannot be represented in RFC 3339, source={0}")]
    OutOfRange(#[source] time::error::Format),
}

impl DateTime {
    /// Parses an RFC 3339 string.
    pub fn parse(value: &str) -> Result<Self, DateTimeError> {
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self)
            .map_err(DateTimeError::Parse)
    }

    /// Seconds since the Unix epoch.
    pub fn unix_timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// The wrapped [OffsetDateTime].
    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    fn instant(&self) -> i128 {
        self.0.unix_timestamp_nanos()
    }
}

impl TryFrom<&str> for DateTime {
    type Error = DateTimeError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Convert from [OffsetDateTime] to [DateTime].
///
/// Fails if the value has no RFC 3339 representation, for example, a year
/// outside `0000..=9999`.
///
/// # Examples
/// ```
/// # use oci_model::DateTime;
/// use time::macros::datetime;
/// let dt = DateTime::try_from(datetime!(2025-05-16 09:46:12 UTC))?;
/// assert_eq!(dt.to_string(), "2025-05-16T09:46:12Z");
/// # Ok::<(), anyhow::Error>(())
/// ```
impl TryFrom<OffsetDateTime> for DateTime {
    type Error = DateTimeError;
    fn try_from(value: OffsetDateTime) -> Result<Self, Self::Error> {
        value.format(&Rfc3339).map_err(DateTimeError::OutOfRange)?;
        Ok(Self(value))
    }
}

impl From<DateTime> for OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Both constructors verify the value formats as RFC 3339.
        let s = self.0.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&s)
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.instant() == other.instant()
    }
}

impl Eq for DateTime {}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.instant().cmp(&other.instant())
    }
}

impl std::hash::Hash for DateTime {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.instant().hash(state)
    }
}

/// Implement [`serde`](::serde) serialization for date-times.
impl serde::ser::Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;
    use time::macros::{datetime, offset};
    type Result = anyhow::Result<()>;

    #[test_case("2025-05-16T09:46:12Z", datetime!(2025-05-16 09:46:12 UTC))]
    #[test_case("2025-05-16T09:46:12.000000001Z", datetime!(2025-05-16 09:46:12.000000001 UTC))]
    #[test_case("2025-05-16T11:46:12+02:00", datetime!(2025-05-16 09:46:12 UTC))]
    #[test_case("0001-01-01T00:00:00Z", datetime!(0001-01-01 00:00:00 UTC))]
    fn parse(input: &str, want: OffsetDateTime) -> Result {
        let got = DateTime::parse(input)?;
        assert_eq!(got.as_offset_date_time(), want);
        Ok(())
    }

    #[test_case("")]
    #[test_case("2025-05-16")]
    #[test_case("2025-05-16T09:46:12")]
    #[test_case("2025-13-16T09:46:12Z")]
    #[test_case("not a date")]
    fn parse_error(input: &str) {
        let got = DateTime::parse(input);
        assert!(matches!(got, Err(DateTimeError::Parse(_))), "{got:?}");
    }

    #[test]
    fn same_instant_different_offset() -> Result {
        let a = DateTime::parse("2025-05-16T09:46:12Z")?;
        let b = DateTime::parse("2025-05-16T11:46:12+02:00")?;
        assert_eq!(a, b);
        let set = HashSet::from([a, b]);
        assert_eq!(set.len(), 1);
        Ok(())
    }

    #[test]
    fn render_preserves_offset() -> Result {
        let dt = DateTime::parse("2025-05-16T11:46:12+02:00")?;
        assert_eq!(dt.to_string(), "2025-05-16T11:46:12+02:00");
        let json = serde_json::to_value(dt)?;
        assert_eq!(json, serde_json::json!("2025-05-16T11:46:12+02:00"));
        Ok(())
    }

    #[test]
    fn out_of_range() {
        let value = datetime!(2025-05-16 09:46:12 UTC).replace_offset(offset!(+01:00:30));
        let dt = DateTime::try_from(value);
        assert!(matches!(dt, Err(DateTimeError::OutOfRange(_))), "{dt:?}");
    }
}
