use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{
  DateTime,
  Datelike,
  NaiveDate,
  NaiveDateTime,
  Utc
};
use chrono_tz::Tz;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

const TIMEZONE_CONFIG_FILE: &str =
  "trellis-time.toml";
const TIMEZONE_ENV_VAR: &str =
  "TRELLIS_TIMEZONE";
const TIMEZONE_CONFIG_ENV_VAR: &str =
  "TRELLIS_TIME_CONFIG";
const DEFAULT_PROJECT_TIMEZONE: &str =
  "Asia/Jakarta";

pub const SHORT_WEEKDAYS: [&str; 7] = [
  "Sun", "Mon", "Tue", "Wed", "Thu",
  "Fri", "Sat",
];

#[derive(Debug, Deserialize)]
struct TimezoneConfig {
  timezone: Option<String>,
  time:     Option<TimezoneSection>
}

#[derive(Debug, Deserialize)]
struct TimezoneSection {
  timezone: Option<String>
}

/// Deployment-wide calendar zone.
/// Resolved once: env var, then
/// config file, then the built-in
/// default.
pub fn project_timezone() -> &'static Tz
{
  static PROJECT_TZ: OnceLock<Tz> =
    OnceLock::new();
  PROJECT_TZ.get_or_init(
    resolve_project_timezone
  )
}

fn resolve_project_timezone() -> Tz {
  if let Ok(raw) =
    std::env::var(TIMEZONE_ENV_VAR)
    && let Some(tz) = parse_timezone(
      &raw,
      TIMEZONE_ENV_VAR
    )
  {
    return tz;
  }

  if let Some(path) =
    timezone_config_path()
    && let Some(tz) =
      load_timezone_from_file(&path)
  {
    return tz;
  }

  parse_timezone(
    DEFAULT_PROJECT_TIMEZONE,
    "DEFAULT_PROJECT_TIMEZONE"
  )
  .unwrap_or_else(|| {
    tracing::error!(
      "failed to parse built-in \
       timezone; using UTC"
    );
    chrono_tz::UTC
  })
}

fn timezone_config_path()
-> Option<PathBuf> {
  if let Ok(raw) = std::env::var(
    TIMEZONE_CONFIG_ENV_VAR
  ) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
      return Some(PathBuf::from(
        trimmed
      ));
    }
  }

  std::env::current_dir().ok().map(
    |dir| {
      dir.join(TIMEZONE_CONFIG_FILE)
    }
  )
}

fn load_timezone_from_file(
  path: &PathBuf
) -> Option<Tz> {
  if !path.exists() {
    tracing::info!(
      file = %path.display(),
      "no timezone config file"
    );
    return None;
  }

  let raw = fs::read_to_string(path)
    .map_err(|err| {
      tracing::error!(
        file = %path.display(),
        error = %err,
        "unreadable timezone config"
      );
    })
    .ok()?;

  let parsed = toml::from_str::<
    TimezoneConfig
  >(&raw)
  .map_err(|err| {
    tracing::error!(
      file = %path.display(),
      error = %err,
      "invalid timezone config"
    );
  })
  .ok()?;

  let timezone =
    parsed.timezone.or_else(|| {
      parsed.time.and_then(|section| {
        section.timezone
      })
    });
  let Some(timezone) = timezone else {
    warn!(
      file = %path.display(),
      "timezone config without a \
       timezone key"
    );
    return None;
  };

  parse_timezone(
    timezone.as_str(),
    &format!("file:{}", path.display())
  )
}

fn parse_timezone(
  raw: &str,
  source: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    warn!(
      source,
      "empty timezone value"
    );
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => {
      tracing::info!(
        source,
        timezone = %trimmed,
        "configured project timezone"
      );
      Some(tz)
    }
    | Err(err) => {
      tracing::error!(
        source,
        timezone = %trimmed,
        error = %err,
        "unknown timezone id"
      );
      None
    }
  }
}

/// Calendar parts of a wall-clock
/// date. Month is 0-based, day is
/// 1-based.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub struct DateParts {
  pub year:   i32,
  pub month0: u32,
  pub day:    u32
}

impl From<NaiveDate> for DateParts {
  fn from(date: NaiveDate) -> Self {
    Self {
      year:   date.year(),
      month0: date.month0(),
      day:    date.day()
    }
  }
}

/// Wall-clock date of `input` in
/// `tz`, regardless of the host
/// zone. `None` for anything that
/// does not parse: absence, never a
/// fallback to "today".
#[must_use]
pub fn wall_date_in(
  tz: Tz,
  input: &str
) -> Option<NaiveDate> {
  let token = input.trim();
  if token.is_empty() {
    return None;
  }

  if let Ok(dt) =
    DateTime::parse_from_rfc3339(token)
  {
    return Some(
      dt.with_timezone(&tz).date_naive()
    );
  }

  if let Ok(date) =
    NaiveDate::parse_from_str(
      token, "%Y-%m-%d"
    )
  {
    return Some(date);
  }

  for fmt in [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M"
  ] {
    if let Ok(ndt) =
      NaiveDateTime::parse_from_str(
        token, fmt
      )
    {
      return Some(ndt.date());
    }
  }

  warn!(
    input,
    "unparseable date; treating as \
     absent"
  );
  None
}

#[must_use]
pub fn date_parts_in(
  tz: Tz,
  input: &str
) -> Option<DateParts> {
  wall_date_in(tz, input)
    .map(DateParts::from)
}

/// Same, under the project timezone.
#[must_use]
pub fn date_parts(
  input: &str
) -> Option<DateParts> {
  date_parts_in(
    *project_timezone(),
    input
  )
}

#[must_use]
pub fn today_in(
  tz: Tz,
  now: DateTime<Utc>
) -> NaiveDate {
  now.with_timezone(&tz).date_naive()
}

#[must_use]
pub fn today_parts_in(
  tz: Tz,
  now: DateTime<Utc>
) -> DateParts {
  DateParts::from(today_in(tz, now))
}

/// A due value reads overdue once
/// its wall-clock date in `tz` is
/// strictly before today's.
#[must_use]
pub fn is_overdue_in(
  tz: Tz,
  due: &str,
  now: DateTime<Utc>
) -> bool {
  wall_date_in(tz, due)
    .map(|date| date < today_in(tz, now))
    .unwrap_or(false)
}

pub fn parse_clock_time(
  token: &str
) -> Option<(u32, u32)> {
  let clock_re = Regex::new(
    r"(?i)^(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<ampm>[ap]m)?$",
  )
  .ok()?;
  let captures =
    clock_re.captures(token.trim())?;

  let raw_hour = captures
    .name("hour")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  let minute = captures
    .name("minute")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  if minute > 59 {
    return None;
  }

  let hour = if let Some(ampm_match) =
    captures.name("ampm")
  {
    let ampm = ampm_match
      .as_str()
      .to_ascii_lowercase();
    if raw_hour == 0 || raw_hour > 12 {
      return None;
    }
    match ampm.as_str() {
      | "am" => {
        if raw_hour == 12 {
          0
        } else {
          raw_hour
        }
      }
      | "pm" => {
        if raw_hour == 12 {
          12
        } else {
          raw_hour + 12
        }
      }
      | _ => return None
    }
  } else {
    if raw_hour > 23 {
      return None;
    }
    raw_hour
  };

  Some((hour, minute))
}

#[must_use]
pub fn format_month_display(
  date: NaiveDate
) -> String {
  date.format("%B %Y").to_string()
}

#[must_use]
pub fn format_english_date(
  date: NaiveDate
) -> String {
  date
    .format("%A, %B %-d, %Y")
    .to_string()
}

#[must_use]
pub fn format_short_date(
  date: NaiveDate
) -> String {
  date.format("%b %-d").to_string()
}

#[must_use]
pub fn week_range_text(
  days: &[NaiveDate; 7]
) -> String {
  format!(
    "{} - {}",
    format_short_date(days[0]),
    format_short_date(days[6])
  )
}
