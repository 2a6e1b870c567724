//! Wall-clock conversion in the host's time zone

use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::warn;

use crate::models::HostState;

/// Converts timestamps to the wall clock the host displays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostClock {
    tz: Option<Tz>,
}

impl HostClock {
    /// An unknown zone name falls back to each timestamp's own offset.
    #[must_use]
    pub fn new(time_zone: Option<&str>) -> Self {
        let tz = time_zone.and_then(|name| match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                warn!("Unknown host time zone '{}': {}", name, e);
                None
            }
        });
        Self { tz }
    }

    #[must_use]
    pub fn for_host(host: &HostState) -> Self {
        Self::new(host.config.time_zone.as_deref())
    }

    /// Express a timestamp on the host's wall clock
    #[must_use]
    pub fn local(&self, ts: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self.tz {
            Some(tz) => ts.with_timezone(&tz).fixed_offset(),
            None => ts,
        }
    }

    /// Parse an RFC 3339 timestamp, or a naive one already in host time
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.local(ts));
        }

        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()?;
        FixedOffset::east_opt(0)?
            .from_local_datetime(&naive)
            .single()
    }

    /// `HH:MM` on the host's wall clock
    #[must_use]
    pub fn time_of_day(&self, ts: DateTime<FixedOffset>) -> String {
        self.local(ts).format("%H:%M").to_string()
    }
}

/// Calendar locale for a host language code such as `da` or `en-GB`.
///
/// Languages without an entry use US English names.
#[must_use]
pub fn calendar_locale(language: &str) -> Locale {
    let language = language.replace('_', "-").to_lowercase();
    let primary = language.split('-').next().unwrap_or_default();

    match (primary, language.as_str()) {
        (_, "en-gb") => Locale::en_GB,
        (_, "pt-br") => Locale::pt_BR,
        ("da", _) => Locale::da_DK,
        ("de", _) => Locale::de_DE,
        ("es", _) => Locale::es_ES,
        ("fi", _) => Locale::fi_FI,
        ("fr", _) => Locale::fr_FR,
        ("it", _) => Locale::it_IT,
        ("nb" | "no", _) => Locale::nb_NO,
        ("nl", _) => Locale::nl_NL,
        ("pl", _) => Locale::pl_PL,
        ("pt", _) => Locale::pt_PT,
        ("sv", _) => Locale::sv_SE,
        _ => Locale::en_US,
    }
}
