//! Time utilities: the scrape timestamp comes from an injected clock.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

/// Source of the `DTSERVER` timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock and reports it in a fixed IANA zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from a zone name like "America/Sao_Paulo".
    pub fn from_name(tz: &str) -> Result<Self> {
        Ok(Self::new(parse_timezone(tz)?))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.tz).fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}
