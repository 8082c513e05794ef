//! Clock text state.
//!
//! Holds the last formatted time string and its rendered texture. The string
//! is recomputed every tick but the texture only when the string changes.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, TimeZone};
use log::warn;

use crate::resources::imagecache::ResourceHandle;

const FALLBACK_FORMAT: &str = "%H:%M:%S";

pub struct Clock<T> {
    format: String,
    text: String,
    handle: Option<ResourceHandle<T>>,
    suspended: bool,
}

impl<T> Clock<T> {
    /// Clock using the `chrono` strftime `format`. A format that does not
    /// parse, or fails on a sample time, falls back to `%H:%M:%S`.
    pub fn new(format: &str) -> Self {
        let format = if is_renderable(format) {
            format.to_string()
        } else {
            warn!("Invalid clock format {:?}, using {}", format, FALLBACK_FORMAT);
            FALLBACK_FORMAT.to_string()
        };
        Self {
            format,
            text: String::new(),
            handle: None,
            suspended: false,
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Last formatted time.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Format `now`. Returns whether the text differs from the previous one.
    pub fn update_text<Tz>(&mut self, now: &DateTime<Tz>) -> bool
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut text = String::new();
        if write!(text, "{}", now.format(&self.format)).is_err() {
            warn!("Clock format {:?} failed on {}", self.format, now.naive_local());
            return false;
        }
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn handle(&self) -> Option<&ResourceHandle<T>> {
        self.handle.as_ref()
    }

    pub fn set_handle(&mut self, handle: ResourceHandle<T>) {
        self.handle = Some(handle);
    }

    /// Forget the text so the next update renders again. Also lifts a
    /// suspension.
    pub fn invalidate(&mut self) {
        self.text.clear();
        self.suspended = false;
    }

    /// Stop rendering until the next [`invalidate`](Self::invalidate), after
    /// the font turned out to be unusable.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}

fn is_renderable(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = FixedOffset::east_opt(0).and_then(|utc| utc.timestamp_opt(0, 0).single())
    else {
        return false;
    };
    let mut text = String::new();
    write!(text, "{}", sample.format(format)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::software::SoftwareTexture;

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, h, m, s)
            .unwrap()
    }

    #[test]
    fn test_formats_and_reports_changes() {
        let mut clock: Clock<SoftwareTexture> = Clock::new("%H:%M:%S");
        assert!(clock.update_text(&at(13, 5, 9)));
        assert_eq!(clock.text(), "13:05:09");
        assert!(!clock.update_text(&at(13, 5, 9)));
        assert!(clock.update_text(&at(13, 5, 10)));
        assert_eq!(clock.text(), "13:05:10");
    }

    #[test]
    fn test_coarse_format_changes_once_a_minute() {
        let mut clock: Clock<SoftwareTexture> = Clock::new("%I:%M %p");
        assert!(clock.update_text(&at(15, 42, 0)));
        assert_eq!(clock.text(), "03:42 PM");
        assert!(!clock.update_text(&at(15, 42, 59)));
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let clock: Clock<SoftwareTexture> = Clock::new("%Q");
        assert_eq!(clock.format(), "%H:%M:%S");
    }

    #[test]
    fn test_invalidate_forces_change() {
        let mut clock: Clock<SoftwareTexture> = Clock::new("%H");
        clock.update_text(&at(8, 0, 0));
        clock.invalidate();
        assert!(clock.update_text(&at(8, 0, 0)));
        assert!(clock.handle().is_none());
    }

    #[test]
    fn test_invalidate_lifts_suspension() {
        let mut clock: Clock<SoftwareTexture> = Clock::new("%H");
        clock.suspend();
        assert!(clock.is_suspended());
        clock.invalidate();
        assert!(!clock.is_suspended());
    }

    #[test]
    fn test_offset_format_renders() {
        let mut clock: Clock<SoftwareTexture> = Clock::new("%H:%M %z");
        assert_eq!(clock.format(), "%H:%M %z");
        assert!(clock.update_text(&at(13, 5, 9)));
        assert_eq!(clock.text(), "13:05 +0100");
    }

    #[test]
    fn test_colon_offset_format_renders() {
        let mut clock: Clock<SoftwareTexture> = Clock::new("%H:%M %:z");
        assert!(clock.update_text(&at(7, 30, 0)));
        assert_eq!(clock.text(), "07:30 +01:00");
    }
}
