use chrono::{DateTime, Days, FixedOffset, Timelike, Utc};

/// Whether a human agent can be pinged right now, and when the desk next
/// opens if not. `next_open` is in the store's local offset so it can be
/// shown to the customer as-is.
#[derive(Debug, Clone, Copy)]
pub struct HoursStatus {
    pub is_open: bool,
    pub next_open: Option<DateTime<FixedOffset>>,
}

pub trait BusinessHoursOracle {
    fn status(&self, at: DateTime<Utc>) -> HoursStatus;

    fn is_open(&self, at: DateTime<Utc>) -> bool {
        self.status(at).is_open
    }
}

/// Fixed daily opening hours in a fixed UTC offset. The default is
/// 09:00-21:00 WIB (UTC+7), seven days a week.
#[derive(Debug, Clone, Copy)]
pub struct FixedBusinessHours {
    pub open_hour: u32,
    pub close_hour: u32,
    pub utc_offset_hours: i32,
}

impl Default for FixedBusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 21,
            utc_offset_hours: 7,
        }
    }
}

impl BusinessHoursOracle for FixedBusinessHours {
    fn status(&self, at: DateTime<Utc>) -> HoursStatus {
        let Some(offset) = FixedOffset::east_opt(self.utc_offset_hours * 3600) else {
            return HoursStatus {
                is_open: false,
                next_open: None,
            };
        };
        let local = at.with_timezone(&offset);
        if local.hour() >= self.open_hour && local.hour() < self.close_hour {
            return HoursStatus {
                is_open: true,
                next_open: None,
            };
        }
        let day = if local.hour() < self.open_hour {
            local.date_naive()
        } else {
            local.date_naive() + Days::new(1)
        };
        let next_open = day
            .and_hms_opt(self.open_hour, 0, 0)
            .and_then(|t| t.and_local_timezone(offset).single());
        HoursStatus {
            is_open: false,
            next_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wib_hours() -> FixedBusinessHours {
        FixedBusinessHours::default()
    }

    #[test]
    fn open_midday_wib() {
        // 05:00 UTC is 12:00 WIB.
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 5, 0, 0).unwrap();
        let status = wib_hours().status(at);
        assert!(status.is_open);
        assert!(status.next_open.is_none());
    }

    #[test]
    fn closed_late_night_wib_opens_tomorrow() {
        // 16:00 UTC is 23:00 WIB.
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 16, 0, 0).unwrap();
        let status = wib_hours().status(at);
        assert!(!status.is_open);
        let next = status.next_open.unwrap();
        assert_eq!(next.hour(), 9);
        assert_eq!(next.date_naive(), chrono::NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
    }

    #[test]
    fn closed_early_morning_opens_same_day() {
        // 23:00 UTC the day before is 06:00 WIB.
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 23, 0, 0).unwrap();
        let status = wib_hours().status(at);
        assert!(!status.is_open);
        let next = status.next_open.unwrap();
        assert_eq!(next.hour(), 9);
        assert_eq!(next.date_naive(), chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn closing_hour_is_exclusive() {
        // 14:00 UTC is exactly 21:00 WIB.
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap();
        assert!(!wib_hours().is_open(at));
    }
}
