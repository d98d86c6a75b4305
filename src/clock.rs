use time::{macros::offset, Date, OffsetDateTime, Time, UtcOffset};

/// Every "local" day and hour is computed in IST.
pub const LOCAL_OFFSET: UtcOffset = offset!(+5:30);

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    fn local_now(&self) -> OffsetDateTime {
        self.now().to_offset(LOCAL_OFFSET)
    }
}

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a single instant.
#[cfg(test)]
#[derive(Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Midnight of the local day containing `now`.
pub fn start_of_local_day(now: OffsetDateTime) -> OffsetDateTime {
    now.to_offset(LOCAL_OFFSET).replace_time(Time::MIDNIGHT)
}

pub fn local_date(at: OffsetDateTime) -> Date {
    at.to_offset(LOCAL_OFFSET).date()
}

pub fn local_hour(at: OffsetDateTime) -> u8 {
    at.to_offset(LOCAL_OFFSET).hour()
}
