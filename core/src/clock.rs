use chrono::{DateTime, Utc};

/// Wall-clock source used to stamp the start and end of a game.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Clock whose time only moves when told to.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: core::cell::Cell<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: core::cell::Cell::new(now),
        }
    }

    pub(crate) fn advance(&self, by: chrono::TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
