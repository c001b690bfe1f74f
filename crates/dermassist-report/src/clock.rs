use jiff::civil::DateTime;

/// Source of the report's "generated at" stamp, the only wall-clock input of
/// composition. Inject a [`FixedClock`] to make output reproducible.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime;
}

/// Local wall-clock time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        jiff::Zoned::now().datetime()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}
