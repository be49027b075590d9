use embedded_hal::watchdog;
use msp432p401r::WDT_A;

/// Password the WDTCTL high byte requires on every write. Reads return a
/// different byte, so the control word is rebuilt instead of read back.
const WDT_PASSWORD: u16 = 0x5A00;

const WDTHOLD: u16 = 0x0080;
const WDTCNTCL: u16 = 0x0008;

/// Watchdog interval select, in watchdog clock ticks until reset.
#[derive(Clone, Copy)]
#[repr(u16)]
pub enum WatchdogTimeout {
    Ticks2G = 0,
    Ticks128M = 1,
    Ticks8M = 2,
    Ticks512K = 3,
    Ticks32K = 4,
    Ticks8K = 5,
    Ticks512 = 6,
    Ticks64 = 7,
}

pub struct Watchdog {
    wdt: WDT_A,
}

impl Watchdog {
    #[inline]
    pub fn new(wdt: WDT_A) -> Self {
        Self { wdt }
    }

    /// Stop the watchdog counter so setup cannot be interrupted by a reset.
    #[inline]
    pub fn hold(&mut self) {
        self.wdt
            .wdtctl
            .write(|w| unsafe { w.bits(WDT_PASSWORD | WDTHOLD) });
    }

    /// Restart the watchdog from zero with the given interval.
    #[inline]
    pub fn start(&mut self, timeout: WatchdogTimeout) {
        self.wdt
            .wdtctl
            .write(|w| unsafe { w.bits(WDT_PASSWORD | WDTCNTCL | timeout as u16) });
    }

    /// Clear the counter, keeping the configured interval and clock source.
    #[inline]
    pub fn feed(&mut self) {
        let ctl = self.wdt.wdtctl.read().bits() & 0x00FF;
        self.wdt
            .wdtctl
            .write(|w| unsafe { w.bits(WDT_PASSWORD | ctl | WDTCNTCL) });
    }
}

impl watchdog::Watchdog for Watchdog {
    fn feed(&mut self) {
        Watchdog::feed(self);
    }
}

impl watchdog::WatchdogEnable for Watchdog {
    type Time = WatchdogTimeout;

    fn start<T>(&mut self, period: T)
    where
        T: Into<Self::Time>,
    {
        Watchdog::start(self, period.into());
    }
}

impl watchdog::WatchdogDisable for Watchdog {
    fn disable(&mut self) {
        self.hold();
    }
}
