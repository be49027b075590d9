//! Clock system (CS) configuration
//!
//! CS registers are key-protected; every configuration call unlocks the
//! block, applies its change and locks it again.

use msp432p401r::CS;

const CS_KEY: u32 = 0x695A;

/// CSCLKEN bit selecting the 128 kHz REFO tier over the 32.768 kHz one.
const REFOFSEL: u32 = 1 << 15;

/// Selectable reference oscillator tiers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RefoFrequency {
    F32k,
    F128k,
}

impl RefoFrequency {
    /// Nominal oscillator frequency in Hz.
    pub const fn hertz(self) -> u32 {
        match self {
            RefoFrequency::F32k => 32_768,
            RefoFrequency::F128k => 128_000,
        }
    }
}

/// Clock signals this driver can route.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClockSignal {
    /// Master clock, feeds the CPU.
    Mclk,
    /// Sub-main clock, feeds timers and other peripherals.
    Smclk,
}

/// Sources selectable for MCLK and SMCLK (CSCTL1 SELM/SELS encoding).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum ClockSource {
    Lfxtclk = 0,
    Vloclk = 1,
    Refoclk = 2,
    Dcoclk = 3,
    Modosc = 4,
    Hfxtclk = 5,
}

/// Signal dividers (CSCTL1 DIVM/DIVS encoding).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum ClockDivider {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl ClockDivider {
    pub const fn divisor(self) -> u32 {
        1 << (self as u32)
    }
}

pub struct ClockSystem {
    cs: CS,
}

impl ClockSystem {
    #[inline]
    pub fn new(cs: CS) -> Self {
        Self { cs }
    }

    fn unlock(&mut self) {
        self.cs.cskey.write(|w| unsafe { w.bits(CS_KEY) });
    }

    fn lock(&mut self) {
        self.cs.cskey.write(|w| unsafe { w.bits(0) });
    }

    /// Select the REFO tier used whenever REFOCLK is requested.
    pub fn set_reference_frequency(&mut self, freq: RefoFrequency) {
        self.unlock();
        self.cs.csclken.modify(|r, w| unsafe {
            match freq {
                RefoFrequency::F32k => w.bits(r.bits() & !REFOFSEL),
                RefoFrequency::F128k => w.bits(r.bits() | REFOFSEL),
            }
        });
        self.lock();
    }

    /// Route `source` to `signal` through the given divider.
    pub fn init_signal(&mut self, signal: ClockSignal, source: ClockSource, divider: ClockDivider) {
        let (sel_shift, div_shift) = match signal {
            ClockSignal::Mclk => (0, 16),
            ClockSignal::Smclk => (4, 28),
        };

        self.unlock();
        self.cs.csctl1.modify(|r, w| {
            let mut bits = r.bits();
            bits &= !((0x7 << sel_shift) | (0x7 << div_shift));
            bits |= (source as u32) << sel_shift;
            bits |= (divider as u32) << div_shift;
            unsafe { w.bits(bits) }
        });
        self.lock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refo_tiers() {
        assert_eq!(RefoFrequency::F32k.hertz(), 32_768);
        assert_eq!(RefoFrequency::F128k.hertz(), 128_000);
    }

    #[test]
    fn divider_encoding_matches_divisor() {
        assert_eq!(ClockDivider::Div1.divisor(), 1);
        assert_eq!(ClockDivider::Div8.divisor(), 8);
        assert_eq!(ClockDivider::Div128.divisor(), 128);
    }

    #[test]
    fn undivided_refo_reaches_the_timer() {
        // The tick rate seen by Timer_A when REFOCLK feeds SMCLK directly.
        let smclk = RefoFrequency::F128k.hertz() / ClockDivider::Div1.divisor();
        assert_eq!(smclk, 128_000);
    }
}
