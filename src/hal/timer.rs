//! Timer_A PWM driver
//!
//! In up mode the counter runs from zero to CCR0 and wraps; a compare
//! channel shapes the output pin on the way. With OUTMOD reset/set the
//! output goes high at the wrap and low at the compare match, giving one
//! pulse of `duty` ticks per `period` ticks with no CPU involvement.

use core::ops::Deref;
use msp432p401r::{timer_a0, TIMER_A0, TIMER_A1, TIMER_A2, TIMER_A3};

/// Timer_A clock sources (TAxCTL TASSEL encoding).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u16)]
pub enum ClockSource {
    Taclk = 0,
    Aclk = 1,
    Smclk = 2,
    Inclk = 3,
}

/// Input clock divider (TAxCTL ID encoding).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u16)]
pub enum ClockDivider {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
}

/// Compare output modes (TAxCCTLn OUTMOD encoding).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u16)]
pub enum OutputMode {
    OutBit = 0,
    Set = 1,
    ToggleReset = 2,
    SetReset = 3,
    Toggle = 4,
    Reset = 5,
    ToggleSet = 6,
    /// Output set when the counter wraps, reset at the compare match:
    /// one pulse per period, high for `duty` ticks.
    ResetSet = 7,
}

/// Compare channels with their own CCR register. CCR0 holds the period in
/// up mode and is not selectable here.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompareChannel {
    Ccr1,
    Ccr2,
    Ccr3,
    Ccr4,
}

/// Everything needed to start PWM generation, fixed before any register
/// is touched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PwmConfig {
    pub clock_source: ClockSource,
    pub divider: ClockDivider,
    pub period: u16,
    pub channel: CompareChannel,
    pub output_mode: OutputMode,
    pub duty: u16,
}

const TASSEL_SHIFT: u16 = 8;
const ID_SHIFT: u16 = 6;
const OUTMOD_SHIFT: u16 = 5;
const MC_UP: u16 = 1 << 4;
const MC_MASK: u16 = 0x3 << 4;
const TACLR: u16 = 1 << 2;

impl PwmConfig {
    /// TAxCTL word: clock source, divider, up mode, counter clear.
    pub(crate) const fn ctl_word(&self) -> u16 {
        ((self.clock_source as u16) << TASSEL_SHIFT)
            | ((self.divider as u16) << ID_SHIFT)
            | MC_UP
            | TACLR
    }

    /// TAxCCTLn word for the compare channel.
    pub(crate) const fn cctl_word(&self) -> u16 {
        (self.output_mode as u16) << OUTMOD_SHIFT
    }
}

/// Applies a PWM configuration as a single operation. The configuration
/// path is written against this seam so it can be exercised without the
/// real peripheral.
pub trait ApplyPwm {
    fn apply(&mut self, config: &PwmConfig);
}

mod sealed {
    pub trait Sealed {}
}

/// One of the four Timer_A instances.
pub trait TimerInstance: Deref<Target = timer_a0::RegisterBlock> + sealed::Sealed {}

macro_rules! impl_instance {
    ($($TIM:ident),+) => {
        $(
            impl sealed::Sealed for $TIM {}
            impl TimerInstance for $TIM {}
        )+
    };
}

impl_instance!(TIMER_A0, TIMER_A1, TIMER_A2, TIMER_A3);

/// PWM driver owning one Timer_A instance for the life of the program.
pub struct Pwm<T: TimerInstance> {
    tim: T,
    period: u16,
    channel: CompareChannel,
}

impl<T: TimerInstance> Pwm<T> {
    /// Take the timer with the counter stopped and interrupts masked.
    pub fn new(tim: T) -> Self {
        tim.tax_ctl.write(|w| unsafe { w.bits(0) });
        Self {
            tim,
            period: 0,
            channel: CompareChannel::Ccr1,
        }
    }

    fn write_compare(&self, channel: CompareChannel, cctl: u16, ccr: u16) {
        match channel {
            CompareChannel::Ccr1 => {
                self.tim.tax_cctl1.write(|w| unsafe { w.bits(cctl) });
                self.tim.tax_ccr1.write(|w| unsafe { w.bits(ccr) });
            }
            CompareChannel::Ccr2 => {
                self.tim.tax_cctl2.write(|w| unsafe { w.bits(cctl) });
                self.tim.tax_ccr2.write(|w| unsafe { w.bits(ccr) });
            }
            CompareChannel::Ccr3 => {
                self.tim.tax_cctl3.write(|w| unsafe { w.bits(cctl) });
                self.tim.tax_ccr3.write(|w| unsafe { w.bits(ccr) });
            }
            CompareChannel::Ccr4 => {
                self.tim.tax_cctl4.write(|w| unsafe { w.bits(cctl) });
                self.tim.tax_ccr4.write(|w| unsafe { w.bits(ccr) });
            }
        }
    }

    fn read_compare(&self, channel: CompareChannel) -> u16 {
        match channel {
            CompareChannel::Ccr1 => self.tim.tax_ccr1.read().bits(),
            CompareChannel::Ccr2 => self.tim.tax_ccr2.read().bits(),
            CompareChannel::Ccr3 => self.tim.tax_ccr3.read().bits(),
            CompareChannel::Ccr4 => self.tim.tax_ccr4.read().bits(),
        }
    }

    /// Start free-running PWM generation. The period lands in CCR0, the
    /// high time in the selected compare register, then the counter starts
    /// in up mode from zero.
    pub fn generate(&mut self, config: &PwmConfig) {
        self.period = config.period;
        self.channel = config.channel;

        self.tim
            .tax_ccr0
            .write(|w| unsafe { w.bits(config.period) });
        self.write_compare(config.channel, config.cctl_word(), config.duty);
        self.tim
            .tax_ctl
            .write(|w| unsafe { w.bits(config.ctl_word()) });
    }

    /// Update the high time without stopping the counter.
    #[inline]
    pub fn set_duty(&mut self, duty: u16) {
        self.write_compare_value(duty);
    }

    fn write_compare_value(&self, duty: u16) {
        match self.channel {
            CompareChannel::Ccr1 => self.tim.tax_ccr1.write(|w| unsafe { w.bits(duty) }),
            CompareChannel::Ccr2 => self.tim.tax_ccr2.write(|w| unsafe { w.bits(duty) }),
            CompareChannel::Ccr3 => self.tim.tax_ccr3.write(|w| unsafe { w.bits(duty) }),
            CompareChannel::Ccr4 => self.tim.tax_ccr4.write(|w| unsafe { w.bits(duty) }),
        }
    }

    #[inline]
    pub fn duty(&self) -> u16 {
        self.read_compare(self.channel)
    }

    /// A full period in ticks; also the largest useful compare value.
    #[inline]
    pub fn max_duty(&self) -> u16 {
        self.period
    }

    /// Halt the counter, freezing the output at its current level.
    pub fn stop(&mut self) {
        self.tim
            .tax_ctl
            .modify(|r, w| unsafe { w.bits(r.bits() & !MC_MASK) });
    }

    /// Resume counting in up mode after a `stop`.
    pub fn resume(&mut self) {
        self.tim
            .tax_ctl
            .modify(|r, w| unsafe { w.bits((r.bits() & !MC_MASK) | MC_UP) });
    }
}

impl<T: TimerInstance> ApplyPwm for Pwm<T> {
    fn apply(&mut self, config: &PwmConfig) {
        self.generate(config);
    }
}

impl<T: TimerInstance> embedded_hal::PwmPin for Pwm<T> {
    type Duty = u16;

    fn disable(&mut self) {
        self.stop();
    }

    fn enable(&mut self) {
        self.resume();
    }

    fn get_duty(&self) -> Self::Duty {
        self.duty()
    }

    fn get_max_duty(&self) -> Self::Duty {
        self.max_duty()
    }

    fn set_duty(&mut self, duty: Self::Duty) {
        Pwm::set_duty(self, duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger_like(period: u16, duty: u16) -> PwmConfig {
        PwmConfig {
            clock_source: ClockSource::Smclk,
            divider: ClockDivider::Div1,
            period,
            channel: CompareChannel::Ccr1,
            output_mode: OutputMode::ResetSet,
            duty,
        }
    }

    #[test]
    fn ctl_word_selects_smclk_up_mode_and_clears() {
        // TASSEL=SMCLK (0x0200), ID=/1, MC=up (0x0010), TACLR (0x0004)
        assert_eq!(trigger_like(2560, 1).ctl_word(), 0x0214);
    }

    #[test]
    fn ctl_word_encodes_divider() {
        let mut config = trigger_like(2560, 1);
        config.divider = ClockDivider::Div8;
        assert_eq!(config.ctl_word(), 0x0214 | (3 << 6));
    }

    #[test]
    fn cctl_word_is_reset_set() {
        // OUTMOD=7 in bits 7:5
        assert_eq!(trigger_like(2560, 1).cctl_word(), 0x00E0);
    }

    #[test]
    fn cctl_word_for_plain_output_is_zero() {
        let mut config = trigger_like(2560, 1);
        config.output_mode = OutputMode::OutBit;
        assert_eq!(config.cctl_word(), 0);
    }
}
