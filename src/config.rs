//! Configuration constants for the PWM trigger firmware
//!
//! The timing constants below are the ones the board shipped with, and they
//! do not agree with each other. The sensor integration notes ask for a
//! 20 ms period with a 10 us trigger pulse and describe SMCLK as 64 kHz,
//! but the clock tree routes the 128 kHz REFO to SMCLK with no divider.
//! At the 64 kHz calibration rate, `PERIOD_TICKS` and `PULSE_TICKS` come
//! out to roughly 40 ms and 15.6 us instead.
//!
//! Measure the waveform before trusting any of these numbers, then update
//! `TIMER_TICK_HZ`, `PERIOD_TICKS` and `PULSE_TICKS` together.

/// Reference oscillator tier requested from the clock system, in Hz.
pub const REFO_FREQ_HZ: u32 = 128_000;

/// Timer tick rate the waveform constants were calibrated against, in Hz.
///
/// Note this is half of `REFO_FREQ_HZ` even though SMCLK runs undivided;
/// see the module docs.
pub const TIMER_TICK_HZ: u32 = 64_000;

/// Counter ticks per full waveform period (TA0CCR0).
pub const PERIOD_TICKS: u16 = 2560;

/// Ticks the output holds high at the start of each period (TA0CCR1).
pub const PULSE_TICKS: u16 = 1;

/// Waveform period the integration notes ask for, in microseconds.
pub const DOCUMENTED_PERIOD_US: u32 = 20_000;

/// Trigger pulse width the integration notes ask for, in microseconds.
pub const DOCUMENTED_PULSE_US: u32 = 10;

// Duty cycle must stay strictly between 0% and 100%
const _: () = assert!(PULSE_TICKS > 0);
const _: () = assert!(PULSE_TICKS < PERIOD_TICKS);
