//! On-hardware bring-up check
//!
//! Flash this image before trusting the narrow trigger pulse: it runs the
//! exact init sequence of the main firmware but emits a 50% duty wave at
//! the trigger period, which any oscilloscope shows at a glance. If the
//! square wave's period is off, the clock tree or power mode is wrong; if
//! the pin is silent, the P2.4 routing is.

#![no_std]
#![no_main]

use panic_halt as _;

use cortex_m_rt::entry;
use msp432p401r::Peripherals;

use msp432_pwm_trigger::config;
use msp432_pwm_trigger::hal::clock::{
    ClockDivider, ClockSignal, ClockSource, ClockSystem, RefoFrequency,
};
use msp432_pwm_trigger::hal::gpio::Pins;
use msp432_pwm_trigger::hal::power::{PowerControl, PowerMode};
use msp432_pwm_trigger::hal::timer::{self, CompareChannel, OutputMode, Pwm, PwmConfig};
use msp432_pwm_trigger::hal::watchdog::Watchdog;

#[entry]
fn main() -> ! {
    let p = Peripherals::take().unwrap();

    let mut watchdog = Watchdog::new(p.WDT_A);
    watchdog.hold();

    let mut clocks = ClockSystem::new(p.CS);
    clocks.set_reference_frequency(RefoFrequency::F128k);
    clocks.init_signal(ClockSignal::Mclk, ClockSource::Refoclk, ClockDivider::Div1);
    clocks.init_signal(ClockSignal::Smclk, ClockSource::Refoclk, ClockDivider::Div1);

    let mut power = PowerControl::new(p.PCM);
    power.set_power_mode(PowerMode::AmLfVcore0);

    let pins = Pins::new(p.DIO);
    let _trigger_pin = pins.trigger.into_primary_output();

    let square = PwmConfig {
        clock_source: timer::ClockSource::Smclk,
        divider: timer::ClockDivider::Div1,
        period: config::PERIOD_TICKS,
        channel: CompareChannel::Ccr1,
        output_mode: OutputMode::ResetSet,
        duty: config::PERIOD_TICKS / 2,
    };

    let mut pwm = Pwm::new(p.TIMER_A0);
    pwm.generate(&square);

    loop {
        cortex_m::asm::nop();
    }
}
