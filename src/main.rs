#![no_std]
#![no_main]

use panic_halt as _;

use cortex_m_rt::entry;
use msp432p401r::Peripherals;

use msp432_pwm_trigger::hal::clock::{
    ClockDivider, ClockSignal, ClockSource, ClockSystem, RefoFrequency,
};
use msp432_pwm_trigger::hal::gpio::Pins;
use msp432_pwm_trigger::hal::power::{PowerControl, PowerMode};
use msp432_pwm_trigger::hal::timer::Pwm;
use msp432_pwm_trigger::hal::watchdog::Watchdog;
use msp432_pwm_trigger::trigger;

#[entry]
fn main() -> ! {
    let p = Peripherals::take().unwrap();

    // Setup must not be interrupted by a watchdog reset
    let mut watchdog = Watchdog::new(p.WDT_A);
    watchdog.hold();

    // REFO at 128 kHz feeds MCLK and SMCLK undivided
    let mut clocks = ClockSystem::new(p.CS);
    clocks.set_reference_frequency(RefoFrequency::F128k);
    clocks.init_signal(ClockSignal::Mclk, ClockSource::Refoclk, ClockDivider::Div1);
    clocks.init_signal(ClockSignal::Smclk, ClockSource::Refoclk, ClockDivider::Div1);

    // The core supply must match the low-frequency clock tier
    let mut power = PowerControl::new(p.PCM);
    power.set_power_mode(PowerMode::AmLfVcore0);
    #[cfg(feature = "defmt-log")]
    defmt::info!("clock tree and power domain configured");

    // Hand P2.4 to TA0.1 so the timer drives the sensor directly
    let pins = Pins::new(p.DIO);
    let _trigger_pin = pins.trigger.into_primary_output();

    let mut pwm = Pwm::new(p.TIMER_A0);
    trigger::start(&mut pwm);
    #[cfg(feature = "defmt-log")]
    defmt::info!(
        "trigger running: period {} ticks, high {} ticks",
        trigger::TRIGGER_PWM.period,
        trigger::TRIGGER_PWM.duty
    );

    // The waveform is hardware-generated from here on
    loop {
        cortex_m::asm::nop();
    }
}
