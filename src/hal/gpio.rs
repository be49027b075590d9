use core::marker::PhantomData;
use msp432p401r::DIO;

pub trait PinMode {}
pub struct Input;
pub struct Output;
/// Pin handed to its primary module function; the owning peripheral drives it.
pub struct Primary;
impl PinMode for Input {}
impl PinMode for Output {}
impl PinMode for Primary {}

/// One digital I/O pin. Ports come in pairs sharing a 16-bit register set,
/// so each port carries the bit offset of its half.
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

// Port markers
pub struct P1;
pub struct P2;
pub struct P3;
pub struct P4;
pub struct P5;
pub struct P6;
pub struct P7;
pub struct P8;
pub struct P9;
pub struct P10;

macro_rules! impl_port {
    ($PORT:ident, $dir:ident, $out:ident, $in_:ident, $sel0:ident, $sel1:ident, $offset:expr) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            const MASK: u16 = 1 << ($offset + P);

            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$sel0.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                    dio.$sel1.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                    dio.$dir.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
                Pin::new()
            }

            pub fn into_input(self) -> Pin<$PORT, P, Input> {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$sel0.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                    dio.$sel1.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                    dio.$dir.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                }
                Pin::new()
            }

            /// Route the pin to its primary module function as an output
            /// (SEL1:SEL0 = 01, DIR set). The peripheral, not software,
            /// drives the pin from here on.
            pub fn into_primary_output(self) -> Pin<$PORT, P, Primary> {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$sel1.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                    dio.$sel0.modify(|r, w| w.bits(r.bits() | Self::MASK));
                    dio.$dir.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
                Pin::new()
            }
        }

        impl<const P: u8> Pin<$PORT, P, Output> {
            #[inline]
            pub fn set_high(&mut self) {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$out.modify(|r, w| w.bits(r.bits() | Self::MASK));
                }
            }

            #[inline]
            pub fn set_low(&mut self) {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$out.modify(|r, w| w.bits(r.bits() & !Self::MASK));
                }
            }

            #[inline]
            pub fn toggle(&mut self) {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$out.modify(|r, w| w.bits(r.bits() ^ Self::MASK));
                }
            }
        }

        impl<const P: u8> Pin<$PORT, P, Input> {
            #[inline]
            pub fn is_high(&self) -> bool {
                unsafe {
                    let dio = &*DIO::ptr();
                    dio.$in_.read().bits() & Self::MASK != 0
                }
            }

            #[inline]
            pub fn is_low(&self) -> bool {
                !self.is_high()
            }
        }
    };
}

// Odd ports sit in the low byte of their register pair, even ports in the high byte
impl_port!(P1, padir, paout, pain, pasel0, pasel1, 0);
impl_port!(P2, padir, paout, pain, pasel0, pasel1, 8);
impl_port!(P3, pbdir, pbout, pbin, pbsel0, pbsel1, 0);
impl_port!(P4, pbdir, pbout, pbin, pbsel0, pbsel1, 8);
impl_port!(P5, pcdir, pcout, pcin, pcsel0, pcsel1, 0);
impl_port!(P6, pcdir, pcout, pcin, pcsel0, pcsel1, 8);
impl_port!(P7, pddir, pdout, pdin, pdsel0, pdsel1, 0);
impl_port!(P8, pddir, pdout, pdin, pdsel0, pdsel1, 8);
impl_port!(P9, pedir, peout, pein, pesel0, pesel1, 0);
impl_port!(P10, pedir, peout, pein, pesel0, pesel1, 8);

/// Pins this board wires up. All pins reset as plain inputs.
pub struct Pins {
    /// Sensor trigger output; primary function is TA0.1.
    pub trigger: Pin<P2, 4, Input>,
    /// Reserved input for runtime frequency adjustment. Wired but not
    /// serviced: changing the waveform safely needs an update protocol
    /// that does not glitch the output, which does not exist yet.
    pub freq_adjust: Pin<P1, 1, Input>,
}

impl Pins {
    /// Claim the pin set, consuming the port peripheral so pin ownership
    /// stays exclusive.
    pub fn new(_dio: DIO) -> Self {
        Pins {
            trigger: Pin::new(),
            freq_adjust: Pin::new(),
        }
    }
}
