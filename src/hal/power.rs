use msp432p401r::PCM;

/// PCMCTL0 key field, required in bits 31:16 of every write.
const PCM_KEY: u32 = 0x695A_0000;

const AMR_MASK: u32 = 0x0000_000F;

/// PCMCTL1 flag set while a power mode transition is in progress.
const PMR_BUSY: u32 = 1 << 8;

/// Active power modes (PCMCTL0 AMR encoding).
///
/// The low-frequency modes are not an optimization: below the LDO tiers'
/// minimum clock the core supply must be switched to the LF regulator for
/// the part to run at all.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum PowerMode {
    AmLdoVcore0 = 0x0,
    AmLdoVcore1 = 0x1,
    AmDcdcVcore0 = 0x4,
    AmDcdcVcore1 = 0x5,
    AmLfVcore0 = 0x8,
    AmLfVcore1 = 0x9,
}

pub struct PowerControl {
    pcm: PCM,
}

impl PowerControl {
    #[inline]
    pub fn new(pcm: PCM) -> Self {
        Self { pcm }
    }

    /// Request an active-mode transition and wait for it to settle.
    pub fn set_power_mode(&mut self, mode: PowerMode) {
        self.pcm.pcmctl0.modify(|r, w| unsafe {
            w.bits(PCM_KEY | (r.bits() & 0x0000_FFFF & !AMR_MASK) | mode as u32)
        });

        while self.pcm.pcmctl1.read().bits() & PMR_BUSY != 0 {}

        // Clearing the key field locks the register again
        self.pcm
            .pcmctl0
            .modify(|r, w| unsafe { w.bits(r.bits() & 0x0000_FFFF) });
    }
}
