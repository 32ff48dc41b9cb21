//! SCCB register access on top of an embedded-hal I2C bus.

use embedded_hal::{delay::DelayNs, i2c::I2c};
use fugit::MillisDurationU32;

use crate::macros::{log_debug, log_warn};
use crate::Error;

/// OV7670 7-bit SCCB address (0x42 >> 1).
pub const DEFAULT_ADDR: u8 = 0x21;

/// Terminator for [`Sccb::write_regs`] tables.
pub const REG_END: (u8, u8) = (0x00, 0x00);

/// Outcome of a multi-write sequence. Every write is issued; the first
/// failure is kept.
#[derive(Debug)]
#[must_use]
pub struct Status<E>(Result<(), E>);

impl<E> Status<E> {
    /// Empty, successful sequence.
    pub const fn ok() -> Self {
        Self(Ok(()))
    }

    /// Fold one step into the sequence outcome.
    pub fn push(&mut self, step: Result<(), E>) {
        if self.0.is_ok() {
            self.0 = step;
        }
    }

    /// No step has failed so far.
    pub fn is_ok(&self) -> bool {
        self.0.is_ok()
    }

    /// First failure, if any.
    pub fn into_result(self) -> Result<(), E> {
        self.0
    }
}

/// Register level access to one sensor: bus, delay provider and address.
pub struct Sccb<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C, D> Sccb<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Talk to the sensor at 7-bit address `addr`.
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        Self { i2c, delay, addr }
    }

    /// Device address.
    pub fn addr(&self) -> u8 {
        self.addr
    }

    /// Block for `duration`.
    pub fn sleep(&mut self, duration: MillisDurationU32) {
        self.delay.delay_ms(duration.to_millis());
    }

    /// Read one register. SCCB has no repeated start, so the address phase
    /// and the read are two separate transfers.
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write(self.addr, &[reg]).map_err(Error::Bus)?;
        self.i2c.read(self.addr, &mut buf).map_err(Error::Bus)?;
        log_debug!("Read {:#X} from {:#X}", buf[0], reg);
        Ok(buf[0])
    }

    /// Write one register.
    pub fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), Error<I2C::Error>> {
        log_debug!("Writing {:#X} to {:#X}", val, reg);
        self.i2c.write(self.addr, &[reg, val]).map_err(Error::Bus)
    }

    /// Read `reg`, transform it with `f` and write the result back. A failed
    /// read skips the write.
    pub fn modify_reg<F>(&mut self, reg: u8, f: F) -> Result<(), Error<I2C::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let val = self.read_reg(reg)?;
        self.write_reg(reg, f(val))
    }

    /// Write a `(reg, val)` table up to the [`REG_END`] sentinel. Failed
    /// entries are logged and skipped; returns how many failed.
    pub fn write_regs(&mut self, regs: &[(u8, u8)]) -> usize {
        let mut failed = 0;
        for &(reg, val) in regs.iter().take_while(|&&entry| entry != REG_END) {
            if self.write_reg(reg, val).is_err() {
                log_warn!("Default register {:#X} not written", reg);
                failed += 1;
            }
        }
        failed
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}
