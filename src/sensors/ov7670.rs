//! Base OV7670 revision: one COM7 resolution code per frame size.

use embedded_hal::{delay::DelayNs, i2c::I2c};

use super::{MODE_SETTLE, OV7670_HW_FLAGS, POWER_ON_FRAME_SIZE, POWER_ON_PIX_FORMAT, POWER_SETTLE};
use crate::macros::{log_info, log_warn};
use crate::regs::{com7_set_res, COM7, COM7_RESET};
use crate::sccb::Sccb;
use crate::{Error, FrameSize, HwFlags, PixFormat, Sensor, SensorConfig, SensorId};

/// Base revision driver.
pub struct Ov7670<I2C, D> {
    sccb: Sccb<I2C, D>,
    id: SensorId,
    hw_flags: HwFlags,
    frame_size: FrameSize,
    pix_format: PixFormat,
}

impl<I2C, D> Ov7670<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Probe the sensor identity and set up the driver. Registers are left as
    /// they are; call [`Sensor::reset`] to start from power-on defaults.
    ///
    /// Returns [`Error::Bus`] if any identity register can't be read. There is
    /// no driver without an identity.
    pub fn new(i2c: I2C, delay: D, config: SensorConfig) -> Result<Self, Error<I2C::Error>> {
        let mut sccb = Sccb::new(i2c, delay, config.address);
        let id = super::read_id(&mut sccb)?;
        log_info!(
            "OV7670 at {:#X}: MID {:#X} PID {:#X}",
            sccb.addr(),
            id.manufacturer(),
            id.product()
        );

        Ok(Self {
            sccb,
            id,
            hw_flags: OV7670_HW_FLAGS,
            frame_size: POWER_ON_FRAME_SIZE,
            pix_format: POWER_ON_PIX_FORMAT,
        })
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        self.sccb.release()
    }
}

impl<I2C, D> Sensor for Ov7670<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Error<I2C::Error>;

    fn id(&self) -> SensorId {
        self.id
    }

    fn read_id(&mut self) -> Result<SensorId, Self::Error> {
        super::read_id(&mut self.sccb)
    }

    fn hw_flags(&self) -> HwFlags {
        self.hw_flags
    }

    fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    fn pix_format(&self) -> PixFormat {
        self.pix_format
    }

    /// Always succeeds: the reset bit self-clears and there is nothing to
    /// check afterwards. The cached frame size and pixel format are left
    /// alone; only their setters change them.
    fn reset(&mut self) -> Result<(), Self::Error> {
        if self.sccb.write_reg(COM7, COM7_RESET).is_err() {
            log_warn!("COM7 reset write failed");
        }
        self.sccb.sleep(POWER_SETTLE);
        self.sccb.sleep(MODE_SETTLE);
        Ok(())
    }

    fn set_pix_format(&mut self, format: PixFormat) -> Result<(), Self::Error> {
        let (com7_fmt, com15_fmt) = super::format_codes(format).ok_or(Error::InvalidArgument)?;

        let ret = super::write_format(&mut self.sccb, com7_fmt, com15_fmt);
        self.sccb.sleep(MODE_SETTLE);

        ret?;
        self.pix_format = format;
        Ok(())
    }

    fn set_frame_size(&mut self, size: FrameSize) -> Result<(), Self::Error> {
        let res = super::resolution_code(size).ok_or(Error::InvalidArgument)?;

        let ret = self.sccb.modify_reg(COM7, |r| com7_set_res(r, res));
        self.sccb.sleep(MODE_SETTLE);

        ret?;
        log_info!("Frame size {}", size);
        self.frame_size = size;
        Ok(())
    }

    fn set_colorbar(&mut self, enable: bool) -> Result<(), Self::Error> {
        super::set_colorbar(&mut self.sccb, enable)
    }

    fn set_whitebal(&mut self, enable: bool) -> Result<(), Self::Error> {
        super::set_whitebal(&mut self.sccb, enable)
    }

    fn set_gain_ctrl(&mut self, enable: bool) -> Result<(), Self::Error> {
        super::set_gain_ctrl(&mut self.sccb, enable)
    }

    fn set_exposure_ctrl(&mut self, enable: bool) -> Result<(), Self::Error> {
        super::set_exposure_ctrl(&mut self.sccb, enable)
    }

    fn set_hmirror(&mut self, enable: bool) -> Result<(), Self::Error> {
        super::set_hmirror(&mut self.sccb, enable)
    }

    fn set_vflip(&mut self, enable: bool) -> Result<(), Self::Error> {
        super::set_vflip(&mut self.sccb, enable)
    }
}
