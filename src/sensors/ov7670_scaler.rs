//! OV7670 revision driven through the scaler.
//!
//! The preset sizes still go through a COM7 resolution code, but the scaler
//! has to be put back into automatic mode afterwards. QQVGA has no preset and
//! is produced by downsampling VGA by four in both directions, cropping with
//! [`Ov7670Scaler::frame_control`] and resetting the color matrix.
//!
//! Reset also loads a short table of defaults the sensor needs for usable
//! color and sync polarity.

use embedded_hal::{delay::DelayNs, i2c::I2c};

use super::{MODE_SETTLE, OV7670_HW_FLAGS, POWER_ON_FRAME_SIZE, POWER_ON_PIX_FORMAT, POWER_SETTLE};
use crate::macros::{log_info, log_warn};
use crate::regs::*;
use crate::sccb::{Sccb, Status, REG_END};
use crate::{Error, FrameSize, HwFlags, PixFormat, Sensor, SensorConfig, SensorId};

/// Written after every soft reset.
pub const DEFAULT_REGS: [(u8, u8); 6] = [
    (COM11, COM11_EXP | COM11_HZAUTO),
    (COLOR_CAL, COLOR_CAL_VALUE),
    (COM8, COM8_FAST_AUTO),
    (AWBCTR0, AWBCTR0_THRESHOLD),
    (COM10, COM10_VS_NEG),
    REG_END,
];

// QQVGA crop, in sensor pixel coordinates. HSTART is past HSTOP; the
// calibration is encoded as given.
/// QQVGA horizontal window start.
pub const QQVGA_HSTART: u16 = 196;
/// QQVGA horizontal window stop.
pub const QQVGA_HSTOP: u16 = 52;
/// QQVGA vertical window start.
pub const QQVGA_VSTART: u16 = 8;
/// QQVGA vertical window stop.
pub const QQVGA_VSTOP: u16 = 488;

/// Scaler revision driver, adds [`FrameSize::Qqvga`].
pub struct Ov7670Scaler<I2C, D> {
    sccb: Sccb<I2C, D>,
    id: SensorId,
    hw_flags: HwFlags,
    frame_size: FrameSize,
    pix_format: PixFormat,
}

impl<I2C, D> Ov7670Scaler<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Probe the sensor identity and set up the driver.
    ///
    /// Returns [`Error::Bus`] if any identity register can't be read. There is
    /// no driver without an identity.
    pub fn new(i2c: I2C, delay: D, config: SensorConfig) -> Result<Self, Error<I2C::Error>> {
        let mut sccb = Sccb::new(i2c, delay, config.address);
        let id = super::read_id(&mut sccb)?;
        log_info!(
            "OV7670 (scaler) at {:#X}: MID {:#X} PID {:#X}",
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

    /// Set the output window. Each bound is split into its high bits (own
    /// register) and low bits (packed into HREF/VREF). Bounds are not checked
    /// or reordered.
    pub fn frame_control(
        &mut self,
        h_start: u16,
        h_stop: u16,
        v_start: u16,
        v_stop: u16,
    ) -> Result<(), Error<I2C::Error>> {
        let sccb = &mut self.sccb;
        let mut status = Status::ok();

        status.push(sccb.write_reg(HSTART, (h_start >> 3) as u8));
        status.push(sccb.write_reg(HSTOP, (h_stop >> 3) as u8));
        status.push(sccb.modify_reg(HREF, |r| href_set_window(r, h_start, h_stop)));

        status.push(sccb.write_reg(VSTART, (v_start >> 2) as u8));
        status.push(sccb.write_reg(VSTOP, (v_stop >> 2) as u8));
        status.push(sccb.modify_reg(VREF, |r| vref_set_window(r, v_start, v_stop)));

        status.into_result()
    }

    /// Load the color matrix for a saturation `level`; 0 is neutral. Levels
    /// are not clamped.
    pub fn saturation(&mut self, level: i32) -> Result<(), Error<I2C::Error>> {
        let matrix = saturation_matrix(level);
        let mut status = Status::ok();

        for (reg, val) in [MTX1, MTX2, MTX3, MTX4, MTX5, MTX6].into_iter().zip(matrix) {
            status.push(self.sccb.write_reg(reg, val));
        }
        status.push(self.sccb.write_reg(MTXS, MTXS_DEFAULT));

        status.into_result()
    }

    /// Preset size: resolution code, then scaler back to automatic.
    fn apply_preset(&mut self, res: u8) -> Status<Error<I2C::Error>> {
        let sccb = &mut self.sccb;
        let mut status = Status::ok();

        status.push(sccb.modify_reg(COM7, |r| com7_set_res(r, res)));
        status.push(sccb.modify_reg(COM14, |r| com14_set_manual_scale(r, false)));
        status.push(sccb.modify_reg(TSLB, |r| tslb_set_resize(r, true)));

        status
    }

    /// QQVGA: VGA downsampled by 4 in both directions.
    fn apply_qqvga(&mut self) -> Status<Error<I2C::Error>> {
        let mut status = Status::ok();

        {
            let sccb = &mut self.sccb;
            status.push(sccb.modify_reg(COM3, |r| com3_set_dcw(r, true)));
            status.push(sccb.modify_reg(COM14, |r| {
                let r = com14_set_pclk_div(r, COM14_PCLK_DIV_4);
                let r = com14_set_manual_scale(r, true);
                com14_set_dcw_pclk(r, true)
            }));
            status.push(sccb.write_reg(SCALING_XSC, XSC_QQVGA));
            status.push(sccb.write_reg(SCALING_YSC, YSC_QQVGA));
            status.push(sccb.write_reg(SCALING_DCWCTR, DCWCTR_QQVGA));
            status.push(sccb.write_reg(SCALING_PCLK_DIV, PCLK_DIV_QQVGA));
            status.push(sccb.write_reg(SCALING_PCLK_DELAY, PCLK_DELAY_QQVGA));
        }

        status.push(self.frame_control(QQVGA_HSTART, QQVGA_HSTOP, QQVGA_VSTART, QQVGA_VSTOP));
        status.push(self.saturation(0));

        status
    }
}

impl<I2C, D> Sensor for Ov7670Scaler<I2C, D>
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

    /// Soft reset followed by [`DEFAULT_REGS`]. Failed writes are logged but
    /// not reported: this always returns `Ok`. The cached frame size and pixel
    /// format are left alone.
    fn reset(&mut self) -> Result<(), Self::Error> {
        if self.sccb.write_reg(COM7, COM7_RESET).is_err() {
            log_warn!("COM7 reset write failed");
        }
        self.sccb.sleep(POWER_SETTLE);

        let failed = self.sccb.write_regs(&DEFAULT_REGS);
        if failed > 0 {
            log_warn!("{} default registers not written", failed);
        }
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
        let status = match (size, super::resolution_code(size)) {
            (_, Some(res)) => self.apply_preset(res),
            (FrameSize::Qqvga, None) => self.apply_qqvga(),
            _ => return Err(Error::InvalidArgument),
        };
        self.sccb.sleep(MODE_SETTLE);

        if status.is_ok() {
            log_info!("Frame size {}", size);
            self.frame_size = size;
        }
        status.into_result()
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
