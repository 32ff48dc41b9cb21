//! Shared sensor timing, register sequences and revision enables

use embedded_hal::{delay::DelayNs, i2c::I2c};
use fugit::MillisDurationU32;

use crate::regs::*;
use crate::sccb::{Sccb, Status};
use crate::{Error, FrameSize, HwFlags, PixFormat, SensorId};

/// Wait after a soft reset before touching registers again.
pub const POWER_SETTLE: MillisDurationU32 = MillisDurationU32::from_ticks(10);
/// Wait after a format or resolution change.
pub const MODE_SETTLE: MillisDurationU32 = MillisDurationU32::from_ticks(30);

/// Sync polarity and feature set of the OV7670 family.
pub const OV7670_HW_FLAGS: HwFlags = HwFlags {
    vsync: true,
    hsync: false,
    pixck: true,
    fsync: true,
    jpege: false,
};

/// Frame size selected by the power-on register values.
pub const POWER_ON_FRAME_SIZE: FrameSize = FrameSize::Vga;
/// Pixel format selected by the power-on register values.
pub const POWER_ON_PIX_FORMAT: PixFormat = PixFormat::Yuv422;

#[cfg(feature = "ov7670")]
pub mod ov7670;
#[cfg(feature = "ov7670-scaler")]
pub mod ov7670_scaler;

type Result<T, I2C> = core::result::Result<T, Error<<I2C as embedded_hal::i2c::ErrorType>::Error>>;

pub(crate) fn read_id<I2C: I2c, D: DelayNs>(sccb: &mut Sccb<I2C, D>) -> Result<SensorId, I2C> {
    Ok(SensorId {
        midh: sccb.read_reg(MIDH)?,
        midl: sccb.read_reg(MIDL)?,
        pid: sccb.read_reg(PID)?,
        ver: sccb.read_reg(VER)?,
    })
}

/// COM7 and COM15 format codes, or `None` if the sensor can't produce `format`.
pub(crate) const fn format_codes(format: PixFormat) -> Option<(u8, u8)> {
    match format {
        PixFormat::Rgb565 => Some((COM7_FMT_RGB, COM15_FMT_RGB565)),
        PixFormat::Yuv422 | PixFormat::Grayscale => Some((COM7_FMT_YUV, COM15_FMT_YUV)),
        PixFormat::Jpeg | PixFormat::RawBayer => None,
    }
}

/// COM7 resolution code for the sizes the sensor has presets for.
pub(crate) const fn resolution_code(size: FrameSize) -> Option<u8> {
    match size {
        FrameSize::Vga => Some(COM7_RES_VGA),
        FrameSize::Qvga => Some(COM7_RES_QVGA),
        FrameSize::Cif => Some(COM7_RES_CIF),
        FrameSize::Qcif => Some(COM7_RES_QCIF),
        FrameSize::Qqvga | FrameSize::Svga => None,
    }
}

/// Read COM7 and COM15, switch both format fields, write COM7 then COM15.
pub(crate) fn write_format<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    com7_fmt: u8,
    com15_fmt: u8,
) -> Result<(), I2C> {
    let com7 = sccb.read_reg(COM7)?;
    let com15 = sccb.read_reg(COM15)?;

    let mut status = Status::ok();
    status.push(sccb.write_reg(COM7, com7_set_fmt(com7, com7_fmt)));
    status.push(sccb.write_reg(COM15, com15_set_fmt(com15, com15_fmt)));
    status.into_result()
}

pub(crate) fn set_colorbar<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    enable: bool,
) -> Result<(), I2C> {
    let mut status = Status::ok();
    status.push(sccb.modify_reg(COM7, |r| com7_set_cbar(r, enable)));
    status.push(sccb.modify_reg(COM17, |r| com17_set_dsp_cbar(r, enable)));
    status.into_result()
}

pub(crate) fn set_whitebal<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    enable: bool,
) -> Result<(), I2C> {
    sccb.modify_reg(COM8, |r| com8_set_awb(r, enable))
}

pub(crate) fn set_gain_ctrl<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    enable: bool,
) -> Result<(), I2C> {
    sccb.modify_reg(COM8, |r| com8_set_agc(r, enable))
}

pub(crate) fn set_exposure_ctrl<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    enable: bool,
) -> Result<(), I2C> {
    sccb.modify_reg(COM8, |r| com8_set_aec(r, enable))
}

pub(crate) fn set_hmirror<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    enable: bool,
) -> Result<(), I2C> {
    sccb.modify_reg(MVFP, |r| mvfp_set_mirror(r, enable))
}

pub(crate) fn set_vflip<I2C: I2c, D: DelayNs>(
    sccb: &mut Sccb<I2C, D>,
    enable: bool,
) -> Result<(), I2C> {
    sccb.modify_reg(MVFP, |r| mvfp_set_flip(r, enable))
}
