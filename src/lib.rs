//! Register-level control of OV7670-family image sensors over SCCB.
//!
//! Each supported sensor revision implements [`Sensor`], the capability set a
//! capture subsystem drives: reset, pixel format, frame size, test pattern,
//! auto white balance/gain/exposure and mirror/flip. Which revisions are
//! compiled in is chosen with cargo features (`ov7670`, `ov7670-scaler`).
//!
//! A driver assumes it is the single owner of its sensor. Configuration calls
//! are read-modify-write sequences on shared registers and are not atomic; if
//! several tasks need the same sensor, serialize access outside the driver.
#![cfg_attr(not(test), no_std)]

use core::fmt;

mod macros;

pub mod regs;
pub mod sccb;
pub mod sensors;

pub use sccb::{Sccb, DEFAULT_ADDR};
#[cfg(feature = "ov7670")]
pub use sensors::ov7670::Ov7670;
#[cfg(feature = "ov7670-scaler")]
pub use sensors::ov7670_scaler::Ov7670Scaler;

/// Output pixel format requested by the capture subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixFormat {
    /// 16-bit RGB 5:6:5
    Rgb565,
    /// YUYV 4:2:2
    Yuv422,
    /// Same register encoding as [`PixFormat::Yuv422`]; the Y plane is used.
    Grayscale,
    /// Not produced by this sensor family.
    Jpeg,
    /// Not produced by this sensor family.
    RawBayer,
}

/// Output frame geometry requested by the capture subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameSize {
    /// 160x120, manual scaling only.
    Qqvga,
    /// 176x144
    Qcif,
    /// 320x240
    Qvga,
    /// 352x288
    Cif,
    /// 640x480
    Vga,
    /// 800x600, beyond the sensor's array.
    Svga,
}

impl FrameSize {
    /// Output `(width, height)` in pixels.
    pub const fn dimensions(self) -> (u16, u16) {
        match self {
            Self::Qqvga => (160, 120),
            Self::Qcif => (176, 144),
            Self::Qvga => (320, 240),
            Self::Cif => (352, 288),
            Self::Vga => (640, 480),
            Self::Svga => (800, 600),
        }
    }
}

/// Identity registers read once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorId {
    /// Manufacturer ID, high byte
    pub midh: u8,
    /// Manufacturer ID, low byte
    pub midl: u8,
    /// Product ID
    pub pid: u8,
    /// Product version
    pub ver: u8,
}

impl SensorId {
    /// OmniVision manufacturer ID.
    pub const OMNIVISION: u16 = 0x7FA2;

    /// Manufacturer ID, e.g. [`SensorId::OMNIVISION`].
    pub const fn manufacturer(&self) -> u16 {
        u16::from_be_bytes([self.midh, self.midl])
    }

    /// Product ID and version combined, e.g. `0x7673` for an OV7670.
    pub const fn product(&self) -> u16 {
        u16::from_be_bytes([self.pid, self.ver])
    }
}

/// Electrical behavior of the sensor, reported to the capture subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwFlags {
    /// VSYNC is active high.
    pub vsync: bool,
    /// HSYNC is active high.
    pub hsync: bool,
    /// Pixel clock output present.
    pub pixck: bool,
    /// Frame sync output present.
    pub fsync: bool,
    /// On-chip JPEG encoder present.
    pub jpege: bool,
}

/// Construction-time settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// 7-bit SCCB device address.
    pub address: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDR,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Pixel format or frame size this revision can't produce. Nothing was
    /// sent to the sensor.
    InvalidArgument,
    /// A register transfer failed. The sensor may be partially configured.
    Bus(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "Unsupported sensor setting"),
            Self::Bus(err) => write!(f, "SCCB transfer failed: {err:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Capability set shared by every sensor revision.
///
/// Setters that fail leave cached state (frame size, pixel format) at its
/// previous value, while the sensor itself may have taken some of the writes.
/// Treat any error as "configuration unknown" and re-apply or reset.
pub trait Sensor {
    /// Bus error type.
    type Error;

    /// Identity read at construction.
    fn id(&self) -> SensorId;

    /// Re-read the identity registers.
    fn read_id(&mut self) -> Result<SensorId, Self::Error>;

    /// Sync polarity and feature flags, fixed per sensor family.
    fn hw_flags(&self) -> HwFlags;

    /// Last frame size applied successfully.
    fn frame_size(&self) -> FrameSize;

    /// Last pixel format applied successfully.
    fn pix_format(&self) -> PixFormat;

    /// Soft-reset every register to its power-on value.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Switch output format. Waits for the mode to settle.
    fn set_pix_format(&mut self, format: PixFormat) -> Result<(), Self::Error>;

    /// Switch output geometry. Waits for the mode to settle.
    fn set_frame_size(&mut self, size: FrameSize) -> Result<(), Self::Error>;

    /// Color bar test pattern, on both the analog and DSP paths.
    fn set_colorbar(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Auto white balance.
    fn set_whitebal(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Auto gain control.
    fn set_gain_ctrl(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Auto exposure control.
    fn set_exposure_ctrl(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Horizontal mirror.
    fn set_hmirror(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Vertical flip.
    fn set_vflip(&mut self, enable: bool) -> Result<(), Self::Error>;
}
