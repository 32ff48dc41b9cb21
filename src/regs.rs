//! OV7670 register map.
//!
//! Addresses, field layouts and setters for every register the drivers touch.
//! Setters are pure: they only alter the bits covered by their field and keep
//! the rest of the byte as read from the device.
#![allow(missing_docs)]

/// A bit-field inside an 8-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Bits owned by this field, in register position.
    pub mask: u8,
    /// Position of the field's least significant bit.
    pub shift: u8,
}

impl Field {
    /// Field covering `width` bits starting at bit `shift`.
    pub const fn new(shift: u8, width: u8) -> Self {
        let mask = (((1u16 << width) - 1) << shift) as u8;
        Self { mask, shift }
    }

    /// Single-bit field.
    pub const fn bit(shift: u8) -> Self {
        Self::new(shift, 1)
    }

    /// Replace this field in `reg` with `value`. Bits of `value` wider than
    /// the field are dropped.
    pub const fn apply(self, reg: u8, value: u8) -> u8 {
        (reg & !self.mask) | ((value << self.shift) & self.mask)
    }

    /// Field value already shifted into register position (format codes,
    /// resolution codes). Bits outside the mask are dropped.
    pub const fn apply_raw(self, reg: u8, raw: u8) -> u8 {
        (reg & !self.mask) | (raw & self.mask)
    }

    /// Extract this field from `reg`.
    pub const fn get(self, reg: u8) -> u8 {
        (reg & self.mask) >> self.shift
    }
}

// Identity
pub const PID: u8 = 0x0A; // Product ID MSB
pub const VER: u8 = 0x0B; // Product ID LSB
pub const MIDH: u8 = 0x1C; // Manufacturer ID high
pub const MIDL: u8 = 0x1D; // Manufacturer ID low

pub const VREF: u8 = 0x03; // Bit[3:2]: VSTOP low 2 bits
                           // Bit[1:0]: VSTART low 2 bits

pub const COM3: u8 = 0x0C; // Bit[3]: Scale enable
                           // Bit[2]: DCW enable

pub const COM7: u8 = 0x12; // Bit[7]: SCCB register reset
                           // Bit[5]: CIF
                           // Bit[4]: QVGA
                           // Bit[3]: QCIF
                           // Bit[2], Bit[0]: output format
                           // Bit[1]: Color bar

pub const COM8: u8 = 0x13; // Bit[2]: AGC enable
                           // Bit[1]: AWB enable
                           // Bit[0]: AEC enable

pub const COM10: u8 = 0x15; // Bit[1]: VSYNC negative

pub const HSTART: u8 = 0x17; // HREF start high 8 bits
pub const HSTOP: u8 = 0x18; // HREF stop high 8 bits
pub const VSTART: u8 = 0x19; // VSYNC start high 8 bits
pub const VSTOP: u8 = 0x1A; // VSYNC stop high 8 bits

pub const MVFP: u8 = 0x1E; // Bit[5]: Mirror
                           // Bit[4]: VFlip

pub const HREF: u8 = 0x32; // Bit[7:6]: HREF edge offset
                           // Bit[5:3]: HSTOP low 3 bits
                           // Bit[2:0]: HSTART low 3 bits

pub const TSLB: u8 = 0x3A; // Bit[0]: Auto output window (resize) enable

pub const COM11: u8 = 0x3B; // Bit[4]: 50/60Hz auto detection
                            // Bit[1]: Exposure timing can be less than banding

pub const COM14: u8 = 0x3E; // Bit[4]: DCW and scaling PCLK enable
                            // Bit[3]: Manual scaling enable
                            // Bit[2:0]: PCLK divider (/1 .. /16)

pub const COM15: u8 = 0x40; // Bit[7:6]: Output range
                            // Bit[5:4]: RGB 555/565 option

pub const COM17: u8 = 0x42; // Bit[3]: DSP color bar enable

// Color matrix
pub const MTX1: u8 = 0x4F;
pub const MTX2: u8 = 0x50;
pub const MTX3: u8 = 0x51;
pub const MTX4: u8 = 0x52;
pub const MTX5: u8 = 0x53;
pub const MTX6: u8 = 0x54;
pub const MTXS: u8 = 0x58; // Matrix coefficient signs

pub const AWBCTR0: u8 = 0x6F; // AWB control / threshold

pub const SCALING_XSC: u8 = 0x70;
pub const SCALING_YSC: u8 = 0x71;
pub const SCALING_DCWCTR: u8 = 0x72; // Bit[5:4]: vertical, Bit[1:0]: horizontal downsample
pub const SCALING_PCLK_DIV: u8 = 0x73;
pub const SCALING_PCLK_DELAY: u8 = 0xA2;

pub const COLOR_CAL: u8 = 0xB0; // Undocumented, needed for correct color

// COM7
pub const COM7_RESET: u8 = 0x80;
pub const COM7_FMT_RGB: u8 = 0x04;
pub const COM7_FMT_YUV: u8 = 0x00;
pub const COM7_RES_VGA: u8 = 0x00;
pub const COM7_RES_CIF: u8 = 0x20;
pub const COM7_RES_QVGA: u8 = 0x10;
pub const COM7_RES_QCIF: u8 = 0x08;

pub const COM7_FMT: Field = Field { mask: 0x05, shift: 0 };
pub const COM7_RES: Field = Field::new(3, 3);
pub const COM7_CBAR: Field = Field::bit(1);

// COM8
pub const COM8_AEC: Field = Field::bit(0);
pub const COM8_AWB: Field = Field::bit(1);
pub const COM8_AGC: Field = Field::bit(2);

// MVFP
pub const MVFP_FLIP: Field = Field::bit(4);
pub const MVFP_MIRROR: Field = Field::bit(5);

// COM15
pub const COM15_FMT_RGB565: u8 = 0x10;
pub const COM15_FMT_YUV: u8 = 0x00;
pub const COM15_FMT: Field = Field::new(4, 2);

// COM17
pub const COM17_DSP_CBAR: Field = Field::bit(3);

// COM3
pub const COM3_DCW: Field = Field::bit(2);

// COM14
pub const COM14_PCLK_DIV: Field = Field::new(0, 3);
pub const COM14_MANUAL_SCALE: Field = Field::bit(3);
pub const COM14_DCW_PCLK: Field = Field::bit(4);
pub const COM14_PCLK_DIV_4: u8 = 0x02;

// TSLB
pub const TSLB_RESIZE: Field = Field::bit(0);

// Window low bits
pub const HREF_START_LO: Field = Field::new(0, 3);
pub const HREF_STOP_LO: Field = Field::new(3, 3);
pub const VREF_START_LO: Field = Field::new(0, 2);
pub const VREF_STOP_LO: Field = Field::new(2, 2);

// Post-reset defaults
pub const COM11_HZAUTO: u8 = 0x10;
pub const COM11_EXP: u8 = 0x02;
pub const COM10_VS_NEG: u8 = 0x02;
pub const COM8_FAST_AUTO: u8 = 0xE7; // Fast AEC, unlimited step, banding filter, AGC, AWB, AEC
pub const COLOR_CAL_VALUE: u8 = 0x84;
pub const AWBCTR0_THRESHOLD: u8 = 0x9F;

// Manual scaling calibration
pub const XSC_QQVGA: u8 = 0x3A;
pub const YSC_QQVGA: u8 = 0x35;
pub const DCWCTR_QQVGA: u8 = 0x22; // 1/4 horizontal, 1/4 vertical
pub const PCLK_DIV_QQVGA: u8 = 0xF2;
pub const PCLK_DELAY_QQVGA: u8 = 0x02;
pub const MTXS_DEFAULT: u8 = 0x9E;

#[inline]
pub const fn com7_set_fmt(reg: u8, fmt: u8) -> u8 {
    COM7_FMT.apply_raw(reg, fmt)
}

#[inline]
pub const fn com7_set_res(reg: u8, res: u8) -> u8 {
    COM7_RES.apply_raw(reg, res)
}

#[inline]
pub const fn com7_set_cbar(reg: u8, enable: bool) -> u8 {
    COM7_CBAR.apply(reg, enable as u8)
}

#[inline]
pub const fn com8_set_awb(reg: u8, enable: bool) -> u8 {
    COM8_AWB.apply(reg, enable as u8)
}

#[inline]
pub const fn com8_set_agc(reg: u8, enable: bool) -> u8 {
    COM8_AGC.apply(reg, enable as u8)
}

#[inline]
pub const fn com8_set_aec(reg: u8, enable: bool) -> u8 {
    COM8_AEC.apply(reg, enable as u8)
}

#[inline]
pub const fn mvfp_set_mirror(reg: u8, enable: bool) -> u8 {
    MVFP_MIRROR.apply(reg, enable as u8)
}

#[inline]
pub const fn mvfp_set_flip(reg: u8, enable: bool) -> u8 {
    MVFP_FLIP.apply(reg, enable as u8)
}

#[inline]
pub const fn com15_set_fmt(reg: u8, fmt: u8) -> u8 {
    COM15_FMT.apply_raw(reg, fmt)
}

#[inline]
pub const fn com17_set_dsp_cbar(reg: u8, enable: bool) -> u8 {
    COM17_DSP_CBAR.apply(reg, enable as u8)
}

#[inline]
pub const fn com3_set_dcw(reg: u8, enable: bool) -> u8 {
    COM3_DCW.apply(reg, enable as u8)
}

#[inline]
pub const fn com14_set_manual_scale(reg: u8, enable: bool) -> u8 {
    COM14_MANUAL_SCALE.apply(reg, enable as u8)
}

#[inline]
pub const fn com14_set_dcw_pclk(reg: u8, enable: bool) -> u8 {
    COM14_DCW_PCLK.apply(reg, enable as u8)
}

#[inline]
pub const fn com14_set_pclk_div(reg: u8, div: u8) -> u8 {
    COM14_PCLK_DIV.apply(reg, div)
}

#[inline]
pub const fn tslb_set_resize(reg: u8, enable: bool) -> u8 {
    TSLB_RESIZE.apply(reg, enable as u8)
}

/// Pack the low bits of a horizontal window into HREF, keeping the edge offset.
#[inline]
pub const fn href_set_window(reg: u8, h_start: u16, h_stop: u16) -> u8 {
    let reg = HREF_START_LO.apply(reg, (h_start & 0x07) as u8);
    HREF_STOP_LO.apply(reg, (h_stop & 0x07) as u8)
}

/// Pack the low bits of a vertical window into VREF.
#[inline]
pub const fn vref_set_window(reg: u8, v_start: u16, v_stop: u16) -> u8 {
    let reg = VREF_START_LO.apply(reg, (v_start & 0x03) as u8);
    VREF_STOP_LO.apply(reg, (v_stop & 0x03) as u8)
}

/// Color matrix coefficients MTX1..MTX6 for a saturation level. Level 0 is
/// neutral. Out of range levels wrap when truncated to a register byte.
pub const fn saturation_matrix(level: i32) -> [u8; 6] {
    [
        0x80i32.wrapping_add(0x20i32.wrapping_mul(level)) as u8,
        0x80i32.wrapping_add(0x20i32.wrapping_mul(level)) as u8,
        0x00,
        0x22i32.wrapping_add(0x11i32.wrapping_mul(level) / 2) as u8,
        0x5Ei32.wrapping_add(0x2Fi32.wrapping_mul(level) / 2) as u8,
        0x80i32.wrapping_add(0x20i32.wrapping_mul(level)) as u8,
    ]
}
