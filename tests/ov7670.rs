//! Base revision: register effects, cached state and settle delays.

#![cfg(feature = "ov7670")]

mod common;

use common::{Access, FakeSensor, RecordingDelay};
use sccb_camera::regs::*;
use sccb_camera::{Error, FrameSize, Ov7670, PixFormat, Sensor, SensorConfig};

#[test]
fn preset_sizes_set_documented_resolution_codes() {
    let cases = [
        (FrameSize::Vga, 0x00),
        (FrameSize::Qvga, 0x10),
        (FrameSize::Cif, 0x20),
        (FrameSize::Qcif, 0x08),
    ];
    for (size, code) in cases {
        let mut bus = FakeSensor::new();
        bus.regs[COM7 as usize] = 0x3F;
        let mut delay = RecordingDelay::default();
        let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

        cam.set_frame_size(size).unwrap();
        assert_eq!(cam.frame_size(), size);
        assert_eq!(bus.regs[COM7 as usize] & 0x38, code, "{size:?}");
        assert_eq!(bus.regs[COM7 as usize] & !0x38, 0x07, "{size:?}");
        assert_eq!(delay.ms, [30]);
    }
}

#[test]
fn failed_resolution_write_keeps_cached_size() {
    let mut bus = FakeSensor::new();
    bus.fail_writes.push(COM7);
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    let err = cam.set_frame_size(FrameSize::Qvga).unwrap_err();
    assert!(matches!(err, Error::Bus(_)));
    assert_eq!(cam.frame_size(), FrameSize::Vga);
    // Settle delay happens regardless.
    assert_eq!(delay.ms, [30]);
}

#[test]
fn invalid_frame_size_is_rejected_before_bus_access() {
    let mut bus = FakeSensor::new();
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();
    cam.set_frame_size(FrameSize::Qcif).unwrap();

    assert_eq!(cam.set_frame_size(FrameSize::Qqvga), Err(Error::InvalidArgument));
    assert_eq!(cam.frame_size(), FrameSize::Qcif);
    drop(cam);
    // Probe (4 reads) plus the QCIF read-modify-write.
    assert_eq!(bus.log.len(), 6);
    assert_eq!(delay.ms, [30]);
}

#[test]
fn pixel_format_rejects_unsupported_without_writes() {
    let mut bus = FakeSensor::new();
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    assert_eq!(cam.set_pix_format(PixFormat::Jpeg), Err(Error::InvalidArgument));
    assert_eq!(cam.pix_format(), PixFormat::Yuv422);
    drop(cam);
    assert!(bus.writes().is_empty());
    assert!(delay.ms.is_empty());
}

#[test]
fn grayscale_and_yuv_share_encoding() {
    let mut bus = FakeSensor::new();
    bus.regs[COM7 as usize] = 0x14;
    bus.regs[COM15 as usize] = 0xD0;
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    cam.set_pix_format(PixFormat::Grayscale).unwrap();
    assert_eq!(cam.pix_format(), PixFormat::Grayscale);
    drop(cam);
    assert_eq!(bus.regs[COM7 as usize], 0x10);
    assert_eq!(bus.regs[COM15 as usize], 0xC0);
    // COM7 first, then COM15.
    assert_eq!(bus.writes(), [(COM7, 0x10), (COM15, 0xC0)]);
}

#[test]
fn pixel_format_reads_companion_register() {
    let mut bus = FakeSensor::new();
    bus.regs[COM7 as usize] = 0x00;
    bus.regs[COM15 as usize] = 0xC0;
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    cam.set_pix_format(PixFormat::Rgb565).unwrap();
    drop(cam);
    assert_eq!(
        bus.log[4..],
        [
            Access::Read(COM7),
            Access::Read(COM15),
            Access::Write(COM7, 0x04),
            Access::Write(COM15, 0xD0),
        ]
    );
}

#[test]
fn pixel_format_reports_companion_failure_and_keeps_cache() {
    let mut bus = FakeSensor::new();
    bus.fail_writes.push(COM15);
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    assert!(matches!(cam.set_pix_format(PixFormat::Rgb565), Err(Error::Bus(_))));
    assert_eq!(cam.pix_format(), PixFormat::Yuv422);
    drop(cam);
    // The primary register still took the write.
    assert_eq!(bus.regs[COM7 as usize] & 0x05, 0x04);
    assert_eq!(delay.ms, [30]);
}

#[test]
fn reset_always_waits_both_delays() {
    let mut bus = FakeSensor::new();
    bus.fail_writes.push(COM7);
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    cam.reset().unwrap();
    drop(cam);
    assert_eq!(delay.ms, [10, 30]);
}

#[test]
fn colorbar_toggles_both_paths() {
    let mut bus = FakeSensor::new();
    bus.regs[COM7 as usize] = 0x14;
    bus.regs[COM17 as usize] = 0x40;
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    cam.set_colorbar(true).unwrap();
    drop(cam);
    assert_eq!(bus.regs[COM7 as usize], 0x16);
    assert_eq!(bus.regs[COM17 as usize], 0x48);
    assert!(delay.ms.is_empty());
}

#[test]
fn colorbar_attempts_dsp_path_after_analog_failure() {
    let mut bus = FakeSensor::new();
    bus.fail_writes.push(COM7);
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    assert!(cam.set_colorbar(true).is_err());
    drop(cam);
    assert_eq!(bus.writes(), [(COM17, 0x08)]);
}

#[test]
fn auto_controls_share_com8_without_clobbering() {
    let mut bus = FakeSensor::new();
    bus.regs[COM8 as usize] = 0xE0;
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    cam.set_whitebal(true).unwrap();
    cam.set_gain_ctrl(true).unwrap();
    cam.set_exposure_ctrl(true).unwrap();
    cam.set_gain_ctrl(false).unwrap();
    drop(cam);
    assert_eq!(bus.regs[COM8 as usize], 0xE3);
}

#[test]
fn repeated_setters_converge() {
    let mut bus = FakeSensor::new();
    bus.regs[MVFP as usize] = 0x01;
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    cam.set_hmirror(true).unwrap();
    cam.set_vflip(true).unwrap();
    cam.set_hmirror(true).unwrap();
    cam.set_vflip(true).unwrap();
    drop(cam);
    assert_eq!(bus.regs[MVFP as usize], 0x31);
    let writes = bus.writes();
    assert_eq!(writes[0], (MVFP, 0x21));
    assert_eq!(writes[1..], [(MVFP, 0x31), (MVFP, 0x31), (MVFP, 0x31)]);
}

#[test]
fn failed_read_skips_write() {
    let mut bus = FakeSensor::new();
    bus.fail_reads.push(COM8);
    let mut delay = RecordingDelay::default();
    let mut cam = Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).unwrap();

    assert!(matches!(cam.set_whitebal(true), Err(Error::Bus(_))));
    drop(cam);
    assert!(bus.writes().is_empty());
}

#[test]
fn identity_probe_failure_is_reported() {
    let mut bus = FakeSensor::new();
    bus.fail_reads.push(PID);
    let mut delay = RecordingDelay::default();

    assert!(Ov7670::new(&mut bus, &mut delay, SensorConfig::default()).is_err());
}
