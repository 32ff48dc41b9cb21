//! Simulated OV7670 register file and delay recorder for driver tests.
#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

pub const ADDR: u8 = 0x21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u8),
    Write(u8, u8),
}

/// 256 byte register file behind an I2C bus at `address`. Writes to registers listed in
/// `fail_writes` (and reads of `fail_reads`) return a bus error and leave
/// the register untouched.
pub struct FakeSensor {
    pub address: u8,
    pub regs: [u8; 256],
    pub log: Vec<Access>,
    pub fail_writes: Vec<u8>,
    pub fail_reads: Vec<u8>,
    pointer: u8,
}

impl FakeSensor {
    pub fn new() -> Self {
        let mut regs = [0u8; 256];
        regs[0x1C] = 0x7F;
        regs[0x1D] = 0xA2;
        regs[0x0A] = 0x76;
        regs[0x0B] = 0x73;
        Self {
            address: ADDR,
            regs,
            log: Vec::new(),
            fail_writes: Vec::new(),
            fail_reads: Vec::new(),
            pointer: 0,
        }
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|access| match *access {
                Access::Write(reg, val) => Some((reg, val)),
                Access::Read(_) => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl ErrorType for FakeSensor {
    type Error = ErrorKind;
}

impl I2c for FakeSensor {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => match **bytes {
                    [reg] => self.pointer = reg,
                    [reg, val] => {
                        if self.fail_writes.contains(&reg) {
                            return Err(ErrorKind::Other);
                        }
                        self.regs[reg as usize] = val;
                        self.log.push(Access::Write(reg, val));
                    }
                    _ => panic!("unexpected write of {} bytes", bytes.len()),
                },
                Operation::Read(buf) => {
                    let reg = self.pointer;
                    if self.fail_reads.contains(&reg) {
                        return Err(ErrorKind::Other);
                    }
                    buf[0] = self.regs[reg as usize];
                    self.log.push(Access::Read(reg));
                }
            }
        }
        Ok(())
    }
}

/// Records every millisecond delay requested.
#[derive(Default)]
pub struct RecordingDelay {
    pub ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}
