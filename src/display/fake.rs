use crate::{
    brightness::{READ_REPORT_LEN, WRITE_REPORT_LEN},
    error::{AppError, Result, TransferOp},
};

use super::FeatureReportChannel;

/// In-memory display that records every SET_REPORT payload.
#[derive(Debug, Default)]
pub struct FakeDisplay {
    pub register: u16,
    pub fail_reads: bool,
    /// Number of upcoming writes that fail before writes succeed again.
    pub failing_writes: usize,
    pub reads: usize,
    pub writes: Vec<[u8; WRITE_REPORT_LEN]>,
}

impl FakeDisplay {
    pub fn new(register: u16) -> Self {
        Self {
            register,
            ..Self::default()
        }
    }

    /// Register values of every write attempt, failed ones included.
    pub fn written_values(&self) -> Vec<u16> {
        self.writes
            .iter()
            .map(|payload| u16::from_le_bytes([payload[0], payload[1]]))
            .collect()
    }
}

impl FeatureReportChannel for FakeDisplay {
    fn get_feature_report(&mut self) -> Result<[u8; READ_REPORT_LEN]> {
        self.reads += 1;
        if self.fail_reads {
            return Err(AppError::ControlTransfer {
                op: TransferOp::Read,
                source: rusb::Error::Io,
            });
        }
        let [lo, hi] = self.register.to_le_bytes();
        Ok([lo, hi, 0, 0, 0, 0, 0, 0])
    }

    fn set_feature_report(&mut self, payload: &[u8; WRITE_REPORT_LEN]) -> Result<()> {
        self.writes.push(*payload);
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(AppError::ControlTransfer {
                op: TransferOp::Write,
                source: rusb::Error::Pipe,
            });
        }
        self.register = u16::from_le_bytes([payload[0], payload[1]]);
        Ok(())
    }
}
