use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Direction of a feature report transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOp {
    Read,
    Write,
}

impl fmt::Display for TransferOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOp::Read => f.write_str("get brightness"),
            TransferOp::Write => f.write_str("set brightness"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unable to initialize libusb: {0}")]
    UsbInit(#[source] rusb::Error),

    #[error("unable to get USB device list: {0}")]
    DeviceList(#[source] rusb::Error),

    #[error("no display with ID {vendor_id:04x}:{product_id:04x} found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("failed to open display: {0}")]
    DeviceOpen(#[source] rusb::Error),

    #[error("failed to claim interface {interface}: {source}")]
    InterfaceClaim {
        interface: u8,
        #[source]
        source: rusb::Error,
    },

    #[error("unable to {op}: {source}")]
    ControlTransfer {
        op: TransferOp,
        #[source]
        source: rusb::Error,
    },

    #[error("invalid brightness \"{0}\": expected an integer percentage")]
    InvalidArgument(String),

    #[error("expected at most one brightness argument")]
    Usage,

    #[error("failed to load config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl AppError {
    /// Numeric libusb error code behind a USB failure, if any.
    pub fn usb_code(&self) -> Option<i32> {
        match self {
            AppError::UsbInit(err)
            | AppError::DeviceList(err)
            | AppError::DeviceOpen(err)
            | AppError::InterfaceClaim { source: err, .. }
            | AppError::ControlTransfer { source: err, .. } => Some(libusb_code(*err)),
            _ => None,
        }
    }

    /// One-line user-facing report, with the libusb code when there is one.
    pub fn describe(&self) -> String {
        match self.usb_code() {
            Some(code) => format!("{self} ({code})"),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// rusb does not expose the raw libusb code, so map the variants back to
// LIBUSB_ERROR_*. BadDescriptor and Other have no libusb counterpart and
// report LIBUSB_ERROR_OTHER.
fn libusb_code(err: rusb::Error) -> i32 {
    match err {
        rusb::Error::Io => -1,
        rusb::Error::InvalidParam => -2,
        rusb::Error::Access => -3,
        rusb::Error::NoDevice => -4,
        rusb::Error::NotFound => -5,
        rusb::Error::Busy => -6,
        rusb::Error::Timeout => -7,
        rusb::Error::Overflow => -8,
        rusb::Error::Pipe => -9,
        rusb::Error::Interrupted => -10,
        rusb::Error::NoMem => -11,
        rusb::Error::NotSupported => -12,
        _ => -99,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_error_reports_operation_and_code() {
        let err = AppError::ControlTransfer {
            op: TransferOp::Write,
            source: rusb::Error::Pipe,
        };
        assert!(err.to_string().starts_with("unable to set brightness"));
        assert_eq!(err.usb_code(), Some(-9));
        assert!(err.describe().ends_with("(-9)"));
    }

    #[test]
    fn unmapped_usb_errors_report_other() {
        let err = AppError::DeviceOpen(rusb::Error::Other);
        assert_eq!(err.usb_code(), Some(-99));
        let err = AppError::DeviceOpen(rusb::Error::NoDevice);
        assert_eq!(err.usb_code(), Some(-4));
    }

    #[test]
    fn non_usb_errors_have_no_code() {
        assert_eq!(AppError::Usage.usb_code(), None);
        assert_eq!(AppError::InvalidArgument("x".into()).usb_code(), None);
    }

    #[test]
    fn not_found_names_ids_in_hex() {
        let err = AppError::DeviceNotFound {
            vendor_id: 0x043e,
            product_id: 0x9a40,
        };
        assert_eq!(err.to_string(), "no display with ID 043e:9a40 found");
    }
}
