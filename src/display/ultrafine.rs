use std::time::Duration;

use rusb::{Context, DeviceHandle, Direction, Recipient, RequestType, UsbContext};
use tracing::{debug, trace, warn};

use super::FeatureReportChannel;
use crate::{
    brightness::{READ_REPORT_LEN, WRITE_REPORT_LEN},
    config::DeviceConfig,
    error::{AppError, Result, TransferOp},
};

// HID class requests and report types.
const HID_GET_REPORT: u8 = 0x01;
const HID_SET_REPORT: u8 = 0x09;
const HID_REPORT_TYPE_FEATURE: u16 = 0x03;

const BRIGHTNESS_REPORT_ID: u16 = 0x00;

/// An opened LG UltraFine display with its HID interface claimed.
///
/// The interface is released, and a kernel driver detached by us is
/// reattached, when the value is dropped.
pub struct UltraFineDisplay {
    _context: Context,
    handle: DeviceHandle<Context>,
    interface: u8,
    timeout: Duration,
    claimed: bool,
    reattach_driver: bool,
}

impl UltraFineDisplay {
    /// Open the last display on the bus matching the configured IDs.
    pub fn connect(config: &DeviceConfig) -> Result<Self> {
        let context = Context::new().map_err(AppError::UsbInit)?;
        let mut found = None;

        for device in context.devices().map_err(AppError::DeviceList)?.iter() {
            let desc = device.device_descriptor().map_err(AppError::DeviceList)?;
            if desc.vendor_id() == config.vendor_id && desc.product_id() == config.product_id {
                debug!(
                    bus = device.bus_number(),
                    address = device.address(),
                    "found display"
                );
                found = Some(device);
            }
        }

        let device = found.ok_or(AppError::DeviceNotFound {
            vendor_id: config.vendor_id,
            product_id: config.product_id,
        })?;
        let handle = device.open().map_err(AppError::DeviceOpen)?;

        let mut display = Self {
            _context: context,
            handle,
            interface: config.interface,
            timeout: config.timeout(),
            claimed: false,
            reattach_driver: false,
        };
        display.claim()?;
        Ok(display)
    }

    fn claim(&mut self) -> Result<()> {
        let interface = self.interface;
        let claim_error = |source: rusb::Error| AppError::InterfaceClaim { interface, source };

        match self.handle.set_auto_detach_kernel_driver(true) {
            Ok(()) => {}
            Err(rusb::Error::NotSupported) => {
                if self.handle.kernel_driver_active(interface).unwrap_or(false) {
                    self.handle
                        .detach_kernel_driver(interface)
                        .map_err(claim_error)?;
                    self.reattach_driver = true;
                    debug!(interface, "detached kernel driver");
                }
            }
            Err(err) => warn!(%err, "could not enable kernel driver auto-detach"),
        }

        self.handle.claim_interface(interface).map_err(claim_error)?;
        self.claimed = true;
        debug!(interface, "claimed interface");
        Ok(())
    }
}

impl FeatureReportChannel for UltraFineDisplay {
    fn get_feature_report(&mut self) -> Result<[u8; READ_REPORT_LEN]> {
        let mut data = [0u8; READ_REPORT_LEN];
        let len = self
            .handle
            .read_control(
                rusb::request_type(Direction::In, RequestType::Class, Recipient::Interface),
                HID_GET_REPORT,
                (HID_REPORT_TYPE_FEATURE << 8) | BRIGHTNESS_REPORT_ID,
                u16::from(self.interface),
                &mut data,
                self.timeout,
            )
            .map_err(|source| AppError::ControlTransfer {
                op: TransferOp::Read,
                source,
            })?;
        trace!(len, ?data, "GET_REPORT");
        Ok(data)
    }

    fn set_feature_report(&mut self, payload: &[u8; WRITE_REPORT_LEN]) -> Result<()> {
        trace!(?payload, "SET_REPORT");
        self.handle
            .write_control(
                rusb::request_type(Direction::Out, RequestType::Class, Recipient::Interface),
                HID_SET_REPORT,
                (HID_REPORT_TYPE_FEATURE << 8) | BRIGHTNESS_REPORT_ID,
                u16::from(self.interface),
                payload,
                self.timeout,
            )
            .map(|_| ())
            .map_err(|source| AppError::ControlTransfer {
                op: TransferOp::Write,
                source,
            })
    }
}

impl Drop for UltraFineDisplay {
    fn drop(&mut self) {
        if self.claimed {
            if let Err(err) = self.handle.release_interface(self.interface) {
                warn!(%err, interface = self.interface, "failed to release interface");
            }
        }
        if self.reattach_driver {
            if let Err(err) = self.handle.attach_kernel_driver(self.interface) {
                warn!(%err, interface = self.interface, "failed to reattach kernel driver");
            }
        }
        debug!("closed display");
    }
}
