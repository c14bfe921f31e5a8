#[cfg(test)]
mod fake;
mod ultrafine;

#[cfg(test)]
pub use fake::FakeDisplay;
pub use ultrafine::UltraFineDisplay;

use crate::{
    brightness::{self, READ_REPORT_LEN, WRITE_REPORT_LEN},
    error::Result,
};

/// Access to the HID feature report that carries the brightness register.
pub trait FeatureReportChannel {
    fn get_feature_report(&mut self) -> Result<[u8; READ_REPORT_LEN]>;

    fn set_feature_report(&mut self, payload: &[u8; WRITE_REPORT_LEN]) -> Result<()>;
}

impl<T> FeatureReportChannel for &mut T
where
    T: FeatureReportChannel + ?Sized,
{
    fn get_feature_report(&mut self) -> Result<[u8; READ_REPORT_LEN]> {
        (**self).get_feature_report()
    }

    fn set_feature_report(&mut self, payload: &[u8; WRITE_REPORT_LEN]) -> Result<()> {
        (**self).set_feature_report(payload)
    }
}

/// Read the current brightness register.
pub fn read_brightness<C>(channel: &mut C) -> Result<u16>
where
    C: FeatureReportChannel + ?Sized,
{
    let report = channel.get_feature_report()?;
    Ok(brightness::decode(&report))
}

/// Write a brightness register value, clamped to the device range.
pub fn write_brightness<C>(channel: &mut C, value: u16) -> Result<()>
where
    C: FeatureReportChannel + ?Sized,
{
    channel.set_feature_report(&brightness::encode(brightness::clamp(value)))
}
