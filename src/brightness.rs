//! Conversions between the display's brightness register, percentages and
//! the HID feature report payloads that carry it.

/// Lowest register value the display accepts.
pub const MIN_BRIGHTNESS: u16 = 0x0000;
/// Highest register value the display accepts.
pub const MAX_BRIGHTNESS: u16 = 0xd2f0;

/// Length of the buffer requested with GET_REPORT.
pub const READ_REPORT_LEN: usize = 8;
/// Length of the buffer sent with SET_REPORT.
pub const WRITE_REPORT_LEN: usize = 6;

// Equal to MAX_BRIGHTNESS; kept separate since the percentage scale is
// defined against this literal.
const PERCENT_SCALE: f64 = 54000.0;

/// Extract the little-endian register value from a feature report.
///
/// Values above [`MAX_BRIGHTNESS`] are passed through unchanged.
pub fn decode(payload: &[u8; READ_REPORT_LEN]) -> u16 {
    u16::from_le_bytes([payload[0], payload[1]])
}

/// Build the SET_REPORT payload for a register value.
pub fn encode(value: u16) -> [u8; WRITE_REPORT_LEN] {
    let [lo, hi] = value.to_le_bytes();
    [lo, hi, 0, 0, 0, 0]
}

/// Clamp a register value into the range the display accepts.
pub fn clamp(value: u16) -> u16 {
    value.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS)
}

/// Truncating percentage of a register value.
///
/// The division happens in single precision before scaling, so a handful of
/// exact multiples of 540 display one percent lower than expected.
pub fn to_percent(value: u16) -> u8 {
    let ratio = f32::from(value) / PERCENT_SCALE as f32;
    (f64::from(ratio) * 100.0) as u8
}

/// Register value for a percentage, truncating toward zero.
///
/// Percentages above 100 are clamped; negative ones saturate at
/// [`MIN_BRIGHTNESS`].
pub fn from_percent(percent: i64) -> u16 {
    let percent = percent.min(100);
    let raw = percent as f64 / 100.0 * PERCENT_SCALE;
    clamp(raw as u16)
}
