/// Discrete brightness positions for fine adjustment.
pub const FINE_STEPS: [u16; 66] = [
    0x0000, //
    0x0190, 0x01af, 0x01d2, 0x01f7, //
    0x021f, 0x024a, 0x0279, 0x02ac, //
    0x02e2, 0x031d, 0x035c, 0x03a1, //
    0x03eb, 0x043b, 0x0491, 0x04ee, //
    0x0553, 0x05c0, 0x0635, 0x06b3, //
    0x073c, 0x07d0, 0x086f, 0x091b, //
    0x09d5, 0x0a9d, 0x0b76, 0x0c60, //
    0x0d5c, 0x0e6c, 0x0f93, 0x10d0, //
    0x1227, 0x1399, 0x1529, 0x16d9, //
    0x18aa, 0x1aa2, 0x1cc1, 0x1f0b, //
    0x2184, 0x2430, 0x2712, 0x2a2e, //
    0x2d8b, 0x312b, 0x3516, 0x3951, //
    0x3de2, 0x42cf, 0x4822, 0x4de1, //
    0x5415, 0x5ac8, 0x6203, 0x69d2, //
    0x7240, 0x7b5a, 0x852d, 0x8fc9, //
    0x9b3d, 0xa79b, 0xb4f5, 0xc35f, //
    0xd2f0,
];

/// Discrete brightness positions for coarse adjustment.
pub const COARSE_STEPS: [u16; 18] = [
    0x0000, //
    0x0190, 0x021f, 0x02e2, 0x03eb, //
    0x0553, 0x073c, 0x09d5, 0x0d5c, //
    0x1227, 0x18aa, 0x2184, 0x2d8b, //
    0x3de2, 0x5415, 0x7240, 0x9b3d, //
    0xd2f0,
];

/// Step granularity selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSize {
    Coarse,
    Fine,
}

impl StepSize {
    pub fn table(self) -> &'static [u16] {
        match self {
            StepSize::Coarse => &COARSE_STEPS,
            StepSize::Fine => &FINE_STEPS,
        }
    }
}

/// Smallest entry of `steps` strictly greater than `value`.
///
/// Saturates at the last entry when `value` is already at or beyond it.
/// `steps` must be sorted ascending and hold at least two entries.
pub fn next_step(value: u16, steps: &[u16]) -> u16 {
    let mut start = 0;
    let mut end = steps.len() - 1;
    while start + 1 < end {
        let mid = start + (end - start) / 2;
        if steps[mid] > value {
            end = mid;
        } else {
            start = mid;
        }
    }
    steps[end]
}

/// Largest entry of `steps` strictly less than `value`.
///
/// Saturates at the first entry when nothing lies below `value`. A `value`
/// beyond the last entry lands on the second to last one, never the last.
/// `steps` must be sorted ascending and hold at least two entries.
pub fn prev_step(value: u16, steps: &[u16]) -> u16 {
    let mut start = 0;
    let mut end = steps.len() - 1;
    while start + 1 < end {
        let mid = start + (end - start) / 2;
        if steps[mid] >= value {
            end = mid;
        } else {
            start = mid;
        }
    }
    steps[start]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness::{MAX_BRIGHTNESS, MIN_BRIGHTNESS};

    const TABLES: [&[u16]; 2] = [&COARSE_STEPS, &FINE_STEPS];

    #[test]
    fn tables_span_device_range_strictly_increasing() {
        for table in TABLES {
            assert_eq!(table.first(), Some(&MIN_BRIGHTNESS));
            assert_eq!(table.last(), Some(&MAX_BRIGHTNESS));
            assert!(table.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn coarse_steps_are_a_subset_of_fine_steps() {
        for step in COARSE_STEPS {
            assert!(FINE_STEPS.contains(&step), "0x{step:04x} missing");
        }
    }

    #[test]
    fn interior_entries_step_to_their_neighbours() {
        for table in TABLES {
            for i in 1..table.len() - 1 {
                assert_eq!(next_step(table[i], table), table[i + 1]);
                assert_eq!(prev_step(table[i], table), table[i - 1]);
            }
        }
    }

    #[test]
    fn values_between_entries_snap_to_bracketing_entries() {
        for table in TABLES {
            for pair in table.windows(2) {
                let (lo, hi) = (pair[0], pair[1]);
                if hi - lo < 2 {
                    continue;
                }
                for v in [lo + 1, lo + (hi - lo) / 2, hi - 1] {
                    assert_eq!(next_step(v, table), hi, "next of 0x{v:04x}");
                    assert_eq!(prev_step(v, table), lo, "prev of 0x{v:04x}");
                }
            }
        }
    }

    #[test]
    fn saturates_at_table_ends() {
        for table in TABLES {
            assert_eq!(next_step(MAX_BRIGHTNESS, table), MAX_BRIGHTNESS);
            assert_eq!(prev_step(MIN_BRIGHTNESS, table), MIN_BRIGHTNESS);
            assert_eq!(next_step(u16::MAX, table), MAX_BRIGHTNESS);
        }
    }

    #[test]
    fn out_of_range_value_steps_below_maximum() {
        assert_eq!(prev_step(u16::MAX, &COARSE_STEPS), 0x9b3d);
        assert_eq!(prev_step(MAX_BRIGHTNESS + 1, &FINE_STEPS), 0xc35f);
    }

    #[test]
    fn first_step_up_from_minimum() {
        assert_eq!(next_step(MIN_BRIGHTNESS, &COARSE_STEPS), 0x0190);
        assert_eq!(next_step(MIN_BRIGHTNESS, &FINE_STEPS), 0x0190);
    }

    #[test]
    fn step_size_selects_table() {
        assert_eq!(StepSize::Coarse.table().len(), 18);
        assert_eq!(StepSize::Fine.table().len(), 66);
    }

    #[test]
    fn fine_steps_hold_the_display_levels() {
        assert_eq!(FINE_STEPS[1], 0x0190);
        assert_eq!(FINE_STEPS[20], 0x06b3);
        assert_eq!(FINE_STEPS[41], 0x2184);
        assert_eq!(FINE_STEPS[42], 0x2430);
        assert_eq!(FINE_STEPS[43], 0x2712);
        assert_eq!(FINE_STEPS[64], 0xc35f);
        assert_eq!(FINE_STEPS[65], MAX_BRIGHTNESS);
        assert_eq!(COARSE_STEPS[11], 0x2184);
        assert_eq!(COARSE_STEPS[16], 0x9b3d);
    }
}
