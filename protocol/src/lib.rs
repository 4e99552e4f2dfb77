//! Wire-level contract between the host and the tester firmware
//!
//! Everything in this crate mirrors what the fixture firmware expects on the
//! serial line: the byte values of ZIF drive modes, test kinds and response
//! codes, and the sizing rules for bit-packed pin fields. The types here are
//! deliberately free of any host-side policy, so they can be shared with a
//! firmware build.

#![no_std]


/// Serial line speed used by the fixture. Fixed on the firmware side.
pub const BAUD_RATE: u32 = 500_000;

/// The fixture can hold at most this many alternate ZIF configurations
/// for one DUT.
pub const MAX_CONFIGS: usize = 4;

/// Upper bound for the test loop count (2-byte field, zero is invalid).
pub const MAX_LOOPS: u32 = 65_535;

/// Granularity of the additional output read delay, in microseconds.
pub const READ_DELAY_STEP_US: f64 = 0.2;

/// Largest representable additional read delay, in microseconds
/// (65535 steps of 0.2 µs).
pub const MAX_READ_DELAY_US: f64 = 13_107.0;


/// Physical function a ZIF socket pin can perform
///
/// The discriminants are the byte values the firmware expects in the DUT
/// pin configuration table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DriveMode {
    /// Actively drive the DUT pin high or low (stimulus for DUT inputs)
    DriveHighLow = 1,
    /// Sense the DUT pin without any pull-up
    SenseHiZ = 2,
    /// Sense the DUT pin with a strong pull-up
    SensePullupStrong = 3,
    /// Sense the DUT pin with a weak pull-up
    SensePullupWeak = 4,
    /// Sink current from the DUT pin
    SinkCurrent = 5,
    /// Dedicated clock generator output
    ClockGenerator = 6,
    /// Source current into the DUT pin
    DriveSource = 7,
    /// Connect the pin to the supply rail
    SupplyHigh = 128,
    /// Connect the pin to ground
    SupplyGround = 129,
}

impl DriveMode {
    /// The byte value sent over the wire
    pub fn to_wire(self) -> u8 {
        self as u8
    }

    /// Decode a wire byte back into a drive mode
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::DriveHighLow),
            2 => Some(Self::SenseHiZ),
            3 => Some(Self::SensePullupStrong),
            4 => Some(Self::SensePullupWeak),
            5 => Some(Self::SinkCurrent),
            6 => Some(Self::ClockGenerator),
            7 => Some(Self::DriveSource),
            128 => Some(Self::SupplyHigh),
            129 => Some(Self::SupplyGround),
            _ => None,
        }
    }
}


/// Test kind byte, selecting the firmware-side test engine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum TestKind {
    Logic = 1,
    Dram = 2,
    Univib = 3,
}

impl TestKind {
    pub fn to_wire(self) -> u8 {
        self as u8
    }
}


/// DUT package kind byte
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PackageKind {
    Dip = 1,
}

impl PackageKind {
    pub fn to_wire(self) -> u8 {
        self as u8
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Dip),
            _ => None,
        }
    }
}


/// First byte of every response record sent by the fixture
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ResponseCode {
    /// Command accepted (used for non-test commands)
    Ok = 0,
    /// Fixture-side fault, e.g. overcurrent
    Err = 1,
    /// All vectors matched in every loop
    Pass = 2,
    /// At least one vector mismatched; failure details follow
    Fail = 3,
    /// Outputs settled outside the configured read-delay window
    TimingFail = 4,
}

impl ResponseCode {
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::Err),
            2 => Some(Self::Pass),
            3 => Some(Self::Fail),
            4 => Some(Self::TimingFail),
            _ => None,
        }
    }
}


/// Number of bytes in a bit-packed per-pin field (vectors, presence bitmaps,
/// pin level snapshots) for a package with `pin_count` pins
pub fn pin_field_len(pin_count: u8) -> usize {
    (pin_count as usize + 7) / 8
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_mode_wire_values_match_firmware() {
        assert_eq!(DriveMode::DriveHighLow.to_wire(), 1);
        assert_eq!(DriveMode::DriveSource.to_wire(), 7);
        assert_eq!(DriveMode::SupplyHigh.to_wire(), 128);
        assert_eq!(DriveMode::SupplyGround.to_wire(), 129);
    }

    #[test]
    fn drive_mode_round_trips_through_wire_byte() {
        for value in 0..=255u8 {
            if let Some(mode) = DriveMode::from_wire(value) {
                assert_eq!(mode.to_wire(), value);
            }
        }
    }

    #[test]
    fn pin_field_len_rounds_up_to_whole_bytes() {
        assert_eq!(pin_field_len(8), 1);
        assert_eq!(pin_field_len(14), 2);
        assert_eq!(pin_field_len(16), 2);
        assert_eq!(pin_field_len(24), 3);
    }
}
