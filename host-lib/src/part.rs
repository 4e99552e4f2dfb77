//! DUT package and part descriptors
//!
//! A [`Part`] is a package shape plus a complete map of socket positions to
//! [`Pin`]s. The package supplies the supply-rail positions, the device
//! definition supplies everything else. Parts encode into the fixture's
//! per-pin-per-configuration drive mode table.


use std::{
    collections::BTreeMap,
    fmt,
};

use log::debug;

use protocol::{
    DriveMode,
    PackageKind,
    MAX_CONFIGS,
};

use crate::pin::{
    Pin,
    PinRole,
};


/// A package shape: pin count plus the positions tied to the supply rails
///
/// Parts are built by composition: a package base plus a device pin map,
/// merged at construction. The device map may override package positions,
/// which is how rotated or split-rail variants are expressed.
#[derive(Clone, Debug)]
pub struct Package {
    kind: PackageKind,
    pin_count: u8,
    supply_pins: Vec<(u8, Pin)>,
}

impl Package {
    /// A DIP package with explicit supply positions
    pub fn dip(pin_count: u8, vcc: u8, gnd: u8) -> Self {
        // Supply pins can't fail validation; their roles always have
        // defaults.
        let supply_pins = vec![
            (vcc, Pin::new("VCC", PinRole::Power).unwrap()),
            (gnd, Pin::new("GND", PinRole::Ground).unwrap()),
        ];

        Self {
            kind: PackageKind::Dip,
            pin_count,
            supply_pins,
        }
    }

    /// DIP14, GND on 7, VCC on 14
    pub fn dip14() -> Self {
        Self::dip(14, 14, 7)
    }

    /// DIP14 with VCC on 5 and GND on 10
    pub fn dip14_vcc5() -> Self {
        Self::dip(14, 5, 10)
    }

    /// DIP14 with VCC on 4 and GND on 11
    pub fn dip14_vcc4() -> Self {
        Self::dip(14, 4, 11)
    }

    /// DIP16, GND on 8, VCC on 16
    pub fn dip16() -> Self {
        Self::dip(16, 16, 8)
    }

    /// DIP16 with the supply rails swapped (VCC on 8, GND on 16)
    pub fn dip16_rotated() -> Self {
        Self::dip(16, 8, 16)
    }

    /// DIP16 with VCC on 5 and GND on 12
    pub fn dip16_vcc5() -> Self {
        Self::dip(16, 5, 12)
    }

    /// DIP16 with VCC on 5 and GND on 13
    pub fn dip16_vcc5_gnd13() -> Self {
        Self::dip(16, 5, 13)
    }

    /// DIP20, GND on 10, VCC on 20
    pub fn dip20() -> Self {
        Self::dip(20, 20, 10)
    }

    /// DIP24, GND on 12, VCC on 24
    pub fn dip24() -> Self {
        Self::dip(24, 24, 12)
    }

    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }
}


/// A DUT: package shape plus a pin for every socket position
#[derive(Clone, Debug)]
pub struct Part {
    kind: PackageKind,
    pin_count: u8,
    pins: BTreeMap<u8, Pin>,
}

impl Part {
    /// Build a part from a package base and a device pin map
    ///
    /// The device map is merged over the package's supply pins; a device
    /// entry at a supply position overrides the package. Every socket
    /// position in `1..=pin_count` must end up mapped; unused positions
    /// must be declared as `NotConnected` explicitly.
    pub fn new(package: Package, device_pins: Vec<(u8, Pin)>)
        -> Result<Self, PartDefinitionError>
    {
        let mut pins = BTreeMap::new();

        for (position, pin) in package.supply_pins {
            pins.insert(position, pin);
        }
        for (position, pin) in device_pins {
            if position < 1 || position > package.pin_count {
                return Err(PartDefinitionError::PositionOutOfRange {
                    position,
                    pin_count: package.pin_count,
                });
            }
            pins.insert(position, pin);
        }

        for position in 1..=package.pin_count {
            if !pins.contains_key(&position) {
                return Err(PartDefinitionError::MissingPin(position));
            }
        }

        Ok(
            Self {
                kind: package.kind,
                pin_count: package.pin_count,
                pins,
            }
        )
    }

    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }

    /// The pin at the given 1-based socket position
    pub fn pin(&self, position: u8) -> Option<&Pin> {
        self.pins.get(&position)
    }

    /// All positions connected to the supply rail
    ///
    /// Split-rail parts can have more than one. These positions double as
    /// the in-band "don't check outputs" sentinel channel in packed vectors.
    pub fn vcc(&self) -> Vec<u8> {
        self.positions_with_role(PinRole::Power)
    }

    /// All positions connected to ground
    pub fn gnd(&self) -> Vec<u8> {
        self.positions_with_role(PinRole::Ground)
    }

    fn positions_with_role(&self, role: PinRole) -> Vec<u8> {
        self.pins.iter()
            .filter(|(_, pin)| pin.role() == role)
            .map(|(&position, _)| position)
            .collect()
    }

    /// Whether a position may carry test stimulus or expectations
    pub fn is_testable_position(&self, position: u8) -> bool {
        self.pins.get(&position)
            .map(|pin| !pin.role().is_supply())
            .unwrap_or(false)
    }

    /// Number of ZIF configurations this part needs
    ///
    /// The maximum drive mode list length over all pins. Pins with shorter
    /// lists repeat their first mode in the remaining configurations.
    pub fn config_count(&self) -> usize {
        self.pins.values()
            .map(|pin| pin.drive_modes().len())
            .max()
            .unwrap_or(0)
    }

    /// Encode the part descriptor for the fixture
    ///
    /// Layout: `[package_kind, pin_count, config_count]`, then for each
    /// configuration one drive mode byte per socket position, iterated in
    /// descending position order.
    pub fn encode(&self) -> Result<Vec<u8>, PartEncodeError> {
        let config_count = self.config_count();
        if config_count == 0 || config_count > MAX_CONFIGS {
            return Err(PartEncodeError::TooManyConfigurations(config_count));
        }

        debug!(
            "encoding part descriptor: {} pins, {} configuration(-s)",
            self.pin_count, config_count,
        );

        let mut data = vec![
            self.kind.to_wire(),
            self.pin_count,
            config_count as u8,
        ];

        for cfgnum in 0..config_count {
            for position in (1..=self.pin_count).rev() {
                // Complete coverage is checked at construction.
                let pin = &self.pins[&position];
                data.push(pin.mode_for_config(cfgnum).to_wire());
            }
        }

        Ok(data)
    }
}


/// Decoded form of a part descriptor, for inspection and tests
///
/// [`PartHeader::decode`] is the inverse of [`Part::encode`]: it recovers
/// the package kind, pin count, configuration count, and the per-config
/// drive mode table.
#[derive(Debug, Eq, PartialEq)]
pub struct PartHeader {
    pub kind: PackageKind,
    pub pin_count: u8,
    pub config_count: u8,
    /// One mode list per configuration, indexed by ascending socket position
    pub modes: Vec<Vec<DriveMode>>,
}

impl PartHeader {
    /// Decode an encoded part descriptor
    pub fn decode(data: &[u8]) -> Result<Self, PartDecodeError> {
        if data.len() < 3 {
            return Err(PartDecodeError::Truncated);
        }

        let kind = PackageKind::from_wire(data[0])
            .ok_or(PartDecodeError::UnknownPackageKind(data[0]))?;
        let pin_count = data[1];
        let config_count = data[2];

        let expected = 3 + pin_count as usize * config_count as usize;
        if data.len() != expected {
            return Err(PartDecodeError::Truncated);
        }

        let mut modes = Vec::with_capacity(config_count as usize);
        let mut offset = 3;
        for _ in 0..config_count {
            let mut config = Vec::with_capacity(pin_count as usize);
            // The wire order is descending; present ascending.
            for i in (0..pin_count as usize).rev() {
                let value = data[offset + i];
                let mode = DriveMode::from_wire(value)
                    .ok_or(PartDecodeError::UnknownDriveMode(value))?;
                config.push(mode);
            }
            offset += pin_count as usize;
            modes.push(config);
        }

        Ok(
            Self {
                kind,
                pin_count,
                config_count,
                modes,
            }
        )
    }
}


/// A part definition that doesn't cover its package
#[derive(Debug)]
pub enum PartDefinitionError {
    /// A socket position in `1..=pin_count` has no pin mapped
    MissingPin(u8),
    /// A device pin placed outside the package
    PositionOutOfRange {
        position: u8,
        pin_count: u8,
    },
}

impl fmt::Display for PartDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingPin(position) => {
                write!(f, "no pin defined for socket position {}", position)
            }
            Self::PositionOutOfRange { position, pin_count } => {
                write!(
                    f,
                    "pin position {} outside of package with {} pins",
                    position, pin_count,
                )
            }
        }
    }
}


/// Error encoding a part descriptor
#[derive(Debug)]
pub enum PartEncodeError {
    /// The part needs more ZIF configurations than the fixture has, or
    /// defines none at all
    TooManyConfigurations(usize),
}

impl fmt::Display for PartEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TooManyConfigurations(count) => {
                write!(
                    f,
                    "part needs {} ZIF configurations, the fixture supports \
                    1 to {}",
                    count, MAX_CONFIGS,
                )
            }
        }
    }
}


/// Error decoding a part descriptor
#[derive(Debug)]
pub enum PartDecodeError {
    Truncated,
    UnknownPackageKind(u8),
    UnknownDriveMode(u8),
}

impl fmt::Display for PartDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Truncated => {
                write!(f, "part descriptor ended early")
            }
            Self::UnknownPackageKind(value) => {
                write!(f, "unknown package kind byte {}", value)
            }
            Self::UnknownDriveMode(value) => {
                write!(f, "unknown drive mode byte {}", value)
            }
        }
    }
}
