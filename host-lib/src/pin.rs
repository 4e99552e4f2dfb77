//! DUT pin roles and their ZIF drive-mode assignments
//!
//! Every DUT pin has a fixed electrical role, and every role maps to a fixed
//! set of drive modes the ZIF socket hardware may legally take for it. A pin
//! can carry up to four alternate drive modes, one per ZIF configuration;
//! tests select the active configuration in their header.


use std::fmt;

use protocol::{
    DriveMode,
    MAX_CONFIGS,
};


/// Electrical role of a DUT pin
///
/// Fixed for the lifetime of a [`Pin`]. The role determines which ZIF drive
/// modes are allowed and which are assigned when the part definition doesn't
/// pick any explicitly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PinRole {
    /// DUT input, driven by the fixture
    In,
    /// DUT output, sensed by the fixture
    Out,
    /// Input/output, direction switched between configurations
    Bidirectional,
    /// Open-collector output
    OpenCollector,
    /// Three-state output
    Tristate,
    /// Output-enable control sunk by the fixture
    OutputEnable,
    /// Clock input fed from the fixture's clock generator
    Clock,
    /// Pin for an external RC timing network
    Rc,
    /// Supply rail
    Power,
    /// Ground rail
    Ground,
    /// Not connected
    NotConnected,
}

impl PinRole {
    /// Drive modes the ZIF hardware may take for a pin of this role
    ///
    /// Non-empty for every role.
    pub fn allowed_modes(self) -> &'static [DriveMode] {
        use DriveMode::*;

        match self {
            Self::In => &[DriveHighLow],
            Self::Out => &[SensePullupWeak, SensePullupStrong, SenseHiZ],
            Self::Bidirectional => {
                &[DriveHighLow, SensePullupWeak, SensePullupStrong, SenseHiZ]
            }
            Self::OpenCollector => {
                &[SensePullupStrong, SensePullupWeak, SenseHiZ]
            }
            Self::Tristate => &[SensePullupWeak, SenseHiZ, SensePullupStrong],
            Self::OutputEnable => &[SinkCurrent],
            Self::Clock => &[ClockGenerator],
            Self::Rc => &[SensePullupStrong],
            Self::Power => &[SupplyHigh],
            Self::Ground => &[SupplyGround],
            Self::NotConnected => &[SenseHiZ],
        }
    }

    /// Drive modes assigned when the part definition doesn't supply any
    ///
    /// `None` for roles where no sensible default exists. A bidirectional
    /// pin switches direction between configurations, and only the part
    /// definition knows which configuration does what.
    pub fn default_modes(self) -> Option<&'static [DriveMode]> {
        use DriveMode::*;

        match self {
            Self::In => Some(&[DriveHighLow]),
            Self::Out => Some(&[SensePullupWeak]),
            Self::Bidirectional => None,
            Self::OpenCollector => Some(&[SensePullupStrong]),
            Self::Tristate => Some(&[SensePullupWeak]),
            Self::OutputEnable => Some(&[SinkCurrent]),
            Self::Clock => Some(&[ClockGenerator]),
            Self::Rc => Some(&[SensePullupStrong]),
            Self::Power => Some(&[SupplyHigh]),
            Self::Ground => Some(&[SupplyGround]),
            Self::NotConnected => Some(&[SenseHiZ]),
        }
    }

    /// Whether this role is a supply rail (power or ground)
    pub fn is_supply(self) -> bool {
        matches!(self, Self::Power | Self::Ground)
    }
}


/// One DUT pin: a name, a role, and its per-configuration drive modes
#[derive(Clone, Debug)]
pub struct Pin {
    name: String,
    role: PinRole,
    drive_modes: Vec<DriveMode>,
}

impl Pin {
    /// Create a pin using the default drive modes for its role
    ///
    /// Fails for roles without a default (bidirectional pins must be
    /// created with [`Pin::with_modes`]).
    pub fn new(name: &str, role: PinRole)
        -> Result<Self, InvalidPinConfiguration>
    {
        let modes = role.default_modes()
            .ok_or_else(|| {
                InvalidPinConfiguration::NoDefaultModes {
                    pin: name.to_owned(),
                    role,
                }
            })?;

        Self::with_modes(name, role, modes)
    }

    /// Create a pin with an explicit per-configuration drive mode list
    ///
    /// Every mode must be allowed for the role, the list must not be empty,
    /// and it must not exceed the fixture's configuration limit.
    pub fn with_modes(name: &str, role: PinRole, drive_modes: &[DriveMode])
        -> Result<Self, InvalidPinConfiguration>
    {
        if drive_modes.is_empty() {
            return Err(
                InvalidPinConfiguration::NoDefaultModes {
                    pin: name.to_owned(),
                    role,
                }
            );
        }
        if drive_modes.len() > MAX_CONFIGS {
            return Err(
                InvalidPinConfiguration::TooManyModes {
                    pin: name.to_owned(),
                    count: drive_modes.len(),
                }
            );
        }

        for &mode in drive_modes {
            if !role.allowed_modes().contains(&mode) {
                return Err(
                    InvalidPinConfiguration::ModeNotAllowed {
                        pin: name.to_owned(),
                        role,
                        mode,
                    }
                );
            }
        }

        Ok(
            Self {
                name: name.to_owned(),
                role,
                drive_modes: drive_modes.to_vec(),
            }
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> PinRole {
        self.role
    }

    /// The drive modes, one per ZIF configuration this pin defines
    pub fn drive_modes(&self) -> &[DriveMode] {
        &self.drive_modes
    }

    /// The drive mode used in configuration `cfgnum`
    ///
    /// A pin defining fewer configurations than the part keeps its first
    /// mode for all remaining configuration numbers.
    pub fn mode_for_config(&self, cfgnum: usize) -> DriveMode {
        self.drive_modes.get(cfgnum)
            .copied()
            .unwrap_or(self.drive_modes[0])
    }
}


/// A pin definition that the ZIF hardware cannot express
#[derive(Debug)]
pub enum InvalidPinConfiguration {
    /// A drive mode outside the allowed set for the pin's role
    ModeNotAllowed {
        pin: String,
        role: PinRole,
        mode: DriveMode,
    },
    /// No drive modes given, and the role has no default
    NoDefaultModes {
        pin: String,
        role: PinRole,
    },
    /// More drive modes than the fixture has configuration slots
    TooManyModes {
        pin: String,
        count: usize,
    },
}

impl fmt::Display for InvalidPinConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ModeNotAllowed { pin, role, mode } => {
                write!(
                    f,
                    "ZIF mode {:?} cannot be assigned to pin `{}` of role {:?}",
                    mode, pin, role,
                )
            }
            Self::NoDefaultModes { pin, role } => {
                write!(
                    f,
                    "pin `{}` of role {:?} requires explicit drive modes",
                    pin, role,
                )
            }
            Self::TooManyModes { pin, count } => {
                write!(
                    f,
                    "pin `{}` defines {} drive modes; the fixture supports \
                    at most {}",
                    pin, count, MAX_CONFIGS,
                )
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: &[PinRole] = &[
        PinRole::In,
        PinRole::Out,
        PinRole::Bidirectional,
        PinRole::OpenCollector,
        PinRole::Tristate,
        PinRole::OutputEnable,
        PinRole::Clock,
        PinRole::Rc,
        PinRole::Power,
        PinRole::Ground,
        PinRole::NotConnected,
    ];

    #[test]
    fn every_role_has_allowed_modes() {
        for &role in ALL_ROLES {
            assert!(!role.allowed_modes().is_empty(), "{:?}", role);
        }
    }

    #[test]
    fn defaults_are_subset_of_allowed() {
        for &role in ALL_ROLES {
            if let Some(defaults) = role.default_modes() {
                for mode in defaults {
                    assert!(
                        role.allowed_modes().contains(mode),
                        "{:?}: {:?}",
                        role,
                        mode,
                    );
                }
            }
        }
    }

    #[test]
    fn bidirectional_requires_explicit_modes() {
        assert!(Pin::new("IO1", PinRole::Bidirectional).is_err());

        let pin = Pin::with_modes(
            "IO1",
            PinRole::Bidirectional,
            &[DriveMode::DriveHighLow, DriveMode::SenseHiZ],
        );
        assert!(pin.is_ok());
    }

    #[test]
    fn disallowed_mode_is_rejected() {
        let result = Pin::with_modes(
            "A",
            PinRole::In,
            &[DriveMode::SensePullupWeak],
        );
        assert!(matches!(
            result,
            Err(InvalidPinConfiguration::ModeNotAllowed { .. }),
        ));
    }

    #[test]
    fn mode_list_is_limited_to_config_slots() {
        let result = Pin::with_modes(
            "IO1",
            PinRole::Bidirectional,
            &[
                DriveMode::DriveHighLow,
                DriveMode::SenseHiZ,
                DriveMode::SensePullupWeak,
                DriveMode::SensePullupStrong,
                DriveMode::DriveHighLow,
            ],
        );
        assert!(matches!(
            result,
            Err(InvalidPinConfiguration::TooManyModes { .. }),
        ));
    }

    #[test]
    fn repeat_first_mode_for_missing_configs() {
        let pin = Pin::new("Y", PinRole::Out).unwrap();
        assert_eq!(pin.mode_for_config(0), DriveMode::SensePullupWeak);
        assert_eq!(pin.mode_for_config(3), DriveMode::SensePullupWeak);
    }
}
