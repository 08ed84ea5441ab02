// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of VehicleCard.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Logical signal keys.
//!
//! Every key the card knows about is a variant of one of three closed enums:
//! [`EntityKey`] (backed by its own HA entity and a match rule),
//! [`AttrKey`] (an attribute of a lock or window sensor) and [`DerivedKey`]
//! (computed from other entities). [`CarKey`] unifies them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string does not name any known key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown car key: {0}")]
pub struct UnknownKey(pub String);

/// Declares a key enum together with its canonical string form.
/// The string form is what HA attributes, translation ids and serde use.
macro_rules! string_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(into = "&'static str", try_from = "String")]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl From<$name> for &'static str {
            fn from(key: $name) -> Self {
                key.as_str()
            }
        }

        impl FromStr for $name {
            type Err = UnknownKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    _ => Err(UnknownKey(s.to_owned())),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownKey;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_keys! {
    /// Signals resolved to their own HA entity
    pub enum EntityKey {
        LockSensor => "lockSensor",
        ParkBrake => "parkBrake",
        WindowsClosed => "windowsClosed",
        IgnitionState => "ignitionState",
        StarterBattery => "starterBattery",
        Odometer => "odometer",
        FuelLevel => "fuelLevel",
        AdBlueLevel => "adBlueLevel",
        RangeLiquid => "rangeLiquid",
        RangeElectric => "rangeElectric",
        Soc => "soc",
        MaxSoc => "maxSoc",
        ChargingPower => "chargingPower",
        TirePressureFrontLeft => "tirePressureFrontLeft",
        TirePressureFrontRight => "tirePressureFrontRight",
        TirePressureRearLeft => "tirePressureRearLeft",
        TirePressureRearRight => "tirePressureRearRight",
        TireWarning => "tireWarning",
        LowBrakeFluid => "lowBrakeFluid",
        LowCoolantLevel => "lowCoolantLevel",
        LowWashWater => "lowWashWater",
        EngineLight => "engineLight",
        /// Shown in the window group although it is not a window attribute
        SunroofStatus => "sunroofstatus",
        /// Shown in the door group although it is not a door attribute
        ChargeFlapDcStatus => "chargeflapdcstatus",
        DeviceTracker => "deviceTracker",
    }
}

string_keys! {
    /// Signals computed from other entities
    pub enum DerivedKey {
        /// `selectedChargeProgram` attribute of the electric range sensor
        SelectedProgram => "selectedProgram",
        /// `chargingactive` attribute of the electric range sensor
        StateCharging => "stateCharging",
        /// Heading of the services list, no backing entity
        TitleServices => "titleServices",
    }
}

string_keys! {
    /// Attributes of the lock sensor (lock and door groups)
    /// and of the windows sensor (window group)
    pub enum AttrKey {
        DoorLockStatusVehicle => "doorlockstatusvehicle",
        DoorLockStatusDecklid => "doorlockstatusdecklid",
        DoorLockStatusGas => "doorlockstatusgas",
        DoorLockStatusFrontLeft => "doorlockstatusfrontleft",
        DoorLockStatusFrontRight => "doorlockstatusfrontright",
        DoorLockStatusRearLeft => "doorlockstatusrearleft",
        DoorLockStatusRearRight => "doorlockstatusrearright",
        DoorStatusOverall => "doorstatusoverall",
        DecklidStatus => "decklidstatus",
        EngineHoodStatus => "enginehoodstatus",
        DoorStatusFrontLeft => "doorstatusfrontleft",
        DoorStatusFrontRight => "doorstatusfrontright",
        DoorStatusRearLeft => "doorstatusrearleft",
        DoorStatusRearRight => "doorstatusrearright",
        WindowStatusFrontLeft => "windowstatusfrontleft",
        WindowStatusFrontRight => "windowstatusfrontright",
        WindowStatusRearLeft => "windowstatusrearleft",
        WindowStatusRearRight => "windowstatusrearright",
        WindowStatusRearBlind => "windowstatusrearblind",
        WindowStatusRearLeftBlind => "windowstatusrearleftblind",
        WindowStatusRearRightBlind => "windowstatusrearrightblind",
    }
}

/// Attribute groups and the entity carrying their attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrGroup {
    Lock,
    Door,
    Window,
}

impl AttrGroup {
    /// Entity whose attributes hold this group's values
    #[must_use]
    pub fn source(self) -> EntityKey {
        match self {
            Self::Lock | Self::Door => EntityKey::LockSensor,
            Self::Window => EntityKey::WindowsClosed,
        }
    }
}

impl AttrKey {
    #[must_use]
    pub fn group(self) -> AttrGroup {
        match self {
            Self::DoorLockStatusVehicle
            | Self::DoorLockStatusDecklid
            | Self::DoorLockStatusGas
            | Self::DoorLockStatusFrontLeft
            | Self::DoorLockStatusFrontRight
            | Self::DoorLockStatusRearLeft
            | Self::DoorLockStatusRearRight => AttrGroup::Lock,
            Self::DoorStatusOverall
            | Self::DecklidStatus
            | Self::EngineHoodStatus
            | Self::DoorStatusFrontLeft
            | Self::DoorStatusFrontRight
            | Self::DoorStatusRearLeft
            | Self::DoorStatusRearRight => AttrGroup::Door,
            Self::WindowStatusFrontLeft
            | Self::WindowStatusFrontRight
            | Self::WindowStatusRearLeft
            | Self::WindowStatusRearRight
            | Self::WindowStatusRearBlind
            | Self::WindowStatusRearLeftBlind
            | Self::WindowStatusRearRightBlind => AttrGroup::Window,
        }
    }
}

/// Any logical key the card can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum CarKey {
    Entity(EntityKey),
    Derived(DerivedKey),
    Attr(AttrKey),
}

impl CarKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entity(key) => key.as_str(),
            Self::Derived(key) => key.as_str(),
            Self::Attr(key) => key.as_str(),
        }
    }

    /// Translation id of the item name
    #[must_use]
    pub fn name_id(self) -> String {
        format!("name-{}", self.as_str())
    }
}

impl From<EntityKey> for CarKey {
    fn from(key: EntityKey) -> Self {
        Self::Entity(key)
    }
}

impl From<DerivedKey> for CarKey {
    fn from(key: DerivedKey) -> Self {
        Self::Derived(key)
    }
}

impl From<AttrKey> for CarKey {
    fn from(key: AttrKey) -> Self {
        Self::Attr(key)
    }
}

impl From<CarKey> for &'static str {
    fn from(key: CarKey) -> Self {
        key.as_str()
    }
}

impl FromStr for CarKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<EntityKey>()
            .map(Self::Entity)
            .or_else(|_| s.parse::<DerivedKey>().map(Self::Derived))
            .or_else(|_| s.parse::<AttrKey>().map(Self::Attr))
    }
}

impl TryFrom<String> for CarKey {
    type Error = UnknownKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for CarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
