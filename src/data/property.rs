//! Stat kinds and the stat-property table that maps raw property names onto them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::text::TextHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "HP")]
    Hp,
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "DEF")]
    Def,
    #[serde(rename = "SPD")]
    Spd,
    #[serde(rename = "CRIT_RATE")]
    CritRate,
    #[serde(rename = "CRIT_DMG")]
    CritDmg,
    #[serde(rename = "BREAK_EFFECT")]
    BreakEffect,
    #[serde(rename = "HEALING")]
    OutgoingHealing,
    #[serde(rename = "ENERGY_REGEN")]
    EnergyRegen,
    #[serde(rename = "EFFECT_HIT")]
    EffectHitRate,
    #[serde(rename = "EFFECT_RES")]
    EffectRes,
    #[serde(rename = "PHYSICAL_DMG")]
    PhysicalDmg,
    #[serde(rename = "FIRE_DMG")]
    FireDmg,
    #[serde(rename = "ICE_DMG")]
    IceDmg,
    #[serde(rename = "LIGHTNING_DMG")]
    LightningDmg,
    #[serde(rename = "WIND_DMG")]
    WindDmg,
    #[serde(rename = "QUANTUM_DMG")]
    QuantumDmg,
    #[serde(rename = "IMAGINARY_DMG")]
    ImaginaryDmg,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Atk => "ATK",
            Self::Def => "DEF",
            Self::Spd => "SPD",
            Self::CritRate => "CRIT_RATE",
            Self::CritDmg => "CRIT_DMG",
            Self::BreakEffect => "BREAK_EFFECT",
            Self::OutgoingHealing => "HEALING",
            Self::EnergyRegen => "ENERGY_REGEN",
            Self::EffectHitRate => "EFFECT_HIT",
            Self::EffectRes => "EFFECT_RES",
            Self::PhysicalDmg => "PHYSICAL_DMG",
            Self::FireDmg => "FIRE_DMG",
            Self::IceDmg => "ICE_DMG",
            Self::LightningDmg => "LIGHTNING_DMG",
            Self::WindDmg => "WIND_DMG",
            Self::QuantumDmg => "QUANTUM_DMG",
            Self::ImaginaryDmg => "IMAGINARY_DMG",
        }
    }

    /// English label used when the property's own name handle resolves to nothing.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Atk => "ATK",
            Self::Def => "DEF",
            Self::Spd => "SPD",
            Self::CritRate => "CRIT Rate",
            Self::CritDmg => "CRIT DMG",
            Self::BreakEffect => "Break Effect",
            Self::OutgoingHealing => "Outgoing Healing Boost",
            Self::EnergyRegen => "Energy Regeneration Rate",
            Self::EffectHitRate => "Effect Hit Rate",
            Self::EffectRes => "Effect RES",
            Self::PhysicalDmg => "Physical DMG Boost",
            Self::FireDmg => "Fire DMG Boost",
            Self::IceDmg => "Ice DMG Boost",
            Self::LightningDmg => "Lightning DMG Boost",
            Self::WindDmg => "Wind DMG Boost",
            Self::QuantumDmg => "Quantum DMG Boost",
            Self::ImaginaryDmg => "Imaginary DMG Boost",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the stat-property table, e.g. `AttackAddedRatio` → ATK, percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatPropertyDef {
    pub property: String,
    pub kind: StatKind,
    #[serde(default)]
    pub percent: bool,
    #[serde(default)]
    pub name: Option<TextHandle>,
}

/// Raw stat contribution referencing the property table by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatAdd {
    pub property: String,
    pub value: f64,
}
