//! MAX98520 register addresses and map.

#![allow(missing_docs)] // datasheet register names

use crate::regmap::{RegDefault, RegRange, RegisterMap};

pub const SW_RESET: u16 = 0x2000;
pub const CLK_MON_CTRL: u16 = 0x2030;
pub const ERR_MON_CTRL: u16 = 0x2037;
pub const PCM_MODE_CFG: u16 = 0x2040;
pub const PCM_CLK_SETUP: u16 = 0x2041;
pub const PCM_SR_SETUP: u16 = 0x2042;
pub const PCM_RX_SRC1: u16 = 0x2043;
pub const PCM_RX_SRC2: u16 = 0x2044;
pub const PCM_RX_EN: u16 = 0x204F;
pub const AMP_VOL_CTRL: u16 = 0x2090;
pub const AMP_PATH_GAIN: u16 = 0x2091;
pub const AMP_DSP_CFG: u16 = 0x2092;
pub const SSM_CFG: u16 = 0x2094;
pub const AMP_CFG: u16 = 0x2095;
pub const AMP_EN: u16 = 0x209F;
pub const DHT_EN: u16 = 0x20D8;
pub const GLOBAL_EN: u16 = 0x210F;
pub const BOOST_TM1: u16 = 0x2161;
pub const REVISION_ID: u16 = 0x21FF;

/// Highest valid address.
pub const MAX_REGISTER: u16 = 0x21FF;

/// Power-on defaults, sorted by address.
pub static DEFAULTS: [RegDefault; 48] = [
    RegDefault::new(0x2000, 0x00), // SW_RESET
    RegDefault::new(0x2001, 0x00), // STATUS_1
    RegDefault::new(0x2002, 0x00), // STATUS_2
    RegDefault::new(0x2020, 0x46), // THERM_WARN_THRESH
    RegDefault::new(0x2021, 0x64), // THERM_SHDN_THRESH
    RegDefault::new(0x2022, 0x02), // THERM_HYSTERESIS
    RegDefault::new(0x2023, 0x31), // THERM_FOLDBACK_SET
    RegDefault::new(0x2027, 0x01), // THERM_FOLDBACK_EN
    RegDefault::new(0x2030, 0x00), // CLK_MON_CTRL
    RegDefault::new(0x2037, 0x01), // ERR_MON_CTRL
    RegDefault::new(0x2040, 0xC0), // PCM_MODE_CFG
    RegDefault::new(0x2041, 0x04), // PCM_CLK_SETUP
    RegDefault::new(0x2042, 0x08), // PCM_SR_SETUP
    RegDefault::new(0x2043, 0x00), // PCM_RX_SRC1
    RegDefault::new(0x2044, 0x00), // PCM_RX_SRC2
    RegDefault::new(0x204F, 0x00), // PCM_RX_EN
    RegDefault::new(0x2090, 0x00), // AMP_VOL_CTRL
    RegDefault::new(0x2091, 0x03), // AMP_PATH_GAIN
    RegDefault::new(0x2092, 0x02), // AMP_DSP_CFG
    RegDefault::new(0x2094, 0x01), // SSM_CFG
    RegDefault::new(0x2095, 0xF0), // AMP_CFG
    RegDefault::new(0x209F, 0x00), // AMP_EN
    RegDefault::new(0x20B0, 0x00), // ADC_SR
    RegDefault::new(0x20B1, 0x00), // ADC_RESOLUTION
    RegDefault::new(0x20B2, 0x02), // ADC_PVDD0_CFG
    RegDefault::new(0x20B3, 0x02), // ADC_THERMAL_CFG
    RegDefault::new(0x20B4, 0x00), // ADC_READBACK_CTRL
    RegDefault::new(0x20B5, 0x00), // ADC_READBACK_UPDATE
    RegDefault::new(0x20B6, 0x00), // ADC_PVDD_READBACK_MSB
    RegDefault::new(0x20B7, 0x00), // ADC_PVDD_READBACK_LSB
    RegDefault::new(0x20B8, 0x00), // ADC_TEMP_READBACK_MSB
    RegDefault::new(0x20B9, 0x00), // ADC_TEMP_READBACK_LSB
    RegDefault::new(0x20BA, 0xFF), // ADC_LOW_PVDD_READBACK_MSB
    RegDefault::new(0x20BB, 0x01), // ADC_LOW_READBACK_LSB
    RegDefault::new(0x20BC, 0x00), // ADC_HIGH_TEMP_READBACK_MSB
    RegDefault::new(0x20BD, 0x00), // ADC_HIGH_TEMP_READBACK_LSB
    RegDefault::new(0x20CF, 0x00), // MEAS_ADC_CFG
    RegDefault::new(0x20D0, 0x00), // DHT_CFG1
    RegDefault::new(0x20D1, 0x08), // LIMITER_CFG1
    RegDefault::new(0x20D2, 0x00), // LIMITER_CFG2
    RegDefault::new(0x20D3, 0x14), // DHT_CFG2
    RegDefault::new(0x20D4, 0x02), // DHT_CFG3
    RegDefault::new(0x20D5, 0x04), // DHT_CFG4
    RegDefault::new(0x20D6, 0x07), // DHT_HYSTERESIS_CFG
    RegDefault::new(0x20D8, 0x00), // DHT_EN
    RegDefault::new(0x210E, 0x00), // AUTO_RESTART_BEHAVIOR
    RegDefault::new(0x210F, 0x00), // GLOBAL_EN
    RegDefault::new(0x21FF, 0x00), // REVISION_ID
];

/// Addresses that can be read back.
pub static READABLE: [RegRange; 17] = [
    RegRange::new(0x2001, 0x2002),
    RegRange::new(0x2020, 0x2023),
    RegRange::single(0x2027),
    RegRange::single(0x2030),
    RegRange::single(0x2037),
    RegRange::new(0x2040, 0x2044),
    RegRange::single(0x204F),
    RegRange::new(0x2090, 0x2092),
    RegRange::new(0x2094, 0x2095),
    RegRange::single(0x209F),
    RegRange::new(0x20B0, 0x20BD),
    RegRange::single(0x20CF),
    RegRange::new(0x20D0, 0x20D6),
    RegRange::single(0x20D8),
    RegRange::new(0x210E, 0x210F),
    RegRange::new(0x2161, 0x2163),
    RegRange::single(0x21FF),
];

/// Status, readback and enable registers the device changes itself.
pub static VOLATILE: [RegRange; 4] = [
    RegRange::new(0x2001, 0x2002),
    RegRange::new(0x20B4, 0x20BD),
    RegRange::single(0x210F),
    RegRange::single(0x21FF),
];

/// MAX98520 register map.
pub static MAP: RegisterMap = RegisterMap {
    name: "max98520",
    max_register: MAX_REGISTER,
    defaults: &DEFAULTS,
    readable: &READABLE,
    volatile: &VOLATILE,
};
