//! MAX98396 register addresses and map.

#![allow(missing_docs)] // datasheet register names

use crate::regmap::{RegDefault, RegRange, RegisterMap};

pub const SW_RESET: u16 = 0x2000;
pub const CLK_MON_CTRL: u16 = 0x2038;
pub const ENABLE_CTRLS: u16 = 0x203F;
pub const PCM_MODE_CFG: u16 = 0x2041;
pub const PCM_CLK_SETUP: u16 = 0x2042;
pub const PCM_SR_SETUP: u16 = 0x2043;
pub const PCM_TX_CTRL_1: u16 = 0x2044;
pub const PCM_TX_CTRL_2: u16 = 0x2045;
/// TX Hi-Z, slots 8–15.
pub const PCM_TX_HIZ_CTRL_7: u16 = 0x2052;
/// TX Hi-Z, slots 0–7.
pub const PCM_TX_HIZ_CTRL_8: u16 = 0x2053;
pub const PCM_RX_SRC1: u16 = 0x2055;
pub const PCM_RX_SRC2: u16 = 0x2056;
pub const PCM_TX_SRC_EN: u16 = 0x205D;
pub const PCM_RX_EN: u16 = 0x205E;
pub const PCM_TX_EN: u16 = 0x205F;
pub const AMP_VOL_CTRL: u16 = 0x2090;
pub const AMP_PATH_GAIN: u16 = 0x2091;
pub const AMP_DSP_CFG: u16 = 0x2092;
pub const AMP_EN: u16 = 0x20AF;
pub const DHT_EN: u16 = 0x20DF;
pub const IV_SENSE_PATH_CFG: u16 = 0x20E0;
pub const IV_SENSE_PATH_EN: u16 = 0x20E4;
pub const BPE_EN: u16 = 0x210D;
pub const GLOBAL_EN: u16 = 0x210F;
pub const REVISION_ID: u16 = 0x21FF;

/// Highest valid address.
pub const MAX_REGISTER: u16 = 0x21FF;

/// Power-on defaults, sorted by address.
pub static DEFAULTS: [RegDefault; 155] = [
    RegDefault::new(0x2000, 0x00), // SW_RESET
    RegDefault::new(0x2001, 0x00), // INT_RAW1
    RegDefault::new(0x2002, 0x00), // INT_RAW2
    RegDefault::new(0x2003, 0x00), // INT_RAW3
    RegDefault::new(0x2004, 0x00), // INT_RAW4
    RegDefault::new(0x2006, 0x00), // INT_STATE1
    RegDefault::new(0x2007, 0x00), // INT_STATE2
    RegDefault::new(0x2008, 0x00), // INT_STATE3
    RegDefault::new(0x2009, 0x00), // INT_STATE4
    RegDefault::new(0x200B, 0x00), // INT_FLAG1
    RegDefault::new(0x200C, 0x00), // INT_FLAG2
    RegDefault::new(0x200D, 0x00), // INT_FLAG3
    RegDefault::new(0x200E, 0x00), // INT_FLAG4
    RegDefault::new(0x2010, 0x02), // INT_EN1
    RegDefault::new(0x2011, 0x00), // INT_EN2
    RegDefault::new(0x2012, 0x00), // INT_EN3
    RegDefault::new(0x2013, 0x00), // INT_EN4
    RegDefault::new(0x2015, 0x00), // INT_FLAG_CLR1
    RegDefault::new(0x2016, 0x00), // INT_FLAG_CLR2
    RegDefault::new(0x2017, 0x00), // INT_FLAG_CLR3
    RegDefault::new(0x2018, 0x00), // INT_FLAG_CLR4
    RegDefault::new(0x201F, 0x00), // IRQ_CTRL
    RegDefault::new(0x2020, 0x46), // THERM_WARN_THRESH
    RegDefault::new(0x2021, 0x46), // THERM_WARN_THRESH2
    RegDefault::new(0x2022, 0x64), // THERM_SHDN_THRESH
    RegDefault::new(0x2023, 0x02), // THERM_HYSTERESIS
    RegDefault::new(0x2024, 0xC5), // THERM_FOLDBACK_SET
    RegDefault::new(0x2027, 0x01), // THERM_FOLDBACK_EN
    RegDefault::new(0x2030, 0x32), // NOISE_GATE_IDLE_MODE_CTRL
    RegDefault::new(0x2033, 0x00), // NOISE_GATE_IDLE_MODE_EN
    RegDefault::new(0x2038, 0x00), // CLK_MON_CTRL
    RegDefault::new(0x2039, 0x00), // DATA_MON_CTRL
    RegDefault::new(0x203F, 0x0F), // ENABLE_CTRLS
    RegDefault::new(0x2040, 0x55), // PIN_CFG
    RegDefault::new(0x2041, 0xC0), // PCM_MODE_CFG
    RegDefault::new(0x2042, 0x04), // PCM_CLK_SETUP
    RegDefault::new(0x2043, 0x88), // PCM_SR_SETUP
    RegDefault::new(0x2044, 0x00), // PCM_TX_CTRL_1
    RegDefault::new(0x2045, 0x00), // PCM_TX_CTRL_2
    RegDefault::new(0x2046, 0x00), // PCM_TX_CTRL_3
    RegDefault::new(0x2047, 0x00), // PCM_TX_CTRL_4
    RegDefault::new(0x2048, 0x00), // PCM_TX_CTRL_5
    RegDefault::new(0x2049, 0x00), // PCM_TX_CTRL_6
    RegDefault::new(0x204A, 0x00), // PCM_TX_CTRL_7
    RegDefault::new(0x204B, 0x00), // PCM_TX_CTRL_8
    RegDefault::new(0x204C, 0xFF), // PCM_TX_HIZ_CTRL_1
    RegDefault::new(0x204D, 0xFF), // PCM_TX_HIZ_CTRL_2
    RegDefault::new(0x204E, 0xFF), // PCM_TX_HIZ_CTRL_3
    RegDefault::new(0x204F, 0xFF), // PCM_TX_HIZ_CTRL_4
    RegDefault::new(0x2050, 0xFF), // PCM_TX_HIZ_CTRL_5
    RegDefault::new(0x2051, 0xFF), // PCM_TX_HIZ_CTRL_6
    RegDefault::new(0x2052, 0xFF), // PCM_TX_HIZ_CTRL_7
    RegDefault::new(0x2053, 0xFF), // PCM_TX_HIZ_CTRL_8
    RegDefault::new(0x2055, 0x00), // PCM_RX_SRC1
    RegDefault::new(0x2056, 0x00), // PCM_RX_SRC2
    RegDefault::new(0x2058, 0x00), // PCM_BYPASS_SRC
    RegDefault::new(0x205D, 0x00), // PCM_TX_SRC_EN
    RegDefault::new(0x205E, 0x00), // PCM_RX_EN
    RegDefault::new(0x205F, 0x00), // PCM_TX_EN
    RegDefault::new(0x2070, 0x00), // ICC_RX_EN_A
    RegDefault::new(0x2071, 0x00), // ICC_RX_EN_B
    RegDefault::new(0x2072, 0x00), // ICC_TX_CTRL
    RegDefault::new(0x207F, 0x00), // ICC_EN
    RegDefault::new(0x2083, 0x04), // TONE_GEN_DC_CFG
    RegDefault::new(0x2084, 0x00), // TONE_GEN_DC_LVL1
    RegDefault::new(0x2085, 0x00), // TONE_GEN_DC_LVL2
    RegDefault::new(0x2086, 0x00), // TONE_GEN_DC_LVL3
    RegDefault::new(0x208F, 0x00), // TONE_GEN_EN
    RegDefault::new(0x2090, 0x00), // AMP_VOL_CTRL
    RegDefault::new(0x2091, 0x0B), // AMP_PATH_GAIN
    RegDefault::new(0x2092, 0x23), // AMP_DSP_CFG
    RegDefault::new(0x2093, 0x0D), // SSM_CFG
    RegDefault::new(0x2094, 0x12), // SPK_CLS_DG_THRESH
    RegDefault::new(0x2095, 0x17), // SPK_CLS_DG_HDR
    RegDefault::new(0x2096, 0x17), // SPK_CLS_DG_HOLD_TIME
    RegDefault::new(0x2097, 0x00), // SPK_CLS_DG_DELAY
    RegDefault::new(0x2098, 0x00), // SPK_CLS_DG_MODE
    RegDefault::new(0x2099, 0x03), // SPK_CLS_DG_VBAT_LVL
    RegDefault::new(0x209A, 0x00), // SPK_EDGE_CTRL
    RegDefault::new(0x209C, 0x0A), // SPK_EDGE_CTRL1
    RegDefault::new(0x209D, 0xAA), // SPK_EDGE_CTRL2
    RegDefault::new(0x209E, 0x00), // AMP_CLIP_GAIN
    RegDefault::new(0x209F, 0x00), // BYPASS_PATH_CFG
    RegDefault::new(0x20A0, 0x00), // AMP_SUPPLY_CTL
    RegDefault::new(0x20AF, 0x00), // AMP_EN
    RegDefault::new(0x20B0, 0x30), // MEAS_ADC_SR
    RegDefault::new(0x20B1, 0x00), // MEAS_ADC_PVDD_CFG
    RegDefault::new(0x20B2, 0x00), // MEAS_ADC_VBAT_CFG
    RegDefault::new(0x20B3, 0x00), // MEAS_ADC_THERMAL_CFG
    RegDefault::new(0x20B4, 0x00), // ADC_READBACK_CTRL1
    RegDefault::new(0x20B5, 0x00), // ADC_READBACK_CTRL2
    RegDefault::new(0x20B6, 0x00), // ADC_PVDD_READBACK_MSB
    RegDefault::new(0x20B7, 0x00), // ADC_PVDD_READBACK_LSB
    RegDefault::new(0x20B8, 0x00), // ADC_VBAT_READBACK_MSB
    RegDefault::new(0x20B9, 0x00), // ADC_VBAT_READBACK_LSB
    RegDefault::new(0x20BA, 0x00), // TEMP_READBACK_MSB
    RegDefault::new(0x20BB, 0x00), // TEMP_READBACK_LSB
    RegDefault::new(0x20BC, 0xFF), // LO_PVDD_READBACK_MSB
    RegDefault::new(0x20BD, 0x01), // LO_PVDD_READBACK_LSB
    RegDefault::new(0x20BE, 0xFF), // LO_VBAT_READBACK_MSB
    RegDefault::new(0x20BF, 0x01), // LO_VBAT_READBACK_LSB
    RegDefault::new(0x20C7, 0x00), // MEAS_ADC_CFG
    RegDefault::new(0x20D0, 0x00), // DHT_CFG1
    RegDefault::new(0x20D1, 0x08), // LIMITER_CFG1
    RegDefault::new(0x20D2, 0x00), // LIMITER_CFG2
    RegDefault::new(0x20D3, 0x14), // DHT_CFG2
    RegDefault::new(0x20D4, 0x02), // DHT_CFG3
    RegDefault::new(0x20D5, 0x04), // DHT_CFG4
    RegDefault::new(0x20D6, 0x07), // DHT_HYSTERESIS_CFG
    RegDefault::new(0x20DF, 0x00), // DHT_EN
    RegDefault::new(0x20E0, 0x04), // IV_SENSE_PATH_CFG
    RegDefault::new(0x20E4, 0x00), // IV_SENSE_PATH_EN
    RegDefault::new(0x20E5, 0x00), // BPE_STATE
    RegDefault::new(0x20E6, 0x00), // BPE_L3_THRESH_MSB
    RegDefault::new(0x20E7, 0x00), // BPE_L3_THRESH_LSB
    RegDefault::new(0x20E8, 0x00), // BPE_L2_THRESH_MSB
    RegDefault::new(0x20E9, 0x00), // BPE_L2_THRESH_LSB
    RegDefault::new(0x20EA, 0x00), // BPE_L1_THRESH_MSB
    RegDefault::new(0x20EB, 0x00), // BPE_L1_THRESH_LSB
    RegDefault::new(0x20EC, 0x00), // BPE_L0_THRESH_MSB
    RegDefault::new(0x20ED, 0x00), // BPE_L0_THRESH_LSB
    RegDefault::new(0x20EE, 0x00), // BPE_L3_DWELL_HOLD_TIME
    RegDefault::new(0x20EF, 0x00), // BPE_L2_DWELL_HOLD_TIME
    RegDefault::new(0x20F0, 0x00), // BPE_L1_DWELL_HOLD_TIME
    RegDefault::new(0x20F1, 0x00), // BPE_L0_HOLD_TIME
    RegDefault::new(0x20F2, 0x00), // BPE_L3_ATTACK_REL_STEP
    RegDefault::new(0x20F3, 0x00), // BPE_L2_ATTACK_REL_STEP
    RegDefault::new(0x20F4, 0x00), // BPE_L1_ATTACK_REL_STEP
    RegDefault::new(0x20F5, 0x00), // BPE_L0_ATTACK_REL_STEP
    RegDefault::new(0x20F6, 0x00), // BPE_L3_MAX_GAIN_ATTN
    RegDefault::new(0x20F7, 0x00), // BPE_L2_MAX_GAIN_ATTN
    RegDefault::new(0x20F8, 0x00), // BPE_L1_MAX_GAIN_ATTN
    RegDefault::new(0x20F9, 0x00), // BPE_L0_MAX_GAIN_ATTN
    RegDefault::new(0x20FA, 0x00), // BPE_L3_GAIN_ATTACK_REL_RATE
    RegDefault::new(0x20FB, 0x00), // BPE_L2_GAIN_ATTACK_REL_RATE
    RegDefault::new(0x20FC, 0x00), // BPE_L1_GAIN_ATTACK_REL_RATE
    RegDefault::new(0x20FD, 0x00), // BPE_L0_GAIN_ATTACK_REL_RATE
    RegDefault::new(0x20FE, 0x00), // BPE_L3_LIMITER_CFG
    RegDefault::new(0x20FF, 0x00), // BPE_L2_LIMITER_CFG
    RegDefault::new(0x2100, 0x00), // BPE_L1_LIMITER_CFG
    RegDefault::new(0x2101, 0x00), // BPE_L0_LIMITER_CFG
    RegDefault::new(0x2102, 0x00), // BPE_L3_LIMITER_ATTACK_REL_RATE
    RegDefault::new(0x2103, 0x00), // BPE_L2_LIMITER_ATTACK_REL_RATE
    RegDefault::new(0x2104, 0x00), // BPE_L1_LIMITER_ATTACK_REL_RATE
    RegDefault::new(0x2105, 0x00), // BPE_L0_LIMITER_ATTACK_REL_RATE
    RegDefault::new(0x2106, 0x00), // BPE_THRESH_HYSTERESIS
    RegDefault::new(0x2107, 0x00), // BPE_INFINITE_HOLD_CLR
    RegDefault::new(0x2108, 0x00), // BPE_SUPPLY_SRC
    RegDefault::new(0x2109, 0x00), // BPE_LOW_STATE
    RegDefault::new(0x210A, 0x00), // BPE_LOW_GAIN
    RegDefault::new(0x210B, 0x00), // BPE_LOW_LIMITER
    RegDefault::new(0x210D, 0x00), // BPE_EN
    RegDefault::new(0x210E, 0x00), // AUTO_RESTART_BEHAVIOR
    RegDefault::new(0x210F, 0x00), // GLOBAL_EN
    RegDefault::new(0x21FF, 0x00), // REVISION_ID
];

/// Addresses that can be read back.
pub static READABLE: [RegRange; 22] = [
    RegRange::new(0x2001, 0x2013),
    RegRange::new(0x201F, 0x2024),
    RegRange::single(0x2027),
    RegRange::single(0x2030),
    RegRange::single(0x2033),
    RegRange::new(0x2038, 0x2053),
    RegRange::new(0x2055, 0x2056),
    RegRange::single(0x2058),
    RegRange::new(0x205D, 0x205F),
    RegRange::new(0x2070, 0x2072),
    RegRange::single(0x207F),
    RegRange::new(0x2083, 0x2086),
    RegRange::new(0x208F, 0x209A),
    RegRange::new(0x209C, 0x20A0),
    RegRange::new(0x20AF, 0x20BF),
    RegRange::single(0x20C7),
    RegRange::new(0x20D0, 0x20D6),
    RegRange::single(0x20E0),
    RegRange::new(0x20E4, 0x2106),
    RegRange::new(0x2108, 0x210B),
    RegRange::new(0x210D, 0x210F),
    RegRange::single(0x21FF),
];

/// Status, interrupt, readback and enable registers the device changes itself.
pub static VOLATILE: [RegRange; 4] = [
    RegRange::new(0x2001, 0x200E),
    RegRange::new(0x20B6, 0x20BF),
    RegRange::single(0x210F),
    RegRange::single(0x21FF),
];

/// MAX98396 register map.
pub static MAP: RegisterMap = RegisterMap {
    name: "max98396",
    max_register: MAX_REGISTER,
    defaults: &DEFAULTS,
    readable: &READABLE,
    volatile: &VOLATILE,
};
