//! Register classification of both chip maps, through the public regmap.

#![allow(clippy::unwrap_used)]

mod common;

use common::attach;
use smart_amp::{ChipFamily, Error};

/// Addresses outside the map are rejected without bus traffic.
#[test]
fn out_of_map_addresses() {
    for family in [ChipFamily::Max98396, ChipFamily::Max98520] {
        let mut amp = attach(family);
        assert_eq!(amp.regmap_mut().read(0x1FFF), Err(Error::InvalidRegister(0x1FFF)));
        assert_eq!(amp.regmap_mut().write(0x2200, 0), Err(Error::InvalidRegister(0x2200)));
        assert!(amp.regmap().bus().ops().is_empty(), "{}", family.as_str());
    }
}

/// Volatile registers always go to the bus.
#[test]
fn volatile_reads_hit_the_bus() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.regmap_mut().read(0x210F).unwrap();
    amp.regmap_mut().read(0x210F).unwrap();
    assert_eq!(amp.regmap().bus().read_count(0x210F), 2);
    assert_eq!(amp.regmap().cached(0x210F), None);
}

/// Cached registers are served without touching the bus.
#[test]
fn cached_reads_stay_off_the_bus() {
    let mut amp = attach(ChipFamily::Max98396);
    assert_eq!(amp.regmap_mut().read(0x2091).unwrap(), 0x0B);
    assert!(amp.regmap().bus().ops().is_empty());
}

/// Per-chip address differences.
#[test]
fn chip_specific_addresses() {
    let max98396 = ChipFamily::Max98396.chip().map;
    let max98520 = ChipFamily::Max98520.chip().map;

    assert!(max98396.exists(0x20E4), "IV sense path enable");
    assert!(!max98520.exists(0x20E4));
    assert!(max98520.exists(0x2161), "boost trim");
    assert!(!max98396.exists(0x2161));

    for map in [max98396, max98520] {
        assert!(map.volatile(0x210F), "{} GLOBAL_EN", map.name);
        assert!(map.volatile(0x21FF), "{} REVISION_ID", map.name);
        assert!(!map.volatile(0x2090), "{} AMP_VOL_CTRL", map.name);
    }
}
