// cstr-core/src/units.rs

use uom::si::f64::{Time as UomTime, Volume as UomVolume, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI, f64)
pub type Time = UomTime;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

#[inline]
pub fn lps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_second;
    VolumeRate::new::<liter_per_second>(v)
}

/// Mean residence time V/F. `None` when there is no through-flow.
pub fn residence_time(volume: Volume, flow: VolumeRate) -> Option<Time> {
    if flow.value > 0.0 {
        Some(volume / flow)
    } else {
        None
    }
}

#[inline]
pub fn minutes(t: Time) -> f64 {
    use uom::si::time::minute;
    t.get::<minute>()
}

pub mod constants {
    /// Universal gas constant, J/(mol K)
    pub const GAS_CONSTANT: f64 = 8.314;
}
