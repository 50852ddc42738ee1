//! Unit newtypes for the quantities that feed the capacity-factor derivation.
//!
//! Generation arrives in MWh, nameplate capacity in MW, and the reporting
//! window in hours. Keeping them as distinct types makes the one legal
//! combination explicit: `MegawattHours / (Megawatts * Hours)` is a ratio.
//!
//! All types use `#[repr(transparent)]` and have the same layout as `f64`.
//!
//! # Usage
//!
//! ```
//! use gencf_core::units::{Hours, MegawattHours, Megawatts};
//!
//! let capacity = Megawatts(100.0);
//! let window = Hours(672.0);
//! let possible: MegawattHours = capacity * window;
//! assert_eq!(MegawattHours(33_600.0) / possible, 0.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Power (nameplate capacity) in megawatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

/// Energy in megawatt-hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MegawattHours(pub f64);

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hours(pub f64);

impl Hours {
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// MW sustained for h hours yields MWh
impl Mul<Hours> for Megawatts {
    type Output = MegawattHours;
    fn mul(self, rhs: Hours) -> Self::Output {
        MegawattHours(self.0 * rhs.0)
    }
}

/// Ratio of two energies
impl Div for MegawattHours {
    type Output = f64;
    fn div(self, rhs: MegawattHours) -> Self::Output {
        self.0 / rhs.0
    }
}
