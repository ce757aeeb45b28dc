//! Six-axis joint constraint state applied to the host's configurable joint.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMotion {
    Locked,
    Free,
}

/// Linear x/y/z and angular x/y/z motion of the holster joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointConstraints {
    pub linear: [AxisMotion; 3],
    pub angular: [AxisMotion; 3],
}

impl JointConstraints {
    pub const LOCKED: JointConstraints = JointConstraints {
        linear: [AxisMotion::Locked; 3],
        angular: [AxisMotion::Locked; 3],
    };

    pub const FREE: JointConstraints = JointConstraints {
        linear: [AxisMotion::Free; 3],
        angular: [AxisMotion::Free; 3],
    };

    pub fn axes(&self) -> [AxisMotion; 6] {
        let [lx, ly, lz] = self.linear;
        let [ax, ay, az] = self.angular;
        [lx, ly, lz, ax, ay, az]
    }

    pub fn is_locked(&self) -> bool {
        *self == Self::LOCKED
    }

    pub fn is_free(&self) -> bool {
        *self == Self::FREE
    }
}

impl Default for JointConstraints {
    fn default() -> Self {
        Self::LOCKED
    }
}
