//! Core data types for motion-replay
//!
//! This module contains the small value types shared by the record loader,
//! the playback loop and the viewer bridge.
//!
//! # Main Types
//!
//! - [`RobotType`] - The closed set of robot skeletons a viewer can load
//! - [`QuatXyzw`] - A rotation as stored in motion records (scalar-last)
//! - [`QuatWxyz`] - A rotation as consumed by the viewer (scalar-first)
//! - [`Frame`] - A borrowed view of one time sample of a motion
//!
//! # Quaternion Conventions
//!
//! Records store root rotations scalar-last, `(x, y, z, w)`. The viewer wants
//! them scalar-first, `(w, x, y, z)`. Converting between the two is a pure
//! component permutation: no normalization happens and nothing checks that
//! the input is a unit quaternion.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A 3-component position in meters
pub type Vec3 = [f64; 3];

/// Robot skeletons supported by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize, ValueEnum)]
pub enum RobotType {
    #[default]
    #[serde(rename = "unitree_g1")]
    #[value(name = "unitree_g1")]
    UnitreeG1,
    #[serde(rename = "unitree_g1_with_hands")]
    #[value(name = "unitree_g1_with_hands")]
    UnitreeG1WithHands,
    #[serde(rename = "unitree_h1")]
    #[value(name = "unitree_h1")]
    UnitreeH1,
    #[serde(rename = "unitree_h1_2")]
    #[value(name = "unitree_h1_2")]
    UnitreeH1_2,
    #[serde(rename = "booster_t1")]
    #[value(name = "booster_t1")]
    BoosterT1,
    #[serde(rename = "booster_t1_29dof")]
    #[value(name = "booster_t1_29dof")]
    BoosterT1_29Dof,
    #[serde(rename = "stanford_toddy")]
    #[value(name = "stanford_toddy")]
    StanfordToddy,
    #[serde(rename = "fourier_n1")]
    #[value(name = "fourier_n1")]
    FourierN1,
    #[serde(rename = "engineai_pm01")]
    #[value(name = "engineai_pm01")]
    EngineaiPm01,
    #[serde(rename = "kuavo_s45")]
    #[value(name = "kuavo_s45")]
    KuavoS45,
    #[serde(rename = "hightorque_hi")]
    #[value(name = "hightorque_hi")]
    HightorqueHi,
    #[serde(rename = "galaxea_r1pro")]
    #[value(name = "galaxea_r1pro")]
    GalaxeaR1Pro,
    #[serde(rename = "berkeley_humanoid_lite")]
    #[value(name = "berkeley_humanoid_lite")]
    BerkeleyHumanoidLite,
    #[serde(rename = "booster_k1")]
    #[value(name = "booster_k1")]
    BoosterK1,
    #[serde(rename = "pnd_adam_lite")]
    #[value(name = "pnd_adam_lite")]
    PndAdamLite,
    #[serde(rename = "openloong")]
    #[value(name = "openloong")]
    Openloong,
    #[serde(rename = "tienkung")]
    #[value(name = "tienkung")]
    Tienkung,
}

impl RobotType {
    /// Every supported robot, in the order the CLI lists them
    pub const ALL: [RobotType; 17] = [
        RobotType::UnitreeG1,
        RobotType::UnitreeG1WithHands,
        RobotType::UnitreeH1,
        RobotType::UnitreeH1_2,
        RobotType::BoosterT1,
        RobotType::BoosterT1_29Dof,
        RobotType::StanfordToddy,
        RobotType::FourierN1,
        RobotType::EngineaiPm01,
        RobotType::KuavoS45,
        RobotType::HightorqueHi,
        RobotType::GalaxeaR1Pro,
        RobotType::BerkeleyHumanoidLite,
        RobotType::BoosterK1,
        RobotType::PndAdamLite,
        RobotType::Openloong,
        RobotType::Tienkung,
    ];

    /// Identifier used on the command line, in file names and by the viewer
    pub fn as_str(&self) -> &'static str {
        match self {
            RobotType::UnitreeG1 => "unitree_g1",
            RobotType::UnitreeG1WithHands => "unitree_g1_with_hands",
            RobotType::UnitreeH1 => "unitree_h1",
            RobotType::UnitreeH1_2 => "unitree_h1_2",
            RobotType::BoosterT1 => "booster_t1",
            RobotType::BoosterT1_29Dof => "booster_t1_29dof",
            RobotType::StanfordToddy => "stanford_toddy",
            RobotType::FourierN1 => "fourier_n1",
            RobotType::EngineaiPm01 => "engineai_pm01",
            RobotType::KuavoS45 => "kuavo_s45",
            RobotType::HightorqueHi => "hightorque_hi",
            RobotType::GalaxeaR1Pro => "galaxea_r1pro",
            RobotType::BerkeleyHumanoidLite => "berkeley_humanoid_lite",
            RobotType::BoosterK1 => "booster_k1",
            RobotType::PndAdamLite => "pnd_adam_lite",
            RobotType::Openloong => "openloong",
            RobotType::Tienkung => "tienkung",
        }
    }
}

impl std::fmt::Display for RobotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RobotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RobotType::ALL
            .iter()
            .copied()
            .find(|robot| robot.as_str() == s)
            .ok_or_else(|| format!("unknown robot type '{}'", s))
    }
}

/// Scalar-last quaternion `(x, y, z, w)` as stored in motion records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuatXyzw(pub [f64; 4]);

/// Scalar-first quaternion `(w, x, y, z)` as expected by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuatWxyz(pub [f64; 4]);

impl QuatXyzw {
    /// Reorder to scalar-first
    pub fn to_wxyz(self) -> QuatWxyz {
        let [x, y, z, w] = self.0;
        QuatWxyz([w, x, y, z])
    }
}

impl QuatWxyz {
    /// Reorder to scalar-last
    pub fn to_xyzw(self) -> QuatXyzw {
        let [w, x, y, z] = self.0;
        QuatXyzw([x, y, z, w])
    }
}

impl From<QuatXyzw> for QuatWxyz {
    fn from(q: QuatXyzw) -> Self {
        q.to_wxyz()
    }
}

impl From<QuatWxyz> for QuatXyzw {
    fn from(q: QuatWxyz) -> Self {
        q.to_xyzw()
    }
}

/// Convert every stored root rotation to the viewer's convention
pub fn convert_root_rotations(rotations: &[QuatXyzw]) -> Vec<QuatWxyz> {
    rotations.iter().map(|q| q.to_wxyz()).collect()
}

/// One time sample of a motion, ready to hand to a viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Root position in world coordinates
    pub root_pos: &'a Vec3,
    /// Root orientation, scalar-first
    pub root_rot: &'a QuatWxyz,
    /// Joint angles in the robot's actuator order
    pub dof_pos: &'a [f64],
}
