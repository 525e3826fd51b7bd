//! 位姿（位置 + 姿态）

use super::{DEFAULT_EPSILON, Orientation, Position};
use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::registry::TransformResolver;
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Rotation3, Vector3};
use std::fmt;

/// 某个坐标系下的位姿
///
/// 位置与姿态共享同一个坐标系标签。
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    rotation: Rotation3<f64>,
    translation: Vector3<f64>,
    frame: FrameId,
}

impl Pose {
    /// 从旋转和平移创建
    pub fn new(rotation: Rotation3<f64>, translation: Vector3<f64>, frame: FrameId) -> Self {
        Pose {
            rotation,
            translation,
            frame,
        }
    }

    /// 单位位姿（原点、无旋转）
    pub fn identity(frame: FrameId) -> Self {
        Pose::new(Rotation3::identity(), Vector3::zeros(), frame)
    }

    /// 纯平移位姿
    pub fn from_translation(x: f64, y: f64, z: f64, frame: FrameId) -> Self {
        Pose::new(Rotation3::identity(), Vector3::new(x, y, z), frame)
    }

    /// 由同一坐标系下的姿态和位置组合
    pub fn from_parts(orientation: &Orientation, position: &Position) -> Result<Self, FrameError> {
        if orientation.frame() != position.frame() {
            return Err(FrameError::mismatch(orientation.frame(), position.frame()));
        }
        Ok(Pose::new(
            *orientation.rotation(),
            *position.vector(),
            position.frame().clone(),
        ))
    }

    /// X 坐标
    pub fn x(&self) -> f64 {
        self.translation.x
    }

    /// Y 坐标
    pub fn y(&self) -> f64 {
        self.translation.y
    }

    /// Z 坐标
    pub fn z(&self) -> f64 {
        self.translation.z
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// 所在坐标系
    pub fn frame(&self) -> &FrameId {
        &self.frame
    }

    /// 位置部分
    pub fn position(&self) -> Position {
        Position::from_vector(self.translation, self.frame.clone())
    }

    /// 姿态部分
    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.rotation, self.frame.clone())
    }

    /// 在目标坐标系下表示同一个位姿
    pub fn in_frame<R>(&self, resolver: &R, target: &FrameId) -> Result<Pose, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        if self.frame == *target {
            return Ok(self.clone());
        }
        let transform = resolver.resolve_or_fail(&self.frame, target)?;
        transform.apply_to_pose(self)
    }

    /// 目标坐标系下的姿态部分
    pub fn orientation_in_frame<R>(
        &self,
        resolver: &R,
        target: &FrameId,
    ) -> Result<Orientation, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        self.orientation().in_frame(resolver, target)
    }

    /// 目标坐标系下的位置部分
    pub fn position_in_frame<R>(&self, resolver: &R, target: &FrameId) -> Result<Position, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        self.position().in_frame(resolver, target)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        write!(
            f,
            "Pose(pos=({:.3}, {:.3}, {:.3}), rpy=({:.3}, {:.3}, {:.3})) in {}",
            self.translation.x,
            self.translation.y,
            self.translation.z,
            roll,
            pitch,
            yaw,
            self.frame.name()
        )
    }
}

impl AbsDiffEq for Pose {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.frame == other.frame
            && self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl RelativeEq for Pose {
    fn default_max_relative() -> f64 {
        DEFAULT_EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.frame == other.frame
            && self
                .rotation
                .relative_eq(&other.rotation, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}
