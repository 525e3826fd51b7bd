//! 刚体变换
//!
//! `RigidTransform` 描述从源坐标系到目标坐标系的映射：
//!
//! ```text
//! p_target = R * p_source + t
//! R_target = R * R_source
//! ```
//!
//! 逆变换：
//!
//! ```text
//! T⁻¹ = { source: target, target: source, R: Rᵀ, t: -Rᵀ * t }
//! ```
//!
//! # 前置条件
//!
//! 旋转必须正交且行列式为 +1，平移必须有限。这是调用方的前置条件，运行时不检查。

use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::types::{DEFAULT_EPSILON, Orientation, Point, Pose, Position};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix4, Rotation3, Vector3};
use std::fmt;

/// 源坐标系 -> 目标坐标系的刚体变换
///
/// 不可变值类型：更新关系需要重新注册，而不是修改已有变换。
///
/// `==` 是结构化的逐位精确比较（源、目标、旋转、平移）。
#[derive(Debug, Clone, PartialEq)]
pub struct RigidTransform {
    source: FrameId,
    target: FrameId,
    rotation: Rotation3<f64>,
    translation: Vector3<f64>,
}

impl RigidTransform {
    /// 创建变换
    pub fn new(
        source: FrameId,
        target: FrameId,
        rotation: Rotation3<f64>,
        translation: Vector3<f64>,
    ) -> Self {
        RigidTransform {
            source,
            target,
            rotation,
            translation,
        }
    }

    /// 坐标系到自身的单位变换
    pub fn identity(frame: FrameId) -> Self {
        RigidTransform::new(
            frame.clone(),
            frame,
            Rotation3::identity(),
            Vector3::zeros(),
        )
    }

    /// 纯平移变换
    pub fn from_translation(source: FrameId, target: FrameId, translation: Vector3<f64>) -> Self {
        RigidTransform::new(source, target, Rotation3::identity(), translation)
    }

    /// 纯旋转变换
    pub fn from_rotation(source: FrameId, target: FrameId, rotation: Rotation3<f64>) -> Self {
        RigidTransform::new(source, target, rotation, Vector3::zeros())
    }

    /// 由目标坐标系下的位姿创建
    ///
    /// `pose` 描述源坐标系原点和坐标轴在 `pose.frame()` 中的位置与朝向，
    /// 因此变换的目标坐标系就是位姿所在的坐标系。
    pub fn from_pose(source: FrameId, pose: &Pose) -> Self {
        RigidTransform::new(
            source,
            pose.frame().clone(),
            *pose.rotation(),
            *pose.translation(),
        )
    }

    pub fn source(&self) -> &FrameId {
        &self.source
    }

    pub fn target(&self) -> &FrameId {
        &self.target
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// 4x4 齐次变换矩阵
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut m = self.rotation.to_homogeneous();
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }

    /// 变换裸向量：`R * v + t`
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * v + self.translation
    }

    /// 变换裸旋转：`R * r`
    pub fn transform_rotation(&self, r: &Rotation3<f64>) -> Rotation3<f64> {
        self.rotation * r
    }

    /// 把源坐标系下的位置转换到目标坐标系
    ///
    /// # 错误
    ///
    /// 位置不在本变换的源坐标系时返回 [`FrameError::FrameMismatch`]。
    pub fn apply_to_position(&self, position: &Position) -> Result<Position, FrameError> {
        self.check_source(position.frame())?;
        Ok(Position::from_vector(
            self.transform_vector(position.vector()),
            self.target.clone(),
        ))
    }

    /// 把源坐标系下的姿态转换到目标坐标系
    pub fn apply_to_orientation(
        &self,
        orientation: &Orientation,
    ) -> Result<Orientation, FrameError> {
        self.check_source(orientation.frame())?;
        Ok(Orientation::new(
            self.transform_rotation(orientation.rotation()),
            self.target.clone(),
        ))
    }

    /// 把源坐标系下的位姿转换到目标坐标系（同时作用于姿态和位置）
    pub fn apply_to_pose(&self, pose: &Pose) -> Result<Pose, FrameError> {
        self.check_source(pose.frame())?;
        Ok(Pose::new(
            self.transform_rotation(pose.rotation()),
            self.transform_vector(pose.translation()),
            self.target.clone(),
        ))
    }

    /// 把源坐标系下的命名点转换到目标坐标系
    pub fn apply_to_point(&self, point: &Point) -> Result<Point, FrameError> {
        Ok(Point::from_position(
            self.apply_to_position(point.position())?,
            point.name(),
        ))
    }

    /// 逆变换
    pub fn inverse(&self) -> RigidTransform {
        let rotation = self.rotation.inverse();
        let translation = -(rotation * self.translation);
        RigidTransform::new(
            self.target.clone(),
            self.source.clone(),
            rotation,
            translation,
        )
    }

    /// 先应用 `self` 再应用 `next`，得到 `self.source -> next.target` 的变换
    ///
    /// 等价于把 `self` 视为 `self.target` 下的位姿，再交给 `next.apply_to_pose`。
    ///
    /// # 错误
    ///
    /// `self.target != next.source` 时返回 [`FrameError::FrameMismatch`]。
    pub fn then(&self, next: &RigidTransform) -> Result<RigidTransform, FrameError> {
        let composed = next.apply_to_pose(&self.as_pose())?;
        Ok(RigidTransform::from_pose(self.source.clone(), &composed))
    }

    /// 以目标坐标系下位姿的形式表示本变换
    pub fn as_pose(&self) -> Pose {
        Pose::new(self.rotation, self.translation, self.target.clone())
    }

    /// 容差比较（源、目标必须相同）
    pub fn approx_eq(&self, other: &RigidTransform, epsilon: f64) -> bool {
        self.abs_diff_eq(other, epsilon)
    }

    fn check_source(&self, frame: &FrameId) -> Result<(), FrameError> {
        if *frame != self.source {
            return Err(FrameError::mismatch(&self.source, frame));
        }
        Ok(())
    }
}

impl fmt::Display for RigidTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        write!(
            f,
            "{} -> {}: t=({:.3}, {:.3}, {:.3}), rpy=({:.3}, {:.3}, {:.3})",
            self.source.name(),
            self.target.name(),
            self.translation.x,
            self.translation.y,
            self.translation.z,
            roll,
            pitch,
            yaw
        )
    }
}

impl AbsDiffEq for RigidTransform {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl RelativeEq for RigidTransform {
    fn default_max_relative() -> f64 {
        DEFAULT_EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.source == other.source
            && self.target == other.target
            && self
                .rotation
                .relative_eq(&other.rotation, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}
