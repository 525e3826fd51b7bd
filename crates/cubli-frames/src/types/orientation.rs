//! 姿态
//!
//! 以旋转矩阵存储，提供 Roll-Pitch-Yaw 欧拉角的双向转换。

use super::DEFAULT_EPSILON;
use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::registry::TransformResolver;
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Matrix3, Rotation3};
use std::fmt;

/// 某个坐标系下的姿态
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    rotation: Rotation3<f64>,
    frame: FrameId,
}

impl Orientation {
    /// 从旋转创建
    pub fn new(rotation: Rotation3<f64>, frame: FrameId) -> Self {
        Orientation { rotation, frame }
    }

    /// 从 3x3 矩阵创建
    ///
    /// 不检查正交性：调用方必须保证矩阵正交且行列式为 +1。
    pub fn from_matrix_unchecked(matrix: Matrix3<f64>, frame: FrameId) -> Self {
        Orientation::new(Rotation3::from_matrix_unchecked(matrix), frame)
    }

    /// 无旋转
    pub fn identity(frame: FrameId) -> Self {
        Orientation::new(Rotation3::identity(), frame)
    }

    /// 从欧拉角创建（Roll-Pitch-Yaw，弧度）
    ///
    /// 组合顺序为 `R = Rz(yaw) * Ry(pitch) * Rx(roll)`。
    pub fn from_rpy(roll: f64, pitch: f64, yaw: f64, frame: FrameId) -> Self {
        Orientation::new(Rotation3::from_euler_angles(roll, pitch, yaw), frame)
    }

    /// 转换为欧拉角
    ///
    /// 返回 `(roll, pitch, yaw)`，pitch ∈ [-π/2, π/2]。
    /// 在 pitch = ±π/2（万向节锁）附近，roll 与 yaw 不唯一。
    pub fn rpy(&self) -> (f64, f64, f64) {
        self.rotation.euler_angles()
    }

    /// 旋转
    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    /// 旋转矩阵
    pub fn matrix(&self) -> &Matrix3<f64> {
        self.rotation.matrix()
    }

    /// 所在坐标系
    pub fn frame(&self) -> &FrameId {
        &self.frame
    }

    /// 在目标坐标系下表示同一个姿态
    pub fn in_frame<R>(&self, resolver: &R, target: &FrameId) -> Result<Orientation, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        if self.frame == *target {
            return Ok(self.clone());
        }
        let transform = resolver.resolve_or_fail(&self.frame, target)?;
        transform.apply_to_orientation(self)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (roll, pitch, yaw) = self.rpy();
        write!(
            f,
            "RPY({:.3}, {:.3}, {:.3}) in {}",
            roll,
            pitch,
            yaw,
            self.frame.name()
        )
    }
}

impl AbsDiffEq for Orientation {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.frame == other.frame && self.rotation.abs_diff_eq(&other.rotation, epsilon)
    }
}

impl RelativeEq for Orientation {
    fn default_max_relative() -> f64 {
        DEFAULT_EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.frame == other.frame
            && self
                .rotation
                .relative_eq(&other.rotation, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn body() -> FrameId {
        FrameId::new("BODY_TEST_FRAME")
    }

    #[test]
    fn test_identity_is_pure_data() {
        let o = Orientation::identity(body());
        assert_eq!(o.matrix(), &Matrix3::identity());
        assert_eq!(o.rpy(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_rpy_yaw_rotates_x_to_y() {
        let o = Orientation::from_rpy(0.0, 0.0, FRAC_PI_2, body());
        let rotated = o.rotation() * Vector3::x();
        assert_relative_eq!(rotated, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_rpy_composition_order() {
        let (roll, pitch, yaw) = (0.3, -0.2, 1.1);
        let o = Orientation::from_rpy(roll, pitch, yaw, body());
        let expected = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), pitch)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), roll);
        assert_relative_eq!(o.rotation(), &expected, epsilon = 1e-12);
    }

    #[test]
    fn test_rpy_roundtrip_away_from_gimbal_lock() {
        let o = Orientation::from_rpy(-PI / 3.0, 0.4, 2.5, body());
        let (roll, pitch, yaw) = o.rpy();
        assert_relative_eq!(roll, -PI / 3.0, epsilon = 1e-12);
        assert_relative_eq!(pitch, 0.4, epsilon = 1e-12);
        assert_relative_eq!(yaw, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_from_matrix_unchecked() {
        #[rustfmt::skip]
        let m = Matrix3::new(
            0.0, -1.0, 0.0,
            1.0,  0.0, 0.0,
            0.0,  0.0, 1.0,
        );
        let o = Orientation::from_matrix_unchecked(m, body());
        assert_eq!(o.matrix(), &m);
        assert_relative_eq!(o.rpy().2, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_equality() {
        let a = Orientation::from_rpy(0.1, 0.2, 0.3, body());
        assert_eq!(a, a.clone());
        assert_ne!(a, Orientation::from_rpy(0.1, 0.2, 0.3, FrameId::new("OTHER")));
    }
}
