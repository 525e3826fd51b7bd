//! 三维位置

use super::DEFAULT_EPSILON;
use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::registry::TransformResolver;
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Vector3;
use std::fmt;

/// 某个坐标系下的三维位置（米）
///
/// 需要在其它坐标系下的坐标时，使用 [`Position::in_frame`]。
///
/// # 示例
///
/// ```rust
/// use cubli_frames::{FrameId, FrameRegistry, Position, RigidTransform};
/// use nalgebra::Vector3;
///
/// let world = FrameId::new("WORLD");
/// let base = FrameId::new("BASE");
///
/// let mut registry = FrameRegistry::new();
/// registry
///     .register(RigidTransform::from_translation(
///         base.clone(),
///         world.clone(),
///         Vector3::new(1.0, 0.0, 0.0),
///     ))
///     .unwrap();
///
/// let p = Position::new(0.5, 0.0, 0.0, base);
/// let in_world = p.in_frame(&registry, &world).unwrap();
/// assert_eq!(in_world.x(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    vector: Vector3<f64>,
    frame: FrameId,
}

impl Position {
    /// 从分量创建
    pub fn new(x: f64, y: f64, z: f64, frame: FrameId) -> Self {
        Position {
            vector: Vector3::new(x, y, z),
            frame,
        }
    }

    /// 从向量创建
    pub fn from_vector(vector: Vector3<f64>, frame: FrameId) -> Self {
        Position { vector, frame }
    }

    /// 坐标系原点
    pub fn origin(frame: FrameId) -> Self {
        Position::from_vector(Vector3::zeros(), frame)
    }

    /// X 坐标（相对当前坐标系）
    pub fn x(&self) -> f64 {
        self.vector.x
    }

    /// Y 坐标（相对当前坐标系）
    pub fn y(&self) -> f64 {
        self.vector.y
    }

    /// Z 坐标（相对当前坐标系）
    pub fn z(&self) -> f64 {
        self.vector.z
    }

    /// 当前坐标系下的位置向量
    pub fn vector(&self) -> &Vector3<f64> {
        &self.vector
    }

    /// 所在坐标系
    pub fn frame(&self) -> &FrameId {
        &self.frame
    }

    /// 到另一个位置的距离（两者必须在同一坐标系）
    pub fn distance_to(&self, other: &Position) -> Result<f64, FrameError> {
        if self.frame != other.frame {
            return Err(FrameError::mismatch(&self.frame, &other.frame));
        }
        Ok((self.vector - other.vector).norm())
    }

    /// 在目标坐标系下表示同一个位置
    ///
    /// 已经在目标坐标系时直接返回副本，不查询 resolver。
    ///
    /// # 错误
    ///
    /// 两个坐标系之间没有路径时返回 [`FrameError::Unreachable`]。
    pub fn in_frame<R>(&self, resolver: &R, target: &FrameId) -> Result<Position, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        if self.frame == *target {
            return Ok(self.clone());
        }
        let transform = resolver.resolve_or_fail(&self.frame, target)?;
        transform.apply_to_position(self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}) in {}",
            self.vector.x,
            self.vector.y,
            self.vector.z,
            self.frame.name()
        )
    }
}

impl AbsDiffEq for Position {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.frame == other.frame && self.vector.abs_diff_eq(&other.vector, epsilon)
    }
}

impl RelativeEq for Position {
    fn default_max_relative() -> f64 {
        DEFAULT_EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.frame == other.frame
            && self
                .vector
                .relative_eq(&other.vector, epsilon, max_relative)
    }
}
