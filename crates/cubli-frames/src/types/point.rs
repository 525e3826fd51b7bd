//! 带名称的位置点

use super::Position;
use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::registry::TransformResolver;
use std::fmt;

/// 带名称的位置点（例如 "center_of_mass"、"contact_corner"）
///
/// 名称只用于识别和诊断，跨坐标系转换时保持不变。
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    position: Position,
    name: String,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, frame: FrameId, name: impl Into<String>) -> Self {
        Point {
            position: Position::new(x, y, z, frame),
            name: name.into(),
        }
    }

    pub fn from_position(position: Position, name: impl Into<String>) -> Self {
        Point {
            position,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn z(&self) -> f64 {
        self.position.z()
    }

    pub fn frame(&self) -> &FrameId {
        self.position.frame()
    }

    /// 在目标坐标系下表示同一个点，名称保持不变
    pub fn in_frame<R>(&self, resolver: &R, target: &FrameId) -> Result<Point, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        Ok(Point {
            position: self.position.in_frame(resolver, target)?,
            name: self.name.clone(),
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.position)
    }
}
