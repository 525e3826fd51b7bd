//! Cubli 状态

use crate::frames::CubliFrames;
use cubli_frames::{FrameError, FrameId, Orientation, Point, Pose, Position, TransformResolver};
use tracing::trace;

const CENTER_OF_MASS: &str = "center_of_mass";
const CONTACT_CORNER: &str = "contact_corner";

/// Cubli 状态
///
/// 每个量保存在测量时所在的坐标系中，查询时才转换到目标坐标系。
/// 默认状态全部位于世界坐标系：位置为零，姿态为单位旋转，
/// 因此在世界坐标系下查询不需要任何已注册的变换。
#[derive(Debug, Clone, PartialEq)]
pub struct CubliState {
    center_of_mass: Point,
    contact_corner: Point,
    orientation: Orientation,
}

impl Default for CubliState {
    fn default() -> Self {
        let world = CubliFrames::world();
        CubliState {
            center_of_mass: Point::from_position(Position::origin(world.clone()), CENTER_OF_MASS),
            contact_corner: Point::from_position(Position::origin(world.clone()), CONTACT_CORNER),
            orientation: Orientation::identity(world),
        }
    }
}

impl CubliState {
    pub fn new(center_of_mass: Position, contact_corner: Position, orientation: Orientation) -> Self {
        CubliState {
            center_of_mass: Point::from_position(center_of_mass, CENTER_OF_MASS),
            contact_corner: Point::from_position(contact_corner, CONTACT_CORNER),
            orientation,
        }
    }

    /// 更新质心测量值
    pub fn set_center_of_mass(&mut self, position: Position) {
        trace!("center of mass <- {}", position);
        self.center_of_mass = Point::from_position(position, CENTER_OF_MASS);
    }

    /// 更新着地角点测量值
    pub fn set_contact_corner(&mut self, position: Position) {
        trace!("contact corner <- {}", position);
        self.contact_corner = Point::from_position(position, CONTACT_CORNER);
    }

    /// 更新本体姿态测量值
    pub fn set_orientation(&mut self, orientation: Orientation) {
        trace!("orientation <- {}", orientation);
        self.orientation = orientation;
    }

    /// 测量时的质心（未转换）
    pub fn measured_center_of_mass(&self) -> &Point {
        &self.center_of_mass
    }

    /// 测量时的着地角点（未转换）
    pub fn measured_contact_corner(&self) -> &Point {
        &self.contact_corner
    }

    /// 测量时的姿态（未转换）
    pub fn measured_orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// 目标坐标系下的质心
    pub fn center_of_mass<R>(&self, resolver: &R, target: &FrameId) -> Result<Position, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        Ok(self.center_of_mass.in_frame(resolver, target)?.position().clone())
    }

    /// 目标坐标系下的着地角点
    pub fn contact_corner<R>(&self, resolver: &R, target: &FrameId) -> Result<Position, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        Ok(self.contact_corner.in_frame(resolver, target)?.position().clone())
    }

    /// 目标坐标系下的本体姿态
    pub fn orientation<R>(&self, resolver: &R, target: &FrameId) -> Result<Orientation, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        self.orientation.in_frame(resolver, target)
    }

    /// 目标坐标系下的 Cubli 位姿（本体姿态 + 质心位置）
    pub fn cubli_pose<R>(&self, resolver: &R, target: &FrameId) -> Result<Pose, FrameError>
    where
        R: TransformResolver + ?Sized,
    {
        let orientation = self.orientation(resolver, target)?;
        let center_of_mass = self.center_of_mass(resolver, target)?;
        Pose::from_parts(&orientation, &center_of_mass)
    }
}
