//! # Cubli Frames - 坐标系注册与变换解析
//!
//! 位置、姿态、位姿天然地表示在不同的命名坐标系中（世界、机器人基座、
//! 末端执行器、传感器、被观测物体）。本 crate 负责把一个量从测量时所在的
//! 坐标系转换到使用方需要的坐标系，即使这两个坐标系之间从未直接注册过关系。
//!
//! # 架构设计
//!
//! 从底层到高层：
//!
//! - **坐标系标识** (`frame_id`): 由唯一名称确定性推导的数值句柄
//! - **刚体变换** (`transform`): 旋转 + 平移，支持组合与求逆
//! - **坐标系图** (`registry`): 已知变换的有向图，BFS 求最短路径并组合变换
//! - **值类型** (`types`): 带坐标系标签的 Position / Orientation / Pose / Point
//! - **标定配置** (`calibration`): 从 TOML 加载静态变换
//!
//! # 快速开始
//!
//! ```rust
//! use cubli_frames::prelude::*;
//! use nalgebra::Vector3;
//!
//! let world = well_known::world();
//! let base = well_known::base();
//!
//! let mut registry = FrameRegistry::new();
//! registry
//!     .register(RigidTransform::from_translation(
//!         base.clone(),
//!         world.clone(),
//!         Vector3::new(1.0, 0.0, 0.0),
//!     ))
//!     .unwrap();
//!
//! let com = Position::new(0.0, 0.0, 0.2, base);
//! let com_in_world = com.in_frame(&registry, &world).unwrap();
//! assert_eq!(com_in_world.vector(), &Vector3::new(1.0, 0.0, 0.2));
//! ```

pub mod calibration;
mod error;
pub mod frame_id;
pub mod registry;
pub mod transform;
pub mod types;

// Prelude 模块
pub mod prelude;

pub use calibration::{CalibrationConfig, CalibrationEntry, CalibrationError};
pub use error::FrameError;
pub use frame_id::{FrameId, well_known};
pub use registry::{FrameRegistry, SharedFrameRegistry, TransformResolver};
pub use transform::RigidTransform;
pub use types::{DEFAULT_EPSILON, Orientation, Point, Pose, Position};
