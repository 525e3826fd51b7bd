//! Prelude 模块
//!
//! 常用类型的便捷导入：
//!
//! ```rust
//! use cubli_frames::prelude::*;
//! ```

pub use crate::error::FrameError;
pub use crate::frame_id::{FrameId, well_known};
pub use crate::registry::{FrameRegistry, SharedFrameRegistry, TransformResolver};
pub use crate::transform::RigidTransform;
pub use crate::types::{Orientation, Point, Pose, Position};
