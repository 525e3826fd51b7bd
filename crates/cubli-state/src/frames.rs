//! Cubli 使用的坐标系

use cubli_frames::{FrameId, well_known};
use std::sync::LazyLock;

/// Cubli 本体坐标系名称
pub const CUBLI_NAME: &str = "CUBLI";

static CUBLI: LazyLock<FrameId> = LazyLock::new(|| FrameId::new(CUBLI_NAME));

/// Cubli 常用坐标系
#[derive(Debug, Clone, Copy, Default)]
pub struct CubliFrames;

impl CubliFrames {
    /// 世界坐标系（与 [`well_known::world`] 相同）
    pub fn world() -> FrameId {
        well_known::world()
    }

    /// Cubli 本体坐标系
    pub fn cubli() -> FrameId {
        CUBLI.clone()
    }
}
