//! 坐标系层错误类型定义

use crate::frame_id::FrameId;
use thiserror::Error;

/// 坐标系解析错误
///
/// 所有错误都是单次调用的确定性结果，不存在重试或部分失败语义。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// 两个坐标系之间不存在由已注册（或推导出的逆）变换构成的路径
    #[error("No transform path found between frames {from} and {to}")]
    Unreachable {
        /// 查询的源坐标系
        from: FrameId,
        /// 查询的目标坐标系
        to: FrameId,
    },

    /// 值或变换所在坐标系与期望的不一致
    ///
    /// 例如把 `tool` 坐标系下的位置交给 `base -> world` 的变换。
    #[error("Frame mismatch: expected {expected}, got {actual}")]
    FrameMismatch {
        /// 期望的坐标系
        expected: FrameId,
        /// 实际的坐标系
        actual: FrameId,
    },

    /// 试图注册无效坐标系（数值 ID 为 0）
    #[error("Invalid frame cannot be registered: {frame}")]
    InvalidFrame {
        /// 无效坐标系
        frame: FrameId,
    },

    /// 源坐标系与目标坐标系相同的边
    #[error("Refusing to register a transform from frame {frame} to itself")]
    SelfLoop {
        /// 重复的坐标系
        frame: FrameId,
    },
}

impl FrameError {
    /// 构造不可达错误
    pub(crate) fn unreachable(from: &FrameId, to: &FrameId) -> Self {
        FrameError::Unreachable {
            from: from.clone(),
            to: to.clone(),
        }
    }

    /// 构造坐标系不匹配错误
    pub(crate) fn mismatch(expected: &FrameId, actual: &FrameId) -> Self {
        FrameError::FrameMismatch {
            expected: expected.clone(),
            actual: actual.clone(),
        }
    }
}
