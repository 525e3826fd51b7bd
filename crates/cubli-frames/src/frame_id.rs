//! 坐标系标识
//!
//! `FrameId` 是坐标系的数值句柄，由全局唯一的名称确定性地推导得出。
//!
//! # 设计要点
//!
//! - **确定性**: 数值 ID 取名称 SHA-256 摘要的前 8 字节（大端），跨进程、跨平台稳定
//! - **仅按数值比较**: 相等、排序、哈希都只看数值 ID，名称只用于诊断输出
//! - **保留 0**: 数值 0 是无效坐标系，永远不会由名称推导得到
//!
//! # 哈希碰撞
//!
//! 两个不同名称理论上可能得到相同的数值 ID，此时两者不可区分。
//! 本模块不检测碰撞，调用方需使用全局唯一的名称（参见 [`well_known`]）。
//!
//! # 示例
//!
//! ```rust
//! use cubli_frames::FrameId;
//!
//! let base = FrameId::new("BASE_ROBOT_FRAME");
//! assert_eq!(base, FrameId::new("BASE_ROBOT_FRAME"));
//! assert!(base.is_valid());
//! assert!(!FrameId::default().is_valid());
//! ```

use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 无效坐标系的诊断名称
const INVALID_NAME: &str = "INVALID";

/// 坐标系标识
///
/// 克隆开销很小（名称通过 `Arc<str>` 共享）。
#[derive(Clone)]
pub struct FrameId {
    value: u64,
    name: Arc<str>,
}

impl FrameId {
    /// 从全局唯一名称创建坐标系标识
    pub fn new(unique_name: impl AsRef<str>) -> Self {
        let name = unique_name.as_ref();
        FrameId {
            value: hash_name(name),
            name: Arc::from(name),
        }
    }

    /// 从原始数值 ID 创建（测试或高级用法）
    ///
    /// 传入 0 得到的是无效坐标系。
    pub fn from_raw(value: u64, debug_name: impl AsRef<str>) -> Self {
        FrameId {
            value,
            name: Arc::from(debug_name.as_ref()),
        }
    }

    /// 无效坐标系（数值 ID 为 0）
    pub fn invalid() -> Self {
        FrameId {
            value: 0,
            name: Arc::from(INVALID_NAME),
        }
    }

    /// 数值 ID
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// 诊断名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 是否为有效坐标系
    pub const fn is_valid(&self) -> bool {
        self.value != 0
    }

    /// 十六进制表示，例如 `0x00000000000004d2`
    pub fn hex(&self) -> String {
        format!("0x{:016x}", self.value)
    }
}

/// 名称 -> 数值 ID
fn hash_name(name: &str) -> u64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    match u64::from_be_bytes(bytes) {
        // 0 保留给无效坐标系
        0 => 1,
        value => value,
    }
}

impl Default for FrameId {
    fn default() -> Self {
        FrameId::invalid()
    }
}

impl PartialEq for FrameId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for FrameId {}

impl PartialOrd for FrameId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrameId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for FrameId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({}, {})", self.name, self.hex())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex())
    }
}

/// 常用坐标系
///
/// 只定义一次并复用，名称保证全局唯一以降低碰撞概率。
pub mod well_known {
    use super::FrameId;
    use std::sync::LazyLock;

    /// 世界坐标系名称
    pub const WORLD_NAME: &str = "WORLD_COORDINATE_FRAME_ROOT";
    /// 机器人基座坐标系名称
    pub const BASE_NAME: &str = "BASE_ROBOT_FRAME";
    /// 末端执行器坐标系名称
    pub const TOOL_NAME: &str = "TOOL_END_EFFECTOR_FRAME";
    /// 相机光学坐标系名称
    pub const CAMERA_NAME: &str = "CAMERA_OPTICAL_FRAME";
    /// 传感器安装坐标系名称
    pub const SENSOR_NAME: &str = "SENSOR_MOUNTING_FRAME";

    static WORLD: LazyLock<FrameId> = LazyLock::new(|| FrameId::new(WORLD_NAME));
    static BASE: LazyLock<FrameId> = LazyLock::new(|| FrameId::new(BASE_NAME));
    static TOOL: LazyLock<FrameId> = LazyLock::new(|| FrameId::new(TOOL_NAME));
    static CAMERA: LazyLock<FrameId> = LazyLock::new(|| FrameId::new(CAMERA_NAME));
    static SENSOR: LazyLock<FrameId> = LazyLock::new(|| FrameId::new(SENSOR_NAME));

    /// 世界坐标系
    pub fn world() -> FrameId {
        WORLD.clone()
    }

    /// 机器人基座坐标系
    pub fn base() -> FrameId {
        BASE.clone()
    }

    /// 末端执行器坐标系
    pub fn tool() -> FrameId {
        TOOL.clone()
    }

    /// 相机光学坐标系
    pub fn camera() -> FrameId {
        CAMERA.clone()
    }

    /// 传感器安装坐标系
    pub fn sensor() -> FrameId {
        SENSOR.clone()
    }
}
