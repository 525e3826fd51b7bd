//! # 标定配置
//!
//! 从 TOML 文件加载静态标定变换并注册到坐标系图。
//!
//! ```toml
//! [[transforms]]
//! source = "TOOL_END_EFFECTOR_FRAME"
//! target = "BASE_ROBOT_FRAME"
//! translation = [0.0, 0.5, 0.0]
//! rpy = [0.0, 0.0, 1.5707963267948966]  # 可选，弧度，默认全 0
//! ```
//!
//! 条目按文件顺序注册，同一对坐标系出现多次时后者覆盖前者。
//! 这里只是输入配置，坐标系图本身没有保存/恢复格式。

use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::registry::FrameRegistry;
use crate::transform::RigidTransform;
use nalgebra::{Rotation3, Vector3};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// 标定配置错误
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// 读取文件失败
    #[error("Failed to read calibration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 解析失败
    #[error("Failed to parse calibration TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// 条目内容非法
    #[error("Invalid calibration entry #{index}: {reason}")]
    InvalidEntry {
        /// 条目序号（从 0 开始）
        index: usize,
        /// 原因
        reason: String,
    },

    /// 注册失败
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// 标定配置
///
/// 未知字段会导致解析失败，拼错的键不会被静默忽略。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationConfig {
    /// 静态变换列表
    #[serde(default)]
    pub transforms: Vec<CalibrationEntry>,
}

/// 单条静态变换
///
/// 描述 `source` 坐标系在 `target` 坐标系中的位置与朝向。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationEntry {
    /// 源坐标系名称
    pub source: String,

    /// 目标坐标系名称
    pub target: String,

    /// 平移（米）
    #[serde(default)]
    pub translation: [f64; 3],

    /// 欧拉角 Roll-Pitch-Yaw（弧度）
    #[serde(default)]
    pub rpy: [f64; 3],
}

impl CalibrationEntry {
    /// 转换为刚体变换
    pub fn to_transform(&self) -> RigidTransform {
        let [x, y, z] = self.translation;
        let [roll, pitch, yaw] = self.rpy;
        RigidTransform::new(
            FrameId::new(&self.source),
            FrameId::new(&self.target),
            Rotation3::from_euler_angles(roll, pitch, yaw),
            Vector3::new(x, y, z),
        )
    }

    fn validate(&self, index: usize) -> Result<(), CalibrationError> {
        let invalid = |reason: &str| CalibrationError::InvalidEntry {
            index,
            reason: reason.to_string(),
        };

        if self.source.trim().is_empty() || self.target.trim().is_empty() {
            return Err(invalid("frame names must not be empty"));
        }
        if self.source.trim() != self.source || self.target.trim() != self.target {
            return Err(invalid("frame names must not have surrounding whitespace"));
        }
        if self.source == self.target {
            return Err(invalid("source and target must differ"));
        }
        if !self.translation.iter().all(|v| v.is_finite()) {
            return Err(invalid("translation must be finite"));
        }
        if !self.rpy.iter().all(|v| v.is_finite()) {
            return Err(invalid("rpy must be finite"));
        }
        Ok(())
    }
}

impl CalibrationConfig {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, CalibrationError> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CalibrationError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            "Loaded {} calibration transform(s) from {}",
            config.transforms.len(),
            path.as_ref().display()
        );
        Ok(config)
    }

    /// 检查所有条目
    pub fn validate(&self) -> Result<(), CalibrationError> {
        self.transforms
            .iter()
            .enumerate()
            .try_for_each(|(index, entry)| entry.validate(index))
    }

    /// 注册到坐标系图，返回注册的条目数
    ///
    /// 先检查全部条目，任何一条非法时图保持不变。
    pub fn apply(&self, registry: &mut FrameRegistry) -> Result<usize, CalibrationError> {
        self.validate()?;

        let mut seen = BTreeSet::new();
        for entry in &self.transforms {
            let transform = entry.to_transform();
            let pair = if transform.source() < transform.target() {
                (transform.source().clone(), transform.target().clone())
            } else {
                (transform.target().clone(), transform.source().clone())
            };
            if !seen.insert(pair) {
                warn!(
                    "Calibration entry {} -> {} overrides an earlier entry for the same frame pair",
                    entry.source, entry.target
                );
            }
            registry.register(transform)?;
        }
        Ok(self.transforms.len())
    }
}
