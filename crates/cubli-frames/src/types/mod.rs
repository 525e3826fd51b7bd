//! 带坐标系标签的值类型
//!
//! 数值负载只有和它所在的坐标系放在一起才有意义：
//!
//! - [`Position`]: 三维位置
//! - [`Orientation`]: 姿态（旋转矩阵）
//! - [`Pose`]: 位置 + 姿态
//! - [`Point`]: 带名称的位置
//!
//! 所有类型都是不可变值，`in_frame()` 返回新的实例，原值不会被修改。
//!
//! # 相等性
//!
//! `==` 是逐位精确比较（坐标系标签 + 数值负载），不带容差。
//! 多跳路径组合得到的结果通常无法与直接注册的变换逐位相等，
//! 需要容差比较时使用 `approx` 的 `AbsDiffEq` / `RelativeEq`
//! （默认容差 [`DEFAULT_EPSILON`]），坐标系标签仍然必须完全相同。

mod orientation;
mod point;
mod pose;
mod position;

pub use orientation::Orientation;
pub use point::Point;
pub use pose::Pose;
pub use position::Position;

/// 容差比较的默认阈值
pub const DEFAULT_EPSILON: f64 = 1e-9;
