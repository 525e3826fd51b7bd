//! # Cubli State - 立方体机器人状态簿记
//!
//! 保存 Cubli 的质心、着地角点和本体姿态（各自带有测量时的坐标系），
//! 并在任意坐标系下返回它们。坐标系转换全部委托给
//! [`cubli_frames`] 的坐标系图，本 crate 不做任何动力学或控制计算。

mod frames;
mod state;

pub use frames::CubliFrames;
pub use state::CubliState;
