//! Frame Registry - 坐标系图
//!
//! 保存坐标系之间已知的刚体变换，并解析任意两个已注册坐标系之间的变换。
//!
//! # 算法
//!
//! - **存储**: 邻接表 `source -> (neighbor -> RigidTransform)`
//! - **闭包**: 注册 `a -> b` 时同时写入推导出的 `b -> a`（逆变换），两者始终一致
//! - **查询**: 从 `source` 出发的广度优先搜索，得到跳数最少的路径
//! - **确定性**: 邻接表为 `BTreeMap`，邻居按数值 ID 升序展开，
//!   多条等长路径时总是选择同一条
//! - **组合**: 以路径第一条边作为当前位姿，依次交给后续边的 `apply_to_pose`
//!
//! # 所有权
//!
//! 没有全局单例。调用方显式持有 `FrameRegistry`，按引用传递给需要它的组件；
//! 需要跨线程共享时使用 [`SharedFrameRegistry`]。
//!
//! # 示例
//!
//! ```rust
//! use cubli_frames::{FrameId, FrameRegistry, RigidTransform};
//! use nalgebra::Vector3;
//!
//! let world = FrameId::new("WORLD");
//! let base = FrameId::new("BASE");
//! let tool = FrameId::new("TOOL");
//!
//! let mut registry = FrameRegistry::new();
//! registry
//!     .register(RigidTransform::from_translation(
//!         base.clone(),
//!         world.clone(),
//!         Vector3::new(1.0, 0.0, 0.0),
//!     ))
//!     .unwrap();
//! registry
//!     .register(RigidTransform::from_translation(
//!         tool.clone(),
//!         base.clone(),
//!         Vector3::new(0.0, 0.5, 0.0),
//!     ))
//!     .unwrap();
//!
//! let tool_to_world = registry.resolve_or_fail(&tool, &world).unwrap();
//! assert_eq!(tool_to_world.translation(), &Vector3::new(1.0, 0.5, 0.0));
//! ```

use crate::error::FrameError;
use crate::frame_id::FrameId;
use crate::transform::RigidTransform;
use crate::types::Pose;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, trace};

/// 变换查询接口
///
/// 带坐标系标签的值类型通过此接口获取变换，
/// 因此既可以直接使用 [`FrameRegistry`]，也可以使用加锁共享的 [`SharedFrameRegistry`]。
pub trait TransformResolver {
    /// 查询 `source -> target` 的变换，没有路径时返回 `None`
    fn resolve(&self, source: &FrameId, target: &FrameId) -> Option<RigidTransform>;

    /// 查询 `source -> target` 的变换，没有路径时返回 [`FrameError::Unreachable`]
    fn resolve_or_fail(
        &self,
        source: &FrameId,
        target: &FrameId,
    ) -> Result<RigidTransform, FrameError> {
        self.resolve(source, target)
            .ok_or_else(|| FrameError::unreachable(source, target))
    }
}

/// 坐标系图
#[derive(Debug, Clone, Default)]
pub struct FrameRegistry {
    /// 邻接表：源坐标系 -> (邻居 -> 源到邻居的直接变换)
    edges: BTreeMap<FrameId, BTreeMap<FrameId, RigidTransform>>,
}

impl FrameRegistry {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册直接变换 `transform.source() -> transform.target()`
    ///
    /// 同时写入逆变换。若这对坐标系（无论方向）之前已经有边，
    /// 两个方向都会被新值覆盖（重新标定语义，后写入者生效）。
    ///
    /// # 错误
    ///
    /// - 任一坐标系无效：[`FrameError::InvalidFrame`]
    /// - 源与目标相同：[`FrameError::SelfLoop`]
    pub fn register(&mut self, transform: RigidTransform) -> Result<(), FrameError> {
        let source = transform.source().clone();
        let target = transform.target().clone();

        for frame in [&source, &target] {
            if !frame.is_valid() {
                return Err(FrameError::InvalidFrame {
                    frame: frame.clone(),
                });
            }
        }
        if source == target {
            return Err(FrameError::SelfLoop { frame: source });
        }

        let inverse = transform.inverse();
        let replaced = self
            .edges
            .entry(source.clone())
            .or_default()
            .insert(target.clone(), transform)
            .is_some();
        self.edges
            .entry(target.clone())
            .or_default()
            .insert(source.clone(), inverse);

        if replaced {
            debug!("Replaced transform {} -> {}", source, target);
        } else {
            debug!("Registered transform {} -> {}", source, target);
        }
        Ok(())
    }

    /// 以位姿形式注册变换
    ///
    /// `pose` 描述 `source` 坐标系在 `pose.frame()` 中的位置与朝向，
    /// 目标坐标系即 `pose.frame()`。
    pub fn register_pose(&mut self, source: &FrameId, pose: &Pose) -> Result<(), FrameError> {
        self.register(RigidTransform::from_pose(source.clone(), pose))
    }

    /// 删除 `a` 与 `b` 之间的边（两个方向）
    ///
    /// 返回是否存在过这条边。
    pub fn unregister(&mut self, a: &FrameId, b: &FrameId) -> bool {
        let forward = self.remove_directed(a, b);
        let backward = self.remove_directed(b, a);
        if forward || backward {
            debug!("Unregistered transform {} <-> {}", a, b);
        }
        forward || backward
    }

    fn remove_directed(&mut self, from: &FrameId, to: &FrameId) -> bool {
        let Some(neighbors) = self.edges.get_mut(from) else {
            return false;
        };
        let removed = neighbors.remove(to).is_some();
        if neighbors.is_empty() {
            self.edges.remove(from);
        }
        removed
    }

    /// 清空所有边
    pub fn clear(&mut self) {
        debug!("Clearing {} directed transforms", self.edge_count());
        self.edges.clear();
    }

    /// 坐标系是否至少参与了一条边
    pub fn contains(&self, frame: &FrameId) -> bool {
        self.edges.contains_key(frame)
    }

    /// 已注册坐标系（按数值 ID 升序）
    pub fn frames(&self) -> impl Iterator<Item = &FrameId> {
        self.edges.keys()
    }

    pub fn frame_count(&self) -> usize {
        self.edges.len()
    }

    /// 有向边数量（每次注册贡献两条）
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 直接存储的边（不做路径搜索）
    pub fn direct(&self, source: &FrameId, target: &FrameId) -> Option<&RigidTransform> {
        self.edges.get(source)?.get(target)
    }

    /// 查询 `source -> target` 的变换
    ///
    /// `source == target` 时返回单位变换，即使该坐标系从未注册。
    pub fn resolve(&self, source: &FrameId, target: &FrameId) -> Option<RigidTransform> {
        self.resolve_or_fail(source, target).ok()
    }

    /// 查询 `source -> target` 的变换，没有路径时返回 [`FrameError::Unreachable`]
    pub fn resolve_or_fail(
        &self,
        source: &FrameId,
        target: &FrameId,
    ) -> Result<RigidTransform, FrameError> {
        if source == target {
            return Ok(RigidTransform::identity(source.clone()));
        }

        let path = self
            .find_path(source, target)
            .ok_or_else(|| FrameError::unreachable(source, target))?;
        trace!(
            "Resolved {} -> {} via {} hop(s)",
            source,
            target,
            path.len()
        );
        compose_path(source, &path)
    }

    /// 跳数最少的路径上依次经过的坐标系（包含首尾）
    pub fn path(&self, source: &FrameId, target: &FrameId) -> Option<Vec<FrameId>> {
        if source == target {
            return Some(vec![source.clone()]);
        }
        let edges = self.find_path(source, target)?;
        let mut frames = Vec::with_capacity(edges.len() + 1);
        frames.push(source.clone());
        frames.extend(edges.iter().map(|edge| edge.target().clone()));
        Some(frames)
    }

    /// 广度优先搜索，返回按 source -> target 顺序排列的边
    fn find_path(&self, source: &FrameId, target: &FrameId) -> Option<Vec<&RigidTransform>> {
        let mut queue = VecDeque::from([source]);
        let mut visited = BTreeSet::from([source]);
        let mut parents: BTreeMap<&FrameId, &FrameId> = BTreeMap::new();

        while let Some(current) = queue.pop_front() {
            if current == target {
                return self.reconstruct(&parents, target);
            }
            let Some(neighbors) = self.edges.get(current) else {
                continue;
            };
            for neighbor in neighbors.keys() {
                if visited.insert(neighbor) {
                    parents.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }

    fn reconstruct(
        &self,
        parents: &BTreeMap<&FrameId, &FrameId>,
        target: &FrameId,
    ) -> Option<Vec<&RigidTransform>> {
        let mut path = Vec::new();
        let mut node = target;
        while let Some(&parent) = parents.get(node) {
            path.push(self.direct(parent, node)?);
            node = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// 沿路径组合变换
///
/// 以第一条边作为 `n1` 下的位姿，依次交给后续每条边的 `apply_to_pose`。
fn compose_path(source: &FrameId, path: &[&RigidTransform]) -> Result<RigidTransform, FrameError> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(RigidTransform::identity(source.clone()));
    };
    let mut composed = first.as_pose();
    for edge in rest {
        composed = edge.apply_to_pose(&composed)?;
    }
    Ok(RigidTransform::from_pose(source.clone(), &composed))
}

impl TransformResolver for FrameRegistry {
    fn resolve(&self, source: &FrameId, target: &FrameId) -> Option<RigidTransform> {
        FrameRegistry::resolve(self, source, target)
    }

    fn resolve_or_fail(
        &self,
        source: &FrameId,
        target: &FrameId,
    ) -> Result<RigidTransform, FrameError> {
        FrameRegistry::resolve_or_fail(self, source, target)
    }
}

/// 跨线程共享的坐标系图
///
/// 单写多读：注册/删除/清空持有写锁，查询在一次 BFS 期间持有读锁。
/// 克隆只增加引用计数，所有克隆看到同一张图。
#[derive(Debug, Clone, Default)]
pub struct SharedFrameRegistry {
    inner: Arc<RwLock<FrameRegistry>>,
}

impl SharedFrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接管已有的图
    pub fn from_registry(registry: FrameRegistry) -> Self {
        SharedFrameRegistry {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register(&self, transform: RigidTransform) -> Result<(), FrameError> {
        self.inner.write().register(transform)
    }

    pub fn register_pose(&self, source: &FrameId, pose: &Pose) -> Result<(), FrameError> {
        self.inner.write().register_pose(source, pose)
    }

    pub fn unregister(&self, a: &FrameId, b: &FrameId) -> bool {
        self.inner.write().unregister(a, b)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// 读锁（多个查询需要看到同一版本的图时使用）
    pub fn read(&self) -> RwLockReadGuard<'_, FrameRegistry> {
        self.inner.read()
    }

    /// 写锁（批量注册时使用，期间所有读者被阻塞）
    pub fn write(&self) -> RwLockWriteGuard<'_, FrameRegistry> {
        self.inner.write()
    }

    /// 当前图的独立副本
    pub fn snapshot(&self) -> FrameRegistry {
        self.inner.read().clone()
    }
}

impl From<FrameRegistry> for SharedFrameRegistry {
    fn from(registry: FrameRegistry) -> Self {
        SharedFrameRegistry::from_registry(registry)
    }
}

impl TransformResolver for SharedFrameRegistry {
    fn resolve(&self, source: &FrameId, target: &FrameId) -> Option<RigidTransform> {
        self.inner.read().resolve(source, target)
    }

    fn resolve_or_fail(
        &self,
        source: &FrameId,
        target: &FrameId,
    ) -> Result<RigidTransform, FrameError> {
        self.inner.read().resolve_or_fail(source, target)
    }
}
