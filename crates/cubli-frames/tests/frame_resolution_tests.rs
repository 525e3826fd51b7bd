//! 坐标系解析集成测试
//!
//! 覆盖注册、多跳组合、覆盖语义、不可达错误以及值类型的 `in_frame`。

use approx::{assert_abs_diff_eq, assert_relative_eq};
use cubli_frames::prelude::*;
use nalgebra::{Matrix3, Rotation3, Vector3};
use std::f64::consts::FRAC_PI_2;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// world <- base <- tool 链
///
/// - base 原点位于 world 的 (1, 0, 0)
/// - tool 原点位于 base 的 (0, 0.5, 0)
fn arm_chain() -> (FrameRegistry, FrameId, FrameId, FrameId) {
    init_tracing();
    let world = FrameId::new("WORLD_TEST_FRAME");
    let base = FrameId::new("BASE_TEST_FRAME");
    let tool = FrameId::new("TOOL_TEST_FRAME");

    let mut registry = FrameRegistry::new();
    registry
        .register(RigidTransform::from_translation(
            base.clone(),
            world.clone(),
            Vector3::new(1.0, 0.0, 0.0),
        ))
        .unwrap();
    registry
        .register(RigidTransform::from_translation(
            tool.clone(),
            base.clone(),
            Vector3::new(0.0, 0.5, 0.0),
        ))
        .unwrap();
    (registry, world, base, tool)
}

#[test]
fn test_self_transform_identity_for_any_frame() {
    let (registry, world, _, _) = arm_chain();
    let unregistered = FrameId::new("NEVER_REGISTERED");

    for frame in [world, unregistered] {
        let t = registry.resolve(&frame, &frame).unwrap();
        assert_eq!(t.rotation(), &Rotation3::identity());
        assert_eq!(t.translation(), &Vector3::zeros());
        assert_eq!(t.source(), &frame);
        assert_eq!(t.target(), &frame);
    }
}

#[test]
fn test_inverse_consistency() {
    let (mut registry, world, base, _) = arm_chain();
    let t = RigidTransform::new(
        base.clone(),
        world.clone(),
        Rotation3::from_euler_angles(0.2, -0.4, 0.9),
        Vector3::new(0.3, -1.2, 2.0),
    );
    registry.register(t.clone()).unwrap();

    assert_eq!(registry.resolve(&base, &world).unwrap(), t);
    assert_relative_eq!(registry.resolve(&world, &base).unwrap(), t.inverse());
}

#[test]
fn test_multi_hop_composition() {
    let (registry, world, _, tool) = arm_chain();
    let t = registry.resolve_or_fail(&tool, &world).unwrap();
    assert_eq!(t.source(), &tool);
    assert_eq!(t.target(), &world);
    assert_relative_eq!(t.translation(), &Vector3::new(1.0, 0.5, 0.0));
}

#[test]
fn test_position_round_trip() {
    let (registry, world, _, tool) = arm_chain();
    let original = Position::new(0.25, -0.75, 1.5, tool.clone());

    let in_world = original.in_frame(&registry, &world).unwrap();
    assert_eq!(in_world.frame(), &world);
    let back = in_world.in_frame(&registry, &tool).unwrap();
    assert_abs_diff_eq!(back, original);
}

#[test]
fn test_in_frame_fast_path_needs_no_registry() {
    let empty = FrameRegistry::new();
    let frame = FrameId::new("ANY");
    let p = Position::new(1.0, 2.0, 3.0, frame.clone());
    assert_eq!(p.in_frame(&empty, &frame).unwrap(), p);

    let o = Orientation::from_rpy(0.1, 0.2, 0.3, frame.clone());
    assert_eq!(o.in_frame(&empty, &frame).unwrap(), o);

    let pose = Pose::from_translation(1.0, 2.0, 3.0, frame.clone());
    assert_eq!(pose.in_frame(&empty, &frame).unwrap(), pose);
}

#[test]
fn test_unreachable_frame_is_an_error_not_zero() {
    let (registry, world, _, _) = arm_chain();
    let island = FrameId::new("ISLAND_FRAME");

    assert!(registry.resolve(&world, &island).is_none());
    let err = registry.resolve_or_fail(&world, &island).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("WORLD_TEST_FRAME"), "{}", msg);
    assert!(msg.contains("ISLAND_FRAME"), "{}", msg);
    assert!(msg.contains(&island.hex()), "{}", msg);

    let p = Position::origin(island.clone());
    assert!(matches!(
        p.in_frame(&registry, &world),
        Err(FrameError::Unreachable { .. })
    ));
}

#[test]
fn test_overwrite_semantics() {
    let (mut registry, world, base, tool) = arm_chain();
    let recalibrated = RigidTransform::new(
        base.clone(),
        world.clone(),
        Rotation3::from_euler_angles(0.0, 0.0, FRAC_PI_2),
        Vector3::new(2.0, 0.0, 0.0),
    );
    registry.register(recalibrated.clone()).unwrap();

    assert_eq!(registry.resolve(&base, &world).unwrap(), recalibrated);
    assert_eq!(
        registry.resolve(&world, &base).unwrap(),
        recalibrated.inverse()
    );
    assert_eq!(registry.edge_count(), 4);

    // 多跳结果也只反映新的标定
    let tool_origin = Position::origin(tool);
    let in_world = tool_origin.in_frame(&registry, &world).unwrap();
    assert_abs_diff_eq!(in_world, Position::new(1.5, 0.0, 0.0, world), epsilon = 1e-12);
}

#[test]
fn test_rotation_only_transform() {
    init_tracing();
    let world = FrameId::new("WORLD_TEST_FRAME");
    let body = FrameId::new("BODY_TEST_FRAME");
    #[rustfmt::skip]
    let rotation = Rotation3::from_matrix_unchecked(Matrix3::new(
        0.0, -1.0, 0.0,
        1.0,  0.0, 0.0,
        0.0,  0.0, 1.0,
    ));
    let mut registry = FrameRegistry::new();
    registry
        .register(RigidTransform::from_rotation(body.clone(), world.clone(), rotation))
        .unwrap();

    let x_axis = Position::new(1.0, 0.0, 0.0, body.clone());
    let rotated = x_axis.in_frame(&registry, &world).unwrap();
    assert_abs_diff_eq!(rotated, Position::new(0.0, 1.0, 0.0, world.clone()), epsilon = 1e-10);

    let back = rotated.in_frame(&registry, &body).unwrap();
    assert_abs_diff_eq!(back, x_axis, epsilon = 1e-10);
}

#[test]
fn test_pose_and_orientation_in_frame() {
    init_tracing();
    let world = FrameId::new("WORLD_TEST_FRAME");
    let body = FrameId::new("BODY_TEST_FRAME");
    let mut registry = FrameRegistry::new();
    registry
        .register_pose(
            &body,
            &Pose::new(
                Rotation3::from_euler_angles(0.0, 0.0, FRAC_PI_2),
                Vector3::new(0.0, 0.0, 1.0),
                world.clone(),
            ),
        )
        .unwrap();

    let pose_in_body = Pose::from_translation(1.0, 0.0, 0.0, body.clone());
    let pose_in_world = pose_in_body.in_frame(&registry, &world).unwrap();
    assert_abs_diff_eq!(pose_in_world.translation(), &Vector3::new(0.0, 1.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(pose_in_world.orientation().rpy().2, FRAC_PI_2, epsilon = 1e-12);

    let o = Orientation::identity(world.clone());
    let in_body = o.in_frame(&registry, &body).unwrap();
    assert_relative_eq!(in_body.rpy().2, -FRAC_PI_2, epsilon = 1e-12);
}

/// world <- base <- tool，两跳都绕 Z 轴转 90°
///
/// - base 原点位于 world 的 (1, 0, 0)
/// - tool 原点位于 base 的 (0, 0.5, 0)
fn rotated_chain() -> (FrameRegistry, FrameId, FrameId, FrameId) {
    init_tracing();
    let world = FrameId::new("WORLD_TEST_FRAME");
    let base = FrameId::new("BASE_TEST_FRAME");
    let tool = FrameId::new("TOOL_TEST_FRAME");
    let quarter_turn = Rotation3::from_euler_angles(0.0, 0.0, FRAC_PI_2);

    let mut registry = FrameRegistry::new();
    registry
        .register_pose(
            &base,
            &Pose::new(quarter_turn, Vector3::new(1.0, 0.0, 0.0), world.clone()),
        )
        .unwrap();
    registry
        .register_pose(
            &tool,
            &Pose::new(quarter_turn, Vector3::new(0.0, 0.5, 0.0), base.clone()),
        )
        .unwrap();
    (registry, world, base, tool)
}

#[test]
fn test_orientation_in_frame_over_two_rotated_hops() {
    let (registry, world, _, tool) = rotated_chain();

    let o = Orientation::from_rpy(0.0, 0.0, FRAC_PI_2, tool.clone());
    let in_world = o.in_frame(&registry, &world).unwrap();
    assert_eq!(in_world.frame(), &world);
    // 90° + 90° + 90° = 270° ≡ -90°
    assert_abs_diff_eq!(
        in_world,
        Orientation::from_rpy(0.0, 0.0, -FRAC_PI_2, world.clone()),
        epsilon = 1e-12
    );

    let back = in_world.in_frame(&registry, &tool).unwrap();
    assert_abs_diff_eq!(back, o, epsilon = 1e-12);
}

#[test]
fn test_pose_in_frame_over_two_rotated_hops() {
    let (registry, world, _, tool) = rotated_chain();

    let pose = Pose::new(
        Rotation3::from_euler_angles(0.0, 0.0, FRAC_PI_2),
        Vector3::new(1.0, 0.0, 0.0),
        tool.clone(),
    );
    let in_world = pose.in_frame(&registry, &world).unwrap();
    // tool (1,0,0) -> base (0,1.5,0) -> world (-0.5,0,0)
    assert_abs_diff_eq!(
        in_world,
        Pose::new(
            Rotation3::from_euler_angles(0.0, 0.0, -FRAC_PI_2),
            Vector3::new(-0.5, 0.0, 0.0),
            world.clone(),
        ),
        epsilon = 1e-12
    );

    let back = in_world.in_frame(&registry, &tool).unwrap();
    assert_abs_diff_eq!(back, pose, epsilon = 1e-12);
}

#[test]
fn test_pose_projections_over_two_rotated_hops() {
    let (registry, world, base, tool) = rotated_chain();

    let pose = Pose::new(
        Rotation3::from_euler_angles(0.0, 0.0, FRAC_PI_2),
        Vector3::new(1.0, 0.0, 0.0),
        tool.clone(),
    );

    let position = pose.position_in_frame(&registry, &world).unwrap();
    assert_abs_diff_eq!(position, Position::new(-0.5, 0.0, 0.0, world.clone()), epsilon = 1e-12);

    let orientation = pose.orientation_in_frame(&registry, &world).unwrap();
    assert_abs_diff_eq!(
        orientation,
        Orientation::from_rpy(0.0, 0.0, -FRAC_PI_2, world.clone()),
        epsilon = 1e-12
    );

    // 投影与整体转换后再拆分一致
    let whole = pose.in_frame(&registry, &world).unwrap();
    assert_abs_diff_eq!(position, whole.position(), epsilon = 1e-12);
    assert_abs_diff_eq!(orientation, whole.orientation(), epsilon = 1e-12);

    let unreachable = FrameId::new("NEVER_REGISTERED");
    assert!(matches!(
        pose.position_in_frame(&registry, &unreachable),
        Err(FrameError::Unreachable { .. })
    ));
    assert!(pose.orientation_in_frame(&registry, &base).is_ok());
}

#[test]
fn test_point_in_frame_keeps_name() {
    let (registry, world, _, tool) = arm_chain();
    let tip = Point::new(0.0, 0.0, 0.1, tool, "gripper_tip");
    let in_world = tip.in_frame(&registry, &world).unwrap();
    assert_eq!(in_world.name(), "gripper_tip");
    assert_abs_diff_eq!(in_world.position(), &Position::new(1.0, 0.5, 0.1, world));
}

#[test]
fn test_disconnected_components_stay_separate() {
    let (mut registry, world, _, _) = arm_chain();
    let camera = well_known::camera();
    let sensor = well_known::sensor();
    registry
        .register(RigidTransform::from_translation(
            sensor.clone(),
            camera.clone(),
            Vector3::new(0.0, 0.0, 0.1),
        ))
        .unwrap();

    assert!(registry.resolve(&sensor, &camera).is_some());
    assert!(registry.resolve(&sensor, &world).is_none());
    assert!(registry.path(&camera, &world).is_none());
}
