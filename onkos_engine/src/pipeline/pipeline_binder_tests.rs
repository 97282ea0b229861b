//! Unit tests for PipelineBinder
//!
//! Draws run against the headless backend so the exact sequence of context
//! calls can be checked.

use super::*;
use crate::config::HeadlessDeviceConfig;
use crate::graphics_device::{
    BindFlags, Device, Format, HeadlessBackend, HeadlessDevice, HeadlessDeviceContext,
    RecordedCommand, SamplerDesc, ShaderBytecode, ShaderResourceView, TextureDesc, Usage, Viewport,
};
use crate::pipeline::pipeline_state::{ConstantSlot, DrawItem, PipelineState};
use crate::resource::{CbChangesEveryFrame, GpuBuffer, MeshBuffers, ObjMeshLoader, Vertex};

const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

fn bytecode(entry: &str) -> ShaderBytecode {
    ShaderBytecode::new(entry, vec![0xDE, 0xAD, 0xBE, 0xEF])
}

fn quad_mesh(device: &mut HeadlessDevice) -> MeshBuffers {
    let mesh = ObjMeshLoader::parse_named("quad", QUAD_OBJ).unwrap();
    MeshBuffers::create(device, mesh).unwrap()
}

/// Complete pipeline state: layout, both shaders, one SRV + sampler, RTV + DSV, viewport
fn full_state(device: &mut HeadlessDevice) -> PipelineState {
    let vs_code = bytecode("VS");
    let vertex_shader = device.create_shader(ShaderStage::Vertex, &vs_code).unwrap();
    let pixel_shader = device.create_shader(ShaderStage::Pixel, &bytecode("PS")).unwrap();
    let input_layout = device.create_input_layout(&Vertex::input_layout(), &vs_code).unwrap();

    let color = device.create_texture(&TextureDesc {
        width: 64,
        height: 64,
        format: Format::R8G8B8A8_UNORM,
        usage: Usage::Default,
        bind_flags: BindFlags::RENDER_TARGET | BindFlags::SHADER_RESOURCE,
    }).unwrap();
    let depth = device.create_texture(&TextureDesc {
        width: 64,
        height: 64,
        format: Format::D24_UNORM_S8_UINT,
        usage: Usage::Default,
        bind_flags: BindFlags::DEPTH_STENCIL,
    }).unwrap();

    PipelineState {
        input_layout: Some(input_layout),
        vertex_shader: Some(vertex_shader),
        pixel_shader: Some(pixel_shader),
        shader_resources: vec![device.create_shader_resource_view(color.as_ref()).unwrap()],
        sampler: Some(device.create_sampler_state(&SamplerDesc::default()).unwrap()),
        render_targets: vec![device.create_render_target_view(color.as_ref()).unwrap()],
        depth_stencil: Some(device.create_depth_stencil_view(depth.as_ref()).unwrap()),
        viewport: Some(Viewport::from_size(64, 64)),
        ..PipelineState::default()
    }
}

fn setup() -> (HeadlessDevice, HeadlessDeviceContext) {
    let backend = HeadlessBackend::new(HeadlessDeviceConfig::default());
    (backend.device, backend.context)
}

fn names(commands: &[RecordedCommand]) -> Vec<&'static str> {
    commands.iter().map(|c| c.name()).collect()
}

// ============================================================================
// BindStage
// ============================================================================

#[test]
fn test_bind_stage_sequence_is_linear() {
    let mut stage = BindStage::Unbound;
    for expected in BindStage::SEQUENCE {
        assert_eq!(stage.next(), Some(expected));
        stage = expected;
    }
    assert_eq!(stage, BindStage::Drawn);
    assert_eq!(stage.next(), None);
}

#[test]
fn test_bind_stage_ordering() {
    assert!(BindStage::Unbound < BindStage::LayoutBound);
    assert!(BindStage::TargetsBound < BindStage::Drawn);
}

// ============================================================================
// Successful draws
// ============================================================================

#[test]
fn test_draw_binds_in_order() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    let cb = GpuBuffer::create_constant::<CbChangesEveryFrame>(&mut device).unwrap();
    let vs_constants = [ConstantSlot::new(2, &cb)];
    let ps_constants = [ConstantSlot::new(2, &cb)];
    let item = DrawItem { vs_constants: &vs_constants, ps_constants: &ps_constants, ..DrawItem::new(&mesh) };

    let mut binder = PipelineBinder::new();
    let outcome = binder.draw(&mut context, &state, &item).unwrap();

    assert_eq!(outcome, DrawOutcome::Drawn { index_count: 6 });
    assert_eq!(binder.stage(), BindStage::Drawn);
    assert_eq!(names(&context.commands()), vec![
        "ia_set_input_layout",
        "ia_set_vertex_buffers",
        "ia_set_index_buffer",
        "ia_set_primitive_topology",
        "vs_set_shader",
        "vs_set_constant_buffers",
        "ps_set_shader",
        "ps_set_constant_buffers",
        "ps_set_shader_resources",
        "ps_set_samplers",
        "om_set_render_targets",
        "rs_set_viewports",
        "draw_indexed",
    ]);
}

#[test]
fn test_draw_uses_mesh_index_count_and_zero_bases() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);

    PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    let last = context.commands().last().cloned();
    assert_eq!(last, Some(RecordedCommand::DrawIndexed { index_count: 6, start_index: 0, base_vertex: 0 }));
}

#[test]
fn test_draw_binds_vertex_stride_and_u32_indices() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);

    PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    let commands = context.commands();
    assert!(commands.contains(&RecordedCommand::SetVertexBuffers {
        start_slot: 0,
        buffers: vec![mesh.vertex_buffer().native_id().unwrap()],
        strides: vec![Vertex::STRIDE],
        offsets: vec![0],
    }));
    assert!(commands.contains(&RecordedCommand::SetIndexBuffer {
        buffer: mesh.index_buffer().native_id().unwrap(),
        format: crate::graphics_device::IndexFormat::U32,
        offset: 0,
    }));
}

#[test]
fn test_draw_without_shader_resources_skips_srv_binding() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    state.shader_resources.clear();

    let outcome = PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(outcome.is_drawn());
    let names = names(&context.commands());
    assert!(!names.contains(&"ps_set_shader_resources"));
    assert!(names.contains(&"ps_set_samplers"));
}

#[test]
fn test_draw_reasserts_full_state_every_time() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    let mut binder = PipelineBinder::new();

    binder.draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();
    let first = context.take_commands();
    binder.draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();
    let second = context.take_commands();

    assert_eq!(first, second);
    assert_eq!(binder.stats(), BinderStats { draws_issued: 2, draws_skipped: 0 });
}

// ============================================================================
// Skipped draws
// ============================================================================

#[test]
fn test_missing_input_layout_skips_before_any_binding() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    state.input_layout = None;

    let mut binder = PipelineBinder::new();
    let outcome = binder.draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::LayoutBound, .. }));
    assert_eq!(binder.stage(), BindStage::Unbound);
    assert!(context.commands().is_empty());
}

#[test]
fn test_destroyed_mesh_skips_draw() {
    let (mut device, mut context) = setup();
    let mut mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    mesh.destroy();

    let mut binder = PipelineBinder::new();
    let outcome = binder.draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    match outcome {
        DrawOutcome::Skipped { failed_step, reason } => {
            assert_eq!(failed_step, BindStage::BuffersBound);
            assert!(reason.contains("destroyed"));
        }
        other => panic!("Expected a skipped draw, got {:?}", other),
    }
    assert_eq!(binder.stage(), BindStage::LayoutBound);
    assert!(!names(&context.commands()).contains(&"draw_indexed"));
}

#[test]
fn test_destroyed_constant_buffer_skips_at_shaders() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    let mut cb = GpuBuffer::create_constant::<CbChangesEveryFrame>(&mut device).unwrap();
    cb.destroy();
    let vs_constants = [ConstantSlot::new(0, &cb)];
    let item = DrawItem { vs_constants: &vs_constants, ..DrawItem::new(&mesh) };

    let outcome = PipelineBinder::new().draw(&mut context, &state, &item).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::ShadersBound, .. }));
}

#[test]
fn test_uncreated_constant_buffer_skips_at_shaders() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    let cb = GpuBuffer::default();
    let ps_constants = [ConstantSlot::new(0, &cb)];
    let item = DrawItem { ps_constants: &ps_constants, ..DrawItem::new(&mesh) };

    let outcome = PipelineBinder::new().draw(&mut context, &state, &item).unwrap();

    match outcome {
        DrawOutcome::Skipped { failed_step, reason } => {
            assert_eq!(failed_step, BindStage::ShadersBound);
            assert!(reason.contains("never created"));
        }
        other => panic!("Expected a skipped draw, got {:?}", other),
    }
}

#[test]
fn test_missing_pixel_shader_skips() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    state.pixel_shader = None;

    let outcome = PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::ShadersBound, .. }));
    assert!(!names(&context.commands()).contains(&"vs_set_shader"));
}

#[test]
fn test_swapped_shaders_skip() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    std::mem::swap(&mut state.vertex_shader, &mut state.pixel_shader);

    let outcome = PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::ShadersBound, .. }));
}

#[test]
fn test_shader_resources_without_sampler_skip() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    state.sampler = None;

    let outcome = PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::ResourcesBound, .. }));
}

#[test]
fn test_missing_render_target_skips() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    state.render_targets.clear();

    let mut binder = PipelineBinder::new();
    let outcome = binder.draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::TargetsBound, .. }));
    assert_eq!(binder.stage(), BindStage::ResourcesBound);
    assert_eq!(binder.stats(), BinderStats { draws_issued: 0, draws_skipped: 1 });
}

#[test]
fn test_missing_viewport_skips() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let mut state = full_state(&mut device);
    state.viewport = None;

    let outcome = PipelineBinder::new().draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap();

    assert!(matches!(outcome, DrawOutcome::Skipped { failed_step: BindStage::TargetsBound, .. }));
}

#[test]
fn test_skipped_draw_does_not_block_next_draw() {
    let (mut device, mut context) = setup();
    let mut broken = quad_mesh(&mut device);
    broken.destroy();
    let healthy = quad_mesh(&mut device);
    let state = full_state(&mut device);
    let mut binder = PipelineBinder::new();

    let first = binder.draw(&mut context, &state, &DrawItem::new(&broken)).unwrap();
    let second = binder.draw(&mut context, &state, &DrawItem::new(&healthy)).unwrap();

    assert!(!first.is_drawn());
    assert!(second.is_drawn());
    assert_eq!(binder.stats(), BinderStats { draws_issued: 1, draws_skipped: 1 });

    binder.reset_stats();
    assert_eq!(binder.stats(), BinderStats::default());
}

// ============================================================================
// Backend failures
// ============================================================================

#[test]
fn test_backend_failure_is_returned_as_error() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    device.set_context_failure(Some("ps_set_shader"));

    let mut binder = PipelineBinder::new();
    let result = binder.draw(&mut context, &state, &DrawItem::new(&mesh));

    assert!(matches!(result, Err(crate::error::Error::BackendError(_))));
    assert_eq!(binder.stage(), BindStage::BuffersBound);
    assert_eq!(binder.stats(), BinderStats::default());
}

#[test]
fn test_backend_failure_on_draw_leaves_targets_bound() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    device.set_context_failure(Some("draw_indexed"));

    let mut binder = PipelineBinder::new();
    assert!(binder.draw(&mut context, &state, &DrawItem::new(&mesh)).is_err());
    assert_eq!(binder.stage(), BindStage::TargetsBound);

    device.set_context_failure(None);
    assert!(binder.draw(&mut context, &state, &DrawItem::new(&mesh)).unwrap().is_drawn());
}

#[test]
fn test_shared_shader_resources_override() {
    let (mut device, mut context) = setup();
    let mesh = quad_mesh(&mut device);
    let state = full_state(&mut device);
    let texture = device.create_texture(&TextureDesc {
        width: 8,
        height: 8,
        format: Format::R8G8B8A8_UNORM,
        usage: Usage::Default,
        bind_flags: BindFlags::SHADER_RESOURCE,
    }).unwrap();
    let views = vec![device.create_shader_resource_view(texture.as_ref()).unwrap()];
    let override_id = views[0].id();
    let item = DrawItem { shader_resources: Some(views.as_slice()), ..DrawItem::new(&mesh) };

    PipelineBinder::new().draw(&mut context, &state, &item).unwrap();

    assert!(context.commands().contains(&RecordedCommand::PsSetShaderResources {
        start_slot: 0,
        views: vec![override_id],
    }));
}
