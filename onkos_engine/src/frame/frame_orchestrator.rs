/// Per-frame cadence: update, then render
///
/// The orchestrator owns the device capabilities, the three constant
/// buffers, the uploaded meshes and the explicit `PipelineState`. Each frame
/// runs in two phases on the calling thread:
///
/// 1. `update`: advance time, rewrite the "changes every frame" buffer
/// 2. `render`: clear depth and color, bind targets, run the binder for
///    every mesh, present
///
/// `render` refuses to run for a frame whose `update` has not completed.

use std::sync::Arc;
use glam::Vec3;
use crate::config::AppConfig;
use crate::error::{Error, NativeError, Result};
use crate::graphics_device::{
    BindFlags, ClearFlags, DepthStencilView, Device, DeviceContext, Format,
    RenderTargetView, SamplerDesc, ShaderBytecode, ShaderStage, SwapChain,
    TextureDesc, Usage, Viewport,
};
use crate::pipeline::{ConstantSlot, DrawItem, DrawOutcome, PipelineBinder, PipelineState};
use crate::resource::{
    animate, CbChangeOnResize, CbChangesEveryFrame, CbNeverChanges, GpuBuffer,
    MeshBuffers, MeshData, Vertex,
};
use crate::{engine_bail, engine_error, engine_info, engine_trace};

const LOG_SOURCE: &str = "onkos::FrameOrchestrator";

/// Shaders and texture inputs of the material every mesh is drawn with
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub vertex_shader: ShaderBytecode,
    pub pixel_shader: ShaderBytecode,
    /// Diffuse texture bound at pixel slot 0, `None` for untextured meshes
    pub texture: Option<TextureDesc>,
    pub sampler: SamplerDesc,
}

/// Where the current frame is in its update/render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Waiting for `update`
    Idle,
    /// Updated, waiting for `render`
    Updated,
}

/// Counters accumulated over every rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub draws_issued: u64,
    pub draws_skipped: u64,
}

pub struct FrameOrchestrator {
    config: AppConfig,
    device: Box<dyn Device>,
    context: Box<dyn DeviceContext>,
    swap_chain: Box<dyn SwapChain>,
    state: PipelineState,
    binder: PipelineBinder,
    cb_never_changes: GpuBuffer,
    cb_change_on_resize: GpuBuffer,
    cb_changes_every_frame: GpuBuffer,
    meshes: Vec<MeshBuffers>,
    elapsed: f32,
    phase: FramePhase,
    stats: FrameStats,
}

impl FrameOrchestrator {
    /// Create every startup resource and upload the camera constants
    ///
    /// # Errors
    ///
    /// - `PreconditionError` if `config` is invalid
    /// - `CreationError` if the device is not ready or any view, shader,
    ///   layout, sampler or constant buffer cannot be created
    /// - `BackendError` if the initial constant upload fails
    ///
    /// Every failure here is fatal to startup.
    pub fn new(
        mut device: Box<dyn Device>,
        mut context: Box<dyn DeviceContext>,
        swap_chain: Box<dyn SwapChain>,
        config: AppConfig,
        material: &MaterialDesc,
    ) -> Result<Self> {
        config.validate()?;
        if !device.is_ready() {
            return Err(creation_failed(
                "device",
                NativeError::new(NativeError::E_FAIL, "device is not ready"),
            ));
        }

        let (render_target, depth_stencil) =
            create_targets(device.as_mut(), swap_chain.as_ref(), config.width, config.height)?;

        let vertex_shader = device
            .create_shader(ShaderStage::Vertex, &material.vertex_shader)
            .map_err(|e| creation_failed("vertex shader", e))?;
        let pixel_shader = device
            .create_shader(ShaderStage::Pixel, &material.pixel_shader)
            .map_err(|e| creation_failed("pixel shader", e))?;
        let input_layout = device
            .create_input_layout(&Vertex::input_layout(), &material.vertex_shader)
            .map_err(|e| creation_failed("input layout", e))?;

        let shader_resources = match &material.texture {
            Some(desc) => {
                let texture = device
                    .create_texture(desc)
                    .map_err(|e| creation_failed("diffuse texture", e))?;
                vec![device
                    .create_shader_resource_view(texture.as_ref())
                    .map_err(|e| creation_failed("shader resource view", e))?]
            }
            None => Vec::new(),
        };
        let sampler = device
            .create_sampler_state(&material.sampler)
            .map_err(|e| creation_failed("sampler state", e))?;

        let cb_never_changes = GpuBuffer::create_constant::<CbNeverChanges>(device.as_mut())?
            .with_name("cbNeverChanges");
        let cb_change_on_resize = GpuBuffer::create_constant::<CbChangeOnResize>(device.as_mut())?
            .with_name("cbChangeOnResize");
        let cb_changes_every_frame = GpuBuffer::create_constant::<CbChangesEveryFrame>(device.as_mut())?
            .with_name("cbChangesEveryFrame");

        cb_never_changes.write(context.as_mut(), &CbNeverChanges::from_camera(&config.camera))?;
        cb_change_on_resize.write(
            context.as_mut(),
            &CbChangeOnResize::from_camera(&config.camera, config.aspect_ratio()),
        )?;

        let state = PipelineState {
            input_layout: Some(input_layout),
            vertex_shader: Some(vertex_shader),
            pixel_shader: Some(pixel_shader),
            shader_resources,
            sampler: Some(sampler),
            render_targets: vec![render_target],
            depth_stencil: Some(depth_stencil),
            viewport: Some(Viewport::from_size(config.width, config.height)),
            ..PipelineState::default()
        };

        engine_info!(LOG_SOURCE, "'{}' ready ({}x{})", config.app_name, config.width, config.height);

        Ok(Self {
            config,
            device,
            context,
            swap_chain,
            state,
            binder: PipelineBinder::new(),
            cb_never_changes,
            cb_change_on_resize,
            cb_changes_every_frame,
            meshes: Vec::new(),
            elapsed: 0.0,
            phase: FramePhase::Idle,
            stats: FrameStats::default(),
        })
    }

    /// Upload a mesh and append it to the draw list
    ///
    /// Returns the mesh's position in the draw list.
    pub fn add_mesh(&mut self, mesh: MeshData) -> Result<usize> {
        let buffers = MeshBuffers::create(self.device.as_mut(), mesh)?;
        self.meshes.push(buffers);
        Ok(self.meshes.len() - 1)
    }

    /// Update phase: advance time by `delta_seconds` and rewrite the per-frame constants
    pub fn update(&mut self, delta_seconds: f32) -> Result<()> {
        self.elapsed += delta_seconds.max(0.0);
        let (world, color) = animate(self.elapsed, Vec3::ZERO, Vec3::ONE);
        self.cb_changes_every_frame
            .write(self.context.as_mut(), &CbChangesEveryFrame::new(world, color))?;
        self.phase = FramePhase::Updated;
        Ok(())
    }

    /// Render phase: clear, draw every mesh, present
    ///
    /// A mesh whose draw is skipped does not stop the frame. Backend
    /// failures abort the frame and are returned.
    pub fn render(&mut self) -> Result<()> {
        if self.phase != FramePhase::Updated {
            engine_bail!(LOG_SOURCE, "render: frame {} was not updated first", self.stats.frames);
        }
        self.phase = FramePhase::Idle;

        if let Some(depth_stencil) = &self.state.depth_stencil {
            self.context.clear_depth_stencil_view(depth_stencil, ClearFlags::DEPTH, 1.0, 0)?;
        }
        for render_target in &self.state.render_targets {
            self.context.clear_render_target_view(render_target, self.config.clear_color)?;
        }
        self.context
            .om_set_render_targets(&self.state.render_targets, self.state.depth_stencil.as_ref())?;

        let vs_constants = [
            ConstantSlot::new(0, &self.cb_never_changes),
            ConstantSlot::new(1, &self.cb_change_on_resize),
            ConstantSlot::new(2, &self.cb_changes_every_frame),
        ];
        let ps_constants = [ConstantSlot::new(2, &self.cb_changes_every_frame)];

        for mesh in &self.meshes {
            let item = DrawItem {
                mesh,
                vs_constants: &vs_constants,
                ps_constants: &ps_constants,
                shader_resources: None,
            };
            match self.binder.draw(self.context.as_mut(), &self.state, &item)? {
                DrawOutcome::Drawn { .. } => self.stats.draws_issued += 1,
                DrawOutcome::Skipped { .. } => self.stats.draws_skipped += 1,
            }
        }

        self.swap_chain.present(self.config.sync_interval).map_err(|native| {
            engine_error!(LOG_SOURCE, "present failed: {}", native);
            Error::from(native)
        })?;

        self.stats.frames += 1;
        engine_trace!(LOG_SOURCE, "Frame {} presented", self.stats.frames);
        Ok(())
    }

    /// `update` followed by `render`
    pub fn run_frame(&mut self, delta_seconds: f32) -> Result<()> {
        self.update(delta_seconds)?;
        self.render()
    }

    /// Resize the swap chain, recreate the targets and rewrite the projection
    ///
    /// If recreating the targets fails the orchestrator keeps running without
    /// them: draws are skipped until a later resize succeeds.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_bail!(LOG_SOURCE, "resize: size must be non-zero (got {}x{})", width, height);
        }

        // The swap chain cannot resize while views of its back buffer are alive
        self.state.render_targets.clear();
        self.state.depth_stencil = None;

        self.swap_chain.resize_buffers(width, height).map_err(|native| {
            engine_error!(LOG_SOURCE, "resize_buffers failed: {}", native);
            Error::from(native)
        })?;
        let (render_target, depth_stencil) =
            create_targets(self.device.as_mut(), self.swap_chain.as_ref(), width, height)?;

        self.state.render_targets.push(render_target);
        self.state.depth_stencil = Some(depth_stencil);
        self.state.viewport = Some(Viewport::from_size(width, height));
        self.config.width = width;
        self.config.height = height;

        self.cb_change_on_resize.write(
            self.context.as_mut(),
            &CbChangeOnResize::from_camera(&self.config.camera, self.config.aspect_ratio()),
        )?;

        engine_info!(LOG_SOURCE, "Resized to {}x{}", width, height);
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Seconds accumulated by `update`
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn pipeline_state(&self) -> &PipelineState {
        &self.state
    }

    pub fn pipeline_state_mut(&mut self) -> &mut PipelineState {
        &mut self.state
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, index: usize) -> Option<&MeshBuffers> {
        self.meshes.get(index)
    }

    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut MeshBuffers> {
        self.meshes.get_mut(index)
    }

    /// Constant buffers in vertex-stage slot order (0, 1, 2)
    pub fn constant_buffers(&self) -> [&GpuBuffer; 3] {
        [&self.cb_never_changes, &self.cb_change_on_resize, &self.cb_changes_every_frame]
    }
}

fn creation_failed(resource: &str, native: NativeError) -> Error {
    let err = Error::creation(resource, native);
    engine_error!(LOG_SOURCE, "{}", err);
    err
}

/// Render target view of the back buffer plus a matching depth-stencil view
fn create_targets(
    device: &mut dyn Device,
    swap_chain: &dyn SwapChain,
    width: u32,
    height: u32,
) -> Result<(Arc<dyn RenderTargetView>, Arc<dyn DepthStencilView>)> {
    let back_buffer = swap_chain
        .back_buffer()
        .map_err(|e| creation_failed("back buffer", e))?;
    let render_target = device
        .create_render_target_view(back_buffer.as_ref())
        .map_err(|e| creation_failed("render target view", e))?;

    let depth_texture = device
        .create_texture(&TextureDesc {
            width,
            height,
            format: Format::D24_UNORM_S8_UINT,
            usage: Usage::Default,
            bind_flags: BindFlags::DEPTH_STENCIL,
        })
        .map_err(|e| creation_failed("depth stencil texture", e))?;
    let depth_stencil = device
        .create_depth_stencil_view(depth_texture.as_ref())
        .map_err(|e| creation_failed("depth stencil view", e))?;

    Ok((render_target, depth_stencil))
}

#[cfg(test)]
#[path = "frame_orchestrator_tests.rs"]
mod tests;
