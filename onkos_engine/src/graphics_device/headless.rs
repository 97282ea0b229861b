/// Headless recording backend (no GPU required)
///
/// Implements `Device`, `DeviceContext` and `SwapChain` in system memory.
/// Every context call is appended to a shared command log so callers can
/// check bind ordering, and buffer contents are kept so uploads can be
/// inspected. Validation mirrors what a debug layer reports: wrong bind
/// flags, writes to immutable buffers and out-of-range regions fail with
/// `E_INVALIDARG`.

use std::sync::{Arc, Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use crate::config::HeadlessDeviceConfig;
use crate::error::{NativeError, NativeResult};
use crate::graphics_device::{
    Device, DeviceContext, SwapChain,
    NativeBuffer, NativeTexture, Shader, InputLayout, ShaderResourceView,
    SamplerState, RenderTargetView, DepthStencilView, ResourceId,
    BufferDesc, BufferRegion, TextureDesc, SamplerDesc, ShaderBytecode, InputElementDesc,
    BindFlags, CpuAccessFlags, ClearFlags, Format, IndexFormat, PrimitiveTopology,
    ShaderStage, Usage, Viewport,
};

// ============================================================================
// Recorded commands
// ============================================================================

/// One device-context call captured by the headless backend
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    SetInputLayout(ResourceId),
    SetVertexBuffers { start_slot: u32, buffers: Vec<ResourceId>, strides: Vec<u32>, offsets: Vec<u32> },
    SetIndexBuffer { buffer: ResourceId, format: IndexFormat, offset: u32 },
    SetPrimitiveTopology(PrimitiveTopology),
    VsSetShader(ResourceId),
    VsSetConstantBuffers { start_slot: u32, buffers: Vec<ResourceId> },
    PsSetShader(ResourceId),
    PsSetConstantBuffers { start_slot: u32, buffers: Vec<ResourceId> },
    PsSetShaderResources { start_slot: u32, views: Vec<ResourceId> },
    PsSetSamplers { start_slot: u32, samplers: Vec<ResourceId> },
    SetRenderTargets { views: Vec<ResourceId>, depth_stencil: Option<ResourceId> },
    SetViewports(Vec<Viewport>),
    UpdateSubresource { buffer: ResourceId, offset: u32, bytes: usize },
    ClearRenderTarget { view: ResourceId, color: [f32; 4] },
    ClearDepthStencil { view: ResourceId, flags: ClearFlags, depth: f32, stencil: u8 },
    DrawIndexed { index_count: u32, start_index: u32, base_vertex: i32 },
    Present { sync_interval: u32 },
}

impl RecordedCommand {
    /// Short name of the call, handy for ordering assertions
    pub fn name(&self) -> &'static str {
        match self {
            RecordedCommand::SetInputLayout(_) => "ia_set_input_layout",
            RecordedCommand::SetVertexBuffers { .. } => "ia_set_vertex_buffers",
            RecordedCommand::SetIndexBuffer { .. } => "ia_set_index_buffer",
            RecordedCommand::SetPrimitiveTopology(_) => "ia_set_primitive_topology",
            RecordedCommand::VsSetShader(_) => "vs_set_shader",
            RecordedCommand::VsSetConstantBuffers { .. } => "vs_set_constant_buffers",
            RecordedCommand::PsSetShader(_) => "ps_set_shader",
            RecordedCommand::PsSetConstantBuffers { .. } => "ps_set_constant_buffers",
            RecordedCommand::PsSetShaderResources { .. } => "ps_set_shader_resources",
            RecordedCommand::PsSetSamplers { .. } => "ps_set_samplers",
            RecordedCommand::SetRenderTargets { .. } => "om_set_render_targets",
            RecordedCommand::SetViewports(_) => "rs_set_viewports",
            RecordedCommand::UpdateSubresource { .. } => "update_subresource",
            RecordedCommand::ClearRenderTarget { .. } => "clear_render_target_view",
            RecordedCommand::ClearDepthStencil { .. } => "clear_depth_stencil_view",
            RecordedCommand::DrawIndexed { .. } => "draw_indexed",
            RecordedCommand::Present { .. } => "present",
        }
    }
}

// ============================================================================
// Shared state
// ============================================================================

#[derive(Debug, Default)]
struct HeadlessState {
    next_id: u64,
    buffers: FxHashMap<ResourceId, Vec<u8>>,
    allocated_buffers: u64,
    released_buffers: u64,
    commands: Vec<RecordedCommand>,
    presents: u64,
    /// Context call that fails with `E_FAIL` instead of being recorded
    failing_command: Option<&'static str>,
}

impl HeadlessState {
    fn next_id(&mut self) -> ResourceId {
        self.next_id += 1;
        ResourceId(self.next_id)
    }

    fn push(&mut self, command: RecordedCommand) -> NativeResult<()> {
        if self.failing_command == Some(command.name()) {
            return Err(NativeError::new(NativeError::E_FAIL, format!("{} failed", command.name())));
        }
        self.commands.push(command);
        Ok(())
    }
}

type SharedState = Arc<Mutex<HeadlessState>>;

fn lock(state: &SharedState) -> NativeResult<MutexGuard<'_, HeadlessState>> {
    state
        .lock()
        .map_err(|_| NativeError::new(NativeError::E_FAIL, "headless state lock poisoned"))
}

fn invalid_arg(message: impl Into<String>) -> NativeError {
    NativeError::new(NativeError::E_INVALIDARG, message)
}

// ============================================================================
// Native objects
// ============================================================================

#[derive(Debug)]
struct HeadlessBuffer {
    id: ResourceId,
    desc: BufferDesc,
    state: SharedState,
}

impl NativeBuffer for HeadlessBuffer {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn desc(&self) -> &BufferDesc {
        &self.desc
    }
}

impl Drop for HeadlessBuffer {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.buffers.remove(&self.id);
            state.released_buffers += 1;
        }
    }
}

#[derive(Debug)]
struct HeadlessTexture {
    id: ResourceId,
    desc: TextureDesc,
}

impl NativeTexture for HeadlessTexture {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn desc(&self) -> &TextureDesc {
        &self.desc
    }
}

#[derive(Debug)]
struct HeadlessShader {
    id: ResourceId,
    stage: ShaderStage,
}

impl Shader for HeadlessShader {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

#[derive(Debug)]
struct HeadlessInputLayout {
    id: ResourceId,
    stride: u32,
}

impl InputLayout for HeadlessInputLayout {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn stride(&self) -> u32 {
        self.stride
    }
}

/// Views and samplers carry no data beyond their identity
#[derive(Debug)]
struct HeadlessObject {
    id: ResourceId,
}

impl RenderTargetView for HeadlessObject {
    fn id(&self) -> ResourceId {
        self.id
    }
}

impl DepthStencilView for HeadlessObject {
    fn id(&self) -> ResourceId {
        self.id
    }
}

impl ShaderResourceView for HeadlessObject {
    fn id(&self) -> ResourceId {
        self.id
    }
}

impl SamplerState for HeadlessObject {
    fn id(&self) -> ResourceId {
        self.id
    }
}

// ============================================================================
// Backend bundle
// ============================================================================

/// Device, immediate context and swap chain sharing one recording state
pub struct HeadlessBackend {
    pub device: HeadlessDevice,
    pub context: HeadlessDeviceContext,
    pub swap_chain: HeadlessSwapChain,
}

impl HeadlessBackend {
    pub fn new(config: HeadlessDeviceConfig) -> Self {
        let state: SharedState = Arc::new(Mutex::new(HeadlessState::default()));
        let back_buffer_desc = TextureDesc {
            width: config.back_buffer_width,
            height: config.back_buffer_height,
            format: Format::R8G8B8A8_UNORM,
            usage: Usage::Default,
            bind_flags: BindFlags::RENDER_TARGET,
        };
        let back_buffer_id = state
            .lock()
            .map(|mut s| s.next_id())
            .unwrap_or(ResourceId(0));

        Self {
            device: HeadlessDevice { state: state.clone(), config },
            context: HeadlessDeviceContext { state: state.clone(), bound_index_format: None },
            swap_chain: HeadlessSwapChain {
                state,
                back_buffer: Arc::new(HeadlessTexture { id: back_buffer_id, desc: back_buffer_desc }),
            },
        }
    }
}

// ============================================================================
// Device
// ============================================================================

/// Clones share the recorded state (commands, buffers, presents) but each
/// keeps its own readiness and failure-injection settings.
#[derive(Clone)]
pub struct HeadlessDevice {
    state: SharedState,
    config: HeadlessDeviceConfig,
}

impl HeadlessDevice {
    pub fn set_ready(&mut self, ready: bool) {
        self.config.ready = ready;
    }

    /// Make every following allocation fail with `error` (`None` restores success)
    pub fn set_allocation_failure(&mut self, error: Option<NativeError>) {
        self.config.fail_allocations_with = error;
    }

    /// Buffers currently alive
    pub fn live_buffers(&self) -> usize {
        self.state.lock().map(|s| s.buffers.len()).unwrap_or(0)
    }

    /// Buffers allocated since creation
    pub fn allocated_buffers(&self) -> u64 {
        self.state.lock().map(|s| s.allocated_buffers).unwrap_or(0)
    }

    /// Buffers released since creation
    pub fn released_buffers(&self) -> u64 {
        self.state.lock().map(|s| s.released_buffers).unwrap_or(0)
    }

    /// Copy of a live buffer's contents
    pub fn buffer_contents(&self, id: ResourceId) -> Option<Vec<u8>> {
        self.state.lock().ok().and_then(|s| s.buffers.get(&id).cloned())
    }

    /// Commands recorded by the context sharing this device's state
    ///
    /// Lets callers inspect the log after the context has been handed to an
    /// orchestrator as a `Box<dyn DeviceContext>`.
    pub fn recorded_commands(&self) -> Vec<RecordedCommand> {
        self.state.lock().map(|s| s.commands.clone()).unwrap_or_default()
    }

    pub fn clear_recorded_commands(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.commands.clear();
        }
    }

    /// Frames presented by the sibling swap chain
    pub fn presents(&self) -> u64 {
        self.state.lock().map(|s| s.presents).unwrap_or(0)
    }

    /// Make every context call named `command` fail with `E_FAIL`
    ///
    /// `command` uses the names returned by `RecordedCommand::name`
    /// (`"draw_indexed"`, `"present"`, ...). `None` restores success.
    pub fn set_context_failure(&self, command: Option<&'static str>) {
        if let Ok(mut state) = self.state.lock() {
            state.failing_command = command;
        }
    }

    fn new_id(&self) -> NativeResult<ResourceId> {
        Ok(lock(&self.state)?.next_id())
    }
}

impl Device for HeadlessDevice {
    fn is_ready(&self) -> bool {
        self.config.ready
    }

    fn allocate_buffer(
        &mut self,
        desc: &BufferDesc,
        initial_data: Option<&[u8]>,
    ) -> NativeResult<Box<dyn NativeBuffer>> {
        if let Some(err) = &self.config.fail_allocations_with {
            return Err(err.clone());
        }
        if desc.byte_width == 0 {
            return Err(invalid_arg("buffer byte width must be non-zero"));
        }
        if desc.bind_flags.contains(BindFlags::CONSTANT_BUFFER) && desc.byte_width % 16 != 0 {
            return Err(invalid_arg(format!(
                "constant buffer byte width {} is not a multiple of 16", desc.byte_width
            )));
        }
        if desc.usage == Usage::Immutable && initial_data.is_none() {
            return Err(invalid_arg("immutable buffer requires initial data"));
        }
        if desc.usage == Usage::Dynamic && !desc.cpu_access.contains(CpuAccessFlags::WRITE) {
            return Err(invalid_arg("dynamic buffer requires CPU write access"));
        }

        let contents = match initial_data {
            Some(data) if data.len() != desc.byte_width as usize => {
                return Err(invalid_arg(format!(
                    "initial data is {} bytes, buffer is {} bytes", data.len(), desc.byte_width
                )));
            }
            Some(data) => data.to_vec(),
            None => vec![0u8; desc.byte_width as usize],
        };

        let mut state = lock(&self.state)?;
        let id = state.next_id();
        state.buffers.insert(id, contents);
        state.allocated_buffers += 1;

        Ok(Box::new(HeadlessBuffer { id, desc: *desc, state: self.state.clone() }))
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> NativeResult<Arc<dyn NativeTexture>> {
        if desc.width == 0 || desc.height == 0 {
            return Err(invalid_arg("texture size must be non-zero"));
        }
        Ok(Arc::new(HeadlessTexture { id: self.new_id()?, desc: *desc }))
    }

    fn create_render_target_view(
        &mut self,
        texture: &dyn NativeTexture,
    ) -> NativeResult<Arc<dyn RenderTargetView>> {
        if !texture.desc().bind_flags.contains(BindFlags::RENDER_TARGET) {
            return Err(invalid_arg("texture was not created with RENDER_TARGET"));
        }
        Ok(Arc::new(HeadlessObject { id: self.new_id()? }))
    }

    fn create_depth_stencil_view(
        &mut self,
        texture: &dyn NativeTexture,
    ) -> NativeResult<Arc<dyn DepthStencilView>> {
        if !texture.desc().bind_flags.contains(BindFlags::DEPTH_STENCIL) {
            return Err(invalid_arg("texture was not created with DEPTH_STENCIL"));
        }
        Ok(Arc::new(HeadlessObject { id: self.new_id()? }))
    }

    fn create_shader_resource_view(
        &mut self,
        texture: &dyn NativeTexture,
    ) -> NativeResult<Arc<dyn ShaderResourceView>> {
        if !texture.desc().bind_flags.contains(BindFlags::SHADER_RESOURCE) {
            return Err(invalid_arg("texture was not created with SHADER_RESOURCE"));
        }
        Ok(Arc::new(HeadlessObject { id: self.new_id()? }))
    }

    fn create_shader(
        &mut self,
        stage: ShaderStage,
        bytecode: &ShaderBytecode,
    ) -> NativeResult<Arc<dyn Shader>> {
        if bytecode.bytes.is_empty() {
            return Err(invalid_arg(format!("empty bytecode for entry point '{}'", bytecode.entry_point)));
        }
        Ok(Arc::new(HeadlessShader { id: self.new_id()?, stage }))
    }

    fn create_input_layout(
        &mut self,
        elements: &[InputElementDesc],
        vertex_shader_bytecode: &ShaderBytecode,
    ) -> NativeResult<Arc<dyn InputLayout>> {
        if elements.is_empty() || vertex_shader_bytecode.bytes.is_empty() {
            return Err(invalid_arg("input layout needs elements and vertex shader bytecode"));
        }
        let stride = elements
            .iter()
            .filter(|e| e.input_slot == 0)
            .map(|e| e.aligned_byte_offset + e.format.size_bytes())
            .max()
            .unwrap_or(0);
        Ok(Arc::new(HeadlessInputLayout { id: self.new_id()?, stride }))
    }

    fn create_sampler_state(&mut self, desc: &SamplerDesc) -> NativeResult<Arc<dyn SamplerState>> {
        if desc.min_lod > desc.max_lod {
            return Err(invalid_arg("sampler min_lod exceeds max_lod"));
        }
        Ok(Arc::new(HeadlessObject { id: self.new_id()? }))
    }
}

// ============================================================================
// Device context
// ============================================================================

pub struct HeadlessDeviceContext {
    state: SharedState,
    bound_index_format: Option<IndexFormat>,
}

impl HeadlessDeviceContext {
    /// Copy of every command recorded so far (presents included)
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.state.lock().map(|s| s.commands.clone()).unwrap_or_default()
    }

    /// Drain the command log
    pub fn take_commands(&mut self) -> Vec<RecordedCommand> {
        self.state
            .lock()
            .map(|mut s| std::mem::take(&mut s.commands))
            .unwrap_or_default()
    }

    fn record(&mut self, command: RecordedCommand) -> NativeResult<()> {
        lock(&self.state)?.push(command)
    }
}

fn require_flags(buffer: &dyn NativeBuffer, flags: BindFlags, what: &str) -> NativeResult<()> {
    if buffer.desc().bind_flags.contains(flags) {
        Ok(())
    } else {
        Err(invalid_arg(format!("buffer {} bound as {} without the matching bind flag", buffer.id(), what)))
    }
}

impl DeviceContext for HeadlessDeviceContext {
    fn ia_set_input_layout(&mut self, layout: &Arc<dyn InputLayout>) -> NativeResult<()> {
        self.record(RecordedCommand::SetInputLayout(layout.id()))
    }

    fn ia_set_vertex_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn NativeBuffer],
        strides: &[u32],
        offsets: &[u32],
    ) -> NativeResult<()> {
        if strides.len() != buffers.len() || offsets.len() != buffers.len() {
            return Err(invalid_arg("one stride and one offset are required per vertex buffer"));
        }
        for buffer in buffers {
            require_flags(*buffer, BindFlags::VERTEX_BUFFER, "vertex buffer")?;
        }
        self.record(RecordedCommand::SetVertexBuffers {
            start_slot,
            buffers: buffers.iter().map(|b| b.id()).collect(),
            strides: strides.to_vec(),
            offsets: offsets.to_vec(),
        })
    }

    fn ia_set_index_buffer(
        &mut self,
        buffer: &dyn NativeBuffer,
        format: IndexFormat,
        offset: u32,
    ) -> NativeResult<()> {
        require_flags(buffer, BindFlags::INDEX_BUFFER, "index buffer")?;
        self.bound_index_format = Some(format);
        self.record(RecordedCommand::SetIndexBuffer { buffer: buffer.id(), format, offset })
    }

    fn ia_set_primitive_topology(&mut self, topology: PrimitiveTopology) -> NativeResult<()> {
        self.record(RecordedCommand::SetPrimitiveTopology(topology))
    }

    fn vs_set_shader(&mut self, shader: &Arc<dyn Shader>) -> NativeResult<()> {
        if shader.stage() != ShaderStage::Vertex {
            return Err(invalid_arg("pixel shader bound to the vertex stage"));
        }
        self.record(RecordedCommand::VsSetShader(shader.id()))
    }

    fn vs_set_constant_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn NativeBuffer],
    ) -> NativeResult<()> {
        for buffer in buffers {
            require_flags(*buffer, BindFlags::CONSTANT_BUFFER, "constant buffer")?;
        }
        self.record(RecordedCommand::VsSetConstantBuffers {
            start_slot,
            buffers: buffers.iter().map(|b| b.id()).collect(),
        })
    }

    fn ps_set_shader(&mut self, shader: &Arc<dyn Shader>) -> NativeResult<()> {
        if shader.stage() != ShaderStage::Pixel {
            return Err(invalid_arg("vertex shader bound to the pixel stage"));
        }
        self.record(RecordedCommand::PsSetShader(shader.id()))
    }

    fn ps_set_constant_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[&dyn NativeBuffer],
    ) -> NativeResult<()> {
        for buffer in buffers {
            require_flags(*buffer, BindFlags::CONSTANT_BUFFER, "constant buffer")?;
        }
        self.record(RecordedCommand::PsSetConstantBuffers {
            start_slot,
            buffers: buffers.iter().map(|b| b.id()).collect(),
        })
    }

    fn ps_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Arc<dyn ShaderResourceView>],
    ) -> NativeResult<()> {
        self.record(RecordedCommand::PsSetShaderResources {
            start_slot,
            views: views.iter().map(|v| v.id()).collect(),
        })
    }

    fn ps_set_samplers(
        &mut self,
        start_slot: u32,
        samplers: &[Arc<dyn SamplerState>],
    ) -> NativeResult<()> {
        self.record(RecordedCommand::PsSetSamplers {
            start_slot,
            samplers: samplers.iter().map(|s| s.id()).collect(),
        })
    }

    fn om_set_render_targets(
        &mut self,
        views: &[Arc<dyn RenderTargetView>],
        depth_stencil: Option<&Arc<dyn DepthStencilView>>,
    ) -> NativeResult<()> {
        self.record(RecordedCommand::SetRenderTargets {
            views: views.iter().map(|v| v.id()).collect(),
            depth_stencil: depth_stencil.map(|d| d.id()),
        })
    }

    fn rs_set_viewports(&mut self, viewports: &[Viewport]) -> NativeResult<()> {
        self.record(RecordedCommand::SetViewports(viewports.to_vec()))
    }

    fn update_subresource(
        &mut self,
        dst: &dyn NativeBuffer,
        dst_subresource: u32,
        dst_region: Option<&BufferRegion>,
        src: &[u8],
        _src_row_pitch: u32,
        _src_depth_pitch: u32,
    ) -> NativeResult<()> {
        let desc = dst.desc();
        if desc.usage == Usage::Immutable {
            return Err(invalid_arg(format!("buffer {} is immutable", dst.id())));
        }
        if dst_subresource != 0 {
            return Err(invalid_arg("buffers have a single subresource"));
        }
        let (offset, width) = match dst_region {
            Some(region) => (region.left, region.width()),
            None => (0, desc.byte_width),
        };
        if region_exceeds(offset, width, desc.byte_width) || (src.len() as u64) < width as u64 {
            return Err(invalid_arg(format!(
                "update of {} bytes at offset {} does not fit buffer {} ({} bytes)",
                src.len(), offset, dst.id(), desc.byte_width
            )));
        }

        {
            let mut state = lock(&self.state)?;
            if state.failing_command == Some("update_subresource") {
                return Err(NativeError::new(NativeError::E_FAIL, "update_subresource failed"));
            }
            let contents = state
                .buffers
                .get_mut(&dst.id())
                .ok_or_else(|| invalid_arg(format!("buffer {} was released", dst.id())))?;
            let start = offset as usize;
            let end = start + width as usize;
            contents[start..end].copy_from_slice(&src[..width as usize]);
        }

        self.record(RecordedCommand::UpdateSubresource { buffer: dst.id(), offset, bytes: width as usize })
    }

    fn clear_render_target_view(
        &mut self,
        view: &Arc<dyn RenderTargetView>,
        color: [f32; 4],
    ) -> NativeResult<()> {
        self.record(RecordedCommand::ClearRenderTarget { view: view.id(), color })
    }

    fn clear_depth_stencil_view(
        &mut self,
        view: &Arc<dyn DepthStencilView>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) -> NativeResult<()> {
        self.record(RecordedCommand::ClearDepthStencil { view: view.id(), flags, depth, stencil })
    }

    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index_location: u32,
        base_vertex_location: i32,
    ) -> NativeResult<()> {
        if self.bound_index_format.is_none() {
            return Err(NativeError::new(NativeError::E_FAIL, "draw_indexed without an index buffer"));
        }
        self.record(RecordedCommand::DrawIndexed {
            index_count,
            start_index: start_index_location,
            base_vertex: base_vertex_location,
        })
    }
}

fn region_exceeds(offset: u32, width: u32, byte_width: u32) -> bool {
    offset as u64 + width as u64 > byte_width as u64
}

// ============================================================================
// Swap chain
// ============================================================================

pub struct HeadlessSwapChain {
    state: SharedState,
    back_buffer: Arc<HeadlessTexture>,
}

impl HeadlessSwapChain {
    /// Number of frames presented so far
    pub fn presents(&self) -> u64 {
        self.state.lock().map(|s| s.presents).unwrap_or(0)
    }
}

impl SwapChain for HeadlessSwapChain {
    fn back_buffer(&self) -> NativeResult<Arc<dyn NativeTexture>> {
        Ok(self.back_buffer.clone())
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> NativeResult<()> {
        if width == 0 || height == 0 {
            return Err(invalid_arg("swap chain size must be non-zero"));
        }
        let id = lock(&self.state)?.next_id();
        let desc = TextureDesc { width, height, ..self.back_buffer.desc };
        self.back_buffer = Arc::new(HeadlessTexture { id, desc });
        Ok(())
    }

    fn present(&mut self, sync_interval: u32) -> NativeResult<()> {
        let mut state = lock(&self.state)?;
        state.push(RecordedCommand::Present { sync_interval })?;
        state.presents += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
