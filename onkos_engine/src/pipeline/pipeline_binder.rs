/// Per-draw binding sequence
///
/// The device context is stateful and later stages read what earlier ones
/// set, so every draw walks the same fixed sequence:
///
/// ```text
/// Unbound -> LayoutBound -> BuffersBound -> ShadersBound
///         -> ResourcesBound -> TargetsBound -> Drawn
/// ```
///
/// A step whose resource is missing or destroyed aborts the draw. The
/// failing step is logged and the draw is reported as skipped so the rest of
/// the frame can still render. Backend failures are returned as errors.

use std::fmt;
use crate::error::{Error, Result};
use crate::graphics_device::{DeviceContext, Shader, ShaderStage};
use crate::pipeline::pipeline_state::{ConstantSlot, DrawItem, PipelineState};
use crate::resource::BindParams;
use crate::{engine_error, engine_trace, engine_warn};

const LOG_SOURCE: &str = "onkos::PipelineBinder";

/// Progress of one draw through the binding sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum BindStage {
    #[default]
    Unbound,
    LayoutBound,
    BuffersBound,
    ShadersBound,
    ResourcesBound,
    TargetsBound,
    Drawn,
}

impl BindStage {
    /// Steps after `Unbound`, in the order they are applied
    pub const SEQUENCE: [BindStage; 6] = [
        BindStage::LayoutBound,
        BindStage::BuffersBound,
        BindStage::ShadersBound,
        BindStage::ResourcesBound,
        BindStage::TargetsBound,
        BindStage::Drawn,
    ];

    /// The only stage reachable from this one
    pub fn next(&self) -> Option<BindStage> {
        match self {
            BindStage::Unbound => Some(BindStage::LayoutBound),
            BindStage::LayoutBound => Some(BindStage::BuffersBound),
            BindStage::BuffersBound => Some(BindStage::ShadersBound),
            BindStage::ShadersBound => Some(BindStage::ResourcesBound),
            BindStage::ResourcesBound => Some(BindStage::TargetsBound),
            BindStage::TargetsBound => Some(BindStage::Drawn),
            BindStage::Drawn => None,
        }
    }
}

impl fmt::Display for BindStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BindStage::Unbound => "unbound",
            BindStage::LayoutBound => "input layout",
            BindStage::BuffersBound => "vertex/index buffers",
            BindStage::ShadersBound => "shaders",
            BindStage::ResourcesBound => "shader resources",
            BindStage::TargetsBound => "render targets",
            BindStage::Drawn => "draw",
        };
        write!(f, "{}", name)
    }
}

/// Result of one `PipelineBinder::draw`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn { index_count: u32 },
    /// `failed_step` is the stage the sequence could not enter
    Skipped { failed_step: BindStage, reason: String },
}

impl DrawOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, DrawOutcome::Drawn { .. })
    }
}

/// Draw counters since creation (or the last `reset_stats`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinderStats {
    pub draws_issued: u64,
    pub draws_skipped: u64,
}

/// Runs the binding sequence for each draw
#[derive(Debug, Default)]
pub struct PipelineBinder {
    stage: BindStage,
    stats: BinderStats,
}

impl PipelineBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stage reached by the most recent draw
    pub fn stage(&self) -> BindStage {
        self.stage
    }

    pub fn stats(&self) -> BinderStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = BinderStats::default();
    }

    /// Bind `state` and `item`, then issue `draw_indexed(index_count, 0, 0)`
    ///
    /// # Returns
    ///
    /// - `Ok(Drawn)` when the draw call was issued
    /// - `Ok(Skipped)` when a step's resource was missing or destroyed
    /// - `Err` when the device context itself failed
    pub fn draw(
        &mut self,
        context: &mut dyn DeviceContext,
        state: &PipelineState,
        item: &DrawItem<'_>,
    ) -> Result<DrawOutcome> {
        self.stage = BindStage::Unbound;

        for step in BindStage::SEQUENCE {
            match self.enter(step, context, state, item) {
                Ok(()) => {
                    self.stage = step;
                    engine_trace!(LOG_SOURCE, "'{}': {} bound", item.mesh.name(), step);
                }
                Err(Error::PreconditionError(reason)) => {
                    engine_warn!(LOG_SOURCE, "Skipping draw of '{}': {} step failed: {}",
                        item.mesh.name(), step, reason);
                    self.stats.draws_skipped += 1;
                    return Ok(DrawOutcome::Skipped { failed_step: step, reason });
                }
                Err(err) => {
                    engine_error!(LOG_SOURCE, "Draw of '{}' aborted at {} step: {}",
                        item.mesh.name(), step, err);
                    return Err(err);
                }
            }
        }

        self.stats.draws_issued += 1;
        Ok(DrawOutcome::Drawn { index_count: item.mesh.index_count() })
    }

    fn enter(
        &mut self,
        step: BindStage,
        context: &mut dyn DeviceContext,
        state: &PipelineState,
        item: &DrawItem<'_>,
    ) -> Result<()> {
        if self.stage.next() != Some(step) {
            return Err(Error::PreconditionError(format!(
                "cannot enter {} from {}", step, self.stage
            )));
        }

        match step {
            BindStage::Unbound => Ok(()),
            BindStage::LayoutBound => {
                let layout = required(&state.input_layout, "no input layout")?;
                context.ia_set_input_layout(layout)?;
                Ok(())
            }
            BindStage::BuffersBound => {
                let mesh = item.mesh;
                if mesh.index_count() == 0 {
                    return Err(Error::PreconditionError(format!("mesh '{}' has no indices", mesh.name())));
                }
                mesh.vertex_buffer().bind(context, BindParams::slot(0))?;
                mesh.index_buffer()
                    .bind(context, BindParams::default().index_format(mesh.index_format()))?;
                context.ia_set_primitive_topology(state.topology)?;
                Ok(())
            }
            BindStage::ShadersBound => {
                let vertex_shader = required(&state.vertex_shader, "no vertex shader")?;
                let pixel_shader = required(&state.pixel_shader, "no pixel shader")?;
                if vertex_shader.stage() != ShaderStage::Vertex || pixel_shader.stage() != ShaderStage::Pixel {
                    return Err(Error::PreconditionError("shader bound to the wrong stage".to_string()));
                }
                context.vs_set_shader(vertex_shader)?;
                bind_constants(context, item.vs_constants, ShaderStage::Vertex)?;
                context.ps_set_shader(pixel_shader)?;
                bind_constants(context, item.ps_constants, ShaderStage::Pixel)?;
                Ok(())
            }
            BindStage::ResourcesBound => {
                let views = item.shader_resources.unwrap_or(&state.shader_resources);
                if !views.is_empty() {
                    if state.sampler.is_none() {
                        return Err(Error::PreconditionError(
                            "shader resources bound without a sampler".to_string(),
                        ));
                    }
                    context.ps_set_shader_resources(0, views)?;
                }
                if let Some(sampler) = &state.sampler {
                    context.ps_set_samplers(0, std::slice::from_ref(sampler))?;
                }
                Ok(())
            }
            BindStage::TargetsBound => {
                if state.render_targets.is_empty() {
                    return Err(Error::PreconditionError("no render target".to_string()));
                }
                let viewport = state
                    .viewport
                    .ok_or_else(|| Error::PreconditionError("no viewport".to_string()))?;
                context.om_set_render_targets(&state.render_targets, state.depth_stencil.as_ref())?;
                context.rs_set_viewports(&[viewport])?;
                Ok(())
            }
            BindStage::Drawn => {
                context.draw_indexed(item.mesh.index_count(), 0, 0)?;
                Ok(())
            }
        }
    }
}

fn required<'a, T: ?Sized>(
    handle: &'a Option<std::sync::Arc<T>>,
    reason: &str,
) -> Result<&'a std::sync::Arc<T>> {
    handle
        .as_ref()
        .ok_or_else(|| Error::PreconditionError(reason.to_string()))
}

fn bind_constants(
    context: &mut dyn DeviceContext,
    constants: &[ConstantSlot<'_>],
    stage: ShaderStage,
) -> Result<()> {
    for constant in constants {
        constant.buffer.bind(context, BindParams::slot(constant.slot).stage(stage))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_binder_tests.rs"]
mod tests;
