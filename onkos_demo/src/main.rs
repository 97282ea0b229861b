/// Onkos demo - spins a textured cube on the headless backend
///
/// Usage: onkos_demo [path/to/mesh.obj]
///
/// Without an argument the bundled cube is used. The demo renders a fixed
/// number of frames and prints the draw counters.

use onkos_engine::onkos::{Engine, Result};
use onkos_engine::onkos::config::{AppConfig, HeadlessDeviceConfig};
use onkos_engine::onkos::device::{
    BindFlags, Format, HeadlessBackend, SamplerDesc, ShaderBytecode, TextureDesc, Usage,
};
use onkos_engine::onkos::frame::{FrameOrchestrator, MaterialDesc};
use onkos_engine::onkos::log::LogSeverity;
use onkos_engine::onkos::resource::{MeshData, ObjMeshLoader};
use onkos_engine::{engine_error, engine_info};

const LOG_SOURCE: &str = "onkos_demo";
const BUNDLED_CUBE: &str = include_str!("../assets/cube.obj");
const FRAME_SECONDS: f32 = 1.0 / 60.0;

fn load_mesh() -> Result<MeshData> {
    match std::env::args().nth(1) {
        Some(path) => ObjMeshLoader::load_file(path),
        None => ObjMeshLoader::parse_named("cube", BUNDLED_CUBE),
    }
}

/// Stand-in for the compiled `VS`/`PS` entry points of the cube shader
fn material() -> MaterialDesc {
    MaterialDesc {
        vertex_shader: ShaderBytecode::new("VS", b"DXBC-cube-vs".to_vec()),
        pixel_shader: ShaderBytecode::new("PS", b"DXBC-cube-ps".to_vec()),
        texture: Some(TextureDesc {
            width: 256,
            height: 256,
            format: Format::R8G8B8A8_UNORM,
            usage: Usage::Immutable,
            bind_flags: BindFlags::SHADER_RESOURCE,
        }),
        sampler: SamplerDesc::default(),
    }
}

fn run(config: AppConfig) -> Result<()> {
    let mesh = load_mesh()?;

    let backend = HeadlessBackend::new(HeadlessDeviceConfig {
        back_buffer_width: config.width,
        back_buffer_height: config.height,
        ..HeadlessDeviceConfig::default()
    });
    let probe = backend.device.clone();

    let mut orchestrator = FrameOrchestrator::new(
        Box::new(backend.device),
        Box::new(backend.context),
        Box::new(backend.swap_chain),
        config,
        &material(),
    )?;
    orchestrator.add_mesh(mesh)?;

    let max_frames = orchestrator.config().max_frames.unwrap_or(u64::MAX);
    while orchestrator.stats().frames < max_frames {
        orchestrator.run_frame(FRAME_SECONDS)?;
    }

    let stats = orchestrator.stats();
    engine_info!(LOG_SOURCE, "{} frames presented, {} draws issued, {} skipped ({:.2}s simulated)",
        probe.presents(), stats.draws_issued, stats.draws_skipped, orchestrator.elapsed());
    println!("frames={} draws={} skipped={}", stats.frames, stats.draws_issued, stats.draws_skipped);
    Ok(())
}

fn main() {
    Engine::set_min_severity(LogSeverity::Info);

    let config = AppConfig {
        app_name: "Onkos Cube".to_string(),
        max_frames: Some(120),
        ..AppConfig::default()
    };

    if let Err(err) = run(config) {
        engine_error!(LOG_SOURCE, "{}", err);
        std::process::exit(1);
    }
}
