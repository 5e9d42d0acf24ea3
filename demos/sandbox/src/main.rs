// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Ember Sandbox
// Runs a few headless frames: particles come from a pool, every draw goes
// through an instrumented device, telemetry is published each frame.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use ember_core::memory::ReusablePool;
use ember_core::renderer::{
    Capability, ClearColor, ClearFlags, GraphicsDevice, IndexFormat, InstrumentedDevice,
    PrimitiveTopology, RenderStats, Viewport,
};
use ember_infra::{HeadlessConfig, HeadlessDevice};
use ember_telemetry::{init_logging, TelemetryConfig, TelemetryService};

const FRAMES: u64 = 8;
const MAX_PARTICLES: u64 = 6;

#[derive(Debug, Default)]
struct Particle {
    position: [f32; 2],
    velocity: [f32; 2],
    spawned_frame: u64,
}

type ParticleHandle = Arc<Mutex<Particle>>;

fn load_config() -> Result<TelemetryConfig> {
    match std::env::args().nth(1) {
        Some(path) => TelemetryConfig::from_file(&path)
            .with_context(|| format!("could not load sandbox config from {path}")),
        None => Ok(TelemetryConfig {
            update_interval_ms: 0,
            ..Default::default()
        }),
    }
}

fn render_frame(
    device: &InstrumentedDevice<HeadlessDevice>,
    particles: &ReusablePool<ParticleHandle>,
    frame: u64,
) -> Result<()> {
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

    // Background quad.
    device.draw_elements(PrimitiveTopology::TriangleList, 6, IndexFormat::Uint16, 0)?;

    // Particle count breathes between 1 and MAX_PARTICLES.
    let count = 1 + frame % MAX_PARTICLES;
    let mut live = Vec::with_capacity(count as usize);
    for i in 0..count {
        let handle = particles.acquire()?;
        {
            let mut particle = handle.lock().unwrap_or_else(PoisonError::into_inner);
            particle.position = [i as f32 * 0.1, frame as f32 * 0.05];
            particle.velocity = [0.0, -0.01];
            particle.position[1] += particle.velocity[1];
            particle.spawned_frame = frame;
            log::trace!("particle {} at {:?}", i, particle.position);
        }
        device.draw_arrays(PrimitiveTopology::TriangleStrip, 0, 4)?;
        live.push(handle);
    }
    for handle in live {
        particles.release(handle);
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config);
    log::info!("Ember sandbox starting ({} frames)", FRAMES);

    let stats = Arc::new(RenderStats::new());
    let device = InstrumentedDevice::new(
        HeadlessDevice::new(HeadlessConfig::default()),
        Arc::clone(&stats),
    );
    device.set_viewport(Viewport::from_size(1280, 720))?;
    device.clear_color(ClearColor::CORNFLOWER_BLUE)?;
    device.set_capability(Capability::DepthTest, true)?;
    log::info!("Using '{}' graphics backend", device.backend_name());

    let particles: Arc<ReusablePool<ParticleHandle>> = Arc::new(ReusablePool::with_default());
    let warmed = particles.prefill(2)?;
    log::debug!("Prefilled particle pool with {} instances", warmed);

    let mut telemetry = TelemetryService::new(config);
    telemetry.watch_render_stats(Arc::clone(&stats))?;
    telemetry.watch_pool("particles", Arc::clone(&particles))?;

    for frame in 0..FRAMES {
        render_frame(&device, &particles, frame)
            .with_context(|| format!("frame {frame} failed"))?;
        telemetry.tick();

        let snapshot = stats.snapshot();
        log::info!(
            "[HUD] frame {:>2} | draw calls {:>2} (total {:>3}, peak {:>2}) | particles {} created, {} idle",
            frame,
            snapshot.frame_draw_calls,
            snapshot.total_draw_calls,
            snapshot.peak_frame_draw_calls,
            particles.created_len(),
            particles.available_len(),
        );
    }

    telemetry.flush();
    for metric in telemetry
        .metrics_registry()
        .namespace_metrics(&telemetry.config().namespace)
    {
        log::info!("{} = {} {}", metric.id, metric.value.as_f64(), metric.unit);
    }

    let oldest = particles
        .all_ever_created()
        .iter()
        .map(|p| p.lock().unwrap_or_else(PoisonError::into_inner).spawned_frame)
        .min()
        .unwrap_or_default();
    log::info!(
        "Particle pool stats: {:?} (oldest reuse saw frame {})",
        particles.stats(),
        oldest
    );
    Ok(())
}
