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

use std::sync::Arc;

use ember_core::renderer::{
    ClearFlags, GraphicsDevice, IndexFormat, InstrumentedDevice, PrimitiveTopology, RenderStats,
};
use ember_infra::{HeadlessConfig, HeadlessDevice};

fn instrumented(config: HeadlessConfig) -> InstrumentedDevice<HeadlessDevice> {
    InstrumentedDevice::new(HeadlessDevice::new(config), Arc::new(RenderStats::new()))
}

#[test]
fn test_frames_are_accounted_end_to_end() {
    let device = instrumented(HeadlessConfig::default());

    for draws in [3, 5, 2] {
        device.clear(ClearFlags::ALL).unwrap();
        for _ in 0..draws {
            device
                .draw_elements(PrimitiveTopology::TriangleList, 6, IndexFormat::Uint16, 0)
                .unwrap();
        }
    }

    let snapshot = device.stats().snapshot();
    assert_eq!(snapshot.frame_draw_calls, 2);
    assert_eq!(snapshot.total_draw_calls, 10);
    assert_eq!(snapshot.peak_frame_draw_calls, 5);
    assert_eq!(snapshot.frames, 3);

    let recorded_draws = device
        .inner()
        .commands()
        .iter()
        .filter(|c| c.is_draw())
        .count();
    assert_eq!(recorded_draws as u64, snapshot.total_draw_calls);
}

#[test]
fn test_rejected_submissions_do_not_count() {
    let device = instrumented(HeadlessConfig {
        vertex_buffer_len: Some(3),
        ..Default::default()
    });

    device.clear(ClearFlags::COLOR).unwrap();
    device
        .draw_arrays(PrimitiveTopology::TriangleList, 0, 3)
        .unwrap();
    assert!(device
        .draw_arrays(PrimitiveTopology::TriangleList, 0, 6)
        .is_err());

    assert_eq!(device.stats().current_frame_calls(), 1);
    assert_eq!(device.stats().total_calls(), 1);
}

#[test]
fn test_failed_clear_keeps_frame_running() {
    let device = instrumented(HeadlessConfig::default());
    device
        .draw_arrays(PrimitiveTopology::LineStrip, 0, 4)
        .unwrap();
    device.inner().lose();

    assert!(device.clear(ClearFlags::ALL).is_err());
    assert_eq!(device.stats().current_frame_calls(), 1);
    assert_eq!(device.stats().frames(), 0);
}

#[test]
fn test_shared_stats_across_threads() {
    let stats = Arc::new(RenderStats::new());
    let device = InstrumentedDevice::new(
        HeadlessDevice::new(HeadlessConfig {
            record_commands: false,
            ..Default::default()
        }),
        Arc::clone(&stats),
    );

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..250 {
                    device
                        .draw_arrays(PrimitiveTopology::TriangleList, 0, 3)
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(stats.total_calls(), 1_000);
    assert_eq!(device.backend_name(), "headless");
}
