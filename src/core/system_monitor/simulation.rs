//! Simulated hardware state.
//!
//! Every metric is a bounded random walk. The state is advanced explicitly with
//! [`SimulationState::tick`]; the reporting side only ever sees snapshots.

use std::time::Duration;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::metrics::{
    GpuMetrics, LiveMetricsSnapshot, MetricKind, MetricReading, NetworkMetrics, PerformanceMode,
    SystemMetrics,
};
use crate::core::reporting::ReportingEngine;

const MIB: u64 = 1024 * 1024;
const GPU_MEMORY_TOTAL: u64 = 12 * 1024 * MIB;
const CORE_COUNT: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanMode {
    /// Fan speed follows core temperature
    #[default]
    Auto,
    /// Fan holds the speed set by the operator
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub temperature: f64,
    pub fan_speed: f64,
    pub fan_mode: FanMode,
    pub performance_mode: PerformanceMode,
    pub gpu: GpuMetrics,
    pub network: NetworkMetrics,
    pub system: SystemMetrics,
    tick_interval: Duration,
    ticks: u64,
}

impl SimulationState {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            temperature: 45.0,
            fan_speed: 40.0,
            fan_mode: FanMode::Auto,
            performance_mode: PerformanceMode::Balanced,
            gpu: GpuMetrics {
                usage_percent: 35.0,
                temperature_celsius: 55.0,
                memory_used_bytes: 4 * 1024 * MIB,
                memory_total_bytes: GPU_MEMORY_TOTAL,
                clock_mhz: 1700,
                power_draw_watts: 110.0,
            },
            network: NetworkMetrics {
                download_bytes_per_sec: 5 * MIB,
                upload_bytes_per_sec: MIB,
                latency_ms: 25.0,
                signal_strength: 85.0,
                packets_sent: 0,
                packets_received: 0,
            },
            system: SystemMetrics {
                cpu_usage: 25.0,
                memory_usage: 45.0,
                uptime_secs: 0,
                process_count: 180,
                load_average: (2.0, 2.0, 2.0),
            },
            tick_interval,
            ticks: 0,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_performance_mode(&mut self, mode: PerformanceMode) {
        self.performance_mode = mode;
    }

    /// Pin the fan to a fixed speed; `None` hands control back to the temperature curve
    pub fn set_manual_fan_speed(&mut self, speed: Option<f64>) {
        match speed {
            Some(speed) => {
                self.fan_mode = FanMode::Manual;
                self.fan_speed = speed.clamp(0.0, 100.0);
            }
            None => self.fan_mode = FanMode::Auto,
        }
    }

    /// Advance every metric by one step
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        let secs = self.tick_interval.as_secs_f64();
        self.ticks += 1;

        self.tick_system(rng, secs);
        self.tick_thermal(rng);
        self.tick_gpu(rng);
        self.tick_network(rng, secs);
    }

    fn tick_system<R: Rng>(&mut self, rng: &mut R, secs: f64) {
        let cpu_ceiling = match self.performance_mode {
            PerformanceMode::Eco => 70.0,
            _ => 100.0,
        };
        let sys = &mut self.system;
        sys.cpu_usage = walk(rng, sys.cpu_usage, 5.0, 2.0, cpu_ceiling);
        sys.memory_usage = walk(rng, sys.memory_usage, 3.0, 10.0, 99.0);
        sys.process_count = walk(rng, sys.process_count as f64, 3.0, 120.0, 400.0).round() as u32;

        // Uptime accumulates fractional seconds across ticks
        let elapsed = (self.ticks as f64 * secs) as u64;
        sys.uptime_secs = sys.uptime_secs.max(elapsed);

        let one = sys.cpu_usage / 100.0 * CORE_COUNT;
        let (_, five, fifteen) = sys.load_average;
        sys.load_average = (one, five * 0.9 + one * 0.1, fifteen * 0.97 + one * 0.03);
    }

    fn tick_thermal<R: Rng>(&mut self, rng: &mut R) {
        let base = match self.performance_mode {
            PerformanceMode::Eco => 45.0,
            PerformanceMode::Balanced => 55.0,
            PerformanceMode::Performance => 68.0,
        };
        let target = base + (self.system.cpu_usage - 50.0) * 0.2;
        let cooling = (self.fan_speed - 50.0) * 0.02;
        let noise: f64 = rng.gen_range(-1.5..=1.5);
        self.temperature =
            (self.temperature + (target - self.temperature) * 0.1 + noise - cooling).clamp(30.0, 100.0);

        if self.fan_mode == FanMode::Auto {
            self.fan_speed = (20.0 + (self.temperature - 40.0) * 1.5).clamp(20.0, 100.0);
        }
    }

    fn tick_gpu<R: Rng>(&mut self, rng: &mut R) {
        let (power_factor, boost) = match self.performance_mode {
            PerformanceMode::Eco => (0.7, 0),
            PerformanceMode::Balanced => (1.0, 0),
            PerformanceMode::Performance => (1.2, 200),
        };
        let gpu = &mut self.gpu;
        gpu.usage_percent = walk(rng, gpu.usage_percent, 6.0, 0.0, 100.0);
        gpu.temperature_celsius =
            (40.0 + gpu.usage_percent * 0.45 + rng.gen_range(-1.0..=1.0_f64)).clamp(30.0, 95.0);
        gpu.power_draw_watts = (30.0 + gpu.usage_percent * 2.2) * power_factor;
        gpu.clock_mhz = 1500 + (gpu.usage_percent * 5.0) as u32 + boost;

        let used = gpu.memory_used_bytes as f64 / MIB as f64;
        let used = walk(rng, used, 256.0, 512.0, (gpu.memory_total_bytes / MIB) as f64);
        gpu.memory_used_bytes = (used * MIB as f64) as u64;
    }

    fn tick_network<R: Rng>(&mut self, rng: &mut R, secs: f64) {
        let net = &mut self.network;
        let down = walk(rng, net.download_bytes_per_sec as f64, 512.0 * 1024.0, 0.0, 20.0 * MIB as f64);
        let up = walk(rng, net.upload_bytes_per_sec as f64, 128.0 * 1024.0, 0.0, 5.0 * MIB as f64);
        net.download_bytes_per_sec = down as u64;
        net.upload_bytes_per_sec = up as u64;
        net.latency_ms = walk(rng, net.latency_ms, 5.0, 5.0, 250.0);
        net.signal_strength = walk(rng, net.signal_strength, 2.0, 20.0, 100.0);

        // ~1500 byte frames
        net.packets_received += (down * secs / 1500.0) as u64;
        net.packets_sent += (up * secs / 1500.0) as u64;
    }

    /// Read-only view handed to the reporting core
    pub fn snapshot(&self, at: DateTime<Local>) -> LiveMetricsSnapshot {
        LiveMetricsSnapshot {
            timestamp: at.timestamp(),
            temperature: self.temperature,
            fan_speed: self.fan_speed,
            performance_mode: self.performance_mode,
            gpu: self.gpu.clone(),
            network: self.network.clone(),
            system: self.system.clone(),
        }
    }

    /// One reading per tracked metric, all stamped `at`
    pub fn readings(&self, at: DateTime<Local>) -> Vec<MetricReading> {
        let throughput_mib =
            (self.network.download_bytes_per_sec + self.network.upload_bytes_per_sec) as f64
                / MIB as f64;

        vec![
            MetricReading::new(at, MetricKind::Temperature, "core", self.temperature),
            MetricReading::new(at, MetricKind::Cpu, "cpu", self.system.cpu_usage),
            MetricReading::new(at, MetricKind::Gpu, "gpu0", self.gpu.usage_percent),
            MetricReading::new(at, MetricKind::Memory, "ram", self.system.memory_usage),
            MetricReading::new(at, MetricKind::Network, "wan", throughput_mib),
            MetricReading::new(at, MetricKind::Latency, "wan", self.network.latency_ms),
        ]
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

fn walk<R: Rng>(rng: &mut R, value: f64, step: f64, min: f64, max: f64) -> f64 {
    (value + rng.gen_range(-step..=step)).clamp(min, max)
}

/// Simulation state plus its random source
pub struct Simulator {
    state: SimulationState,
    rng: StdRng,
}

impl Simulator {
    pub fn new(tick_interval: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: SimulationState::new(tick_interval),
            rng,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Advance one tick and return the snapshot and readings stamped `at`
    pub fn step(&mut self, at: DateTime<Local>) -> (LiveMetricsSnapshot, Vec<MetricReading>) {
        self.state.tick(&mut self.rng);
        (self.state.snapshot(at), self.state.readings(at))
    }

    /// Replay `ticks` steps that end at `end`, recording every reading into `engine`
    pub fn run_into(
        &mut self,
        engine: &ReportingEngine,
        ticks: usize,
        end: DateTime<Local>,
    ) -> LiveMetricsSnapshot {
        let spacing_ms = i64::try_from(self.state.tick_interval.as_millis()).unwrap_or(i64::MAX);
        let mut last = self.state.snapshot(end);

        for i in 0..ticks {
            let steps_back = i64::try_from(ticks - 1 - i).unwrap_or(i64::MAX);
            let offset = chrono::Duration::milliseconds(spacing_ms.saturating_mul(steps_back));
            let at = end.checked_sub_signed(offset).unwrap_or(end);
            let (snapshot, readings) = self.step(at);
            engine.record_batch(readings);
            last = snapshot;
        }

        last
    }
}
