//! Daily analytics aggregation.
//!
//! Folds a list of readings plus the live snapshot into six analysis groups.
//! Every ratio resolves to `0.0` when its denominator is zero and every average
//! over an empty set is `0.0`, so the output never carries NaN.

use serde::{Deserialize, Serialize};

use crate::core::system_monitor::{
    evaluate_health_alerts, AlertConfig, Estimator, HealthInputs, LiveMetricsSnapshot,
    MetricKind, MetricReading,
};

/// Temperature (°C) above which a reading counts towards time at critical
pub const CRITICAL_TEMPERATURE: f64 = 80.0;
/// Temperature (°C) above which a reading is a thermal event
pub const THERMAL_EVENT_TEMPERATURE: f64 = 85.0;
/// Samples compared at each end of the buffer for the temperature trend
pub const TREND_WINDOW: usize = 100;
/// Bandwidth considered full utilization (bytes per second)
pub const BANDWIDTH_CAPACITY: f64 = 10.0 * 1024.0 * 1024.0;

/// Static compliance figures without a measured source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceBaseline {
    pub uptime: f64,
    pub security: f64,
}

impl Default for ComplianceBaseline {
    fn default() -> Self {
        Self {
            uptime: 99.9,
            security: 95.0,
        }
    }
}

/// Cut-offs for the average-based performance and network trends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendThresholds {
    pub cpu_degrading: f64,
    pub cpu_improving: f64,
    pub latency_degrading: f64, // ms
    pub latency_improving: f64, // ms
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            cpu_degrading: 80.0,
            cpu_improving: 50.0,
            latency_degrading: 100.0,
            latency_improving: 50.0,
        }
    }
}

/// Everything configurable about the analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisPolicy {
    pub alerts: AlertConfig,
    pub compliance: ComplianceBaseline,
    pub trends: TrendThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Degrading => "degrading",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceGrade {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl PerformanceGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceGrade::APlus
        } else if score >= 80.0 {
            PerformanceGrade::A
        } else if score >= 70.0 {
            PerformanceGrade::B
        } else if score >= 60.0 {
            PerformanceGrade::C
        } else {
            PerformanceGrade::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceGrade::APlus => "A+",
            PerformanceGrade::A => "A",
            PerformanceGrade::B => "B",
            PerformanceGrade::C => "C",
            PerformanceGrade::D => "D",
        }
    }
}

impl std::fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureAnalysis {
    pub average: f64,
    pub peak: f64,
    pub minimum: f64,
    pub time_at_critical: f64, // percent of temperature readings
    pub thermal_events: usize,
    pub cooling_efficiency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub avg_cpu_utilization: f64,
    pub avg_gpu_utilization: f64,
    pub avg_memory_pressure: f64,
    pub system_stability: f64,
    pub power_efficiency: f64,
    pub load_distribution: f64,
}

/// `packet_loss` and `throughput_consistency` are estimates, not measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAnalysis {
    pub avg_latency: f64,
    pub bandwidth_utilization: f64,
    pub connection_stability: f64,
    pub packet_loss: f64,
    pub signal_quality: f64,
    pub throughput_consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub overall_score: f64,
    pub reliability_index: f64,
    pub maintenance_alerts: Vec<String>,
    pub critical_issues: Vec<String>,
    pub optimization_suggestions: Vec<String>,
    pub performance_grade: PerformanceGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub temperature_trend: Trend,
    pub performance_trend: Trend,
    pub network_trend: Trend,
    pub forecast_alerts: Vec<String>,
    pub prediction_accuracy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAnalysis {
    pub thermal_compliance: f64,
    pub performance_compliance: f64,
    pub uptime_compliance: f64,
    pub security_compliance: f64,
    pub energy_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysis {
    pub temperature: TemperatureAnalysis,
    pub performance: PerformanceAnalysis,
    pub network: NetworkAnalysis,
    pub system_health: SystemHealth,
    pub trends: TrendAnalysis,
    pub compliance: ComplianceAnalysis,
}

/// Run every analysis group over `readings`
pub fn analyze(
    readings: &[MetricReading],
    snapshot: &LiveMetricsSnapshot,
    estimator: &dyn Estimator,
    policy: &AnalysisPolicy,
) -> ReportAnalysis {
    let temperature = analyze_temperature(readings, snapshot);
    let performance = analyze_performance(readings, snapshot, &temperature);
    let network = analyze_network(readings, snapshot, estimator);
    let system_health = assess_health(&temperature, &performance, &network, snapshot, &policy.alerts);
    let trends = analyze_trends(readings, &performance, &network, estimator, &policy.trends);
    let compliance = assess_compliance(&temperature, &performance, &policy.compliance);

    ReportAnalysis {
        temperature,
        performance,
        network,
        system_health,
        trends,
        compliance,
    }
}

fn values_of(readings: &[MetricReading], metric: MetricKind) -> Vec<f64> {
    readings
        .iter()
        .filter(|r| r.metric == metric)
        .map(|r| r.value)
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub fn analyze_temperature(
    readings: &[MetricReading],
    snapshot: &LiveMetricsSnapshot,
) -> TemperatureAnalysis {
    let temps = values_of(readings, MetricKind::Temperature);
    if temps.is_empty() {
        return TemperatureAnalysis::default();
    }

    let average = mean(&temps);
    let peak = temps.iter().copied().fold(f64::MIN, f64::max);
    let minimum = temps.iter().copied().fold(f64::MAX, f64::min);
    let critical = temps.iter().filter(|&&t| t > CRITICAL_TEMPERATURE).count();
    let thermal_events = temps.iter().filter(|&&t| t > THERMAL_EVENT_TEMPERATURE).count();

    TemperatureAnalysis {
        average,
        peak,
        minimum,
        time_at_critical: percent_of(critical, temps.len()),
        thermal_events,
        cooling_efficiency: ratio(100.0 - average, snapshot.fan_speed),
    }
}

pub fn analyze_performance(
    readings: &[MetricReading],
    snapshot: &LiveMetricsSnapshot,
    temperature: &TemperatureAnalysis,
) -> PerformanceAnalysis {
    let avg_cpu = mean(&values_of(readings, MetricKind::Cpu));
    let avg_gpu = mean(&values_of(readings, MetricKind::Gpu));
    let avg_memory = mean(&values_of(readings, MetricKind::Memory));

    let cpu_penalty = if avg_cpu > 90.0 { 10.0 } else { 0.0 };
    let penalty = temperature.thermal_events as f64 * 5.0 + cpu_penalty;

    PerformanceAnalysis {
        avg_cpu_utilization: avg_cpu,
        avg_gpu_utilization: avg_gpu,
        avg_memory_pressure: avg_memory,
        system_stability: (100.0 - penalty).max(0.0),
        power_efficiency: ratio(avg_gpu, snapshot.gpu.power_draw_watts) * 100.0,
        load_distribution: if (avg_cpu - avg_gpu).abs() < 20.0 { 100.0 } else { 80.0 },
    }
}

pub fn analyze_network(
    readings: &[MetricReading],
    snapshot: &LiveMetricsSnapshot,
    estimator: &dyn Estimator,
) -> NetworkAnalysis {
    let net = &snapshot.network;
    let throughput = (net.download_bytes_per_sec + net.upload_bytes_per_sec) as f64;

    NetworkAnalysis {
        avg_latency: mean(&values_of(readings, MetricKind::Latency)),
        bandwidth_utilization: throughput / BANDWIDTH_CAPACITY * 100.0,
        connection_stability: net.signal_strength,
        packet_loss: estimator.packet_loss(snapshot),
        signal_quality: net.signal_strength,
        throughput_consistency: estimator.throughput_consistency(snapshot),
    }
}

pub fn assess_health(
    temperature: &TemperatureAnalysis,
    performance: &PerformanceAnalysis,
    network: &NetworkAnalysis,
    snapshot: &LiveMetricsSnapshot,
    alert_config: &AlertConfig,
) -> SystemHealth {
    let overall_score = (performance.system_stability
        + performance.power_efficiency
        + network.connection_stability)
        / 3.0;

    let alerts = evaluate_health_alerts(
        &HealthInputs {
            avg_temperature: temperature.average,
            avg_cpu: performance.avg_cpu_utilization,
            avg_memory_pressure: performance.avg_memory_pressure,
            avg_latency: network.avg_latency,
            fan_speed: snapshot.fan_speed,
            power_efficiency: performance.power_efficiency,
        },
        alert_config,
    );

    SystemHealth {
        overall_score,
        reliability_index: (overall_score + (100.0 - temperature.time_at_critical)).min(100.0),
        maintenance_alerts: alerts.maintenance_alerts,
        critical_issues: alerts.critical_issues,
        optimization_suggestions: alerts.optimization_suggestions,
        performance_grade: PerformanceGrade::from_score(overall_score),
    }
}

/// Recent window against earliest window of temperature readings
pub fn temperature_trend(readings: &[MetricReading]) -> Trend {
    let temps = values_of(readings, MetricKind::Temperature);
    if temps.is_empty() {
        return Trend::Stable;
    }

    let window = TREND_WINDOW.min(temps.len());
    let earliest = mean(&temps[..window]);
    let recent = mean(&temps[temps.len() - window..]);

    if recent > earliest {
        Trend::Degrading
    } else {
        Trend::Improving
    }
}

fn threshold_trend(value: f64, degrading_above: f64, improving_below: f64) -> Trend {
    if value > degrading_above {
        Trend::Degrading
    } else if value < improving_below {
        Trend::Improving
    } else {
        Trend::Stable
    }
}

pub fn analyze_trends(
    readings: &[MetricReading],
    performance: &PerformanceAnalysis,
    network: &NetworkAnalysis,
    estimator: &dyn Estimator,
    thresholds: &TrendThresholds,
) -> TrendAnalysis {
    let temperature_trend = temperature_trend(readings);
    // Classified from the day's averages, not from a window comparison
    let performance_trend = threshold_trend(
        performance.avg_cpu_utilization,
        thresholds.cpu_degrading,
        thresholds.cpu_improving,
    );
    let network_trend = threshold_trend(
        network.avg_latency,
        thresholds.latency_degrading,
        thresholds.latency_improving,
    );

    let mut forecast_alerts = Vec::new();
    if temperature_trend == Trend::Degrading {
        forecast_alerts
            .push("Temperature is rising - expect increased cooling demand".to_string());
    }
    if performance_trend == Trend::Degrading {
        forecast_alerts.push("Processing load is high - performance may degrade".to_string());
    }
    if network_trend == Trend::Degrading {
        forecast_alerts.push("Network latency is high - connectivity may worsen".to_string());
    }

    TrendAnalysis {
        temperature_trend,
        performance_trend,
        network_trend,
        forecast_alerts,
        prediction_accuracy: estimator.prediction_accuracy(),
    }
}

pub fn assess_compliance(
    temperature: &TemperatureAnalysis,
    performance: &PerformanceAnalysis,
    baseline: &ComplianceBaseline,
) -> ComplianceAnalysis {
    let thermal_compliance = if temperature.time_at_critical < 5.0 {
        100.0
    } else {
        (100.0 - temperature.time_at_critical * 2.0).max(0.0)
    };

    let avg_cpu = performance.avg_cpu_utilization;
    let performance_compliance = if avg_cpu < 80.0 {
        100.0
    } else {
        (100.0 - (avg_cpu - 80.0) * 5.0).max(0.0)
    };

    ComplianceAnalysis {
        thermal_compliance,
        performance_compliance,
        uptime_compliance: baseline.uptime,
        security_compliance: baseline.security,
        energy_efficiency: performance.power_efficiency.min(100.0),
    }
}
