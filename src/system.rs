use serde::Serialize;
use std::time::Duration;
use sysinfo::System;

/// Point-in-time CPU and memory utilization, both in 0..=100.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SystemUsage {
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// CPU usage needs two refreshes with a delta between them; the second
/// one blocks the caller for this long.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub fn sample() -> SystemUsage {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    std::thread::sleep(CPU_SAMPLE_WINDOW);
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let cpu = sys.global_cpu_info().cpu_usage();
    let total = sys.total_memory();
    let memory = if total > 0 {
        (sys.used_memory() as f32 / total as f32) * 100.0
    } else {
        0.0
    };

    SystemUsage {
        cpu_percent: cpu.clamp(0.0, 100.0),
        memory_percent: memory.clamp(0.0, 100.0),
    }
}

pub fn format_usage_table(usage: &SystemUsage) -> String {
    let rows = [
        ("CPU Usage", format!("{:.1}%", usage.cpu_percent)),
        ("Memory Usage", format!("{:.1}%", usage.memory_percent)),
    ];

    let name_width = rows.iter().map(|(m, _)| m.len()).max().unwrap_or(0);

    let mut lines = Vec::new();
    lines.push(format!("{:<name_width$}  {}", "METRIC", "USAGE"));
    for (metric, value) in rows {
        lines.push(format!("{:<name_width$}  {}", metric, value));
    }
    lines.join("\n")
}
