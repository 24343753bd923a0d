use std::time::{Duration, Instant};
use sysinfo::System;

/// The number of bytes in a megabyte for memory calculations
const BYTES_PER_MB: f64 = 1_048_576.0;

/// Benchmark of a single finished phase
#[derive(Debug, Clone)]
pub struct PhaseBenchmark {
    pub phase: String,
    pub duration: Duration,
    pub items_processed: usize,
    pub memory_used: u64,
    pub cpu_usage: f32,
}

impl PhaseBenchmark {
    /// Calculate throughput in items per second
    pub fn throughput(&self) -> f64 {
        if self.duration.as_millis() > 0 {
            self.items_processed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Complete timing report for a run
#[derive(Debug, Clone)]
pub struct ProfilerReport {
    pub total_duration: Duration,
    pub phases: Vec<PhaseBenchmark>,
    pub peak_memory_mb: f64,
    pub avg_cpu_usage: f32,
}

impl ProfilerReport {
    fn new(
        total_duration: Duration,
        phases: Vec<PhaseBenchmark>,
        memory_samples: &[u64],
        cpu_samples: &[f32],
    ) -> Self {
        let peak_memory_mb =
            memory_samples.iter().max().copied().unwrap_or_default() as f64 / BYTES_PER_MB;

        let avg_cpu_usage = if cpu_samples.is_empty() {
            0.0
        } else {
            cpu_samples.iter().sum::<f32>() / cpu_samples.len() as f32
        };

        Self {
            total_duration,
            phases,
            peak_memory_mb,
            avg_cpu_usage,
        }
    }
}

/// System metrics data
#[derive(Debug, Clone)]
struct SystemMetrics {
    memory_used: u64,
    cpu_usage: f32,
}

/// Per-phase timing and resource profiler, active behind `--timings`
pub struct RunProfiler {
    system: System,
    start_time: Instant,
    benchmarks: Vec<PhaseBenchmark>,
    memory_samples: Vec<u64>,
    cpu_samples: Vec<f32>,
}

impl RunProfiler {
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();

        Self {
            system,
            start_time: Instant::now(),
            benchmarks: Vec::new(),
            memory_samples: Vec::new(),
            cpu_samples: Vec::new(),
        }
    }

    /// Start timing a phase
    pub fn start_phase(&mut self, phase: &str) -> PhaseTimer {
        self.refresh_system();
        PhaseTimer::new(phase)
    }

    /// Finish timing a phase and record the results
    pub fn finish_phase(&mut self, timer: PhaseTimer, items_processed: usize) {
        let timer_result = timer.finish();
        let system_metrics = self.get_system_metrics();

        self.memory_samples.push(system_metrics.memory_used);
        self.cpu_samples.push(system_metrics.cpu_usage);

        self.benchmarks.push(PhaseBenchmark {
            phase: timer_result.phase,
            duration: timer_result.duration,
            items_processed,
            memory_used: system_metrics.memory_used,
            cpu_usage: system_metrics.cpu_usage,
        });
    }

    /// Generate a complete timing report
    pub fn generate_report(&self) -> ProfilerReport {
        ProfilerReport::new(
            self.start_time.elapsed(),
            self.benchmarks.clone(),
            &self.memory_samples,
            &self.cpu_samples,
        )
    }

    /// Display a colorful timing summary to the user
    pub fn display_summary(&self) {
        let report = self.generate_report();

        println!("\n📊 \x1b[96m\x1b[1mSynthèse des performances\x1b[0m");
        println!(
            "   \x1b[2mDurée totale\x1b[0m: \x1b[97m{:?}\x1b[0m",
            report.total_duration
        );
        println!(
            "   \x1b[2mMémoire max\x1b[0m: \x1b[97m{:.2} MB\x1b[0m",
            report.peak_memory_mb
        );
        println!(
            "   \x1b[2mCPU moyen\x1b[0m: \x1b[97m{:.1}%\x1b[0m",
            report.avg_cpu_usage
        );

        if !report.phases.is_empty() {
            println!("\n   \x1b[2mDurée par phase\x1b[0m:");
            for benchmark in &report.phases {
                let throughput = benchmark.throughput() as u64;

                println!(
                    "   \x1b[2m•\x1b[0m \x1b[36m{}\x1b[0m: \x1b[97m{:?}\x1b[0m (\x1b[2m{} éléments, {} éléments/sec\x1b[0m)",
                    benchmark.phase, benchmark.duration, benchmark.items_processed, throughput
                );
            }
        }
    }

    /// Refresh system information
    fn refresh_system(&mut self) {
        self.system.refresh_memory();
        self.system.refresh_cpu_all();
    }

    /// Get current system metrics
    fn get_system_metrics(&self) -> SystemMetrics {
        SystemMetrics {
            memory_used: self.get_memory_usage(),
            cpu_usage: self.get_cpu_usage(),
        }
    }

    /// Get current process memory usage
    fn get_memory_usage(&self) -> u64 {
        sysinfo::get_current_pid()
            .ok()
            .and_then(|pid| self.system.process(pid))
            .map(|process| process.memory())
            .unwrap_or(0)
    }

    /// Get current process CPU usage
    fn get_cpu_usage(&self) -> f32 {
        sysinfo::get_current_pid()
            .ok()
            .and_then(|pid| self.system.process(pid))
            .map(|process| process.cpu_usage())
            .unwrap_or(0.0)
    }
}

impl Default for RunProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer for measuring phase duration
pub struct PhaseTimer {
    phase: String,
    start_time: Instant,
}

impl PhaseTimer {
    fn new(phase: &str) -> Self {
        Self {
            phase: phase.to_string(),
            start_time: Instant::now(),
        }
    }

    fn finish(self) -> TimerResult {
        TimerResult {
            phase: self.phase,
            duration: self.start_time.elapsed(),
        }
    }
}

/// Result of a completed phase timer
struct TimerResult {
    phase: String,
    duration: Duration,
}
