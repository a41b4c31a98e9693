use crate::models::MonitorConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// brieftop - 只显示真正占资源的进程
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// CPU 阈值 (百分比)，超过即显示
    #[arg(long, env = "BRIEFTOP_CPU", default_value_t = 5.0)]
    pub cpu: f64,

    /// 内存阈值 (MB)，超过即显示
    #[arg(long, env = "BRIEFTOP_MEMORY", default_value_t = 50)]
    pub memory: u64,

    /// 刷新间隔，例如 500ms、2s、1m
    #[arg(long, env = "BRIEFTOP_REFRESH", default_value = "1s", value_parser = parse_duration)]
    pub refresh: Duration,

    /// 额外的系统根进程名（可重复），这些进程不吸收子进程
    #[arg(long = "system-root", value_name = "NAME")]
    pub system_roots: Vec<String>,

    /// 展开时不显示线程
    #[arg(long)]
    pub hide_threads: bool,

    /// 采集一次后输出并退出
    #[arg(long)]
    pub once: bool,

    /// 配合 --once 以 JSON 输出
    #[arg(long, requires = "once")]
    pub json: bool,

    /// 交互模式下的日志文件
    #[arg(long, env = "BRIEFTOP_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl CommandArgs {
    pub fn to_config(&self) -> anyhow::Result<MonitorConfig> {
        if !self.cpu.is_finite() || self.cpu < 0.0 {
            anyhow::bail!("--cpu must be a non-negative number, got {}", self.cpu);
        }

        let memory_threshold_bytes = self
            .memory
            .checked_mul(BYTES_PER_MB)
            .ok_or_else(|| anyhow::anyhow!("--memory {} MB is too large", self.memory))?;

        let mut config = MonitorConfig {
            cpu_threshold_percent: self.cpu,
            memory_threshold_bytes,
            refresh_interval: self.refresh,
            show_threads: !self.hide_threads,
            ..Default::default()
        };

        for root in &self.system_roots {
            if !config.is_system_root(root) {
                config.system_roots.push(root.clone());
            }
        }

        Ok(config)
    }
}

/// 解析 `500ms`、`2s`、`1m`，纯数字按毫秒处理
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let number: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{}'", value))?;

    let millis = match unit {
        "" | "ms" => number,
        "s" => number * 1000.0,
        "m" => number * 60_000.0,
        _ => return Err(format!("unknown duration unit '{}' in '{}'", unit, value)),
    };

    if !millis.is_finite() || millis < 1.0 {
        return Err(format!("refresh interval must be at least 1ms, got '{}'", value));
    }

    Ok(Duration::from_micros((millis * 1000.0).round() as u64))
}
