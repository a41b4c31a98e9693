use anyhow::Context;
use clap::Parser;
use std::fs::File;

mod cli;
mod error;
mod models;
mod services;
mod state;
mod ui;

use cli::CommandArgs;
use models::{MonitorConfig, ProcessNode};
use services::{ExpansionStore, Monitor, SysinfoCollector};
use ui::format::format_bytes;
use ui::rows::build_rows;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(&args)?;

    let config = args.to_config()?;
    log::info!(
        "🚀 brieftop starting: cpu >= {:.1}%, memory >= {}, refresh every {:?}",
        config.cpu_threshold_percent,
        format_bytes(config.memory_threshold_bytes),
        config.refresh_interval
    );

    let monitor = Monitor::new(SysinfoCollector::new(), config);

    if args.once {
        run_once(monitor, args.json).await
    } else {
        ui::run(monitor).await
    }
}

/// 交互模式下终端被界面占用，日志只能写文件或丢弃
fn init_logging(args: &CommandArgs) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if !args.once {
        let target: Box<dyn std::io::Write + Send> = match &args.log_file {
            Some(path) => Box::new(
                File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?,
            ),
            None => Box::new(std::io::sink()),
        };
        builder.target(env_logger::Target::Pipe(target));
    }

    builder.init();
    Ok(())
}

/// CPU 使用率需要两次采样的差值，先预热一次再输出
async fn run_once(mut monitor: Monitor<SysinfoCollector>, json: bool) -> anyhow::Result<()> {
    let mut store = ExpansionStore::new();

    if let Err(e) = monitor.poll() {
        log::warn!("Warm-up sample failed: {}", e);
    }
    let wait = monitor.config().refresh_interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    tokio::time::sleep(wait).await;

    let processes = monitor.get_filtered_processes(&mut store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&processes)?);
    } else {
        print_report(&processes, monitor.config());
    }
    Ok(())
}

fn print_report(processes: &[ProcessNode], config: &MonitorConfig) {
    println!(
        "brieftop - Processes >{:.1}% CPU or >{}MB RAM",
        config.cpu_threshold_percent,
        config.memory_threshold_bytes / (1024 * 1024)
    );
    println!("{:<8} {:>8} {:>11} {:>6}  PROCESS NAME", "PID", "CPU", "MEMORY", "CHILD");

    // 非交互输出总是展开
    let expanded: Vec<ProcessNode> = processes
        .iter()
        .cloned()
        .map(|mut p| {
            p.expanded = true;
            p
        })
        .collect();
    let (rows, _) = build_rows(&expanded, usize::MAX, config.show_threads);

    for row in rows {
        println!(
            "{:<8} {:>8} {:>11} {:>6}  {}",
            row.pid, row.cpu, row.memory, row.children, row.name
        );
    }

    println!("Showing {} processes", processes.len());
}
