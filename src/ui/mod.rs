pub mod colors;
pub mod display;
pub mod format;
pub mod input;
pub mod rows;

use crate::services::refresher;
use crate::services::{Monitor, SnapshotCollector};
use crate::state::new_state;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::Notify;

/// 启动交互界面，直到用户退出
pub async fn run<C>(monitor: Monitor<C>) -> anyhow::Result<()>
where
    C: SnapshotCollector + 'static,
{
    let config = monitor.config().clone();
    let state = new_state(config.show_threads);
    let force = Arc::new(Notify::new());

    let updater = tokio::spawn(refresher::run(state.clone(), monitor, force.clone()));

    let ui_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;
        let result = display::event_loop(&mut terminal, &ui_state, &force, &config);
        ratatui::restore();
        result
    })
    .await
    .context("UI thread panicked")?;

    updater.abort();
    log::info!("brieftop stopped");
    result
}
