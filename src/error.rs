/// 引擎对外暴露的错误
///
/// 单个进程读取失败不会出现在这里，该进程直接在本次 tick 中缺席。
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("failed to collect processes: {0}")]
    CollectionFailure(String),
}
