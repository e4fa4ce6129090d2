//! 日志初始化

/// 初始化全局 tracing 订阅者，重复初始化时返回错误
pub fn init(level: tracing::Level) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {e}"))
}
