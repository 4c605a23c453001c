use env_logger::Env;
use std::io::Write;

/// 初始化日誌，預設 info，可用 RUST_LOG 覆寫
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}][{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
