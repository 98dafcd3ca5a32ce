//! ロガー初期化

use std::io::Write;

pub use env_logger::Target;

/// `RUST_LOG` が無ければ info。色なしで `target` に出す。
/// テキストレポートは標準出力、JSON出力時は標準エラー
pub fn init_logger(target: Target) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(target);
    let _ = builder.try_init();
}
