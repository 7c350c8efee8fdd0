// 仅在启用 tauri-app 特性时生成 Tauri 上下文，库/无界面模式不依赖 tauri.conf.json
fn main() {
    if std::env::var_os("CARGO_FEATURE_TAURI_APP").is_some() {
        tauri_build::build();
    }
}
