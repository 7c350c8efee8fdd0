// ==========================================
// 生产管理系统 - 主入口
// ==========================================
// tauri-app 特性: 启动桌面壳，命令直接调用 API
// 默认: 标准输入/输出行协议，每行一个 JSON 请求，经请求桥接串行处理
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(all(not(debug_assertions), feature = "tauri-app"), windows_subsystem = "windows")]

use line_refdata::app::AppState;
use line_refdata::config::DatabaseConfig;

/// 公共启动流程：日志、语言、配置、应用状态
fn bootstrap() -> Result<AppState, String> {
    line_refdata::logging::init();
    line_refdata::i18n::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 基础数据维护", line_refdata::APP_NAME);
    tracing::info!("系统版本: {}", line_refdata::VERSION);
    tracing::info!("==================================================");

    let config = DatabaseConfig::load_or_default().map_err(|e| e.to_string())?;
    AppState::new(&config)
}

#[cfg(feature = "tauri-app")]
fn main() {
    use line_refdata::app::tauri_commands::*;
    use tauri::Manager;

    let app_state = match bootstrap() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("启动Tauri应用...");

    let app = tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // 当前操作人
            get_current_user,
            // ==========================================
            // 生产线
            // ==========================================
            get_production_lines,
            add_production_line,
            update_production_line,
            delete_production_line,
            // ==========================================
            // 生产线特殊信息
            // ==========================================
            get_production_line_special_info,
            add_production_line_special_info,
            delete_production_line_special_info,
            // ==========================================
            // 特殊发动机
            // ==========================================
            get_special_engines,
            add_special_engine,
            update_special_engine,
            delete_special_engine,
            // ==========================================
            // 计划用颜色
            // ==========================================
            get_planned_colors,
            add_planned_color,
            update_planned_color,
            delete_planned_color,
        ])
        .build(tauri::generate_context!())
        .expect("构建Tauri应用失败");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            app_handle.state::<AppState>().shutdown();
            tracing::info!("Tauri应用已退出");
        }
    });
}

#[cfg(not(feature = "tauri-app"))]
#[tokio::main]
async fn main() {
    use line_refdata::app::{spawn_bridge, Dispatcher, DEFAULT_QUEUE_CAPACITY};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let state = match bootstrap() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    let (bridge, worker) = spawn_bridge(Dispatcher::from_state(&state), DEFAULT_QUEUE_CAPACITY);
    tracing::info!("等待标准输入请求（每行一个 JSON）...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("读取标准输入失败: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = bridge.handle_line(&line).await;
        let mut out = match serde_json::to_string(&response) {
            Ok(out) => out,
            Err(e) => {
                tracing::error!("应答序列化失败: {}", e);
                continue;
            }
        };
        out.push('\n');

        if let Err(e) = stdout.write_all(out.as_bytes()).await {
            tracing::error!("写出应答失败: {}", e);
            break;
        }
        let _ = stdout.flush().await;
    }

    // 释放句柄后等待工作任务退出，再关闭连接
    drop(bridge);
    if let Err(e) = worker.await {
        tracing::warn!("请求桥接异常退出: {}", e);
    }
    state.shutdown();
}
