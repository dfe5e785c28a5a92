// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 老照片上色工具 — 应用入口
//!
//! 本文件仅负责应用初始化与插件/命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use chroma_revive::{reveal, session};
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_dialog::init())
        // 应用设置
        .setup(|app| {
            log::info!("setup: begin");

            // 构造会话控制器并注册为托管状态
            match session::build_app_session(app.handle().clone()) {
                Ok(controller) => {
                    app.manage(controller);
                    log::info!("setup: session controller managed");
                }
                Err(err) => {
                    log::error!("setup: 会话控制器初始化失败，应用无法继续: {err}");
                    return Err(Box::new(err) as Box<dyn std::error::Error>);
                }
            }

            app.manage(reveal::RevealState::new());
            log::info!("setup: reveal state managed");

            log::info!("setup: complete");
            Ok(())
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 会话状态机
            session::commands::select_image,
            session::commands::start_colorization,
            session::commands::reset_session,
            session::commands::get_session_state,
            session::commands::save_result,
            // 对比揭示部件
            reveal::commands::update_reveal_position,
            reveal::commands::get_reveal_position,
            reveal::commands::get_overlay_compensation,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
