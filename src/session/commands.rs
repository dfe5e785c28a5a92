//! # 会话命令层
//!
//! ## 设计思路
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 状态迁移全部交给 `SessionController`；此处只补两件事：
//! 文件输入边界校验（`loader`）与“新图片对出现时复位揭示位置”。

use std::sync::Arc;

use tauri::{AppHandle, Emitter, State, Wry};

use crate::colorize::ColorizeClient;
use crate::error::AppError;
use crate::reveal::RevealState;

use super::controller::{SessionController, SessionPresenter};
use super::download;
use super::loader;
use super::state::SessionSnapshot;

/// 会话状态变更事件名，载荷为 [`SessionSnapshot`]。
pub const SESSION_STATE_EVENT: &str = "session-state-changed";

/// 生产环境使用的控制器类型（远端上色客户端）。
pub type AppSession = SessionController<ColorizeClient>;

/// 把快照作为 Tauri 事件推送给前端的观察端口实现。
pub struct TauriSessionPresenter {
    app: AppHandle<Wry>,
}

impl TauriSessionPresenter {
    pub fn new(app: AppHandle<Wry>) -> Self {
        Self { app }
    }
}

impl SessionPresenter for TauriSessionPresenter {
    fn present(&self, snapshot: &SessionSnapshot) {
        if let Err(err) = self.app.emit(SESSION_STATE_EVENT, snapshot.clone()) {
            log::warn!("发送会话状态事件失败: {}", err);
        }
    }
}

/// 装载用户选择的图片文件。
///
/// 非图片文件在边界处被拒绝：返回错误文案，会话状态保持不变。
#[tauri::command]
pub async fn select_image(
    session: State<'_, AppSession>,
    reveal: State<'_, RevealState>,
    path: String,
) -> Result<SessionSnapshot, AppError> {
    let source = loader::load_source_image(&path, session.config().max_source_file_size)?;
    let snapshot = session.select_source(source);
    reveal.reset_for_new_pair();
    Ok(snapshot)
}

/// 对当前图片发起上色，等待远端完成后返回最终快照。
#[tauri::command]
pub async fn start_colorization(
    session: State<'_, AppSession>,
    reveal: State<'_, RevealState>,
) -> Result<SessionSnapshot, AppError> {
    let snapshot = session.run_transform().await;
    if snapshot.phase == "done" {
        // 新的前后图片对出现，揭示位置回到中点
        reveal.reset_for_new_pair();
    }
    Ok(snapshot)
}

/// 复位会话与揭示位置到初始状态。
#[tauri::command]
pub async fn reset_session(
    session: State<'_, AppSession>,
    reveal: State<'_, RevealState>,
) -> Result<SessionSnapshot, AppError> {
    reveal.reset_for_new_pair();
    Ok(session.reset())
}

/// 查询当前会话快照（前端初始化时拉取一次）。
#[tauri::command]
pub fn get_session_state(session: State<'_, AppSession>) -> Result<SessionSnapshot, AppError> {
    Ok(session.snapshot())
}

/// 将上色结果保存为带时间戳文件名的 PNG，返回完整路径。
#[tauri::command]
pub async fn save_result(
    app: AppHandle<Wry>,
    session: State<'_, AppSession>,
    target_dir: Option<String>,
) -> Result<String, AppError> {
    let snapshot = session.snapshot();
    let Some(result_uri) = snapshot.result_uri else {
        return Err(AppError::Session("当前没有可保存的上色结果".to_string()));
    };

    let dir = download::resolve_target_dir(&app, target_dir)?;
    let path = download::write_colorized_file(&dir, &result_uri)?;
    Ok(path.to_string_lossy().to_string())
}

/// 构造生产控制器并注入 Tauri 事件观察端口。
pub fn build_app_session(app: AppHandle<Wry>) -> Result<AppSession, AppError> {
    let client = ColorizeClient::default_from_env()?;
    if client.has_credential() {
        log::info!("🔑 API 凭证已配置");
    }

    let presenter = Arc::new(TauriSessionPresenter::new(app));
    Ok(SessionController::new(
        client,
        presenter,
        super::config::SessionConfig::default(),
    ))
}
