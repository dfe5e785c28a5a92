//! # 会话控制器
//!
//! ## 设计思路
//!
//! `SessionController` 是整个应用唯一的状态机所有者，串联
//! “选图 → 启动上色 → 成功/失败 → 复位”全部迁移，并负责两件容易出错的事：
//!
//! 1. **代次守卫**：每次被接受的用户动作使代次 +1，上色任务与旁白任务
//!    都携带启动时捕获的代次；完成回调与定时 tick 在锁内比对代次，
//!    过期则静默丢弃，杜绝“复位后迟到的结果覆盖新状态”。
//! 2. **旁白定时器的确定性释放**：`Transforming` 的每条退出路径
//!    （成功、失败、复位、重新选图）都会终止旁白任务；
//!    tick 自身还会在锁内复查阶段与代次，双重保证不产生游离写入。
//!
//! ## 实现思路
//!
//! - 控制器对上色实现泛型（`T: TransformPort`），测试注入假实现。
//! - 状态变更统一经 `SessionPresenter` 推送快照，生产侧发 Tauri 事件。
//! - 锁内只做状态读写，事件推送都在释放锁之后进行。

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::colorize::{ColorizeError, TransformPort};

use super::config::SessionConfig;
use super::narration;
use super::state::{Session, SessionPhase, SessionSnapshot, SourceImage};

/// 会话状态观察端口。
///
/// 生产实现把快照作为事件发给前端；测试实现记录快照序列。
pub trait SessionPresenter: Send + Sync {
    fn present(&self, snapshot: &SessionSnapshot);
}

/// 控制器共享内部状态（会话数据 + 旁白任务句柄）。
struct SessionShared {
    session: Mutex<Session>,
    narration_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionShared {
    fn lock_session(&self) -> MutexGuard<'_, Session> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("会话状态锁中毒，继续使用恢复数据");
                poisoned.into_inner()
            }
        }
    }

    fn lock_narration(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.narration_task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("旁白任务锁中毒，继续使用恢复数据");
                poisoned.into_inner()
            }
        }
    }
}

/// 会话控制器。
///
/// 作为 Tauri `State` 注入到命令层；内部状态可跨命令并发访问。
pub struct SessionController<T: TransformPort> {
    transform: T,
    presenter: Arc<dyn SessionPresenter>,
    config: SessionConfig,
    shared: Arc<SessionShared>,
}

impl<T: TransformPort> SessionController<T> {
    pub fn new(transform: T, presenter: Arc<dyn SessionPresenter>, config: SessionConfig) -> Self {
        Self {
            transform,
            presenter,
            config,
            shared: Arc::new(SessionShared {
                session: Mutex::new(Session::default()),
                narration_task: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 当前状态快照。
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock_session().snapshot()
    }

    /// 装载新的源图片：任意状态下都合法，覆盖此前的一切进度。
    pub fn select_source(&self, source: SourceImage) -> SessionSnapshot {
        let snapshot = {
            let mut session = self.shared.lock_session();
            session.generation += 1;
            session.source = Some(Arc::new(source));
            session.phase = SessionPhase::Ready;
            session.snapshot()
        };

        self.abort_narration();
        log::info!(
            "🖼️ 已装载源图片（代次 {}），此前的结果与错误已清空",
            snapshot.generation
        );
        self.presenter.present(&snapshot);
        snapshot
    }

    /// 复位到初始状态：任意状态下可用。
    pub fn reset(&self) -> SessionSnapshot {
        let snapshot = {
            let mut session = self.shared.lock_session();
            let generation = session.generation + 1;
            *session = Session {
                generation,
                ..Session::default()
            };
            session.snapshot()
        };

        self.abort_narration();
        log::info!("🔄 会话已复位（代次 {}）", snapshot.generation);
        self.presenter.present(&snapshot);
        snapshot
    }

    /// 执行一次完整上色：启动 → 等待远端完成 → 落账。
    ///
    /// 仅在 `Ready` / `Error` 阶段生效，其余阶段为无操作并返回当前快照；
    /// 等待期间其他命令（指针更新、复位、重新选图）可正常并发执行。
    pub async fn run_transform(&self) -> SessionSnapshot {
        let Some((generation, source)) = self.begin_transform() else {
            log::debug!("⏭️ 当前状态不可启动上色，忽略本次请求");
            return self.snapshot();
        };

        let outcome = self
            .transform
            .transform(&source.bytes, &source.media_type)
            .await;

        self.finish_transform(generation, outcome)
    }

    /// 进入 `Transforming`：分配新代次并启动旁白任务。
    ///
    /// `Ready` 与 `Error` 均可启动（失败后的恢复路径是同图重试或重新选图）；
    /// 其余阶段无源图片或已有上色在途，一律无操作。
    fn begin_transform(&self) -> Option<(u64, Arc<SourceImage>)> {
        let (generation, source, snapshot) = {
            let mut session = self.shared.lock_session();
            if !matches!(
                session.phase,
                SessionPhase::Ready | SessionPhase::Error { .. }
            ) {
                return None;
            }
            let source = Arc::clone(session.source.as_ref()?);

            session.generation += 1;
            session.phase = SessionPhase::Transforming { narration_step: 0 };
            (session.generation, source, session.snapshot())
        };

        log::info!(
            "🎬 开始上色（代次 {}，{}，{} 字节）",
            generation,
            source.media_type,
            source.bytes.len()
        );

        // 先推送进入 Transforming 的快照（首条旁白），再启动推进任务，
        // 保证观察端看到的旁白顺序与序列一致
        self.presenter.present(&snapshot);
        self.spawn_narration(generation);

        Some((generation, source))
    }

    /// 上色完成落账：代次过期的结果静默丢弃。
    fn finish_transform(
        &self,
        generation: u64,
        outcome: Result<String, ColorizeError>,
    ) -> SessionSnapshot {
        let (snapshot, accepted) = {
            let mut session = self.shared.lock_session();
            if session.generation != generation {
                log::warn!(
                    "⏭️ 丢弃过期的上色完成回调（代次 {} ≠ 当前 {}）",
                    generation,
                    session.generation
                );
                (session.snapshot(), false)
            } else {
                match outcome {
                    Ok(result_uri) => {
                        log::info!("✅ 上色成功（代次 {}）", generation);
                        session.phase = SessionPhase::Done { result_uri };
                    }
                    Err(err) => {
                        log::warn!("❌ 上色失败（代次 {}）: {}", generation, err);
                        session.phase = SessionPhase::Error {
                            detail: err.to_string(),
                            code: err.code(),
                        };
                    }
                }
                (session.snapshot(), true)
            }
        };

        if accepted {
            // 代次匹配说明旁白任务仍属于本次上色，在此处终止；
            // 代次不匹配时旁白早已在代次变更处被终止，不可误杀新任务
            self.abort_narration();
            self.presenter.present(&snapshot);
        }

        snapshot
    }

    /// 启动旁白任务：按固定间隔推进文案，直至序列耗尽或代次/阶段失效。
    fn spawn_narration(&self, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let presenter = Arc::clone(&self.presenter);
        let interval = Duration::from_millis(self.config.narration_interval_ms);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval 的首个 tick 立即完成，先消费掉再进入固定节奏
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let snapshot = {
                    let mut session = shared.lock_session();
                    if session.generation != generation {
                        break;
                    }
                    let SessionPhase::Transforming { narration_step } = &mut session.phase else {
                        break;
                    };
                    let Some(next) = narration::advance(*narration_step) else {
                        // 序列耗尽：最后一条停留在屏幕上，任务自行退出
                        break;
                    };
                    *narration_step = next;
                    session.snapshot()
                };

                log::debug!("💬 旁白推进: {:?}", snapshot.narration);
                presenter.present(&snapshot);
            }
        });

        let mut guard = self.shared.lock_narration();
        if let Some(stale) = guard.replace(handle) {
            stale.abort();
        }
    }

    /// 终止旁白任务（若存在）。对已结束的任务调用 abort 是无操作。
    fn abort_narration(&self) {
        let handle = self.shared.lock_narration().take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}
