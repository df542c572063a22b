use thiserror::Error;
use uuid::Uuid;

/// Reasons a draw could not start or finish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No active game accepts the requested player count.
    #[error("no eligible records")]
    NoEligibleRecords,
    /// Network or server failure while fetching the pool or the pick.
    #[error("transient failure: {0}")]
    Transient(String),
    /// The pick is not part of the locally held pool.
    #[error("picked game `{id}` is not in the loaded pool")]
    StaleSelection { id: Uuid },
    /// No drawing surface has been attached yet.
    #[error("draw surface is not ready")]
    NotReady,
    /// The pool cannot be replaced while a spin is in flight.
    #[error("a draw is already in progress")]
    Busy,
    /// The view was torn down; no further work is accepted.
    #[error("view has been torn down")]
    TornDown,
}

impl DrawError {
    /// Whether triggering again may succeed without user action.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            DrawError::Transient(_)
                | DrawError::StaleSelection { .. }
                | DrawError::NotReady
                | DrawError::Busy
        )
    }

    /// Short message suitable for a toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            DrawError::NoEligibleRecords => "没有符合条件的游戏",
            DrawError::Transient(_) | DrawError::StaleSelection { .. } => "抽取失败，请重试",
            DrawError::NotReady => "正在初始化，请稍候",
            DrawError::Busy => "正在抽取中",
            DrawError::TornDown => "页面已关闭",
        }
    }
}

/// Failure to load a single card image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load image `{url}`: {reason}")]
pub struct AssetError {
    pub url: String,
    pub reason: String,
}
