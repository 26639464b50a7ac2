//! 会话存储模块
//!
//! 将当前会话（令牌 + 角色）持久化到浏览器存储中，页面刷新后仍然有效。
//! 存储布局与旧版前端保持一致：两个独立的键 `authToken` / `userType`。

use leptos::logging::warn;
use lulusin_shared::{Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY, Session};

/// 存储写入错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// 存储不可用（例如隐私模式下禁用了 LocalStorage）
    #[error("storage is unavailable")]
    Unavailable,
    /// 写入失败（例如超出配额）
    #[error("failed to write {key}: {reason}")]
    WriteFailed { key: String, reason: String },
}

/// 同步键值存储抽象
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// 删除不存在的键不是错误
    fn remove(&self, key: &str);
}

/// 会话存储服务
///
/// 显式注入到登录控制器与导航守卫中，而不是在 UI 代码中直接访问全局存储。
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// 覆盖保存会话
    ///
    /// 两个键要么都写入新值，要么都保持旧值：
    /// 第二个键写入失败时，第一个键会被回滚。
    /// 回滚本身也失败时清空两个键，读取方只会看到无会话。
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let previous_token = self.backend.get(STORAGE_TOKEN_KEY);

        self.backend.set(STORAGE_TOKEN_KEY, &session.token)?;

        if let Err(e) = self.backend.set(STORAGE_ROLE_KEY, session.role.as_str()) {
            warn!("[Session] Failed to write role, rolling back token: {}", e);
            match previous_token {
                Some(token) => {
                    if let Err(rollback) = self.backend.set(STORAGE_TOKEN_KEY, &token) {
                        warn!("[Session] Token rollback failed, clearing session: {}", rollback);
                        self.clear();
                    }
                }
                None => self.backend.remove(STORAGE_TOKEN_KEY),
            }
            return Err(e);
        }

        Ok(())
    }

    /// 读取会话
    ///
    /// 任一字段缺失、令牌为空白或角色无法识别时返回 `None`。
    pub fn load(&self) -> Option<Session> {
        let token = self
            .backend
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| Session::is_usable_token(t))?;
        let role = self.backend.get(STORAGE_ROLE_KEY)?.parse::<Role>().ok()?;
        Some(Session { token, role })
    }

    /// 清除会话，幂等
    pub fn clear(&self) {
        self.backend.remove(STORAGE_TOKEN_KEY);
        self.backend.remove(STORAGE_ROLE_KEY);
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================
