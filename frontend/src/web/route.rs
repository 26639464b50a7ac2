//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及各角色的导航项。

use lulusin_shared::Role;
use std::fmt::Display;

/// 头部导航项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    /// 角色命名空间下的子路径，以 `/` 开头
    pub sub_path: &'static str,
}

const fn item(label: &'static str, sub_path: &'static str) -> NavItem {
    NavItem { label, sub_path }
}

const TEACHER_NAV: &[NavItem] = &[
    item("Dashboard", "/dashboard"),
    item("Tryout", "/tryout"),
    item("Subjek", "/subjek"),
    item("Kategori Subjek", "/kategorisubjek"),
];

const STUDENT_NAV: &[NavItem] = &[item("Dashboard", "/dashboard"), item("Tryout", "/tryout")];

const ADMIN_NAV: &[NavItem] = &[item("Dashboard", "/dashboard")];

/// 注册页链接，页面本身不在本应用内
pub const REGISTER_PATH: &str = "/register";

/// 角色的导航项列表，第一项总是仪表盘
pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Teacher => TEACHER_NAV,
        Role::Student => STUDENT_NAV,
        Role::Admin => ADMIN_NAV,
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 角色工作区，`section` 为命名空间之后的路径（不含前导斜杠）
    Workspace { role: Role, section: String },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 角色登录后的目的地
    ///
    /// 对每个角色都是全函数，不存在默认分支。
    pub fn dashboard(role: Role) -> Self {
        Self::Workspace {
            role,
            section: "dashboard".to_string(),
        }
    }

    /// 将 URL path 解析为路由枚举
    ///
    /// 工作区路径的第一段必须是该角色的某个导航项，
    /// 之后的部分（如 `subjek/edit/3`）原样保留。
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() || trimmed == "/login" {
            return Self::Login;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::NotFound;
        };
        let Some((namespace, section)) = rest.split_once('/') else {
            return Self::NotFound;
        };
        let Some(role) = Role::from_namespace(namespace) else {
            return Self::NotFound;
        };

        let first = section.split('/').next().unwrap_or_default();
        let known = nav_items(role)
            .iter()
            .any(|item| item.sub_path.trim_start_matches('/') == first);

        if known {
            Self::Workspace {
                role,
                section: section.to_string(),
            }
        } else {
            Self::NotFound
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Workspace { role, section } => format!("/{}/{}", role.namespace(), section),
            Self::NotFound => "/404".to_string(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
