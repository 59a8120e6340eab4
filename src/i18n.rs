//! UI Strings
//!
//! Static en/zh table. Lookups of an untranslated entry fall back to English,
//! unknown keys to the key itself.

use leptos::prelude::*;
use taskline_core::{DraftError, Locale, Priority, Status};

use crate::store::{use_app_store, AppStateStoreFields};

/// (key, en, zh); an empty zh entry means "use English"
const STRINGS: &[(&str, &str, &str)] = &[
    // App
    ("app.title", "Project Manager", "项目管理"),
    // Auth
    ("auth.login", "Log in", "登录"),
    ("auth.logout", "Log out", "退出登录"),
    ("auth.register", "Register", "注册"),
    ("auth.slogan", "Plan projects and tasks on one timeline", "在同一条时间线上规划项目与任务"),
    ("auth.username", "Username", "用户名"),
    ("auth.account", "Username or email", "用户名或邮箱"),
    ("auth.password", "Password", "密码"),
    ("auth.inputPassword", "Enter your password", "请输入密码"),
    ("auth.email", "Email", "邮箱"),
    ("auth.phone", "Phone", "手机号"),
    ("auth.optional", "optional", "选填"),
    ("auth.invalidCredentials", "Invalid username or password", "用户名或密码错误"),
    ("auth.registerFailed", "Registration failed", "注册失败"),
    ("auth.loginWithGithub", "Continue with GitHub", "使用 GitHub 登录"),
    ("auth.noAccount", "No account yet?", "还没有账号？"),
    ("auth.haveAccount", "Already registered?", "已有账号？"),
    // Common
    ("common.projects", "Projects", "项目"),
    ("common.tasks", "Tasks", "任务"),
    ("common.search", "Search...", "搜索..."),
    ("common.allPriorities", "All priorities", "全部优先级"),
    ("common.allStatuses", "All statuses", "全部状态"),
    ("common.startDate", "Start date", "开始日期"),
    ("common.endDate", "End date", "结束日期"),
    ("common.reset", "Reset", "重置"),
    ("common.create", "Create", "创建"),
    ("common.save", "Save", "保存"),
    ("common.cancel", "Cancel", "取消"),
    ("common.edit", "Edit", "编辑"),
    ("common.delete", "Delete", "删除"),
    ("common.confirmDelete", "Delete?", "删除?"),
    ("common.retry", "Retry", "重试"),
    ("common.error", "Something went wrong", "出错了"),
    ("common.loading", "Loading...", "加载中..."),
    ("common.updateError", "Failed to save changes", "保存修改失败"),
    ("common.listView", "List", "列表"),
    ("common.ganttView", "Gantt", "甘特图"),
    ("common.backToProjects", "Back to projects", "返回项目列表"),
    ("common.previous", "Previous", "上一页"),
    ("common.next", "Next", "下一页"),
    ("common.page", "Page", "页码"),
    ("common.go", "Go", "跳转"),
    ("common.layout", "Layout", "布局"),
    ("common.dashboard", "Dashboard", "仪表盘"),
    ("common.priority.high", "High", "高"),
    ("common.priority.medium", "Medium", "中"),
    ("common.priority.low", "Low", "低"),
    ("common.status.todo", "To do", "待办"),
    ("common.status.inProgress", "In progress", "进行中"),
    ("common.status.completed", "Completed", "已完成"),
    // Dashboard
    ("dashboard.ganttDashboard", "Gantt Dashboard", "甘特图看板"),
    ("dashboard.projectsTimeline", "Projects timeline", "项目时间线"),
    ("dashboard.tasksTimeline", "Tasks timeline", "任务时间线"),
    ("dashboard.noTasks", "No tasks yet", "暂无任务"),
    ("dashboard.createFirst", "Create a project to see it on the timeline", "创建项目后即可在时间线上查看"),
    ("gantt.empty", "Nothing to show on the timeline", "时间线上暂无内容"),
    ("gantt.today", "Today", "今天"),
    // Projects
    ("project.newProject", "New project", "新建项目"),
    ("project.editProject", "Edit project", "编辑项目"),
    ("project.title", "Project name", "项目名称"),
    ("project.description", "Description", "描述"),
    ("project.priority", "Priority", "优先级"),
    ("project.status", "Status", "状态"),
    ("project.startDate", "Start date", "开始日期"),
    ("project.endDate", "End date", "结束日期"),
    ("project.tags", "Tags", "标签"),
    ("project.addTag", "Add tag", "添加标签"),
    ("project.tagName", "Tag name", "标签名称"),
    ("project.noProjects", "No projects found", "暂无项目"),
    ("project.createFirst", "Create your first project", "创建第一个项目"),
    ("project.loadError", "Failed to load projects", "加载项目失败"),
    ("project.deleteError", "Failed to delete project", "删除项目失败"),
    ("project.notFound", "Project not found", "项目不存在"),
    // Tasks
    ("task.newTask", "New task", "新建任务"),
    ("task.editTask", "Edit task", "编辑任务"),
    ("task.noTasks", "No tasks found", "暂无任务"),
    ("task.createFirst", "Create your first task", "创建第一个任务"),
    ("task.loadError", "Failed to load tasks", "加载任务失败"),
    ("task.deleteError", "Failed to delete task", "删除任务失败"),
    // Form validation
    ("form.missingName", "Name is required", "名称不能为空"),
    ("form.missingStart", "Start date is required", "请选择开始日期"),
    ("form.missingEnd", "End date is required", "请选择结束日期"),
    ("form.invalidDate", "Dates must be YYYY-MM-DD", "日期格式应为 YYYY-MM-DD"),
    ("form.endBeforeStart", "End date is before start date", "结束日期早于开始日期"),
    // User
    ("user.language", "Language", "语言"),
    ("user.english", "English", "English"),
    ("user.chinese", "中文", "中文"),
];

pub fn translate(locale: Locale, key: &'static str) -> &'static str {
    let Some(&(_, en, zh)) = STRINGS.iter().find(|(k, _, _)| *k == key) else {
        return key;
    };
    match locale {
        Locale::Zh if !zh.is_empty() => zh,
        _ => en,
    }
}

pub fn priority_key(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "common.priority.high",
        Priority::Medium => "common.priority.medium",
        Priority::Low => "common.priority.low",
    }
}

pub fn status_key(status: Status) -> &'static str {
    match status {
        Status::Todo => "common.status.todo",
        Status::InProgress => "common.status.inProgress",
        Status::Completed => "common.status.completed",
    }
}

pub fn draft_error_key(error: DraftError) -> &'static str {
    match error {
        DraftError::MissingName => "form.missingName",
        DraftError::MissingStart => "form.missingStart",
        DraftError::MissingEnd => "form.missingEnd",
        DraftError::InvalidDate => "form.invalidDate",
        DraftError::EndBeforeStart => "form.endBeforeStart",
    }
}

/// Reactive translator bound to the store's current locale
pub fn use_t() -> impl Fn(&'static str) -> &'static str + Copy + 'static {
    let store = use_app_store();
    move |key| translate(store.locale().get(), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_translate() {
        assert_eq!(translate(Locale::En, "common.retry"), "Retry");
        assert_eq!(translate(Locale::Zh, "common.retry"), "重试");
        assert_eq!(translate(Locale::Zh, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut seen = HashSet::new();
        for (key, en, _) in STRINGS {
            assert!(seen.insert(*key), "duplicate key {}", key);
            assert!(!en.is_empty(), "{} has no English text", key);
        }
    }

    #[test]
    fn test_enum_keys_exist() {
        for status in Status::ALL {
            assert_ne!(translate(Locale::En, status_key(status)), status_key(status));
        }
        for priority in Priority::ALL {
            assert_ne!(translate(Locale::Zh, priority_key(priority)), priority_key(priority));
        }
    }
}
