//! UI Components
//!
//! Leptos components for the project, task and dashboard views.

mod delete_confirm_button;
mod gantt_chart;
mod gantt_dashboard;
mod header;
mod item_card;
mod item_form;
mod language_switch;
mod layout_control;
mod list_status;
mod login_form;
mod pagination;
mod project_detail;
mod project_list;
mod quick_edit_menu;
mod register_form;
mod search_filter;
mod tag_chips;
mod task_list;

pub use gantt_dashboard::GanttDashboard;
pub use header::Header;
pub use login_form::LoginForm;
pub use project_detail::ProjectDetail;
pub use project_list::ProjectList;
pub use register_form::RegisterForm;
