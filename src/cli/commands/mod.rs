mod approvals;
mod assets;
mod context;
mod notifications;
mod reference;
mod session;
mod transactions;
mod users;

pub use approvals::{cmd_approval_list, cmd_approval_show, cmd_approve, cmd_reject};
pub use assets::{cmd_asset_add, cmd_asset_list, cmd_asset_show, cmd_asset_update};
pub use context::CommandContext;
pub use notifications::{
    cmd_notification_count, cmd_notification_delete, cmd_notification_list,
    cmd_notification_read, cmd_notification_read_all,
};
pub use reference::{cmd_reference_beban, cmd_reference_departemen};
pub use session::{cmd_login, cmd_logout, cmd_whoami, password_or_prompt};
pub use transactions::{cmd_transaction_list, cmd_transaction_submit};
pub use users::{cmd_user_beban, cmd_user_create, cmd_user_list, cmd_user_password};
