pub mod backend;
pub use backend::{ApprovalApi, AssetApi, NotificationApi, UserApi};

pub mod approval_service;
pub mod approval_service_impl;
pub use approval_service::{
    ApprovalError, ApprovalOutcome, ApprovalService, SideEffect, StepResult,
};
pub use approval_service_impl::DefaultApprovalService;

pub mod asset_service;
pub use asset_service::{AssetError, AssetFilter, AssetService};

pub mod notification_service;
pub use notification_service::NotificationFeed;

pub mod user_service;
pub use user_service::{UserError, UserService};

#[cfg(test)]
pub(crate) mod testing;
