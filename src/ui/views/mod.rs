pub mod about;
pub mod home;
pub mod not_found;
pub mod portfolio_detail;
pub mod portfolio_list;
