pub mod actions;
pub mod check;
pub mod dispatch;
pub mod events;
pub mod payload;
