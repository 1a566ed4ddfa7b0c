pub mod account;
pub mod question;
pub mod vacancy;
