pub mod login;
pub mod logout;
pub mod logout_all;
