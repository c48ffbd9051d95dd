pub mod body;
pub mod change_password;
pub mod check;
pub mod cookie;
pub mod data;
pub mod database;
pub mod error;
pub mod gate;
pub mod live;
pub mod login;
pub mod logout;
pub mod session;
pub mod sessions;
pub mod tables;
