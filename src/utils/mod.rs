pub mod clock;
pub mod secret_str;
