use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug)]
pub struct Login {
    pub requires_password_change: bool,
    pub session_duration: i64, // millis
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Password required")]
    NoPass(),
    #[error("Current and new password required")]
    NoPasses(),
    #[error("Invalid password")]
    WrongPass(),
    #[error("Current password is incorrect")]
    WrongCurrentPass(),
    #[error("New password must be at least {0} characters long")]
    ShortPass(usize),
    #[error(transparent)]
    ServiceError(#[from] anyhow::Error),
}
