use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dbus connection error")]
    DbusError(#[from] zbus::Error),
    #[error("Menu path {0} is not a valid object path")]
    MenuPathError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
