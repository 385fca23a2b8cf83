use std::fmt;

use crate::settings::SettingsError;

#[derive(Debug)]
pub enum Error {
    Settings(SettingsError),
    Io(std::io::Error),
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Error::Settings(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Settings(e) => write!(f, "설정 오류: {}", e),
            Error::Io(e) => write!(f, "IO 오류: {}", e),
            Error::Other(e) => write!(f, "오류: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Settings(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Other(e) => Some(e.as_ref()),
        }
    }
}
