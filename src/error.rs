use core::fmt::Display;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Parse(String),
    Plan(String),
    Conf(String),
    Internal(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) | Self::Plan(err) | Self::Conf(err) | Self::Internal(err) => {
                write!(f, "{}", err)
            }
        }
    }
}
