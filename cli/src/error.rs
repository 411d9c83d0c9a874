#[derive(Debug)]
pub enum Error {
    Input(String),
    Mandrill(mandrill::Error),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Input(ref msg) => write!(f, "Invalid input: {}", msg),
            Error::Mandrill(ref err) => write!(f, "{}", err),
        }
    }
}

impl From<mandrill::Error> for Error {
    fn from(err: mandrill::Error) -> Self {
        Self::Mandrill(err)
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Self {
        Self::Input(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Input(err.to_string())
    }
}
