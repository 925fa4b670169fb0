pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid process map JSON: {message}")]
    InvalidJson { message: String },

    #[error("Invalid process map: {message}")]
    InvalidProcessMap { message: String },

    #[error("Invalid chart config: {message}")]
    InvalidConfig { message: String },
}
