use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create framebuffer: {0}")]
    CreateFramebuffer(String),
    #[error("Failed to create renderbuffer: {0}")]
    CreateRenderbuffer(String),
    #[error("Failed to create vertex buffer: {0}")]
    CreateBuffer(String),
    #[error("Failed to build fill shader: {0}")]
    Shader(String),
}

pub type Result<T> = std::result::Result<T, Error>;
