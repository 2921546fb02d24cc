#![doc = include_str!("../README.md")]

mod callback;
mod client;
mod config;
mod error;
mod response;

pub use callback::build_frontend_callback_url;
pub use client::GymClient;
pub use config::ClientConfig;
pub use error::{BodyReadError, ClientError};
pub use response::{handle_response, BufferedResponse, ResponseSource};
