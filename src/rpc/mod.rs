pub mod error;
pub mod methods;
pub mod request;
