pub mod error;
pub mod params;
pub mod validator;
