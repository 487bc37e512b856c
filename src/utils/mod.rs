pub mod crypto;
pub mod sanitize;
pub mod token;
pub mod validation;
