pub mod location;
pub mod validate;
