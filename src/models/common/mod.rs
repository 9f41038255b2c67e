pub mod class_key;
pub mod response;
