pub mod domain;
pub mod error;
pub mod html;
pub mod types;
