pub mod demo;
pub mod spin;
pub mod styles;
