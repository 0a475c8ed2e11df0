/// Birthday domain logic
pub mod birthday_service;
pub mod window;

pub use birthday_service::{BirthdayService, WindowKind};
