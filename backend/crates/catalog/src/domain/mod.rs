//! Domain Layer
//!
//! Backend payload shapes and the client-side rules around them.

pub mod dto;
pub mod filter;
pub mod pagination;
pub mod validation;

pub use filter::ExtensionFilter;
pub use pagination::{PageItem, PageWindow, page_window};
pub use validation::ExtensionForm;
