pub mod bridge;
pub mod content;
pub mod model;
pub mod page;
