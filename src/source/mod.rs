pub mod model;
pub mod timeline;
