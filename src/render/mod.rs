pub mod blit;
pub mod cancel;
pub mod compositor;
pub mod pipeline;
pub mod preview;
