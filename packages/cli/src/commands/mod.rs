pub mod click;
pub mod init;
pub mod render;

pub use click::{click, ClickArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
