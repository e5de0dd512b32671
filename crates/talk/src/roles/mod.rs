pub mod keyboard;
pub mod receiver;
pub mod screen;
pub mod sender;
