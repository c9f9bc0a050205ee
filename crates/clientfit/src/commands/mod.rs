pub mod init;
pub mod inspect;
pub mod list;
pub mod platform;
pub mod resize;
