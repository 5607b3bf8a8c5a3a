pub mod create;
pub mod mail_log;
pub mod monitor;
pub mod verify;
