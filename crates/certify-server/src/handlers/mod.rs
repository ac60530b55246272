pub mod catalog;
pub mod certificate;
pub mod health;
pub mod verify;
