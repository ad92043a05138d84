pub mod persons;
pub mod register;
pub mod ticket;
pub mod verify;
