pub mod persons;

pub use persons::{NewPerson, PersonRow};
