pub mod persons_service;
pub mod registration_service;
pub mod ticket_service;
pub mod verification_service;
