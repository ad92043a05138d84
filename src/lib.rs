pub mod database;
pub mod models;
pub mod scanner;
pub mod services;
pub mod web;
