pub mod auth;
pub mod clients;
pub mod invoices;
pub mod uploads;
