pub mod bookings;
pub mod health;
pub mod inquiries;
pub mod pages;
pub mod payments;
