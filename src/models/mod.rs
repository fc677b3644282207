pub mod booking;
pub mod inquiry;
pub mod payment;

pub use booking::{Booking, BookingStatus, BookingType, NewBooking};
pub use inquiry::{Inquiry, NewInquiry};
pub use payment::{NewPayment, Payment};
