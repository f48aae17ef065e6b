//! HTML rendering and form handlers for the booking flow.

mod booking;
pub mod views;

pub use booking::{
    back_handler, booking_page_handler, continue_handler, guests_handler, next_month_handler,
    prev_month_handler, reset_handler, select_date_handler, select_villa_handler,
    submit_details_handler,
};
