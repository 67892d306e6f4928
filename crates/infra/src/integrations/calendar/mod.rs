//! Booking calendar crawler
//!
//! The booking site renders a datepicker one month per page. Open days are
//! `<td class="day ...">` cells carrying the epoch-millisecond key of their
//! midnight in `data-date`; the month header's `next` control is disabled on
//! the last bookable month.

pub mod crawler;
pub mod page_parser;

pub use crawler::HttpCalendarCrawler;
pub use page_parser::{parse_page, CalendarPage};
