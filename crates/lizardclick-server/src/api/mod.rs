//! Click endpoints.
//!
//! Both routes always answer 200 with the best known total. Storage trouble
//! shows up in logs and `/metrics`, never in the response.

pub mod clicks;

pub use clicks::{get_clicks, post_click, ClicksResponse};
