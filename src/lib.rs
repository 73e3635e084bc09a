//! Poll a JSON feed of recently active GitHub repositories, filter and page
//! through it locally, and keep the view steady while the feed refreshes.

pub mod config;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod logging;
pub mod notify;
pub mod paginate;
pub mod poller;
pub mod refresh;
pub mod render;
pub mod source;
pub mod types;
pub mod view;
