// Crate root library declaration and module exports.
pub mod calendar;
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod events;
pub mod locale;
pub mod model;
pub mod popup;
pub mod storage;
pub mod time_picker;
pub mod time_text;
