//! Crawler-specific adapters over the JSON checkpoint store.
//!
//! Each adapter binds one semantic field (page number, current URL, scraped
//! URL list) to a fixed key in the snapshot map. Write accessors replace the
//! entire snapshot with that single key; use
//! [`JsonCheckpointStore::update`](crate::JsonCheckpointStore::update) when a
//! job needs several fields in one snapshot.

mod browser;
mod http;
mod spider;
mod webdriver;

pub use browser::BrowserSaver;
pub use http::HttpSaver;
pub use spider::SpiderSaver;
pub use webdriver::WebDriverSaver;
