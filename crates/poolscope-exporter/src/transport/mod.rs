//! HTTP transport: scrape handlers, error mapping, and exposition rendering.

pub mod http;
