//! Remote answer bank over HTTP

mod http;

pub use http::HttpRemoteBank;
