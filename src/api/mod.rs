pub mod client;
#[cfg(test)]
pub mod fake;
pub mod http;
pub mod types;
