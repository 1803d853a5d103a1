pub mod poller;
pub mod ring_buffer;
pub mod scheduler;
pub mod series;
pub mod store;
