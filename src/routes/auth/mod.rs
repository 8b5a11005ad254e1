mod handler;

pub use handler::status;
