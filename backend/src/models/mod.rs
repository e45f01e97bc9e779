pub mod parameters;
pub mod request;
pub mod results;
pub mod scenario;
