pub mod console;
pub mod csv;
pub mod http;
