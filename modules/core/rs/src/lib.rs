pub mod loc;
pub mod te;
