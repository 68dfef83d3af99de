pub use span::Span;

pub mod circular;
mod span;
