pub use annotation::Annotation;
pub use id::TeId;

mod annotation;
mod id;
