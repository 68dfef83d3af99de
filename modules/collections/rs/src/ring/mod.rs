pub use ring::{NodeId, Ring};

#[allow(clippy::module_inception)]
mod ring;
