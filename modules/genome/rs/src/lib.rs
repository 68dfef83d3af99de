pub use array::{ArrayGenome, ArrayGenomeBuilder};
pub use genome::{Builder, Config, Genome};
pub use linked::{LinkedGenome, LinkedGenomeBuilder};

mod array;
mod genome;
mod linked;
