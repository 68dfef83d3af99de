use derive_getters::Dissolve;
use derive_more::Constructor;
use eyre::{ensure, Result};
use impl_tools::autoimpl;

use tesim_core_rs::loc::{circular, Span};
use tesim_core_rs::te::TeId;

/// A circular genome annotated with transposable elements (TEs).
///
/// Positions are numbered from 0 to `len() - 1` and the last position is adjacent to the first
/// one. Each position is either empty, part of an active TE, or part of a disabled TE. Active TEs
/// never overlap. Inserting or copying a TE lengthens the genome, disabling a TE keeps its
/// positions in place.
///
/// TEs are addressed by opaque [`TeId`]s only, which makes all implementations interchangeable
/// for the caller.
#[autoimpl(for <T: trait + ?Sized> &mut T, Box<T>)]
pub trait Genome {
    /// Insert a new active TE of `length` positions starting at `pos`.
    ///
    /// If `pos` falls inside an active TE, that TE is disabled first. Positions at or after `pos`
    /// are shifted forward by `length`. Returns the identifier of the new TE.
    ///
    /// Fails without touching the genome if `pos` is not in `[0, len())` or `length` is zero.
    /// An empty genome accepts a single position, 0.
    fn insert_te(&mut self, pos: usize, length: usize) -> Result<TeId>;

    /// Copy the active TE `te` to the position `offset` positions away from its start, wrapping
    /// around the genome boundary. The copy is inserted by the same rules as [`Genome::insert_te`].
    ///
    /// Returns `None` and leaves the genome untouched if `te` is not active.
    fn copy_te(&mut self, te: TeId, offset: i64) -> Option<TeId>;

    /// Disable the TE if it's active. Disabled and unknown TEs are ignored.
    fn disable_te(&mut self, te: TeId);

    /// Identifiers of all active TEs in insertion order.
    fn active_tes(&self) -> Vec<TeId>;

    fn is_active(&self, te: TeId) -> bool;

    /// Positions currently occupied by the active TE.
    fn span(&self, te: TeId) -> Option<Span>;

    /// Total number of positions, including those of disabled TEs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One character per position starting from position 0: `-` for empty positions, `A` for
    /// active TEs and `x` for disabled TEs.
    fn render(&self) -> String;

    /// Same as [`Genome::insert_te`], but any signed `pos` is first wrapped into `[0, len())`.
    fn insert_te_circular(&mut self, pos: i64, length: usize) -> Result<TeId> {
        let pos = circular::wrap(pos, self.len()).unwrap_or(0);
        self.insert_te(pos, length)
    }
}

/// Initial state of a genome.
#[derive(Clone, PartialEq, Eq, Debug, Default, Constructor, Dissolve)]
pub struct Config {
    /// Number of positions in the new genome, all of them empty.
    pub length: usize,
    /// Identifier assigned to the first inserted TE.
    pub first_id: TeId,
    /// Additional positions to preallocate on top of `length`.
    pub capacity: usize,
}

/// A builder for constructing genomes from a [`Config`].
pub trait Builder: Sized {
    /// The type of genome that will be constructed.
    type Target: Genome;

    fn config_mut(&mut self) -> &mut Config;

    /// Build and return an empty genome.
    fn build(self) -> Self::Target;

    fn with_config(mut self, config: Config) -> Self {
        *self.config_mut() = config;
        self
    }

    fn with_length(mut self, length: usize) -> Self {
        self.config_mut().length = length;
        self
    }

    fn with_first_id(mut self, first_id: TeId) -> Self {
        self.config_mut().first_id = first_id;
        self
    }

    fn with_capacity(mut self, capacity: usize) -> Self {
        self.config_mut().capacity = capacity;
        self
    }
}

pub(crate) fn ensure_insertable(pos: usize, length: usize, len: usize) -> Result<()> {
    ensure!(length > 0, "TE length must be positive");
    ensure!(
        pos < len || (pos == 0 && len == 0),
        "Insertion position {pos} is out of range for a genome of length {len}"
    );
    Ok(())
}
