use std::fmt::{Display, Formatter};
use std::iter;

use ahash::RandomState;
use derive_more::From;
use eyre::Result;
use indexmap::IndexMap;

use tesim_core_rs::loc::{circular, Span};
use tesim_core_rs::te::{Annotation, TeId};

use crate::genome::{ensure_insertable, Builder, Config, Genome};

/// A builder for constructing [`ArrayGenome`]s.
#[derive(Clone, Debug, Default, From)]
pub struct ArrayGenomeBuilder {
    config: Config,
}

impl Builder for ArrayGenomeBuilder {
    type Target = ArrayGenome;

    fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    fn build(self) -> Self::Target {
        let (length, first_id, capacity) = self.config.dissolve();

        let mut symbols = Vec::with_capacity(length.saturating_add(capacity));
        symbols.resize(length, Annotation::Empty);

        ArrayGenome {
            symbols,
            active: IndexMap::default(),
            next_id: first_id,
        }
    }
}

/// Genome stored as a contiguous vector with one annotation per position.
///
/// Active TEs are tracked by their start offset in the vector. Inserting a TE shifts the tail of
/// the vector and renumbers every active TE downstream of the insertion point, O(n + m) overall.
/// Span lookups and length queries are O(1).
#[derive(Clone, Debug)]
pub struct ArrayGenome {
    symbols: Vec<Annotation>,
    // Start + length of each active TE, in insertion order
    active: IndexMap<TeId, Span, RandomState>,
    next_id: TeId,
}

impl ArrayGenome {
    pub fn builder() -> ArrayGenomeBuilder {
        ArrayGenomeBuilder::default()
    }

    /// Empty genome of the given length with TE identifiers starting from 0.
    pub fn new(length: usize) -> Self {
        Self::builder().with_length(length).build()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.symbols
    }

    fn place(&mut self, span: Span) -> TeId {
        if let Some(hit) = self.symbols.get(span.start()).and_then(Annotation::active) {
            log::debug!(
                "Active TE {hit} is disabled by an insertion at position {}",
                span.start()
            );
            self.disable_te(hit);
        }

        let id = self.next_id.bump();
        log::trace!("Inserting TE {id} at {span}");

        for other in self.active.values_mut() {
            if other.start() >= span.start() {
                other.shift(span.len());
            }
        }
        self.symbols.splice(
            span.start()..span.start(),
            iter::repeat_n(Annotation::Active(id), span.len()),
        );
        self.active.insert(id, span);
        id
    }
}

impl Genome for ArrayGenome {
    fn insert_te(&mut self, pos: usize, length: usize) -> Result<TeId> {
        ensure_insertable(pos, length, self.len())?;
        let span = Span::new(pos, length)?;
        Ok(self.place(span))
    }

    fn copy_te(&mut self, te: TeId, offset: i64) -> Option<TeId> {
        let source = *self.active.get(&te)?;
        let target = circular::offset(source.start(), offset, self.len())?;
        log::trace!("Copying TE {te} from {source} to position {target}");

        let span = Span::new(target, source.len()).ok()?;
        Some(self.place(span))
    }

    fn disable_te(&mut self, te: TeId) {
        if let Some(span) = self.active.shift_remove(&te) {
            log::trace!("Disabling TE {te} at {span}");
            self.symbols[span.range()].fill(Annotation::Disabled);
        }
    }

    fn active_tes(&self) -> Vec<TeId> {
        self.active.keys().copied().collect()
    }

    fn is_active(&self, te: TeId) -> bool {
        self.active.contains_key(&te)
    }

    fn span(&self, te: TeId) -> Option<Span> {
        self.active.get(&te).copied()
    }

    fn len(&self) -> usize {
        self.symbols.len()
    }

    fn render(&self) -> String {
        let mut rendered = String::with_capacity(self.symbols.len());
        rendered.extend(self.symbols.iter().map(Annotation::symbol));
        rendered
    }
}

impl Display for ArrayGenome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
