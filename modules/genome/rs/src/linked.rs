use std::fmt::{Display, Formatter};
use std::iter;

use ahash::RandomState;
use derive_more::From;
use eyre::Result;
use indexmap::IndexMap;

use tesim_collections_rs::ring::{NodeId, Ring};
use tesim_core_rs::loc::Span;
use tesim_core_rs::te::{Annotation, TeId};

use crate::genome::{ensure_insertable, Builder, Config, Genome};

/// A builder for constructing [`LinkedGenome`]s.
#[derive(Clone, Debug, Default, From)]
pub struct LinkedGenomeBuilder {
    config: Config,
}

impl Builder for LinkedGenomeBuilder {
    type Target = LinkedGenome;

    fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    fn build(self) -> Self::Target {
        let (length, first_id, capacity) = self.config.dissolve();

        let mut ring = Ring::with_capacity(length.saturating_add(capacity));
        ring.push_back(iter::repeat_n(Annotation::Empty, length));

        LinkedGenome {
            ring,
            active: IndexMap::default(),
            next_id: first_id,
        }
    }
}

// First node and length of an active TE
#[derive(Copy, Clone, Debug)]
struct Segment {
    first: NodeId,
    len: usize,
}

/// Genome stored as a circular doubly-linked list with one node per position.
///
/// Active TEs are tracked by a handle to their first node, so an insertion never renumbers other
/// TEs. The price is positional access: reaching position `pos` walks the links from the head,
/// which makes insertions O(n + m) and span queries O(n). Length queries are O(1).
#[derive(Clone, Debug)]
pub struct LinkedGenome {
    ring: Ring<Annotation>,
    active: IndexMap<TeId, Segment, RandomState>,
    next_id: TeId,
}

impl LinkedGenome {
    pub fn builder() -> LinkedGenomeBuilder {
        LinkedGenomeBuilder::default()
    }

    /// Empty genome of the given length with TE identifiers starting from 0.
    pub fn new(length: usize) -> Self {
        Self::builder().with_length(length).build()
    }

    /// Insert a new TE of `length` positions right before the node `at`, which takes the place of
    /// `at` in the genome coordinates. `None` is only valid for an empty genome.
    fn splice(&mut self, at: Option<NodeId>, length: usize) -> TeId {
        if let Some(hit) = at.and_then(|node| self.ring.get(node).active()) {
            log::debug!("Active TE {hit} is disabled by an insertion into its span");
            self.disable_te(hit);
        }

        let id = self.next_id.bump();
        log::trace!("Inserting TE {id} of length {length}");

        let block = iter::repeat_n(Annotation::Active(id), length);
        let first = match at {
            Some(at) => {
                let first = self.ring.insert_before(at, block);
                // The new block takes over position 0 from `at`
                match first {
                    Some(first) if self.ring.head() == Some(at) => self.ring.set_head(first),
                    _ => {}
                }
                first
            }
            None => self.ring.push_back(block),
        };

        if let Some(first) = first {
            self.active.insert(id, Segment { first, len: length });
        }
        id
    }
}

impl Genome for LinkedGenome {
    fn insert_te(&mut self, pos: usize, length: usize) -> Result<TeId> {
        ensure_insertable(pos, length, self.len())?;
        let at = self.ring.nth(pos);
        Ok(self.splice(at, length))
    }

    fn copy_te(&mut self, te: TeId, offset: i64) -> Option<TeId> {
        let source = *self.active.get(&te)?;
        log::trace!("Copying TE {te} by {offset} positions");

        let at = self.ring.walk(source.first, offset);
        Some(self.splice(Some(at), source.len))
    }

    fn disable_te(&mut self, te: TeId) {
        if let Some(segment) = self.active.shift_remove(&te) {
            log::trace!("Disabling TE {te} of length {}", segment.len);

            let mut node = segment.first;
            for _ in 0..segment.len {
                *self.ring.get_mut(node) = Annotation::Disabled;
                node = self.ring.next(node);
            }
        }
    }

    fn active_tes(&self) -> Vec<TeId> {
        self.active.keys().copied().collect()
    }

    fn is_active(&self, te: TeId) -> bool {
        self.active.contains_key(&te)
    }

    fn span(&self, te: TeId) -> Option<Span> {
        let segment = self.active.get(&te)?;
        let start = self.ring.position(segment.first)?;
        Span::new(start, segment.len).ok()
    }

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn render(&self) -> String {
        let mut rendered = String::with_capacity(self.ring.len());
        rendered.extend(self.ring.iter().map(Annotation::symbol));
        rendered
    }
}

impl Display for LinkedGenome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
