//! Read-only lookup over an items/spells snapshot: item search, batched
//! spell enrichment and spell description templating.

pub mod config;
pub mod content;
pub mod damage;
pub mod display;
pub mod duration;
pub mod enrich;
pub mod error;
pub mod model;
pub mod search;
pub mod session;
pub mod snapshot;
pub mod template;
pub mod xref;

pub use config::{ArmoryConfig, DatabaseConfig, SearchConfig, TableNames};
pub use damage::{range_for, DamageKind, ResolvedEffect};
pub use duration::duration_for;
pub use enrich::EnrichmentPipeline;
pub use error::{Error, Result};
pub use model::{
    DamageSlot, ItemEntry, ItemRecord, Resistances, SpellEffect, SpellId, SpellRecord,
    SpellRefSlot, StatSlot,
};
pub use search::{Query, SearchEngine, TextQuery};
pub use session::{SearchSession, SearchState};
pub use snapshot::{SharedReader, SnapshotCounts, SnapshotReader, SqliteSnapshot, Unavailable};
pub use template::{PlaceholderToken, TemplateResolver};
pub use xref::CrossReferenceResolver;
