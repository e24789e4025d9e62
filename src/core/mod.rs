//! Pure text transformations and record types
//!
//! Nothing in this module touches the filesystem:
//! - front_matter / inject: locate the front matter block and append lines to it
//! - fixer: the fixer type and ordered fixer chains
//! - shortcodes / dates / callout: the individual content fixers
//! - toc / glossary: sidecar data records and what is generated from them

pub mod callout;
pub mod dates;
pub mod fixer;
pub mod front_matter;
pub mod glossary;
pub mod inject;
pub mod shortcodes;
pub mod toc;

pub use callout::{convert_callouts, CalloutConverter};
pub use dates::{fix_dates, normalize_dates};
pub use fixer::{ChainOutcome, FixFailure, Fixer, FixerChain};
pub use front_matter::{append_to_front_matter, locate, FrontMatterSpan};
pub use glossary::GlossaryEntry;
pub use toc::{SectionAction, SectionPlan, SectionPlanner, TocEntry, TocNode, TocSection};
