//! High-level index operations.

pub mod directives;
pub mod pip_args;
pub mod requirement;
pub mod source_list;

pub use directives::{parse_indexes, parse_requirements_text, IndexDirective};
pub use pip_args::{pip_source_args, prepare_pip_source_args};
pub use requirement::{get_indexes_from_requirement, RequirementIndexes, ResolvedIndexes};
pub use source_list::{get_source_list, normalize_index, IndexOptions};
