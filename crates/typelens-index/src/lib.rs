//! Capabilities the engine hands to the query service.
//!
//! The engine owns the live type index; the query service only ever sees it
//! through a [`JavaIndex`] handle obtained from a [`ProjectResolver`]. Both
//! are traits so tests and the CLI can substitute [`MemoryIndex`] and
//! [`ProjectRegistry`].

use std::ops::ControlFlow;

use typelens_proto::{Location, MarkupContent, TypeData};

mod dump;
mod error;
mod inheritance;
mod memory;
mod resolver;

pub use dump::IndexDump;
pub use error::{DumpError, EngineError, ScopeError};
pub use inheritance::{InheritanceEdge, InheritanceIndex};
pub use memory::MemoryIndex;
pub use resolver::{normalize_project_uri, ProjectRegistry, ProjectResolver};

/// Read-only handle to one project's type index.
///
/// Implementations must be safe to query from several threads at once.
pub trait JavaIndex: Send + Sync {
    /// Every indexed instance of `fq_name`. The same name can appear more than
    /// once when a project and one of its libraries both define it.
    fn find_types(&self, fq_name: &str) -> Result<Vec<TypeData>, EngineError>;

    /// Visit every indexed type until `visit` breaks.
    fn for_each_type(
        &self,
        visit: &mut dyn FnMut(&TypeData) -> ControlFlow<()>,
    ) -> Result<(), EngineError>;

    /// Names of the types that directly extend or implement `fq_name`.
    fn direct_subtypes(&self, fq_name: &str) -> Result<Vec<String>, EngineError>;

    fn javadoc(&self, binding_key: &str) -> Result<Option<MarkupContent>, EngineError>;

    fn location(&self, binding_key: &str) -> Result<Option<Location>, EngineError>;

    /// Display label of the type or member with this binding key.
    fn element_label(&self, binding_key: &str) -> Result<Option<String>, EngineError>;
}
