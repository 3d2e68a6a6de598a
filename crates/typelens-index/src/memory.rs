use std::collections::{BTreeMap, HashMap};
use std::ops::ControlFlow;

use typelens_proto::{Location, MarkupContent, TypeData};

use crate::{EngineError, InheritanceEdge, InheritanceIndex, JavaIndex};

/// Index held entirely in memory. Built once, then shared read-only.
#[derive(Debug, Default, Clone)]
pub struct MemoryIndex {
    types: BTreeMap<String, Vec<TypeData>>,
    inheritance: InheritanceIndex,
    labels: HashMap<String, String>,
    javadoc: HashMap<String, MarkupContent>,
    locations: HashMap<String, Location>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_types(types: impl IntoIterator<Item = TypeData>) -> Self {
        let mut index = Self::new();
        let mut edges = Vec::new();
        for ty in types {
            edges.extend(index.add_type(ty));
        }
        index.inheritance.extend(edges);
        index
    }

    pub fn insert(&mut self, ty: TypeData) {
        let edges = self.add_type(ty);
        self.inheritance.extend(edges);
    }

    pub fn set_javadoc(&mut self, binding_key: impl Into<String>, doc: MarkupContent) {
        self.javadoc.insert(binding_key.into(), doc);
    }

    pub fn set_location(&mut self, binding_key: impl Into<String>, location: Location) {
        self.locations.insert(binding_key.into(), location);
    }

    /// Number of indexed type instances.
    pub fn len(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn add_type(&mut self, ty: TypeData) -> Vec<InheritanceEdge> {
        let edges = ty
            .direct_supertype_names()
            .map(|supertype| InheritanceEdge {
                subtype: ty.fq_name.clone(),
                supertype: supertype.to_string(),
            })
            .collect();

        self.labels
            .entry(ty.binding_key.clone())
            .or_insert_with(|| ty.label.clone());
        let members = ty
            .fields
            .iter()
            .map(|f| &f.member)
            .chain(ty.methods.iter().map(|m| &m.member));
        for member in members {
            self.labels
                .entry(member.binding_key.clone())
                .or_insert_with(|| member.label.clone());
        }

        self.types.entry(ty.fq_name.clone()).or_default().push(ty);
        edges
    }
}

impl JavaIndex for MemoryIndex {
    fn find_types(&self, fq_name: &str) -> Result<Vec<TypeData>, EngineError> {
        Ok(self.types.get(fq_name).cloned().unwrap_or_default())
    }

    fn for_each_type(
        &self,
        visit: &mut dyn FnMut(&TypeData) -> ControlFlow<()>,
    ) -> Result<(), EngineError> {
        for ty in self.types.values().flatten() {
            if visit(ty).is_break() {
                break;
            }
        }
        Ok(())
    }

    fn direct_subtypes(&self, fq_name: &str) -> Result<Vec<String>, EngineError> {
        Ok(self.inheritance.direct_subtypes(fq_name).to_vec())
    }

    fn javadoc(&self, binding_key: &str) -> Result<Option<MarkupContent>, EngineError> {
        Ok(self.javadoc.get(binding_key).cloned())
    }

    fn location(&self, binding_key: &str) -> Result<Option<Location>, EngineError> {
        Ok(self.locations.get(binding_key).cloned())
    }

    fn element_label(&self, binding_key: &str) -> Result<Option<String>, EngineError> {
        Ok(self
            .labels
            .get(binding_key)
            .filter(|label| !label.is_empty())
            .cloned())
    }
}
