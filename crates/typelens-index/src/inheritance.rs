use std::collections::BTreeMap;

/// One `subtype extends/implements supertype` relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InheritanceEdge {
    pub subtype: String,
    pub supertype: String,
}

/// Inheritance index: type -> direct subtypes.
///
/// Supertypes are read from the snapshot a query reports, so only the
/// downward direction is indexed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InheritanceIndex {
    edges: Vec<InheritanceEdge>,
    subtypes: BTreeMap<String, Vec<String>>,
}

impl InheritanceIndex {
    pub fn extend(&mut self, edges: impl IntoIterator<Item = InheritanceEdge>) {
        self.edges.extend(edges);
        self.rebuild_maps();
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn direct_subtypes(&self, supertype: &str) -> &[String] {
        self.subtypes.get(supertype).map(Vec::as_slice).unwrap_or(&[])
    }

    fn rebuild_maps(&mut self) {
        self.subtypes.clear();

        for edge in &self.edges {
            self.subtypes
                .entry(edge.supertype.clone())
                .or_default()
                .push(edge.subtype.clone());
        }

        // Keep results stable for deterministic tests.
        for children in self.subtypes.values_mut() {
            children.sort();
            children.dedup();
        }
    }
}
