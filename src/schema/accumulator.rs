//! Arena-based field/type accumulator
//!
//! Working state for one analysis pass. Nodes live in flat arenas addressed
//! by index; child links are index lists, so insertion order is an explicit
//! attribute of each node rather than a property of some container's
//! iteration order, and the node tree can grow without deeply nested
//! ownership.
//!
//! Counts are commutative: document arrival order only affects first-seen
//! insertion order, never a count. There is exactly one writer, so no
//! synchronization is needed.

use std::collections::BTreeMap;

use crate::classify::{classify, Classification, TypeTag};
use crate::schema::types::{Schema, SchemaField, SchemaType};
use crate::value::{Document, Value};

type FieldId = usize;
type TypeId = usize;

/// Where a field node hangs: the root context or a Document-tagged type node
#[derive(Debug, Clone, Copy)]
enum FieldOwner {
    Root,
    Type(TypeId),
}

/// Working state for one field within a parent context
#[derive(Debug)]
struct FieldNode {
    name: String,
    path: String,
    /// Parent contexts where the field held any defined value
    count: u64,
    /// Observed type buckets, first-seen order
    types: Vec<TypeId>,
}

/// Working state for one observed tag of a field or array-element slot
#[derive(Debug)]
struct TypeNode {
    tag: TypeTag,
    path: String,
    count: u64,
    /// Nested fields (Document tag), first-seen order
    fields: Vec<FieldId>,
    /// Flattened element buckets (Array tag), first-seen order
    element_types: Vec<TypeId>,
    /// Total element slots across all contributing arrays (Array tag)
    element_count: u64,
    /// Declared subtype histogram (Binary tag)
    binary_subtypes: BTreeMap<u8, u64>,
}

impl TypeNode {
    fn new(tag: TypeTag, path: String) -> Self {
        Self {
            tag,
            path,
            count: 0,
            fields: Vec::new(),
            element_types: Vec::new(),
            element_count: 0,
            binary_subtypes: BTreeMap::new(),
        }
    }
}

/// Accumulator for a full analysis pass
///
/// Memory is bounded by schema cardinality (distinct field paths times
/// distinct types per path), not by document count.
#[derive(Debug)]
pub(crate) struct Accumulator {
    doc_count: u64,
    root_fields: Vec<FieldId>,
    fields: Vec<FieldNode>,
    types: Vec<TypeNode>,
    max_array_elements: Option<usize>,
}

impl Accumulator {
    pub(crate) fn new(max_array_elements: Option<usize>) -> Self {
        Self {
            doc_count: 0,
            root_fields: Vec::new(),
            fields: Vec::new(),
            types: Vec::new(),
            max_array_elements,
        }
    }

    /// Top-level documents merged so far
    pub(crate) fn document_count(&self) -> u64 {
        self.doc_count
    }

    /// Distinct field paths discovered so far
    pub(crate) fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Merge one top-level document's contribution
    pub(crate) fn merge_document(&mut self, doc: &Document) {
        self.doc_count += 1;
        self.merge_fields(FieldOwner::Root, "", doc);
    }

    /// Merge every key of a keyed structure into the owner's field set.
    /// Presence is bumped here, exactly once per contributing context.
    fn merge_fields(&mut self, owner: FieldOwner, parent_path: &str, doc: &Document) {
        for (name, value) in doc {
            let fid = self.intern_field(owner, name, parent_path);
            self.fields[fid].count += 1;
            self.merge_value(fid, value);
        }
    }

    /// Merge one observed value into a field's type distribution
    fn merge_value(&mut self, fid: FieldId, value: &Value) {
        let cls = classify(value);
        let tid = self.intern_type(fid, cls.tag);
        self.merge_into_type(tid, value, cls);
    }

    /// Merge an occurrence into a type bucket, recursing for composites
    fn merge_into_type(&mut self, tid: TypeId, value: &Value, cls: Classification) {
        self.types[tid].count += 1;
        if let Some(subtype) = cls.binary_subtype {
            *self.types[tid].binary_subtypes.entry(subtype).or_insert(0) += 1;
        }

        match value {
            Value::Document(doc) => {
                let parent_path = self.types[tid].path.clone();
                self.merge_fields(FieldOwner::Type(tid), &parent_path, doc);
            }
            Value::Array(items) => {
                let limit = self.max_array_elements.unwrap_or(usize::MAX);
                for item in items.iter().take(limit) {
                    let item_cls = classify(item);
                    let etid = self.intern_element_type(tid, item_cls.tag);
                    self.types[tid].element_count += 1;
                    self.merge_into_type(etid, item, item_cls);
                }
            }
            _ => {}
        }
    }

    /// Find or create a field node under the owner, preserving first-seen order
    fn intern_field(&mut self, owner: FieldOwner, name: &str, parent_path: &str) -> FieldId {
        let list = match owner {
            FieldOwner::Root => &self.root_fields,
            FieldOwner::Type(tid) => &self.types[tid].fields,
        };
        for &fid in list {
            if self.fields[fid].name == name {
                return fid;
            }
        }

        let path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{parent_path}.{name}")
        };
        let fid = self.fields.len();
        self.fields.push(FieldNode {
            name: name.to_string(),
            path,
            count: 0,
            types: Vec::new(),
        });
        match owner {
            FieldOwner::Root => self.root_fields.push(fid),
            FieldOwner::Type(tid) => self.types[tid].fields.push(fid),
        }
        fid
    }

    /// Find or create a field's type bucket for a tag
    fn intern_type(&mut self, fid: FieldId, tag: TypeTag) -> TypeId {
        for &tid in &self.fields[fid].types {
            if self.types[tid].tag == tag {
                return tid;
            }
        }

        let path = self.fields[fid].path.clone();
        let tid = self.types.len();
        self.types.push(TypeNode::new(tag, path));
        self.fields[fid].types.push(tid);
        tid
    }

    /// Find or create an array's element bucket for a tag
    fn intern_element_type(&mut self, array_tid: TypeId, tag: TypeTag) -> TypeId {
        for i in 0..self.types[array_tid].element_types.len() {
            let tid = self.types[array_tid].element_types[i];
            if self.types[tid].tag == tag {
                return tid;
            }
        }

        let path = self.types[array_tid].path.clone();
        let tid = self.types.len();
        self.types.push(TypeNode::new(tag, path));
        self.types[array_tid].element_types.push(tid);
        tid
    }

    /// One-shot count-to-probability conversion over the whole tree.
    ///
    /// Denominators reflect documents actually merged, so early termination
    /// still yields a consistent schema.
    pub(crate) fn finalize(self) -> Schema {
        let fields = self.finalize_fields(&self.root_fields, self.doc_count);
        Schema {
            count: self.doc_count,
            fields,
        }
    }

    fn finalize_fields(&self, ids: &[FieldId], total: u64) -> Vec<SchemaField> {
        ids.iter()
            .map(|&fid| self.finalize_field(fid, total))
            .collect()
    }

    fn finalize_field(&self, fid: FieldId, total: u64) -> SchemaField {
        let node = &self.fields[fid];
        let mut types: Vec<SchemaType> = node
            .types
            .iter()
            .map(|&tid| self.finalize_type(tid, total))
            .collect();

        // Absence is implicit during the merge: the deficit against the
        // total context count becomes the Undefined share.
        if node.count < total {
            let missing = total - node.count;
            types.push(SchemaType {
                name: TypeTag::Undefined,
                path: node.path.clone(),
                count: missing,
                probability: ratio(missing, total),
                fields: None,
                types: None,
                binary_subtypes: None,
            });
        }

        SchemaField {
            name: node.name.clone(),
            path: node.path.clone(),
            count: node.count,
            probability: ratio(node.count, total),
            types,
        }
    }

    fn finalize_type(&self, tid: TypeId, total: u64) -> SchemaType {
        let node = &self.types[tid];

        // Nested denominators: a Document type's fields are evaluated
        // against its own count, an Array's element buckets against the
        // total element slots. An empty array simply has no buckets.
        let fields = match node.tag {
            TypeTag::Document => Some(self.finalize_fields(&node.fields, node.count)),
            _ => None,
        };
        let types = match node.tag {
            TypeTag::Array => Some(
                node.element_types
                    .iter()
                    .map(|&etid| self.finalize_type(etid, node.element_count))
                    .collect(),
            ),
            _ => None,
        };
        let binary_subtypes = if node.binary_subtypes.is_empty() {
            None
        } else {
            Some(node.binary_subtypes.clone())
        };

        SchemaType {
            name: node.tag,
            path: node.path.clone(),
            count: node.count,
            probability: ratio(node.count, total),
            fields,
            types,
            binary_subtypes,
        }
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
