//! Page-tree operations shared by the actions.
//!
//! Both actions build their output the same way: start from an empty
//! document ([`new_document`]) and copy pages into it ([`copy_pages`]).
//! Only the objects a copied page actually reaches are brought along, so
//! an output never carries the rest of its source document.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{HashMap, HashSet, VecDeque};
use std::ops::RangeInclusive;

use crate::error::{PdfOpsError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A run of consecutive pages that becomes one split output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGroup {
    /// 1-based position of the group within its document.
    pub index: usize,
    /// First page, 1-based.
    pub first: u32,
    /// Last page, 1-based and inclusive.
    pub last: u32,
}

impl PageGroup {
    /// Page numbers of the group, as used by [`Document::get_pages`].
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Number of pages in the group.
    pub fn len(&self) -> usize {
        self.pages().count()
    }

    /// Whether the group holds no pages.
    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }
}

/// Partition `total` pages into consecutive groups of `size` pages.
///
/// Every group is full except possibly the last one. A document without
/// pages yields no groups.
///
/// # Errors
///
/// Returns [`PdfOpsError::InvalidPageLength`] if `size` is zero.
///
/// # Examples
///
/// ```
/// use pdfops::pages::page_groups;
///
/// let groups = page_groups(5, 2).unwrap();
/// let ranges: Vec<_> = groups.iter().map(|g| (g.first, g.last)).collect();
/// assert_eq!(ranges, vec![(1, 2), (3, 4), (5, 5)]);
/// ```
pub fn page_groups(total: usize, size: usize) -> Result<Vec<PageGroup>> {
    if size == 0 {
        return Err(PdfOpsError::InvalidPageLength { length: size });
    }

    let groups = (0..total)
        .step_by(size)
        .enumerate()
        .map(|(i, start)| PageGroup {
            index: i + 1,
            first: (start + 1) as u32,
            last: (start + size).min(total) as u32,
        })
        .collect();

    Ok(groups)
}

/// Create an empty document: a catalog and a page tree without pages.
pub fn new_document() -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Copy pages of `source` to the end of `target`'s page tree.
///
/// `page_numbers` are 1-based and are appended in the order given. Each
/// copied page receives the attributes it used to inherit from its page
/// tree, so it renders the same under its new parent. Objects shared by
/// several copied pages are copied once per call.
///
/// Returns the number of pages copied.
///
/// # Errors
///
/// Returns an error if a page number does not exist in `source` or if
/// `target` has no usable page tree.
pub fn copy_pages<I>(target: &mut Document, source: &Document, page_numbers: I) -> Result<usize>
where
    I: IntoIterator<Item = u32>,
{
    let source_pages = source.get_pages();
    let target_root = root_pages_id(target)?;
    let mut copier = ObjectCopier::new(source, target_root);

    // Reserve ids for all pages first so references between copied pages
    // (link annotations, structure elements) resolve to the copies.
    let mut planned = Vec::new();
    for number in page_numbers {
        let page_id = *source_pages.get(&number).ok_or_else(|| {
            PdfOpsError::pdf_processing(format!(
                "Page {number} does not exist (document has {} pages)",
                source_pages.len()
            ))
        })?;
        let new_id = target.new_object_id();
        copier.copied.insert(page_id, new_id);
        planned.push((page_id, new_id));
    }

    for &(page_id, new_id) in &planned {
        let mut page = source
            .get_dictionary(page_id)
            .map_err(|e| PdfOpsError::pdf_processing(format!("Failed to read page: {e}")))?
            .clone();

        for (key, value) in inherited_attributes(source, page_id, &page) {
            page.set(key, value);
        }
        page.remove(b"Parent");

        let mut page = Object::Dictionary(page);
        copier.remap(target, &mut page);
        if let Object::Dictionary(dict) = &mut page {
            dict.set("Parent", target_root);
        }
        target.objects.insert(new_id, page);
    }
    copier.drain(target);

    let new_ids: Vec<ObjectId> = planned.iter().map(|&(_, new_id)| new_id).collect();
    add_pages_to_tree(target, target_root, &new_ids)?;

    if source.version > target.version {
        target.version = source.version.clone();
    }

    Ok(new_ids.len())
}

/// Object id of the root node of `doc`'s page tree.
pub fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfOpsError::pdf_processing(format!("Document has no page tree: {e}")))
}

/// Values `page` lacks itself but inherits from its ancestors.
fn inherited_attributes(
    doc: &Document,
    page_id: ObjectId,
    page: &Dictionary,
) -> Vec<(Vec<u8>, Object)> {
    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();

    let mut visited = HashSet::from([page_id]);
    let mut next = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(node_id) = next {
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        next = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}

/// Append `page_ids` to the kids of the page-tree node `pages_id`.
fn add_pages_to_tree(doc: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
    let pages = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfOpsError::pdf_processing(format!("Failed to get pages object: {e}")))?;

    match pages.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => {
            kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
        }
        Ok(_) => return Err(PdfOpsError::pdf_processing("Kids is not an array")),
        Err(_) => {
            return Err(PdfOpsError::pdf_processing(
                "Pages dictionary missing Kids array",
            ));
        }
    }

    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", count + page_ids.len() as i64);

    Ok(())
}

/// `/Type` of a dictionary object, if any.
fn node_type(object: &Object) -> Option<&[u8]> {
    object
        .as_dict()
        .ok()?
        .get(b"Type")
        .and_then(Object::as_name)
        .ok()
}

/// Copies objects reachable from copied pages, renumbering them into the
/// target document.
struct ObjectCopier<'a> {
    source: &'a Document,
    target_root: ObjectId,
    copied: HashMap<ObjectId, ObjectId>,
    pending: VecDeque<(ObjectId, ObjectId)>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document, target_root: ObjectId) -> Self {
        Self {
            source,
            target_root,
            copied: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// Rewrite every reference inside `object` to point into `target`.
    fn remap(&mut self, target: &mut Document, object: &mut Object) {
        match object {
            Object::Reference(id) => *object = self.reference(target, *id),
            Object::Array(items) => {
                for item in items.iter_mut() {
                    self.remap(target, item);
                }
            }
            Object::Dictionary(dict) => {
                for (_, value) in dict.iter_mut() {
                    self.remap(target, value);
                }
            }
            Object::Stream(stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    self.remap(target, value);
                }
            }
            _ => {}
        }
    }

    /// Target-side replacement for a reference to source object `id`.
    ///
    /// Page-tree nodes collapse onto the target root and pages that are
    /// not being copied become null. Anything else is scheduled for copying.
    fn reference(&mut self, target: &mut Document, id: ObjectId) -> Object {
        if let Some(&new_id) = self.copied.get(&id) {
            return Object::Reference(new_id);
        }

        let Ok(object) = self.source.get_object(id) else {
            return Object::Null;
        };
        match node_type(object) {
            Some(b"Pages") => return Object::Reference(self.target_root),
            Some(b"Page") => return Object::Null,
            _ => {}
        }

        let new_id = target.new_object_id();
        self.copied.insert(id, new_id);
        self.pending.push_back((id, new_id));
        Object::Reference(new_id)
    }

    /// Copy every scheduled object, including the ones they reach.
    fn drain(&mut self, target: &mut Document) {
        while let Some((id, new_id)) = self.pending.pop_front() {
            let Ok(object) = self.source.get_object(id) else {
                continue;
            };
            let mut object = object.clone();
            self.remap(target, &mut object);
            target.objects.insert(new_id, object);
        }
    }
}
