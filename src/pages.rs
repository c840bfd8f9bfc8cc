//! Page selection and page-level editing (rotation, removal, insertion).

use std::ops::RangeInclusive;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use serde::Serialize;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};

/// Rotation angles accepted by [`rotate_pages`].
pub const VALID_ROTATIONS: [i64; 3] = [90, 180, 270];

/// Page attributes a page inherits from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Parent links followed before a page tree is treated as cyclic.
const MAX_TREE_DEPTH: usize = 64;

/// Which pages an operation applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// Specific pages as sorted, disjoint, non-adjacent ranges (1-indexed)
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Select individual pages.
    pub fn pages(pages: impl IntoIterator<Item = u32>) -> Self {
        PageSelection::Ranges(coalesce(pages.into_iter().map(|p| p..=p).collect()))
    }

    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5-7,10").
    ///
    /// An empty string or `all` selects every page. Page zero and reversed
    /// ranges are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut ranges = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start)?;
                    let end = parse_page_number(end)?;
                    if start > end {
                        return Err(Error::InvalidPageRange(format!(
                            "range {} is reversed",
                            part
                        )));
                    }
                    ranges.push(start..=end);
                }
                None => {
                    let page = parse_page_number(part)?;
                    ranges.push(page..=page);
                }
            }
        }

        if ranges.is_empty() {
            return Err(Error::InvalidPageRange(s.to_string()));
        }
        Ok(PageSelection::Ranges(coalesce(ranges)))
    }

    /// Selected pages that exist in a document of `page_count` pages.
    pub fn resolve(&self, page_count: u32) -> Vec<u32> {
        match self {
            PageSelection::All => (1..=page_count).collect(),
            PageSelection::Ranges(ranges) => ranges
                .iter()
                .filter(|r| *r.start() <= page_count)
                .flat_map(|r| *r.start().max(&1)..=*r.end().min(&page_count))
                .collect(),
        }
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn coalesce(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_by_key(|r| (*r.start(), *r.end()));

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

impl std::str::FromStr for PageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_page_number(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(0) => Err(Error::InvalidPageRange(
            "page numbers start at 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::InvalidPageRange(format!(
            "'{}' is not a page number",
            s
        ))),
    }
}

/// Kind of page edit performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEdit {
    /// Pages were rotated by the given angle
    Rotate(i64),
    /// Pages were removed
    Remove,
    /// Pages were inserted starting at the given 1-indexed position
    Add { position: u32 },
}

/// Where inserted pages go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionPoint {
    /// Before the first page
    Start,
    /// After the last page
    #[default]
    End,
    /// So that the first inserted page becomes page N (clamped to the document)
    At(u32),
}

impl InsertionPoint {
    /// Parse `start`, `end` or a 1-indexed page number.
    ///
    /// Numbers below 1 mean the start. Anything unparseable falls back to
    /// the end.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("start") {
            return InsertionPoint::Start;
        }
        if s.eq_ignore_ascii_case("end") {
            return InsertionPoint::End;
        }
        match s.parse::<i64>() {
            Ok(n) if n < 1 => InsertionPoint::Start,
            Ok(n) => InsertionPoint::At(u32::try_from(n).unwrap_or(u32::MAX)),
            Err(_) => {
                log::warn!("Unrecognised insertion point '{}', appending at the end", s);
                InsertionPoint::End
            }
        }
    }

    /// Zero-based insertion index in a document of `page_count` pages.
    pub fn index(&self, page_count: u32) -> u32 {
        match self {
            InsertionPoint::Start => 0,
            InsertionPoint::End => page_count,
            InsertionPoint::At(n) => n.saturating_sub(1).min(page_count),
        }
    }
}

/// Summary of a page edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEditReport {
    /// What was done
    pub edit: PageEdit,

    /// Pages affected (1-indexed; original numbering for rotate and remove,
    /// new numbering for added pages)
    pub pages: Vec<u32>,

    /// Page count before the edit
    pub pages_before: u32,

    /// Page count after the edit
    pub pages_after: u32,
}

impl PageEditReport {
    /// Human-readable summary.
    pub fn message(&self) -> String {
        match self.edit {
            PageEdit::Rotate(angle) => format!(
                "PDF successfully rotated {}° for {} pages.",
                angle,
                self.pages.len()
            ),
            PageEdit::Remove => format!(
                "Successfully removed {} pages from PDF.",
                self.pages.len()
            ),
            PageEdit::Add { position } => format!(
                "Successfully added {} pages to PDF at position {}.",
                self.pages.len(),
                position
            ),
        }
    }
}

/// Set the rotation of the selected pages.
///
/// Pages outside the document are ignored. Returns the rotated pages.
pub fn rotate_pages(
    doc: &mut LopdfDocument,
    angle: i64,
    selection: &PageSelection,
) -> Result<Vec<u32>> {
    if !VALID_ROTATIONS.contains(&angle) {
        return Err(Error::InvalidRotation(angle));
    }

    let page_ids = doc.get_pages();
    let targets = selection.resolve(page_ids.len() as u32);
    if targets.is_empty() {
        return Err(Error::InvalidPageRange(
            "No valid pages specified for rotation".to_string(),
        ));
    }

    for page_num in &targets {
        if let Some(id) = page_ids.get(page_num) {
            let page = doc.get_object_mut(*id)?.as_dict_mut()?;
            page.set("Rotate", Object::Integer(angle));
        }
    }

    log::debug!("Rotated {} pages by {}", targets.len(), angle);
    Ok(targets)
}

/// Remove the selected pages.
///
/// Removing every page is refused. Returns the removed pages.
pub fn remove_pages(doc: &mut LopdfDocument, selection: &PageSelection) -> Result<Vec<u32>> {
    let total = doc.get_pages().len() as u32;
    let targets = selection.resolve(total);

    if targets.is_empty() {
        return Err(Error::InvalidPageRange(
            "No valid pages specified for removal".to_string(),
        ));
    }
    if targets.len() as u32 >= total {
        return Err(Error::InvalidPageRange(
            "Cannot remove all pages from PDF".to_string(),
        ));
    }

    doc.delete_pages(&targets);
    doc.prune_objects();

    log::debug!("Removed {} of {} pages", targets.len(), total);
    Ok(targets)
}

/// Insert every page of `other` into `doc`.
///
/// The page tree of `doc` is flattened into its root node, with inherited
/// attributes copied onto each page. Returns the new page numbers of the
/// inserted pages.
pub fn add_pages(
    doc: &mut LopdfDocument,
    mut other: LopdfDocument,
    at: InsertionPoint,
) -> Result<Vec<u32>> {
    let mut kids = detach_pages(doc)?;
    if kids.is_empty() {
        return Err(Error::InvalidPageRange(
            "PDF document contains no pages".to_string(),
        ));
    }

    other.renumber_objects_with(doc.max_id + 1);
    let added = detach_pages(&mut other)?;
    if added.is_empty() {
        return Err(Error::InvalidPageRange(
            "No pages to add from second PDF".to_string(),
        ));
    }

    let index = at.index(kids.len() as u32);
    doc.max_id = doc.max_id.max(other.max_id);
    doc.objects.extend(
        other
            .objects
            .into_iter()
            .filter(|(_, object)| !is_tree_node(object)),
    );

    let start = index as usize;
    kids.splice(start..start, added.iter().copied());

    let root = page_tree_root(doc)?;
    for id in &kids {
        doc.get_object_mut(*id)?.as_dict_mut()?.set("Parent", root);
    }
    let root_dict = doc.get_object_mut(root)?.as_dict_mut()?;
    for key in INHERITABLE {
        root_dict.remove(key);
    }
    root_dict.set("Count", kids.len() as i64);
    root_dict.set(
        "Kids",
        kids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
    );
    doc.prune_objects();

    log::debug!(
        "Inserted {} pages at index {}, {} pages total",
        added.len(),
        index,
        kids.len()
    );
    Ok((index + 1..=index + added.len() as u32).collect())
}

/// Page ids in reading order, each carrying its inherited attributes.
fn detach_pages(doc: &mut LopdfDocument) -> Result<Vec<ObjectId>> {
    let ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for id in &ids {
        let inherited = inherited_attributes(doc, *id)?;
        let page = doc.get_object_mut(*id)?.as_dict_mut()?;
        for (key, value) in inherited {
            if !page.has(&key) {
                page.set(key, value);
            }
        }
    }
    Ok(ids)
}

/// Inheritable attributes of a page's ancestors, nearest ancestor first.
fn inherited_attributes(doc: &LopdfDocument, page: ObjectId) -> Result<Vec<(Vec<u8>, Object)>> {
    let mut found: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut node = doc.get_dictionary(page)?;

    for _ in 0..MAX_TREE_DEPTH {
        let Ok(parent) = node.get(b"Parent").and_then(Object::as_reference) else {
            break;
        };
        node = doc.get_dictionary(parent)?;
        for key in INHERITABLE {
            if found.iter().any(|(k, _)| k.as_slice() == key) {
                continue;
            }
            if let Ok(value) = node.get(key) {
                found.push((key.to_vec(), value.clone()));
            }
        }
    }
    Ok(found)
}

fn page_tree_root(doc: &LopdfDocument) -> Result<ObjectId> {
    let catalog = doc.trailer.get(b"Root")?.as_reference()?;
    Ok(doc.get_dictionary(catalog)?.get(b"Pages")?.as_reference()?)
}

/// Catalog and intermediate page tree nodes of a merged document.
fn is_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|ty| ty.as_name().ok())
        .is_some_and(|name| name == b"Pages" || name == b"Catalog")
}

/// Rotate pages of a PDF file and save the result.
pub fn rotate_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    angle: i64,
    selection: &PageSelection,
) -> Result<PageEditReport> {
    if !VALID_ROTATIONS.contains(&angle) {
        return Err(Error::InvalidRotation(angle));
    }

    let mut doc = load_editable(input.as_ref())?;
    let before = doc.get_pages().len() as u32;
    let pages = rotate_pages(&mut doc, angle, selection)?;
    doc.save(output.as_ref())?;

    Ok(PageEditReport {
        edit: PageEdit::Rotate(angle),
        pages,
        pages_before: before,
        pages_after: before,
    })
}

/// Remove pages from a PDF file and save the result.
pub fn remove_pages_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    selection: &PageSelection,
) -> Result<PageEditReport> {
    let mut doc = load_editable(input.as_ref())?;
    let before = doc.get_pages().len() as u32;
    let pages = remove_pages(&mut doc, selection)?;
    let after = doc.get_pages().len() as u32;
    doc.save(output.as_ref())?;

    Ok(PageEditReport {
        edit: PageEdit::Remove,
        pages,
        pages_before: before,
        pages_after: after,
    })
}

/// Insert the pages of `add` into `main` and save the result.
pub fn add_pages_file<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    main: P,
    add: Q,
    output: R,
    at: InsertionPoint,
) -> Result<PageEditReport> {
    let mut doc = load_editable(main.as_ref())?;
    let other = load_editable(add.as_ref())?;
    let before = doc.get_pages().len() as u32;
    let pages = add_pages(&mut doc, other, at)?;
    let after = doc.get_pages().len() as u32;
    doc.save(output.as_ref())?;

    Ok(PageEditReport {
        edit: PageEdit::Add {
            position: pages.first().copied().unwrap_or(before + 1),
        },
        pages,
        pages_before: before,
        pages_after: after,
    })
}

fn load_editable(path: &Path) -> Result<LopdfDocument> {
    detect_format_from_path(path)?;
    let doc = LopdfDocument::load(path)?;
    if doc.is_encrypted() {
        return Err(Error::Encrypted);
    }
    if doc.get_pages().is_empty() {
        return Err(Error::InvalidPageRange(
            "PDF document contains no pages".to_string(),
        ));
    }
    Ok(doc)
}
