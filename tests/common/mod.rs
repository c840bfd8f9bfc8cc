//! Shared PDF fixtures built in memory with lopdf.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// One positioned text line: font resource, size, x, y, text.
pub type TextLine = (&'static str, i64, i64, i64, &'static str);

pub const RESUME_PAGE_ONE: &[TextLine] = &[
    ("F2", 20, 230, 740, "Jane Doe"),
    ("F1", 10, 200, 720, "jane@example.com | 555-123-4567"),
    ("F2", 14, 72, 680, "EXPERIENCE"),
    ("F1", 12, 72, 660, "Senior Software Engineer"),
    ("F3", 10, 72, 645, "Acme Corp 2019 - 2023"),
    ("F1", 11, 72, 625, "- Led a team of five people"),
    ("F1", 11, 72, 610, "- Shipped the billing platform"),
    ("F1", 11, 72, 585, "Built reliable services & tools <fast>."),
];

pub const RESUME_PAGE_TWO: &[TextLine] = &[
    ("F2", 14, 72, 740, "SKILLS"),
    ("F1", 11, 72, 720, "Rust, Go and SQL for backend work."),
];

fn text_content(lines: &[TextLine]) -> Vec<u8> {
    let mut operations = Vec::new();
    for (font, size, x, y, text) in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![(*font).into(), (*size).into()]));
        operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }.encode().unwrap()
}

fn font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Build a document with one page per entry of `pages`.
pub fn build_document(pages: &[&[TextLine]]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let italic = font(&mut doc, "Helvetica-Oblique");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => italic,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, text_content(lines)));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Jane Doe Resume"),
        "Author" => Object::string_literal("Jane Doe"),
        "CreationDate" => Object::string_literal("D:20240115103000Z"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc
}

/// The two-page resume fixture.
pub fn resume_document() -> Document {
    build_document(&[RESUME_PAGE_ONE, RESUME_PAGE_TWO])
}

/// Save a document into `dir` under `name` and return its path.
pub fn save(mut doc: Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Write the resume fixture into `dir`.
pub fn write_resume(dir: &Path) -> PathBuf {
    save(resume_document(), dir, "resume.pdf")
}

/// Serialize the resume fixture to bytes.
pub fn resume_bytes() -> Vec<u8> {
    let mut doc = resume_document();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
