//! Document builders and log capture shared by unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;

/// Content stream that draws `label` in Helvetica.
fn label_stream(label: &str) -> Stream {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(label)]),
            Operation::new("ET", vec![]),
        ],
    };
    Stream::new(Dictionary::new(), content.encode().unwrap())
}

/// Page-tree node shared attributes: a Letter media box and a font resource.
fn inherited_attributes(doc: &mut Document) -> (Object, ObjectId) {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
    (Object::Array(media_box), resources_id)
}

/// Build a document with `pages` pages under a single page-tree node.
///
/// Pages carry no `MediaBox` or `Resources` of their own; both are
/// inherited from the root node. Page *n* draws the text "Page n".
pub fn build_document(pages: usize) -> Document {
    build_nested_document(&[pages])
}

/// Build a document whose root page-tree node has one intermediate node per
/// entry of `layout`, each holding that many pages.
///
/// A single-entry layout puts the pages directly under the root.
pub fn build_nested_document(layout: &[usize]) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_pages_id = doc.new_object_id();
    let (media_box, resources_id) = inherited_attributes(&mut doc);

    let mut page_number = 0;
    let mut root_kids: Vec<Object> = Vec::new();

    let nested = layout.len() > 1;
    for &count in layout {
        let parent_id = if nested {
            doc.new_object_id()
        } else {
            root_pages_id
        };

        let mut kids: Vec<Object> = Vec::new();
        for _ in 0..count {
            page_number += 1;
            let content_id = doc.add_object(label_stream(&format!("Page {page_number}")));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => parent_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        if nested {
            doc.objects.insert(
                parent_id,
                dictionary! {
                    "Type" => "Pages",
                    "Parent" => root_pages_id,
                    "Kids" => kids,
                    "Count" => count as i64,
                }
                .into(),
            );
            root_kids.push(parent_id.into());
        } else {
            root_kids = kids;
        }
    }

    doc.objects.insert(
        root_pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => root_kids,
            "Count" => page_number as i64,
            "MediaBox" => media_box,
            "Resources" => resources_id,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Text drawn on each page of `doc`, in page order.
pub fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let content = Content::decode(&content).unwrap();
            content
                .operations
                .iter()
                .find(|op| op.operator == "Tj")
                .and_then(|op| op.operands.first())
                .and_then(|operand| operand.as_str().ok())
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Shared buffer a test subscriber writes formatted events into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Events recorded on the current thread while this value is alive.
pub struct CapturedLogs {
    buffer: LogBuffer,
    _guard: DefaultGuard,
}

impl CapturedLogs {
    /// Everything logged so far, one formatted event per line.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.0.lock().unwrap()).into_owned()
    }
}

/// Record `info` and above for the current thread.
///
/// `#[tokio::test]` runs on a single thread, so events emitted by the
/// awaited action are captured too.
pub fn capture_logs() -> CapturedLogs {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    CapturedLogs {
        buffer,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
