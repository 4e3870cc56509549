//! The analysis pipeline: Load → Normalize → Count → Extract.
//!
//! Each request runs to completion and produces an immutable `Document`
//! plus a derived `Analysis`; nothing persists beyond the invocation.

use std::fs;
use std::path::PathBuf;

use crate::dom::parser::parse_html;
use crate::dom::resources::extract_images;
use crate::dom::DomTree;
use crate::net::fetch::fetch_url;
use crate::text::frequency::{top_words, TokenCount, MAX_TOP_WORDS};
use crate::text::normalize::{collapse_whitespace, preview_clean};

/// Where the text comes from. Origins are mutually exclusive per request.
#[derive(Debug, Clone)]
pub enum SourceRequest {
    RemoteUrl(String),
    LocalPath(PathBuf),
    Upload { name: String, bytes: Vec<u8> },
}

/// Raw text content plus optional parsed markup.
#[derive(Debug)]
pub struct Document {
    pub text: String,
    pub markup: Option<DomTree>,
    pub fetch_status: Option<u16>,
}

/// Error during source loading
#[derive(Debug)]
pub struct SourceError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

/// Everything the shell needs to render a loaded document.
pub struct Analysis {
    /// Page title when the source was a remote page
    pub title: String,
    /// Tag-stripped text with whitespace runs collapsed to line breaks
    pub preview: String,
    /// Ranked tokens, up to the cap; the shell slices its top-N from this
    pub ranked: Vec<TokenCount>,
    /// Absolute image URLs in document order (remote pages only)
    pub images: Vec<String>,
}

/// Load a document from any of the three origins.
pub fn load_source(request: &SourceRequest) -> Result<Document, SourceError> {
    match request {
        SourceRequest::RemoteUrl(url) => {
            let result = fetch_url(url).map_err(|e| SourceError {
                message: e.message,
                phase: "fetch",
            })?;
            log::info!("fetched {} (HTTP {})", result.url, result.status);
            Ok(process_html(&result.html, &result.url, result.status))
        }
        SourceRequest::LocalPath(path) => {
            let text = fs::read_to_string(path).map_err(|e| SourceError {
                message: format!("{}: {}", path.display(), e),
                phase: "file",
            })?;
            log::info!("read {} ({} bytes)", path.display(), text.len());
            Ok(Document {
                text,
                markup: None,
                fetch_status: None,
            })
        }
        SourceRequest::Upload { name, bytes } => {
            let text = String::from_utf8(bytes.clone()).map_err(|e| SourceError {
                message: format!("{}: {}", name, e),
                phase: "decode",
            })?;
            log::info!("decoded upload {} ({} bytes)", name, text.len());
            Ok(Document {
                text,
                markup: None,
                fetch_status: None,
            })
        }
    }
}

/// Build a Document from raw HTML (also the network-free test entry point).
pub fn process_html(html: &str, url: &str, status: u16) -> Document {
    let tree = parse_html(html, url);
    Document {
        text: tree.body_text(),
        markup: Some(tree),
        fetch_status: Some(status),
    }
}

/// Derive preview, ranking, and image references from a loaded document.
pub fn analyze(document: &Document) -> Analysis {
    let preview = collapse_whitespace(&preview_clean(&document.text));
    let ranked = top_words(&document.text, MAX_TOP_WORDS);
    let (title, images) = match &document.markup {
        Some(tree) => (
            tree.title.clone(),
            extract_images(&tree.root, &tree.url),
        ),
        None => (String::new(), Vec::new()),
    };
    Analysis {
        title,
        preview,
        ranked,
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html>
        <head><title>Fruit News</title></head>
        <body>
            <h1>apple apple banana</h1>
            <p>apple banana cherry</p>
            <img src="img/a.png">
            <img src="/img/b.png">
        </body>
    </html>
    "#;

    #[test]
    fn html_pipeline_end_to_end() {
        let doc = process_html(PAGE, "https://x.com/p/", 200);
        assert_eq!(doc.fetch_status, Some(200));

        let analysis = analyze(&doc);
        assert_eq!(analysis.title, "Fruit News");
        assert_eq!(analysis.ranked[0].token, "apple");
        assert_eq!(analysis.ranked[0].count, 3);
        assert_eq!(analysis.ranked[1].token, "banana");
        assert_eq!(analysis.ranked[1].count, 2);
        assert_eq!(
            analysis.images,
            vec!["https://x.com/p/img/a.png", "https://x.com/img/b.png"]
        );
        assert!(!analysis.preview.contains('<'));
    }

    #[test]
    fn preview_collapses_whitespace_to_line_breaks() {
        let doc = Document {
            text: "one   two\t\tthree".to_string(),
            markup: None,
            fetch_status: None,
        };
        assert_eq!(analyze(&doc).preview, "one\ntwo\nthree");
    }

    #[test]
    fn local_file_roundtrip() {
        let path = std::env::temp_dir().join("wordlens_pipeline_test.txt");
        fs::write(&path, "hello hello world").unwrap();

        let doc = load_source(&SourceRequest::LocalPath(path.clone())).unwrap();
        let analysis = analyze(&doc);
        assert_eq!(analysis.ranked[0].token, "hello");
        assert_eq!(analysis.ranked[0].count, 2);
        assert!(analysis.images.is_empty());

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_recoverable_error() {
        let err = load_source(&SourceRequest::LocalPath(PathBuf::from(
            "/definitely/not/here.txt",
        )))
        .unwrap_err();
        assert_eq!(err.phase, "file");
    }

    #[test]
    fn invalid_upload_reports_decode_phase() {
        let err = load_source(&SourceRequest::Upload {
            name: "bad.bin".to_string(),
            bytes: vec![0xff, 0xfe, 0x00],
        })
        .unwrap_err();
        assert_eq!(err.phase, "decode");
    }

    #[test]
    fn upload_decodes_utf8() {
        let doc = load_source(&SourceRequest::Upload {
            name: "note.txt".to_string(),
            bytes: "你好 你好 世界".as_bytes().to_vec(),
        })
        .unwrap();
        let analysis = analyze(&doc);
        assert_eq!(analysis.ranked[0].token, "你好");
        assert_eq!(analysis.ranked[0].count, 2);
    }
}
