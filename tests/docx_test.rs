//! Package-level tests: a full `.docx` bundle in, a corrected bundle out.

use std::io::{Cursor, Read, Write};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use docfix::{
    Corrector, DictionaryResolver, Error, flagged_words_in_package, output_file_name,
};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;

const DOCUMENT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    r#"<w:p><w:r><w:t xml:space="preserve">Please </w:t></w:r>"#,
    r#"<w:proofErr w:type="spellStart"/><w:r><w:t>recieve</w:t></w:r><w:proofErr w:type="spellEnd"/>"#,
    r#"<w:r><w:t xml:space="preserve"> the </w:t></w:r>"#,
    r#"<w:proofErr w:type="spellStart"/><w:r><w:t>pakage</w:t></w:r><w:proofErr w:type="spellEnd"/>"#,
    r#"</w:p></w:body></w:document>"#,
);

fn bundle(document: &str) -> Vec<u8> {
    bundle_bytes(document.as_bytes())
}

fn bundle_bytes(document: &[u8]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", stored).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("word/document.xml", deflated).unwrap();
    zip.write_all(document).unwrap();
    zip.start_file("word/styles.xml", deflated).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();

    zip.finish().unwrap().into_inner()
}

fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

fn read_entry_bytes(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    file.read_to_end(&mut content).unwrap();
    content
}

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn resolver() -> DictionaryResolver {
    DictionaryResolver::new()
        .with_entry("recieve", "receive")
        .with_entry("pakage", "package")
}

#[tokio::test]
async fn test_correct_package() {
    let input = bundle(DOCUMENT);
    let corrected = Corrector::new(resolver())
        .correct_package(&input)
        .await
        .unwrap();

    let document = read_entry(&corrected.bytes, "word/document.xml");
    assert!(document.contains("<w:t>receive</w:t>"));
    assert!(document.contains("<w:t>package</w:t>"));
    assert!(!document.contains("w:proofErr"));
    assert!(document.contains(r#"<w:t xml:space="preserve">Please </w:t>"#));

    assert_eq!(corrected.summary.words_replaced, 2);
    assert_eq!(corrected.summary.markers_removed, 4);
    let words: Vec<_> = corrected.corrections.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, vec!["recieve", "pakage"]);
}

#[tokio::test]
async fn test_other_parts_are_carried_over() {
    let input = bundle(DOCUMENT);
    let corrected = Corrector::new(resolver())
        .correct_package(&input)
        .await
        .unwrap();

    assert_eq!(entry_names(&corrected.bytes), entry_names(&input));
    assert_eq!(read_entry(&corrected.bytes, "word/styles.xml"), STYLES);
    assert_eq!(
        read_entry(&corrected.bytes, "[Content_Types].xml"),
        CONTENT_TYPES
    );
}

#[tokio::test]
async fn test_package_without_markers_keeps_document() {
    let document = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document><w:body><w:p><w:r><w:t>Clean text.</w:t></w:r></w:p></w:body></w:document>"#,
    );
    let corrected = Corrector::new(resolver())
        .correct_package(&bundle(document))
        .await
        .unwrap();

    assert_eq!(read_entry(&corrected.bytes, "word/document.xml"), document);
    assert!(corrected.corrections.is_empty());
}

#[tokio::test]
async fn test_package_errors() {
    let corrector = Corrector::new(resolver());

    let err = corrector.correct_package(b"").await.unwrap_err();
    assert!(matches!(err, Error::MissingDocument));
    assert_eq!(err.user_message(), "No file was provided.");

    let err = corrector.correct_package(b"not a zip").await.unwrap_err();
    assert!(matches!(err, Error::Packaging(_)));
    assert_eq!(err.user_message(), "Failed to read or update the docx file.");

    let err = corrector
        .correct_package(&bundle("<w:document><w:body>"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedDocument(_)));

    let err = Corrector::new(resolver())
        .with_max_document_bytes(64)
        .correct_package(&bundle(DOCUMENT))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DocumentTooLarge { limit: 64, .. }));
    assert_eq!(err.user_message(), "The file is too large.");
}

#[tokio::test]
async fn test_latin1_document_keeps_its_encoding() {
    let document = concat!(
        r#"<?xml version="1.0" encoding="ISO-8859-1" standalone="yes"?>"#,
        r#"<w:document><w:body><w:p>"#,
        "<w:r><w:t xml:space=\"preserve\">caf\u{E9} </w:t></w:r>",
        r#"<w:proofErr w:type="spellStart"/><w:r><w:t>creme</w:t></w:r><w:proofErr w:type="spellEnd"/>"#,
        r#"</w:p></w:body></w:document>"#,
    );
    let (latin1, _, _) = encoding_rs::WINDOWS_1252.encode(document);
    assert!(std::str::from_utf8(&latin1).is_err());

    let corrected = Corrector::new(DictionaryResolver::new().with_entry("creme", "cr\u{E8}me"))
        .correct_package(&bundle_bytes(&latin1))
        .await
        .unwrap();

    let written = read_entry_bytes(&corrected.bytes, "word/document.xml");
    assert!(written.starts_with(br#"<?xml version="1.0" encoding="ISO-8859-1" standalone="yes"?>"#));
    assert!(std::str::from_utf8(&written).is_err());

    let (decoded, _, malformed) = encoding_rs::WINDOWS_1252.decode(&written);
    assert!(!malformed);
    assert!(decoded.contains("<w:t xml:space=\"preserve\">caf\u{E9} </w:t>"));
    assert!(decoded.contains("<w:t>cr\u{E8}me</w:t>"));
    assert!(!decoded.contains("w:proofErr"));
}

#[test]
fn test_flagged_words_in_package() {
    let words = flagged_words_in_package(&bundle(DOCUMENT), 1024 * 1024).unwrap();
    assert_eq!(words, vec!["recieve", "pakage"]);
}

#[tokio::test]
async fn test_output_written_under_unique_name() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("letter.docx");
    std::fs::write(&input_path, bundle(DOCUMENT)).unwrap();

    let input = std::fs::read(&input_path).unwrap();
    let corrected = Corrector::new(resolver())
        .correct_package(&input)
        .await
        .unwrap();

    let first = dir.path().join(output_file_name(&input_path));
    let second = dir.path().join(output_file_name(&input_path));
    assert_ne!(first, second);

    std::fs::write(&first, &corrected.bytes).unwrap();
    let name = first.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with(".letter.docx"));
    assert!(read_entry(&std::fs::read(&first).unwrap(), "word/document.xml").contains("receive"));
}
