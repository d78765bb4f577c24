//! Path syntax validation, decomposition, and extension classification.
//!
//! Paths handled by this crate use `/` as their canonical separator,
//! regardless of platform. A path is syntactically valid when the whole
//! string stays within [`MAX_PATH_LENGTH`] and every segment between
//! separators stays within [`MAX_SEGMENT_LENGTH`] and contains none of the
//! reserved characters (`\ : * ? " < > |`).

/// Maximum length of a whole path, in characters.
pub const MAX_PATH_LENGTH: usize = 260;

/// Maximum length of a single path segment, in characters.
pub const MAX_SEGMENT_LENGTH: usize = 255;

/// Classification of a path by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Extension is in the recognized text set; content is decoded text.
    Text,
    /// Extension is in the recognized binary set; content is opaque bytes.
    Binary,
    /// Extension is in neither set; not writable through the access layer.
    Unrecognized,
}

/// Check a path against the syntactic constraints.
///
/// Syntax only; a valid path may still carry an unrecognized extension.
pub fn is_valid_path(path: &str) -> bool {
    if path.chars().count() > MAX_PATH_LENGTH {
        return false;
    }
    path.split('/').all(is_valid_segment)
}

/// Check that a path is syntactically valid AND ends in a recognized
/// (text or binary) extension. This is the gate for writes.
pub fn is_valid_file_path(path: &str) -> bool {
    is_valid_path(path) && classify(path) != FileKind::Unrecognized
}

fn is_valid_segment(segment: &str) -> bool {
    segment.chars().count() <= MAX_SEGMENT_LENGTH
        && !segment
            .chars()
            .any(|c| matches!(c, '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
}

/// The directory portion of a path: everything before the last separator.
///
/// A bare name has no separator; its directory is the root, spelled `""`.
///
/// ```
/// # use atelier_store::path::directory_of;
/// assert_eq!(directory_of("folder/sub-folder/image.png"), "folder/sub-folder");
/// assert_eq!(directory_of("image.png"), "");
/// ```
pub fn directory_of(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// The name portion of a path: everything after the last separator.
pub fn file_name_of(path: &str) -> &str {
    path.rfind('/').map_or(path, |idx| &path[idx + 1..])
}

/// The extension of the file name: everything after the last `.` in the
/// last segment, or `""` when the name has no dot.
pub fn extension_of(path: &str) -> &str {
    let name = file_name_of(path);
    name.rfind('.').map_or("", |idx| &name[idx + 1..])
}

/// Join a directory path and an entry name with the canonical separator.
pub fn join(directory_path: &str, name: &str) -> String {
    let directory_path = directory_path.trim_end_matches('/');
    if directory_path.is_empty() {
        name.to_string()
    } else {
        format!("{directory_path}/{name}")
    }
}

/// Classify a path by extension membership in the static tables.
pub fn classify(path: &str) -> FileKind {
    let extension = extension_of(path);
    if TEXT_EXTENSIONS.contains(&extension) {
        FileKind::Text
    } else if BINARY_EXTENSIONS.contains(&extension) {
        FileKind::Binary
    } else {
        FileKind::Unrecognized
    }
}

/// Extensions read and written as decoded text.
///
/// Disjoint from [`BINARY_EXTENSIONS`]; office formats that are containers
/// on disk (`doc`, `docx`, `odt`) are classified binary.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "html", "css", "js", "json", "xml", "csv", "log", "rtf", "ini", "conf", "yaml",
    "yml", "tex", "wpd", "bat", "sh", "py", "java", "cpp", "c", "php", "asp", "jsp", "pl", "rb",
    "swift", "go", "rs", "ts", "jsx", "tsx", "scss", "less", "coffee", "haml", "jade", "pug",
    "ejs", "mustache", "hbs", "twig", "liquid", "erb", "rhtml", "aspx", "cshtml", "vbhtml",
    "jspf", "jspx", "php3", "php4", "php5", "phtml", "cfm", "cfml", "dtd", "xsd", "xsl", "xslt",
    "xquery", "xq", "xql", "xqm", "xqy", "xpl", "xproc", "xbl", "rng", "rnc", "sch", "nvdl",
    "wsdl", "soap", "jsonld", "geojson", "topojson", "ndjson", "json5", "hjson", "cson", "bson",
    "ion", "ubjson", "smile", "cbor", "msgpack", "hocon", "properties", "env", "dotenv", "cfg",
    "cnf", "config", "rc", "dot", "gv", "plantuml", "puml", "iuml", "wsd", "mscgen", "msgenny",
    "blockdiag", "seqdiag", "actdiag", "nwdiag", "packetdiag", "rackdiag", "c4", "c4model",
    "c4plantuml", "c4puml", "c4iuml", "c4wsd", "c4mscgen", "c4msgenny", "c4blockdiag",
    "c4seqdiag", "c4actdiag", "c4nwdiag", "c4packetdiag", "c4rackdiag", "c4dot", "c4gv",
];

/// Extensions read and written as opaque bytes.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "psd", "mp4", "mkv", "avi", "mov", "mpg", "vob",
    "mp3", "aac", "wav", "flac", "ogg", "mka", "wma", "pdf", "doc", "xls", "ppt", "docx", "xlsx",
    "pptx", "odt", "zip", "rar", "7z", "tar", "iso", "mdb", "accde", "frm", "sqlite", "exe",
    "dll", "so", "class",
];
