/// Language name and the extensions (or exact file names) that identify it.
///
/// Order matters: the first language listing an extension wins.
pub static LANG_EXTENSIONS: &[(&str, &[&str])] = &[
    ("Java", &[".java"]),
    ("PHP", &[".php"]),
    ("Python", &[".py"]),
    ("Go", &[".go"]),
    ("JavaScript", &[".js", ".jsx", ".mjs", ".cjs", ".ejs"]),
    ("TypeScript", &[".ts", ".tsx"]),
    ("HTML", &[".html", ".htm"]),
    ("CSS", &[".css", ".scss", ".sass", ".less"]),
    ("Ruby", &[".rb"]),
    ("Shell", &[".sh", ".bash"]),
    ("Kotlin", &[".kt", ".kts"]),
    ("Swift", &[".swift"]),
    ("C/C++", &[".c", ".cpp", ".h", ".hpp"]),
    ("C#", &[".cs"]),
    ("Rust", &[".rs"]),
    ("Scala", &[".scala"]),
    ("SQL", &[".sql"]),
    ("XML", &[".xml"]),
    ("YAML", &[".yaml", ".yml"]),
    ("JSON", &[".json"]),
    ("Markdown", &[".md"]),
    ("Docker", &["dockerfile", ".dockerignore"]),
    ("Config", &[".conf", ".cfg", ".ini"]),
];

/// Fallback bucket for files no table entry claims.
pub const OTHER_LANGUAGE: &str = "Other";

/// Extension to language mapping used to pick endpoint patterns for a file.
pub static ENDPOINT_EXTENSIONS: &[(&str, &str)] = &[
    (".js", "JavaScript"),
    (".jsx", "JavaScript"),
    (".mjs", "JavaScript"),
    (".cjs", "JavaScript"),
    (".ts", "TypeScript"),
    (".tsx", "TypeScript"),
    (".py", "Python"),
    (".rb", "Ruby"),
    (".php", "PHP"),
    (".go", "Go"),
    (".java", "Java"),
    (".kt", "Kotlin"),
    (".cs", "C#"),
    (".rs", "Rust"),
];

/// Extensions scanned by source regex checks.
pub static SOURCE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".kt", ".php", ".cs", ".rb", ".go", ".rs",
];

/// Classifies a file by its lower-cased extension or file name.
pub fn language_for(extension: Option<&str>, file_name: &str) -> &'static str {
    let file_name = file_name.to_lowercase();
    for (language, markers) in LANG_EXTENSIONS {
        let hit = markers
            .iter()
            .any(|m| Some(*m) == extension || *m == file_name);
        if hit {
            return language;
        }
    }
    OTHER_LANGUAGE
}

/// Language whose endpoint patterns apply to files with `extension`.
pub fn endpoint_language(extension: &str) -> Option<&'static str> {
    ENDPOINT_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, lang)| *lang)
}
