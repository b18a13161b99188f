//! File extension → language classification.

use crate::core::state::LanguageStat;
use std::collections::HashMap;
use std::path::Path;

const EXTENSIONS: &[(&str, &str)] = &[
    ("go", "Go"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("mjs", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("py", "Python"),
    ("html", "HTML"),
    ("htm", "HTML"),
    ("css", "CSS"),
    ("scss", "CSS"),
    ("md", "Markdown"),
    ("yml", "YAML"),
    ("yaml", "YAML"),
    ("json", "JSON"),
    ("toml", "TOML"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("hpp", "C++"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("rs", "Rust"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("cs", "C#"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("sql", "SQL"),
];

/// Language for a path, by lowercase extension. `None` for unclassified files.
pub fn classify(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, language)| *language)
}

/// Tally classified paths into percentages over classified files only.
/// Sorted by file count descending, then by name.
pub fn tally<'a, I>(paths: I) -> Vec<LanguageStat>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for path in paths {
        if let Some(language) = classify(path) {
            *counts.entry(language).or_default() += 1;
        }
    }

    let classified: usize = counts.values().sum();
    let mut stats: Vec<LanguageStat> = counts
        .into_iter()
        .map(|(name, files)| LanguageStat {
            name: name.to_string(),
            files,
            percentage: files as f64 * 100.0 / classified as f64,
        })
        .collect();

    stats.sort_by(|a, b| b.files.cmp(&a.files).then_with(|| a.name.cmp(&b.name)));
    stats
}
