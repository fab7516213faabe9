use crate::error::SnitchError;
use regex::Regex;
use std::cmp::Ordering;
use std::fs::read_dir;
use std::path::{Path, PathBuf};

/// Comparator deciding which folder or file name is the most recent one.
pub type NameOrder = fn(&str, &str) -> Ordering;

/// Snapshot producers name batches so that plain string order is chronological.
pub fn lexicographic(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Predicate selecting snapshot files inside a date folder.
pub trait NameFilter {
    fn accepts(&self, name: &str) -> bool;
}

/// `*.json` files, optionally restricted to a name prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFiles {
    pub prefix: Option<String>,
}

impl JsonFiles {
    pub fn with_prefix(prefix: &str) -> Self {
        JsonFiles {
            prefix: Some(prefix.to_string()),
        }
    }
}

impl NameFilter for JsonFiles {
    fn accepts(&self, name: &str) -> bool {
        name.ends_with(".json")
            && self
                .prefix
                .as_deref()
                .map_or(true, |prefix| name.starts_with(prefix))
    }
}

#[derive(Debug, Clone)]
pub struct PatternFilter(pub Regex);

impl NameFilter for PatternFilter {
    fn accepts(&self, name: &str) -> bool {
        self.0.is_match(name)
    }
}

/// Filter chosen by configuration.
#[derive(Debug, Clone)]
pub enum SnapshotFilter {
    Json(JsonFiles),
    Pattern(PatternFilter),
}

impl NameFilter for SnapshotFilter {
    fn accepts(&self, name: &str) -> bool {
        match self {
            SnapshotFilter::Json(filter) => filter.accepts(name),
            SnapshotFilter::Pattern(filter) => filter.accepts(name),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryType {
    Dir,
    File,
}

/// Finds the latest snapshot laid out as `root/<date folder>/<file>`.
///
/// Only the latest date folder is searched. If it holds no accepted file the
/// lookup fails, older folders are never consulted.
#[derive(Clone)]
pub struct SnapshotLocator<F> {
    filter: F,
    order: NameOrder,
}

impl<F: NameFilter> SnapshotLocator<F> {
    pub fn new(filter: F) -> Self {
        SnapshotLocator {
            filter,
            order: lexicographic,
        }
    }

    pub fn with_order(mut self, order: NameOrder) -> Self {
        self.order = order;
        self
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn locate(&self, root: &Path) -> Result<PathBuf, SnitchError> {
        let folders = list_names(root, EntryType::Dir, |_| true)?;
        let folder = self.latest(folders).ok_or_else(|| {
            SnitchError::NotFound(format!("no date folder in {}", root.display()))
        })?;
        let folder_path = root.join(&folder);
        let files = list_names(&folder_path, EntryType::File, |name| {
            self.filter.accepts(name)
        })?;
        let file = self.latest(files).ok_or_else(|| {
            SnitchError::NotFound(format!(
                "no matching snapshot in {}",
                folder_path.display()
            ))
        })?;
        debug!("Latest snapshot: {}/{}", folder_path.display(), file);
        Ok(folder_path.join(file))
    }

    /// Sorts by name first so ties under `order` don't depend on listing order.
    fn latest(&self, mut names: Vec<String>) -> Option<String> {
        names.sort();
        names.sort_by(|a, b| (self.order)(a, b));
        names.pop()
    }
}

/// Shorthand for a locator with the default ordering.
pub fn locate<F: NameFilter>(root: &Path, filter: F) -> Result<PathBuf, SnitchError> {
    SnapshotLocator::new(filter).locate(root)
}

fn list_names(
    dirname: &Path,
    entry_type: EntryType,
    accept: impl Fn(&str) -> bool,
) -> Result<Vec<String>, SnitchError> {
    if dirname.exists() && !dirname.is_dir() {
        return Err(SnitchError::NotFound(format!(
            "{} is not a directory",
            dirname.display()
        )));
    }
    let entries = match read_dir(dirname) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SnitchError::NotFound(format!(
                "{} does not exist",
                dirname.display()
            )))
        }
        Err(e) => return Err(e.into()),
    };
    let mut names = vec![];
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let matches_type = match entry_type {
            EntryType::Dir => path.is_dir(),
            EntryType::File => path.is_file(),
        };
        if !matches_type {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                if accept(&name) {
                    names.push(name)
                }
            }
            Err(name) => warn!("Skipping non UTF-8 entry {:?} in {}", name, dirname.display()),
        }
    }
    Ok(names)
}
