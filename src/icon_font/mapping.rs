//! Code point assignment for a directory of icons
//!
//! File names of the form `<name>-x<hex>.svg` pin an icon to a code point.
//! Every other `.svg` file gets the lowest free code point from the Private
//! Use Area. Explicit code points are claimed first, so auto allocation never
//! takes a code point that a later file asks for.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, info};

use crate::core::errors::{Error, Result};
use crate::font_source::codepoint::{from_hex, to_hex, PRIVATE_USE_START};

static ICON_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*)-x([0-9a-f]{2,6})\.svg$").expect("icon file name pattern is valid")
});

/// Where a glyph came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    /// Full path of the source file
    pub path: PathBuf,
    /// Lowercased icon name, without code point suffix and extension
    pub name: String,
    /// Whether the code point was allocated rather than read from the name
    pub allocated: bool,
}

impl IconSource {
    /// File name used in error messages
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Code point to source file mapping, in assignment order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconMapping {
    entries: IndexMap<char, IconSource>,
}

impl IconMapping {
    /// Assign code points to the given file names inside `dir`
    ///
    /// Names not ending in `.svg` are ignored. Two files naming the same code
    /// point fail with [`Error::DuplicateGlyph`].
    pub fn from_file_names<S: AsRef<str>>(dir: &Path, file_names: &[S]) -> Result<Self> {
        let svg_names: Vec<&str> = file_names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| is_svg_file_name(name))
            .collect();
        let mut mapping = Self::default();

        for file_name in &svg_names {
            let Some(captures) = ICON_FILE_NAME.captures(file_name) else {
                continue;
            };
            let name = captures[1].to_lowercase();
            let codepoint = from_hex(&captures[2]).map_err(|err| err.in_file(*file_name))?;
            if mapping.entries.contains_key(&codepoint) {
                return Err(Error::DuplicateGlyph {
                    codepoint: codepoint as u32,
                    name,
                });
            }
            mapping.entries.insert(
                codepoint,
                IconSource {
                    path: dir.join(file_name),
                    name,
                    allocated: false,
                },
            );
        }

        let mut next = PRIVATE_USE_START;
        for file_name in &svg_names {
            if ICON_FILE_NAME.is_match(file_name) {
                continue;
            }
            let name = file_name[..file_name.len() - ".svg".len()].to_lowercase();
            let codepoint = mapping.lowest_free(&mut next)?;
            debug!("Allocated U+{} for {}", to_hex(codepoint), file_name);
            mapping.entries.insert(
                codepoint,
                IconSource {
                    path: dir.join(file_name),
                    name,
                    allocated: true,
                },
            );
        }

        Ok(mapping)
    }

    /// Lowest unclaimed code point at or above `next`
    fn lowest_free(&self, next: &mut u32) -> Result<char> {
        loop {
            let candidate = char::from_u32(*next).ok_or_else(|| {
                Error::MalformedInput("ran out of code points to allocate".to_string())
            })?;
            *next += 1;
            if !self.entries.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Rename allocated icons to `<name>-x<hex>.svg` so the next run keeps
    /// their code points
    ///
    /// An existing file at the target name is never overwritten.
    pub fn rename_allocated(&mut self) -> Result<()> {
        for (codepoint, source) in self.entries.iter_mut().filter(|(_, s)| s.allocated) {
            let target = source
                .path
                .with_file_name(format!("{}-x{}.svg", source.name, to_hex(*codepoint)));
            if target.exists() {
                return Err(Error::io(
                    &target,
                    std::io::Error::new(std::io::ErrorKind::AlreadyExists, "refusing to overwrite"),
                ));
            }
            fs::rename(&source.path, &target).map_err(|err| Error::io(&source.path, err))?;
            info!("Renamed {} to {}", source.path.display(), target.display());
            source.path = target;
            source.allocated = false;
        }
        Ok(())
    }

    pub fn get(&self, codepoint: char) -> Option<&IconSource> {
        self.entries.get(&codepoint)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &IconSource)> {
        self.entries.iter().map(|(codepoint, source)| (*codepoint, source))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_svg_file_name(name: &str) -> bool {
    name.len() > 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|extension| extension.eq_ignore_ascii_case(".svg"))
}

/// Names of the `.svg` files in `dir`, sorted
pub fn scan_directory(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|err| Error::io(dir, err))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::io(dir, err))?;
        let is_file = entry
            .file_type()
            .map_err(|err| Error::io(entry.path(), err))?
            .is_file();
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_file && is_svg_file_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codepoints(mapping: &IconMapping) -> Vec<(u32, String)> {
        mapping
            .iter()
            .map(|(codepoint, source)| (codepoint as u32, source.name.clone()))
            .collect()
    }

    #[test]
    fn explicit_codepoints_are_claimed_first() {
        let mapping = IconMapping::from_file_names(Path::new("icons"), &["a-xe001.svg", "b.svg"]).unwrap();
        assert_eq!(
            codepoints(&mapping),
            vec![(0xe001, "a".to_string()), (0xe000, "b".to_string())]
        );
        assert!(mapping.get('\u{e000}').unwrap().allocated);
        assert_eq!(mapping.get('\u{e001}').unwrap().path, Path::new("icons/a-xe001.svg"));
    }

    #[test]
    fn allocation_skips_claimed_codepoints() {
        let names = ["c.svg", "d.svg", "x-xE000.SVG", "y-xe002.svg"];
        let mapping = IconMapping::from_file_names(Path::new("."), &names).unwrap();
        assert_eq!(
            codepoints(&mapping),
            vec![
                (0xe000, "x".to_string()),
                (0xe002, "y".to_string()),
                (0xe001, "c".to_string()),
                (0xe003, "d".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_codepoints_fail() {
        let names = ["x-xe010.svg", "other-xE010.svg"];
        let err = IconMapping::from_file_names(Path::new("."), &names).unwrap_err();
        assert!(matches!(err, Error::DuplicateGlyph { codepoint: 0xe010, .. }));
    }

    #[test]
    fn non_svg_files_are_ignored() {
        let names = ["readme.txt", ".svg", "Logo.SVG"];
        let mapping = IconMapping::from_file_names(Path::new("."), &names).unwrap();
        assert_eq!(codepoints(&mapping), vec![(0xe000, "logo".to_string())]);
    }

    #[test]
    fn invalid_scalar_is_malformed() {
        let err = IconMapping::from_file_names(Path::new("."), &["bad-xd800.svg"]).unwrap_err();
        assert!(matches!(err.root(), Error::MalformedInput(_)));
    }

    #[test]
    fn rename_embeds_codepoint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Star.svg"), "<svg/>").unwrap();
        let names = scan_directory(dir.path()).unwrap();
        let mut mapping = IconMapping::from_file_names(dir.path(), &names).unwrap();
        mapping.rename_allocated().unwrap();

        assert!(dir.path().join("star-xe000.svg").exists());
        assert!(!dir.path().join("Star.svg").exists());
        let source = mapping.get('\u{e000}').unwrap();
        assert_eq!(source.path, dir.path().join("star-xe000.svg"));

        let rescanned = scan_directory(dir.path()).unwrap();
        let again = IconMapping::from_file_names(dir.path(), &rescanned).unwrap();
        assert!(!again.get('\u{e000}').unwrap().allocated);
    }
}
