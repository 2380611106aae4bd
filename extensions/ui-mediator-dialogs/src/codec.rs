//! Display encoding of filesystem paths
//!
//! List controls only carry strings, so directories and files are shown as a
//! glyph tag followed by a payload. Directories display their parent with
//! the leading separator removed (`📁 home/user`); files display their base
//! name (`📄 notes.txt`). Decoding puts the separator back.

use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Tag glyph marking an encoded path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Directory entry
    Directory,
    /// File entry
    File,
}

impl Icon {
    /// Tag prefix including its trailing space.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Directory => "\u{1F4C1} ",
            Self::File => "\u{1F4C4} ",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Reversible `path <-> display string` encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathCodec;

impl PathCodec {
    /// Encode `path` under `icon`. Expects an absolute path.
    pub fn encode(icon: Icon, path: &Path) -> String {
        match icon {
            Icon::Directory => {
                // Root and its direct children display themselves
                let shown = match path.parent() {
                    Some(parent) if parent.parent().is_some() => parent,
                    _ => path,
                };
                let text = shown.to_string_lossy();
                let payload = text.strip_prefix(MAIN_SEPARATOR).unwrap_or(&*text);
                format!("{icon}{payload}")
            }
            Icon::File => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                format!("{icon}{name}")
            }
        }
    }

    /// Encode a directory entry.
    pub fn encode_dir(path: &Path) -> String {
        Self::encode(Icon::Directory, path)
    }

    /// Encode a file entry.
    pub fn encode_file(path: &Path) -> String {
        Self::encode(Icon::File, path)
    }

    /// Which tag `text` carries, if any.
    pub fn icon_of(text: &str) -> Option<Icon> {
        [Icon::Directory, Icon::File]
            .into_iter()
            .find(|icon| text.starts_with(icon.prefix()))
    }

    /// Strip the tag. Untagged text (such as a placeholder) comes back unchanged.
    pub fn decode(text: &str) -> String {
        if let Some(rest) = text.strip_prefix(Icon::Directory.prefix()) {
            return format!("{MAIN_SEPARATOR}{rest}");
        }
        text.strip_prefix(Icon::File.prefix())
            .unwrap_or(text)
            .to_owned()
    }

    /// [`PathCodec::decode`] as a path.
    pub fn decode_path(text: &str) -> PathBuf {
        PathBuf::from(Self::decode(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(unix)]
    #[test]
    fn directory_shows_parent_without_leading_separator() {
        assert_eq!(
            PathCodec::encode_dir(Path::new("/home/user/data")),
            "\u{1F4C1} home/user"
        );
        assert_eq!(
            PathCodec::decode("\u{1F4C1} home/user"),
            "/home/user".to_string()
        );
    }

    #[cfg(unix)]
    #[test]
    fn root_and_its_children_encode_themselves() {
        let root = PathCodec::encode_dir(Path::new("/"));
        assert_eq!(root, "\u{1F4C1} ");
        assert_eq!(PathCodec::decode_path(&root), PathBuf::from("/"));
        assert_eq!(PathCodec::encode_dir(Path::new("/home")), "\u{1F4C1} home");
    }

    #[test]
    fn files_keep_only_their_name() {
        let encoded = PathCodec::encode_file(Path::new("/srv/docs/a.txt"));
        assert_eq!(encoded, "\u{1F4C4} a.txt");
        assert_eq!(PathCodec::icon_of(&encoded), Some(Icon::File));
        assert_eq!(PathCodec::decode(&encoded), "a.txt");
    }

    #[test]
    fn untagged_text_decodes_to_itself() {
        assert_eq!(PathCodec::decode("..."), "...");
        assert_eq!(PathCodec::icon_of("..."), None);
    }

    #[test]
    fn real_paths_round_trip_to_the_same_kind() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested");
        std::fs::create_dir(&dir).unwrap();
        let file = dir.join("a.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(PathCodec::decode_path(&PathCodec::encode_dir(&dir)).is_dir());
        let name = PathCodec::decode(&PathCodec::encode_file(&file));
        assert!(dir.join(name).is_file());
    }
}
