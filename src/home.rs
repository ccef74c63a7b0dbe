use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// The user's home directory, passed explicitly to everything that expands
/// or abbreviates paths. An empty value disables both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Home(String);

impl Home {
    pub fn new(dir: impl Into<String>) -> Self {
        Self(dir.into())
    }

    pub fn from_env() -> Self {
        dirs::home_dir()
            .map(|dir| Self(dir.to_string_lossy().into_owned()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces a leading `~` component with the home directory.
    pub fn expand(&self, path: &Path) -> PathBuf {
        if self.is_empty() {
            return path.to_path_buf();
        }
        match path.strip_prefix("~") {
            Ok(rest) if rest.as_os_str().is_empty() => PathBuf::from(&self.0),
            Ok(rest) => Path::new(&self.0).join(rest),
            Err(_) => path.to_path_buf(),
        }
    }
}

/// A path representation that can be abbreviated without changing its kind.
pub trait HomeRelative: Sized {
    fn to_text(&self) -> Cow<'_, str>;
    fn from_text(text: String) -> Self;
}

impl HomeRelative for String {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn from_text(text: String) -> Self {
        text
    }
}

impl HomeRelative for PathBuf {
    fn to_text(&self) -> Cow<'_, str> {
        self.to_string_lossy()
    }

    fn from_text(text: String) -> Self {
        PathBuf::from(text)
    }
}

/// Abbreviates a path under `home` to `~`. The prefix test is textual, and
/// only the first occurrence of the home string is replaced. Paths outside
/// `home` are handed back untouched.
pub fn unexpand_home<P: HomeRelative>(path: P, home: &Home) -> P {
    let abbreviated = {
        let text = path.to_text();
        if home.is_empty() || !text.starts_with(home.as_str()) {
            None
        } else {
            Some(text.replacen(home.as_str(), "~", 1))
        }
    };

    match abbreviated {
        Some(text) => P::from_text(text),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nika() -> Home {
        Home::new("/home/nika")
    }

    #[test]
    fn abbreviates_strings_under_home() {
        let out = unexpand_home("/home/nika/Desktop".to_string(), &nika());
        assert_eq!(out, "~/Desktop");
    }

    #[test]
    fn leaves_strings_outside_home() {
        let out = unexpand_home("/home/liza/Desktop".to_string(), &nika());
        assert_eq!(out, "/home/liza/Desktop");
    }

    #[test]
    fn abbreviates_paths_and_keeps_them_paths() {
        let out: PathBuf = unexpand_home(PathBuf::from("/home/nika/Desktop"), &nika());
        assert_eq!(out, PathBuf::from("~/Desktop"));
        assert_ne!(out, PathBuf::from("/home/nika/Desktop"));
    }

    #[test]
    fn leaves_paths_outside_home() {
        let out = unexpand_home(PathBuf::from("/home/liza/Desktop"), &nika());
        assert_eq!(out, PathBuf::from("/home/liza/Desktop"));
    }

    #[test]
    fn replaces_only_the_first_occurrence() {
        let out = unexpand_home("/home/nika/backup/home/nika".to_string(), &nika());
        assert_eq!(out, "~/backup/home/nika");
    }

    #[test]
    fn prefix_test_is_textual() {
        let out = unexpand_home("/home/nika2/pics".to_string(), &nika());
        assert_eq!(out, "~2/pics");
    }

    #[test]
    fn empty_home_disables_abbreviation() {
        let out = unexpand_home("/srv/pics".to_string(), &Home::default());
        assert_eq!(out, "/srv/pics");
    }

    #[test]
    fn expands_leading_tilde() {
        let home = nika();
        assert_eq!(
            home.expand(Path::new("~/Pictures/a.jpg")),
            PathBuf::from("/home/nika/Pictures/a.jpg")
        );
        assert_eq!(home.expand(Path::new("~")), PathBuf::from("/home/nika"));
        assert_eq!(
            home.expand(Path::new("/srv/~/a.jpg")),
            PathBuf::from("/srv/~/a.jpg")
        );
        assert_eq!(home.expand(Path::new("~liza/a")), PathBuf::from("~liza/a"));
    }

    proptest! {
        #[test]
        fn outside_home_is_identity(rest in "[a-z/]{0,20}") {
            let path = format!("/srv/{rest}");
            prop_assert_eq!(unexpand_home(path.clone(), &nika()), path);
        }

        #[test]
        fn under_home_gets_tilde_prefix(rest in "[a-z/]{0,20}") {
            let path = format!("/home/nika{rest}");
            prop_assert_eq!(unexpand_home(path, &nika()), format!("~{rest}"));
        }
    }
}
