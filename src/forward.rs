use std::ffi::{OsStr, OsString};
use std::fmt;

/// Flag the main application reads its startup file from.
pub const FILE_FLAG: &str = "--file";

/// `--file <path>` as discrete argv entries after argv[0]; never quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgvArgs(pub Vec<OsString>);

impl ArgvArgs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArgvArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let parts: Vec<String> = self.0.iter().map(|a| format!("{a:?}")).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// `--file <path>` as one parameter string parsed by the shell; `None` when
/// nothing is forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(not(windows), allow(dead_code))]
pub struct CommandLineArgs(pub Option<OsString>);

#[cfg_attr(not(windows), allow(dead_code))]
impl CommandLineArgs {
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for CommandLineArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(line) => write!(f, "{}", line.to_string_lossy()),
            None => write!(f, "(none)"),
        }
    }
}

/// Pick the single path to forward from the launcher's own arguments
/// (program name already skipped). Anything after the first is ignored.
pub fn forwarded_path<I>(args: I) -> Option<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter().next()
}

/// `--file <path>` as two argv entries.
pub fn argv_args(path: Option<&OsStr>) -> ArgvArgs {
    let args = match path {
        Some(p) => vec![OsString::from(FILE_FLAG), p.to_os_string()],
        None => Vec::new(),
    };
    ArgvArgs(args)
}

/// `--file <path>` as one shell parameter string; the path is wrapped in
/// double quotes only when it contains a space.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn command_line_args(path: Option<&OsStr>) -> CommandLineArgs {
    let line = path.map(|p| {
        let mut line = OsString::from(FILE_FLAG);
        line.push(" ");
        if p.as_encoded_bytes().contains(&b' ') {
            line.push("\"");
            line.push(p);
            line.push("\"");
        } else {
            line.push(p);
        }
        line
    });
    CommandLineArgs(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(v: &[&str]) -> Vec<OsString> {
        v.iter().map(OsString::from).collect()
    }

    #[test]
    fn only_first_argument_is_forwarded() {
        let path = forwarded_path(os(&["/tmp/a.txt", "/tmp/b.txt", "--lang"]));
        assert_eq!(path, Some(OsString::from("/tmp/a.txt")));
    }

    #[test]
    fn no_arguments_forwards_nothing() {
        assert_eq!(forwarded_path(os(&[])), None);
        assert!(argv_args(None).is_empty());
        assert!(command_line_args(None).is_empty());
    }

    #[test]
    fn argv_form_is_flag_then_path_unquoted() {
        let args = argv_args(Some(OsStr::new("/tmp/my file.txt")));
        assert_eq!(args, ArgvArgs(os(&["--file", "/tmp/my file.txt"])));
    }

    #[test]
    fn command_line_quotes_paths_with_spaces() {
        let args = command_line_args(Some(OsStr::new(r"C:\Users\ana\My Docs\f.txt")));
        assert_eq!(
            args,
            CommandLineArgs(Some(OsString::from(
                r#"--file "C:\Users\ana\My Docs\f.txt""#
            )))
        );
    }

    #[test]
    fn command_line_leaves_plain_paths_bare() {
        let args = command_line_args(Some(OsStr::new(r"C:\data\f.txt")));
        assert_eq!(
            args,
            CommandLineArgs(Some(OsString::from(r"--file C:\data\f.txt")))
        );
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(argv_args(Some(OsStr::new("/tmp/f.txt"))).to_string(), r#"["--file", "/tmp/f.txt"]"#);
        assert_eq!(command_line_args(None).to_string(), "(none)");
    }
}
