use crate::ast;
use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes an (optional) path to the file the position refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos<P: AsRef<Path>>(
        file: Option<P>,
        pos: ast::AstPos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.as_ref().to_path_buf()),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

/// Where a [`Definition`](crate::definition::Definition) was declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    /// Declared in a source string or file handed to the registry.
    Source(FilePosition),

    /// Built without any source text to point back to.
    Unknown,
}
impl SourceLocation {
    pub(crate) fn from_ast_position(
        file_path: Option<&Path>,
        pos: &ast::AstPos,
    ) -> Self {
        Self::Source(FilePosition::from_pos(file_path, *pos))
    }

    pub fn file_position(&self) -> Option<&FilePosition> {
        match self {
            Self::Source(pos) => Some(pos),
            Self::Unknown => None,
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(pos) => write!(f, "{pos}"),
            Self::Unknown => write!(f, "<unknown>"),
        }
    }
}
