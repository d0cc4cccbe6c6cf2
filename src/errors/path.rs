use std::{collections::VecDeque, fmt};

/// Location of a value inside a document, e.g. `nestedMap.a.nestedList[2]`.
///
/// Paths are built inside out: the innermost conversion fails with an empty path and
/// every enclosing list, map or record prepends its own segment while the error
/// propagates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath(VecDeque<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
    Key(String),
}

impl AttributePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.0.iter()
    }

    pub(crate) fn push_front(&mut self, segment: PathSegment) {
        self.0.push_front(segment);
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<document>");
        }

        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name) | PathSegment::Key(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
            }
        }

        Ok(())
    }
}
