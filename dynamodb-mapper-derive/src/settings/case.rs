use itertools::Itertools;

/// How `#[dynamo(rename_all = "...")]` turns a snake_case field name into an
/// attribute name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameRule {
    CamelCase,
    PascalCase,
    SnakeCase,
    KebabCase,
    ScreamingSnakeCase,
}

impl RenameRule {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "snake_case" => Some(Self::SnakeCase),
            "kebab-case" => Some(Self::KebabCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            _ => None,
        }
    }

    pub(crate) fn apply(self, field: &str) -> String {
        let mut words = field.split('_').filter(|word| !word.is_empty());

        match self {
            Self::CamelCase => words
                .enumerate()
                .map(|(i, word)| {
                    if i == 0 {
                        word.to_string()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
            Self::PascalCase => words.map(capitalize).collect(),
            Self::SnakeCase => words.join("_"),
            Self::KebabCase => words.join("-"),
            Self::ScreamingSnakeCase => words.map(str::to_uppercase).join("_"),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
