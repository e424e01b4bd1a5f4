use std::fmt;

/// Non-fatal issues found while resolving asset patterns.
/// These never stop a release but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveWarning {
    /// A negated glob alone in its group; it would select almost every file
    LoneNegatedPattern { pattern: String },
    /// A pattern group that selected none of the modified files
    UnmatchedPattern { patterns: Vec<String> },
    /// A glob that failed to compile and was compared literally instead
    InvalidGlob { pattern: String, reason: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::LoneNegatedPattern { pattern } => {
                write!(
                    f,
                    "Skipping negated glob '{}': it is alone in its group and would select every other file",
                    pattern
                )
            }
            ResolveWarning::UnmatchedPattern { patterns } => {
                write!(f, "Pattern '{}' matched no modified files", patterns.join(", "))
            }
            ResolveWarning::InvalidGlob { pattern, reason } => {
                write!(
                    f,
                    "Invalid glob '{}' ({}), matching it as a literal path",
                    pattern, reason
                )
            }
        }
    }
}
