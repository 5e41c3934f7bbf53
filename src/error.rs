use std::fmt;

/// The main error type for outlining manifests.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineError {
    /// The parser handed over a tree missing something it promised,
    /// such as a resource title or a parameter list.
    StructuralViolation {
        message: String,
        unit: Option<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when the manifest parser rejects a file.
    ParseError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    ConfigError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    RuntimeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl OutlineError {
    pub(crate) fn structural(message: impl Into<String>, code: u32) -> Self {
        OutlineError::StructuralViolation {
            message: message.into(),
            unit: None,
            hint: Some("The manifest parser produced an incomplete tree".into()),
            code: Some(code),
        }
    }

    /// Attach the class or node being outlined, unless one is already set.
    pub(crate) fn in_unit(self, name: &str) -> Self {
        match self {
            OutlineError::StructuralViolation { message, unit: None, hint, code } => {
                OutlineError::StructuralViolation {
                    message,
                    unit: Some(name.to_string()),
                    hint,
                    code,
                }
            }
            other => other,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            OutlineError::StructuralViolation { code, .. }
            | OutlineError::FileError { code, .. }
            | OutlineError::ParseError { code, .. }
            | OutlineError::ConfigError { code, .. }
            | OutlineError::RuntimeError { code, .. } => *code,
        }
    }
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineError::StructuralViolation { message, unit, hint, code } =>
                write!(f, "[OUTLINE] Structural Violation{}: {}{}{}",
                    unit.as_ref().map_or(String::new(), |u| format!(" in '{}'", u)),
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            OutlineError::FileError { message, path, hint, code } =>
                write!(f, "[OUTLINE] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            OutlineError::ParseError { message, path, hint, code } =>
                write!(f, "[OUTLINE] Error while parsing '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            OutlineError::ConfigError { message, hint, code } =>
                write!(f, "[OUTLINE] Config Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            OutlineError::RuntimeError { message, hint, code } =>
                write!(f, "[OUTLINE] Runtime Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for OutlineError {}
