// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// The main error type for NDF parsing, preprocessing and document access.
///
/// The scanner and the writer never fail; everything here comes from the
/// macro preprocessor, the nesting guard, typed access or file I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum NdfError {
    /// Raised when block nesting goes deeper than `ParseOptions::max_depth`.
    NestingTooDeep {
        depth: usize,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a `@PP.Replace` instantiation does not define every declared variable.
    MissingVariable {
        variable: String,
        directive: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl NdfError {
    pub(crate) fn type_error(message: String, hint: &str, code: u32) -> Self {
        NdfError::TypeError {
            message,
            path: String::new(),
            hint: Some(hint.into()),
            code: Some(code),
        }
    }

    pub(crate) fn file_error(message: String, path: String, code: u32) -> Self {
        NdfError::FileError {
            message,
            path,
            hint: Some("Check file path and permissions".into()),
            code: Some(code),
        }
    }

    /// Numeric error code, if one was attached.
    pub fn code(&self) -> Option<u32> {
        match self {
            NdfError::NestingTooDeep { code, .. }
            | NdfError::MissingVariable { code, .. }
            | NdfError::PathNotFound { code, .. }
            | NdfError::TypeError { code, .. }
            | NdfError::FileError { code, .. } => *code,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h))
}

fn code_suffix(code: &Option<u32>) -> String {
    code.map_or(String::new(), |c| format!(" Code: {}", c))
}

impl fmt::Display for NdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NdfError::NestingTooDeep { depth, line, column, hint, code } =>
                write!(f, "[NDF] Nesting deeper than {} blocks at {}:{}{}{}",
                    depth, line, column,
                    hint_suffix(hint),
                    code_suffix(code)
                ),
            NdfError::MissingVariable { variable, directive, hint, code } =>
                write!(f, "[NDF] Preprocessor directive '{}' is missing variable '{}'{}{}",
                    directive, variable,
                    hint_suffix(hint),
                    code_suffix(code)
                ),
            NdfError::PathNotFound { path, hint, code } =>
                write!(f, "[NDF] Path '{}' not found{}{}",
                    path,
                    hint_suffix(hint),
                    code_suffix(code)
                ),
            NdfError::TypeError { message, path, hint, code } => {
                if path.is_empty() {
                    write!(f, "[NDF] Type Error: {}{}{}",
                        message,
                        hint_suffix(hint),
                        code_suffix(code)
                    )
                } else {
                    write!(f, "[NDF] Type Error at '{}': {}{}{}",
                        path, message,
                        hint_suffix(hint),
                        code_suffix(code)
                    )
                }
            }
            NdfError::FileError { message, path, hint, code } =>
                write!(f, "[NDF] File Error '{}': {}{}{}",
                    path, message,
                    hint_suffix(hint),
                    code_suffix(code)
                ),
        }
    }
}

impl std::error::Error for NdfError {}
