use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("SyntaxError in line {line}: '{statement};'")]
    SyntaxError { line: usize, statement: String },

    /// Только в строгом режиме: блок `while` без `end`
    #[error("Block opened at line {line} is never closed with 'end'")]
    UnterminatedBlock { line: usize },

    /// Только в строгом режиме: `end` вне блока
    #[error("Unexpected 'end' at line {line} outside of any block")]
    UnexpectedEnd { line: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Variable '{name}' is read before it was ever cleared")]
    UndefinedVariable { name: String },

    #[error("Operation '{kind}' is reserved but not implemented")]
    NotImplementedOperation { kind: &'static str },
}
