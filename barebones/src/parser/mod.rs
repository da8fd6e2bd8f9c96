pub mod grammar;
pub mod lexer;
pub mod parser;

use crate::error::CompileError;
use crate::ir::ast;

pub use parser::Compiler;

/// Главная функция компилятора - из текста в AST
pub fn compile(source: &str) -> Result<ast::AstNode, CompileError> {
    Compiler::new(source).compile()
}

/// Подготовка файла как в исходном загрузчике: убираем отступы по 4 пробела
/// и склеиваем строки без разделителя, переводы строк токенами не считаются
pub fn prepare_source(text: &str) -> String {
    text.lines().map(|line| line.replace("    ", "")).collect()
}
