use tracing::{debug, warn};

use crate::error::CompileError;
use crate::ir::ast::{AstNode, Operation};
use super::grammar::{self, Production};
use super::lexer;

/// Чем закончился разбор блока
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEnd {
    /// Встретили `end`; `consumed` включает сам `end`
    Closed { consumed: usize },
    /// Строки закончились раньше `end`
    Exhausted,
}

pub struct Compiler<'src> {
    statements: Vec<&'src str>,
    strict: bool,
}

impl<'src> Compiler<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            statements: source.split(';').collect(),
            strict: false,
        }
    }

    /// В строгом режиме незакрытый блок и лишний `end` - ошибки
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn statements(&self) -> &[&'src str] {
        &self.statements
    }

    pub fn compile(&self) -> Result<AstNode, CompileError> {
        let mut body = Vec::new();

        if let BlockEnd::Closed { consumed } = self.parse_block(&mut body, 0)? {
            let line = consumed;
            if self.strict {
                return Err(CompileError::UnexpectedEnd { line });
            }
            warn!(line, "'end' outside of any block, ignoring the rest of the program");
        }

        Ok(AstNode::root(body))
    }

    fn parse_block(&self, body: &mut Vec<AstNode>, start: usize) -> Result<BlockEnd, CompileError> {
        let mut position = start;

        while position < self.statements.len() {
            let statement = self.statements[position];
            let line = position + 1;

            // Пустая строка, например после последней ';'
            if statement.is_empty() {
                position += 1;
                continue;
            }

            let tokens = lexer::tokenize(statement);
            let rule = grammar::lookup(&tokens).ok_or_else(|| CompileError::SyntaxError {
                line,
                statement: statement.to_string(),
            })?;
            let main = tokens[rule.main];

            match rule.production {
                Production::Operation => {
                    let operation = Operation::unary(main.text, tokens[1].text).ok_or_else(|| {
                        CompileError::SyntaxError { line, statement: statement.to_string() }
                    })?;
                    debug!(line, kind = operation.kind(), target = operation.target(), "operation");
                    body.push(AstNode::Operator { line, operation });
                    position += 1;
                }
                Production::Control(kind) => {
                    let condition = kind.build(tokens[1].text, tokens[3].text);
                    debug!(line, ?condition, "block opened");

                    let mut children = Vec::new();
                    let end = self.parse_block(&mut children, position + 1)?;
                    body.push(AstNode::Condition { line, condition, children });

                    match end {
                        BlockEnd::Closed { consumed } => position += 1 + consumed,
                        BlockEnd::Exhausted => {
                            if self.strict {
                                return Err(CompileError::UnterminatedBlock { line });
                            }
                            warn!(line, "block is never closed with 'end', closing at end of input");
                            position = self.statements.len();
                        }
                    }
                }
                Production::End => {
                    debug!(line, "block closed");
                    return Ok(BlockEnd::Closed { consumed: position - start + 1 });
                }
            }
        }

        Ok(BlockEnd::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ast::{Condition, Operand};
    use pretty_assertions::assert_eq;

    fn op(line: usize, operation: Operation) -> AstNode {
        AstNode::Operator { line, operation }
    }

    #[test]
    fn flat_program() {
        let root = Compiler::new("clear x;incr x;decr x;").compile().unwrap();
        assert_eq!(
            root,
            AstNode::root(vec![
                op(1, Operation::Clear("x".into())),
                op(2, Operation::Increment("x".into())),
                op(3, Operation::Decrement("x".into())),
            ])
        );
    }

    #[test]
    fn nested_blocks_resume_after_end() {
        let source = "clear x;while x not 2 do;incr x;while y not 0 do;decr y;end;end;clear z;";
        let root = Compiler::new(source).compile().unwrap();
        let inner = AstNode::Condition {
            line: 4,
            condition: Condition::NotEqual(Operand::Variable("y".into()), Operand::Literal(0)),
            children: vec![op(5, Operation::Decrement("y".into()))],
        };
        let outer = AstNode::Condition {
            line: 2,
            condition: Condition::NotEqual(Operand::Variable("x".into()), Operand::Literal(2)),
            children: vec![op(3, Operation::Increment("x".into())), inner],
        };
        let expected = AstNode::root(vec![op(1, Operation::Clear("x".into())), outer, op(8, Operation::Clear("z".into()))]);
        assert_eq!(root, expected);
    }

    #[test]
    fn syntax_error_reports_absolute_line() {
        let err = Compiler::new("clear x;while x not 1 do;incr x;incr;end;").compile().unwrap_err();
        assert_eq!(err, CompileError::SyntaxError { line: 4, statement: "incr".into() });
    }

    #[test]
    fn empty_statement_still_counts_as_a_line() {
        let err = Compiler::new("clear x;;incr;").compile().unwrap_err();
        assert_eq!(err, CompileError::SyntaxError { line: 3, statement: "incr".into() });
    }

    #[test]
    fn empty_block() {
        let root = Compiler::new("while x not 0 do;end;").compile().unwrap();
        assert_eq!(root.children().len(), 1);
        assert!(root.children()[0].children().is_empty());
    }

    #[test]
    fn unterminated_block_is_lenient_by_default() {
        let root = Compiler::new("clear x;while x not 1 do;incr x;").compile().unwrap();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[1].children().len(), 1);
    }

    #[test]
    fn unterminated_block_in_strict_mode() {
        let err = Compiler::new("clear x;while x not 1 do;incr x;").strict(true).compile().unwrap_err();
        assert_eq!(err, CompileError::UnterminatedBlock { line: 2 });
    }

    #[test]
    fn top_level_end_stops_compilation() {
        let root = Compiler::new("clear x;end;incr x;").compile().unwrap();
        assert_eq!(root, AstNode::root(vec![op(1, Operation::Clear("x".into()))]));

        let err = Compiler::new("clear x;end;incr x;").strict(true).compile().unwrap_err();
        assert_eq!(err, CompileError::UnexpectedEnd { line: 2 });
    }

    #[test]
    fn irregular_spacing_is_not_normalized() {
        let err = Compiler::new("incr  x;").compile().unwrap_err();
        assert_eq!(err, CompileError::SyntaxError { line: 1, statement: "incr  x".into() });
    }
}
