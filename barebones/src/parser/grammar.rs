use crate::ir::ast::ConditionKind;
use super::lexer::{Token, TokenKind};

/// Что строит правило после совпадения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Operation,
    Control(ConditionKind),
    End,
}

#[derive(Debug)]
pub struct Rule {
    pub pattern: &'static [TokenKind],
    /// Позиция главного токена (оператор или управляющее слово)
    pub main: usize,
    pub production: Production,
}

impl Rule {
    pub fn matches(&self, tokens: &[Token<'_>]) -> bool {
        self.pattern.len() == tokens.len()
            && self.pattern.iter().zip(tokens).all(|(kind, token)| *kind == token.kind)
    }
}

///   UOPERATOR VARIABLE                  incr x
///   CONTROL VARIABLE NOT LITERAL DO     while x not 0 do
///   END                                 end
pub static RULES: &[Rule] = &[
    Rule {
        pattern: &[TokenKind::UnaryOp, TokenKind::Variable],
        main: 0,
        production: Production::Operation,
    },
    Rule {
        pattern: &[
            TokenKind::Control,
            TokenKind::Variable,
            TokenKind::Not,
            TokenKind::Literal,
            TokenKind::Do,
        ],
        main: 0,
        production: Production::Control(ConditionKind::NotEqual),
    },
    Rule {
        pattern: &[TokenKind::End],
        main: 0,
        production: Production::End,
    },
];

/// Первое правило, совпавшее целиком
pub fn lookup(tokens: &[Token<'_>]) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(tokens))
}
