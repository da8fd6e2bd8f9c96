use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Идентификаторы и литералы
    Variable,
    Literal,
    // Ключевые слова
    UnaryOp,  // clear, incr, decr
    Control,  // while
    Not,      // not
    Do,       // do
    End,      // end
    // Зарезервировано под add/sub/mul/div, классификатор его не выдаёт
    BinaryOp,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Variable => "VARIABLE",
            TokenKind::Literal => "LITERAL",
            TokenKind::UnaryOp => "UOPERATOR",
            TokenKind::Control => "CONTROL",
            TokenKind::Not => "NOT",
            TokenKind::Do => "DO",
            TokenKind::End => "END",
            TokenKind::BinaryOp => "BOPERATOR",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

/// Категория одного слова: сначала ключевые слова, потом число, иначе переменная
pub fn classify(word: &str) -> TokenKind {
    match word {
        "clear" | "incr" | "decr" => TokenKind::UnaryOp,
        "while" => TokenKind::Control,
        "not" => TokenKind::Not,
        "do" => TokenKind::Do,
        "end" => TokenKind::End,
        _ if word.parse::<i64>().is_ok() => TokenKind::Literal,
        _ => TokenKind::Variable,
    }
}

/// Разделитель токенов - ровно один пробел, лишние пробелы дают пустые слова
pub fn tokenize(statement: &str) -> Vec<Token<'_>> {
    statement
        .split(' ')
        .map(|text| Token { kind: classify(text), text })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keywords_are_checked_first() {
        assert_eq!(classify("clear"), TokenKind::UnaryOp);
        assert_eq!(classify("incr"), TokenKind::UnaryOp);
        assert_eq!(classify("decr"), TokenKind::UnaryOp);
        assert_eq!(classify("while"), TokenKind::Control);
        assert_eq!(classify("not"), TokenKind::Not);
        assert_eq!(classify("do"), TokenKind::Do);
        assert_eq!(classify("end"), TokenKind::End);
    }

    #[test]
    fn numbers_and_names() {
        assert_eq!(classify("0"), TokenKind::Literal);
        assert_eq!(classify("-12"), TokenKind::Literal);
        assert_eq!(classify("+5"), TokenKind::Literal);
        assert_eq!(classify("x"), TokenKind::Variable);
        assert_eq!(classify("While"), TokenKind::Variable);
        assert_eq!(classify("1a"), TokenKind::Variable);
        assert_eq!(classify(""), TokenKind::Variable);
    }

    #[test]
    fn tokenize_keeps_text() {
        let kinds: Vec<_> = tokenize("while x not 0 do").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Control, TokenKind::Variable, TokenKind::Not, TokenKind::Literal, TokenKind::Do]
        );
        assert_eq!(tokenize("incr x")[1].text, "x");
    }

    #[test]
    fn double_space_yields_empty_word() {
        let tokens = tokenize("incr  x");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token { kind: TokenKind::Variable, text: "" });
    }
}
