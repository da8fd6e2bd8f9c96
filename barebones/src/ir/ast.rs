/// Узел дерева: либо условие с телом, либо одна операция
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Корень программы или тело цикла while
    Condition {
        line: usize,
        condition: Condition,
        children: Vec<AstNode>,
    },
    /// clear x, incr x, decr x
    Operator {
        line: usize,
        operation: Operation,
    },
}

impl AstNode {
    /// Синтетический корень: условие Once, строка 0
    pub fn root(children: Vec<AstNode>) -> Self {
        AstNode::Condition {
            line: 0,
            condition: Condition::once(),
            children,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            AstNode::Condition { line, .. } | AstNode::Operator { line, .. } => *line,
        }
    }

    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Condition { children, .. } => children,
            AstNode::Operator { .. } => &[],
        }
    }
}

/// Операнд условия, определяется один раз при компиляции
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Variable(String),
}

impl Operand {
    pub fn parse(text: &str) -> Self {
        match text.parse::<i64>() {
            Ok(value) => Operand::Literal(value),
            Err(_) => Operand::Variable(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Истинно только при первой проверке
    Once { fired: bool },
    /// x == 5
    Equal(Operand, Operand),
    /// x != 5
    NotEqual(Operand, Operand),
    /// x > 5
    GreaterThan(Operand, Operand),
    /// x < 5
    LessThan(Operand, Operand),
}

impl Condition {
    pub fn once() -> Self {
        Condition::Once { fired: false }
    }

    /// Операнды сравнения; у Once их нет
    pub fn operands(&self) -> Option<(&Operand, &Operand)> {
        match self {
            Condition::Once { .. } => None,
            Condition::Equal(lhs, rhs)
            | Condition::NotEqual(lhs, rhs)
            | Condition::GreaterThan(lhs, rhs)
            | Condition::LessThan(lhs, rhs) => Some((lhs, rhs)),
        }
    }
}

/// Вид сравнения, который правило грамматики подставляет в условие
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl ConditionKind {
    pub fn build(self, lhs: &str, rhs: &str) -> Condition {
        let (lhs, rhs) = (Operand::parse(lhs), Operand::parse(rhs));
        match self {
            Self::Equal => Condition::Equal(lhs, rhs),
            Self::NotEqual => Condition::NotEqual(lhs, rhs),
            Self::GreaterThan => Condition::GreaterThan(lhs, rhs),
            Self::LessThan => Condition::LessThan(lhs, rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// clear x - создаёт переменную со значением 0
    Clear(String),
    /// incr x
    Increment(String),
    /// decr x
    Decrement(String),
    // Зарезервированы, ни одно правило грамматики их пока не порождает
    Add(String, Operand),
    Subtract(String, Operand),
    Multiply(String, Operand),
    Divide(String, Operand),
}

impl Operation {
    /// Унарная операция по ключевому слову
    pub fn unary(keyword: &str, target: &str) -> Option<Self> {
        let target = target.to_string();
        match keyword {
            "clear" => Some(Operation::Clear(target)),
            "incr" => Some(Operation::Increment(target)),
            "decr" => Some(Operation::Decrement(target)),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Clear(_) => "clear",
            Operation::Increment(_) => "incr",
            Operation::Decrement(_) => "decr",
            Operation::Add(..) => "add",
            Operation::Subtract(..) => "sub",
            Operation::Multiply(..) => "mul",
            Operation::Divide(..) => "div",
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Operation::Clear(target)
            | Operation::Increment(target)
            | Operation::Decrement(target)
            | Operation::Add(target, _)
            | Operation::Subtract(target, _)
            | Operation::Multiply(target, _)
            | Operation::Divide(target, _) => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn operand_resolves_literal_or_variable() {
        assert_eq!(Operand::parse("42"), Operand::Literal(42));
        assert_eq!(Operand::parse("-3"), Operand::Literal(-3));
        assert_eq!(Operand::parse("+7"), Operand::Literal(7));
        assert_eq!(Operand::parse("x1"), Operand::Variable("x1".to_string()));
    }

    #[test]
    fn condition_kind_builds_matching_variant() {
        assert_eq!(
            ConditionKind::LessThan.build("x", "10"),
            Condition::LessThan(Operand::Variable("x".into()), Operand::Literal(10))
        );
        assert_eq!(
            ConditionKind::Equal.build("1", "y"),
            Condition::Equal(Operand::Literal(1), Operand::Variable("y".into()))
        );
        assert!(Condition::once().operands().is_none());
    }

    #[test]
    fn unary_keywords_map_to_operations() {
        assert_eq!(Operation::unary("incr", "x"), Some(Operation::Increment("x".into())));
        assert_eq!(Operation::unary("decr", "x"), Some(Operation::Decrement("x".into())));
        assert_eq!(Operation::unary("clear", "x"), Some(Operation::Clear("x".into())));
        assert_eq!(Operation::unary("while", "x"), None);
    }

    #[test]
    fn root_is_once_at_line_zero() {
        let root = AstNode::root(vec![AstNode::Operator {
            line: 1,
            operation: Operation::Clear("x".into()),
        }]);
        assert_eq!(root.line(), 0);
        assert_eq!(root.children().len(), 1);
        assert!(matches!(root, AstNode::Condition { condition: Condition::Once { fired: false }, .. }));
        assert!(root.children()[0].children().is_empty());
    }
}
