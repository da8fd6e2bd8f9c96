pub mod store;

use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::ir::ast::{AstNode, Condition, Operation};

pub use store::Store;

/// Снимок после каждого шага: строка, вход в итерацию цикла, значения переменных
#[derive(Debug, Clone, Copy)]
pub struct TraceEvent<'a> {
    pub line: usize,
    pub looping: bool,
    pub store: &'a Store,
}

pub trait Observer {
    fn observe(&mut self, event: &TraceEvent<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&TraceEvent<'_>),
{
    fn observe(&mut self, event: &TraceEvent<'_>) {
        self(event)
    }
}

/// Обход дерева в прямом порядке; узел-условие повторяет детей, пока условие истинно
pub struct Interpreter<'o> {
    store: Store,
    observer: Option<&'o mut dyn Observer>,
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> Interpreter<'o> {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            observer: None,
        }
    }

    pub fn with_observer(observer: &'o mut dyn Observer) -> Self {
        Self {
            store: Store::new(),
            observer: Some(observer),
        }
    }

    /// После ошибки здесь остаются все изменения, сделанные до неё
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    pub fn execute(&mut self, node: &mut AstNode) -> Result<(), RuntimeError> {
        match node {
            AstNode::Condition { line, condition, children } => {
                let line = *line;
                while self.test(condition)? {
                    trace!(line, "condition passed, looping inside");
                    self.notify(line, true);
                    for child in children.iter_mut() {
                        self.execute(child)?;
                    }
                }
                self.notify(line, false);
            }
            AstNode::Operator { line, operation } => {
                self.apply(operation)?;
                trace!(line = *line, kind = operation.kind(), target = operation.target(), "applied");
                self.notify(*line, false);
            }
        }
        Ok(())
    }

    fn test(&self, condition: &mut Condition) -> Result<bool, RuntimeError> {
        if let Condition::Once { fired } = condition {
            return Ok(!std::mem::replace(fired, true));
        }

        let Some((lhs, rhs)) = condition.operands() else {
            return Ok(false);
        };
        // Операнды перечитываются при каждой проверке
        let (lhs, rhs) = (self.store.resolve(lhs)?, self.store.resolve(rhs)?);

        Ok(match condition {
            Condition::Equal(..) => lhs == rhs,
            Condition::NotEqual(..) => lhs != rhs,
            Condition::GreaterThan(..) => lhs > rhs,
            Condition::LessThan(..) => lhs < rhs,
            Condition::Once { .. } => false,
        })
    }

    fn apply(&mut self, operation: &Operation) -> Result<(), RuntimeError> {
        match operation {
            Operation::Clear(target) => self.store.set(target, 0),
            Operation::Increment(target) => {
                let value = self.store.read(target)?;
                self.store.set(target, value.wrapping_add(1));
            }
            Operation::Decrement(target) => {
                let value = self.store.read(target)?;
                self.store.set(target, value.wrapping_sub(1));
            }
            Operation::Add(..)
            | Operation::Subtract(..)
            | Operation::Multiply(..)
            | Operation::Divide(..) => {
                return Err(RuntimeError::NotImplementedOperation { kind: operation.kind() });
            }
        }
        Ok(())
    }

    fn notify(&mut self, line: usize, looping: bool) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.observe(&TraceEvent { line, looping, store: &self.store });
        }
    }
}

/// Выполняет скомпилированную программу и возвращает итоговые значения
pub fn run(mut root: AstNode, observer: Option<&mut dyn Observer>) -> Result<Store, RuntimeError> {
    let mut interpreter = match observer {
        Some(observer) => Interpreter::with_observer(observer),
        None => Interpreter::new(),
    };
    interpreter.execute(&mut root)?;
    debug!(variables = interpreter.store().len(), "program finished");
    Ok(interpreter.into_store())
}
