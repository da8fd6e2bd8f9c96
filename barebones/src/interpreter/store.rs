use std::collections::BTreeMap;

use crate::error::RuntimeError;
use crate::ir::ast::Operand;

/// Значения переменных; имена упорядочены, чтобы вывод был стабильным
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    values: BTreeMap<String, i64>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Чтение переменной, которую ни разу не записывали, - ошибка программы
    pub fn read(&self, name: &str) -> Result<i64, RuntimeError> {
        self.get(name).ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })
    }

    pub fn resolve(&self, operand: &Operand) -> Result<i64, RuntimeError> {
        match operand {
            Operand::Literal(value) => Ok(*value),
            Operand::Variable(name) => self.read(name),
        }
    }

    pub fn set(&mut self, name: &str, value: i64) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
