//! Компилятор и интерпретатор языка Bare Bones:
//! `clear`, `incr`, `decr` и вложенные циклы `while x not 0 do; ... end;`

pub mod error;
pub mod interpreter;
pub mod ir;
pub mod parser;

pub use error::{CompileError, RuntimeError};
pub use interpreter::{Interpreter, Observer, Store, TraceEvent, run};
pub use ir::ast::AstNode;
pub use parser::{Compiler, compile, prepare_source};
