use crate::{
    environment::prelude::{
        array_items, as_number, format_number, from_bool, is_truthy, render,
        split_items, truncate, Environment
    },
    parser::prelude::{
        ArrayIndex, ArrayLiteral, BinaryExpr, Block, ForLoop, ForeachLoop,
        FunctionCall, FunctionDecl, Node, WhileLoop
    },
    utils::prelude::{SourceWarningEmitter, SrcSpan}
};
use super::{
    error::{runtime_error, RuntimeError, RuntimeErrorType, RuntimeWarning},
    io::ProgramIO
};

/// Value produced by a `return`, carried up until a function body or the
/// program ends.
type PendingReturn = Option<String>;

pub struct Interpreter<IO: ProgramIO> {
    env: Environment,
    io: IO,
    warnings: SourceWarningEmitter,
}

impl<IO: ProgramIO> Interpreter<IO> {
    pub fn new(io: IO) -> Self {
        Self {
            env: Environment::new(),
            io,
            warnings: SourceWarningEmitter::null(),
        }
    }

    pub fn with_warnings(mut self, warnings: SourceWarningEmitter) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn into_io(self) -> IO {
        self.io
    }

    /// Bodies registered for `event`, in registration order.
    pub fn listeners(&self, event: &str) -> &[Block] {
        self.env.listeners(event)
    }

    /// Runs every statement of `program`. A top level `return` stops the
    /// program and its value is handed back.
    pub fn execute(&mut self, program: &Block) -> Result<Option<String>, RuntimeError> {
        let mut pending = None;

        self.execute_block(program, &mut pending)?;

        Ok(pending)
    }

    pub fn evaluate(&mut self, node: &Node) -> Result<String, RuntimeError> {
        match node {
            Node::Number(number) => Ok(format_number(number.value)),
            Node::String(string) => Ok(string.value.clone()),
            Node::Identifier(identifier) => {
                if !self.env.is_defined(&identifier.value) {
                    tracing::trace!(variable = %identifier.value, "reading undefined variable");
                }

                Ok(self.env.get(&identifier.value).to_string())
            },
            Node::Binary(binary) => self.evaluate_binary(binary),
            Node::FunctionCall(call) => self.call_function(call),
            Node::ArrayLiteral(array) => self.evaluate_array(array),
            Node::ArrayIndex(index) => self.evaluate_index(index),
            _ => runtime_error(RuntimeErrorType::NotAnExpression, node.location()),
        }
    }

    fn execute_block(&mut self, block: &Block, pending: &mut PendingReturn) -> Result<(), RuntimeError> {
        for statement in &block.statements {
            self.execute_statement(statement, pending)?;

            if pending.is_some() {
                break;
            }
        }

        Ok(())
    }

    fn execute_statement(&mut self, statement: &Node, pending: &mut PendingReturn) -> Result<(), RuntimeError> {
        match statement {
            Node::Block(block) => self.execute_block(block, pending)?,
            Node::Assignment(assignment) => {
                let value = self.evaluate(&assignment.value)?;
                self.env.set(assignment.identifier.value.as_str(), value);
            },
            Node::Print(print) => {
                let value = self.evaluate(&print.expression)?;
                self.io.print_line(&render(&value))
                    .map_err(|err| io_error(err, print.location))?;
            },
            Node::Input(input) => {
                let line = self.io.read_line()
                    .map_err(|err| io_error(err, input.location))?
                    .unwrap_or_default();

                self.env.set(input.identifier.value.as_str(), line);
            },
            Node::FunctionDecl(declaration) => {
                tracing::debug!(
                    function = %declaration.identifier.value,
                    parameters = declaration.parameters.len(),
                    "declaring function"
                );

                self.env.declare_function(declaration.clone());
            },
            Node::Return(ret) => {
                *pending = Some(self.evaluate(&ret.expression)?);
            },
            Node::ForeachLoop(foreach) => self.execute_foreach(foreach, pending)?,
            Node::ForLoop(for_loop) => self.execute_for(for_loop, pending)?,
            Node::WhileLoop(while_loop) => self.execute_while(while_loop, pending)?,
            Node::EventListener(listener) => {
                tracing::info!(event = %listener.event.value, "registering event listener");

                self.env.register_listener(listener.event.value.as_str(), listener.body.clone());
            },
            Node::NpcAction(npc) => {
                tracing::info!(npc = %npc.npc.value, action = %npc.action.value, "npc action");

                self.io.npc_action(&npc.npc.value, &npc.action.value)
                    .map_err(|err| io_error(err, npc.location))?;
            },
            Node::Binary(_)
            | Node::Identifier(_)
            | Node::Number(_)
            | Node::String(_)
            | Node::FunctionCall(_)
            | Node::ArrayLiteral(_)
            | Node::ArrayIndex(_) => {
                let _ = self.evaluate(statement)?;
            },
        }

        Ok(())
    }

    fn execute_foreach(&mut self, foreach: &ForeachLoop, pending: &mut PendingReturn) -> Result<(), RuntimeError> {
        let collection = self.evaluate(&foreach.collection)?;

        for item in split_items(&collection) {
            self.env.set(foreach.identifier.value.as_str(), item.to_string());
            self.execute_block(&foreach.body, pending)?;

            if pending.is_some() {
                break;
            }
        }

        Ok(())
    }

    fn execute_for(&mut self, for_loop: &ForLoop, pending: &mut PendingReturn) -> Result<(), RuntimeError> {
        let lower = self.evaluate(&for_loop.lower)?;
        let upper = self.evaluate(&for_loop.upper)?;

        let (Some(from), Some(to)) = (truncate(&lower), truncate(&upper)) else {
            tracing::warn!(
                variable = %for_loop.identifier.value,
                %lower,
                %upper,
                "invalid for loop bounds, skipping loop"
            );

            self.warnings.emit_runtime(RuntimeWarning::InvalidLoopBounds {
                location: for_loop.location,
                lower,
                upper,
            });

            return Ok(());
        };

        for counter in from..=to {
            self.env.set(for_loop.identifier.value.as_str(), counter.to_string());
            self.execute_block(&for_loop.body, pending)?;

            if pending.is_some() {
                break;
            }
        }

        Ok(())
    }

    fn execute_while(&mut self, while_loop: &WhileLoop, pending: &mut PendingReturn) -> Result<(), RuntimeError> {
        while is_truthy(&self.evaluate(&while_loop.condition)?) {
            self.execute_block(&while_loop.body, pending)?;

            if pending.is_some() {
                break;
            }
        }

        Ok(())
    }

    fn evaluate_binary(&mut self, binary: &BinaryExpr) -> Result<String, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = binary.operator.as_str();

        let (Some(lhs), Some(rhs)) = (as_number(&left), as_number(&right)) else {
            if operator == "+" {
                return Ok(left + &right);
            }

            return runtime_error(
                RuntimeErrorType::InvalidOperands {
                    operator: binary.operator.clone(),
                    left,
                    right,
                },
                binary.location
            );
        };

        let value = match operator {
            "+" => format_number(lhs + rhs),
            "-" => format_number(lhs - rhs),
            "*" => format_number(lhs * rhs),
            "/" => {
                if rhs == 0.0 {
                    return runtime_error(RuntimeErrorType::DivisionByZero, binary.location);
                }

                format_number(lhs / rhs)
            },
            "<" => from_bool(lhs < rhs),
            ">" => from_bool(lhs > rhs),
            "<=" => from_bool(lhs <= rhs),
            ">=" => from_bool(lhs >= rhs),
            // numeric text is never "true", so both always yield "false"
            "and" => from_bool(is_truthy(&left) && is_truthy(&right)),
            "or" => from_bool(is_truthy(&left) || is_truthy(&right)),
            _ => return runtime_error(
                RuntimeErrorType::UnknownOperator { operator: binary.operator.clone() },
                binary.location
            ),
        };

        Ok(value)
    }

    fn call_function(&mut self, call: &FunctionCall) -> Result<String, RuntimeError> {
        let name = &call.identifier.value;

        let Some(function) = self.env.function(name) else {
            return runtime_error(
                RuntimeErrorType::FunctionNotFound { name: name.clone() },
                call.location
            );
        };

        if function.parameters.len() != call.arguments.len() {
            return runtime_error(
                RuntimeErrorType::ArgumentCountMismatch {
                    name: name.clone(),
                    expected: function.parameters.len(),
                    found: call.arguments.len(),
                },
                call.location
            );
        }

        tracing::debug!(function = %name, arguments = call.arguments.len(), "calling function");

        let checkpoint = self.env.checkpoint();
        let result = self.run_function(&function, call);
        self.env.restore(checkpoint);

        result
    }

    /// Arguments are bound one after another, so a later argument already
    /// sees the parameters bound before it.
    fn run_function(&mut self, function: &FunctionDecl, call: &FunctionCall) -> Result<String, RuntimeError> {
        for (parameter, argument) in function.parameters.iter().zip(&call.arguments) {
            let value = self.evaluate(argument)?;
            self.env.set(parameter.value.as_str(), value);
        }

        let mut pending = None;
        self.execute_block(&function.body, &mut pending)?;

        Ok(pending.unwrap_or_default())
    }

    fn evaluate_array(&mut self, array: &ArrayLiteral) -> Result<String, RuntimeError> {
        let mut elements = Vec::with_capacity(array.elements.len());

        for element in &array.elements {
            elements.push(render(&self.evaluate(element)?));
        }

        Ok(elements.join(","))
    }

    fn evaluate_index(&mut self, index: &ArrayIndex) -> Result<String, RuntimeError> {
        let name = &index.identifier.value;
        let position = self.evaluate(&index.index)?;

        let Some(offset) = truncate(&position) else {
            return runtime_error(RuntimeErrorType::InvalidIndex { index: position }, index.location);
        };

        let Some(items) = array_items(self.env.get(name)) else {
            return runtime_error(RuntimeErrorType::NotAnArray { name: name.clone() }, index.location);
        };

        match usize::try_from(offset).ok().and_then(|offset| items.get(offset)) {
            Some(item) => Ok(item.to_string()),
            None => runtime_error(
                RuntimeErrorType::IndexOutOfBounds {
                    name: name.clone(),
                    index: offset.to_string(),
                    length: items.len(),
                },
                index.location
            ),
        }
    }
}

fn io_error(err: std::io::Error, location: SrcSpan) -> RuntimeError {
    RuntimeError {
        error: RuntimeErrorType::Io { kind: err.kind() },
        location,
    }
}
