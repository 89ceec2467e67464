use crate::expression::Expr;
use crate::{Instruction, Value};
use std::rc::Rc;

/// Iterator over instructions that supports splicing sub-sequences in front
/// of whatever is currently running. Branch and loop bodies execute through
/// this instead of a recursive interpreter: the dispatcher pushes the body
/// and keeps consuming one flat stream.
///
/// Frames are a stack, so a spliced sequence fully drains before the
/// sequence that was active when it was inserted resumes, and nested loops
/// each keep their own cursor.
#[derive(Debug, Default)]
pub struct CodeStream {
    frames: Vec<Frame>,
}

#[derive(Debug)]
enum Frame {
    Seq {
        code: Rc<[Instruction]>,
        pc: usize,
    },
    Loop {
        var: String,
        elements: std::vec::IntoIter<Value>,
        body: Rc<[Instruction]>,
    },
}

impl CodeStream {
    pub fn new(code: Rc<[Instruction]>) -> Self {
        CodeStream {
            frames: vec![Frame::Seq { code, pc: 0 }],
        }
    }

    /// Run `body` to completion before resuming the current sequence.
    pub fn splice(&mut self, body: Rc<[Instruction]>) {
        self.frames.push(Frame::Seq { code: body, pc: 0 });
    }

    /// Run `body` once per element, binding `var` to the element first.
    pub fn activate_loop(&mut self, var: String, elements: Vec<Value>, body: Rc<[Instruction]>) {
        self.frames.push(Frame::Loop {
            var,
            elements: elements.into_iter(),
            body,
        });
    }
}

impl Iterator for CodeStream {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        loop {
            match self.frames.last_mut()? {
                Frame::Seq { code, pc } => {
                    if *pc < code.len() {
                        let instruction = code[*pc].clone();
                        *pc += 1;
                        return Some(instruction);
                    }
                    self.frames.pop();
                }
                Frame::Loop { var, elements, body } => match elements.next() {
                    Some(element) => {
                        let bind = Instruction::Update(var.clone(), Expr::Value(element));
                        let body = body.clone();
                        self.frames.push(Frame::Seq { code: body, pc: 0 });
                        return Some(bind);
                    }
                    None => {
                        self.frames.pop();
                    }
                },
            }
        }
    }
}
